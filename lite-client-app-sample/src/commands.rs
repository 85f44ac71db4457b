//! LiteClientAppSample Subcommands
//!
//! This is where you specify the subcommands of your application.
//!
//! See the `impl Configurable` below for how to specify the path to the
//! application's configuration file.

mod start;
mod verify_transaction;
mod view_bps;
mod view_head;

use self::{
    start::StartCmd, verify_transaction::VerifyTransactionCmd, view_bps::ViewBpsCmd,
    view_head::ViewHeadCmd,
};
use crate::config::LiteClientAppSampleConfig;
use abscissa_core::{config::Override, Command, Configurable, FrameworkError, Runnable};
use std::path::PathBuf;

/// LiteClientAppSample Configuration Filename
pub const CONFIG_FILE: &str = "lite_client_app_sample.toml";

/// LiteClientAppSample Subcommands
/// Subcommands need to be listed in an enum.
#[derive(clap::Parser, Command, Debug, Runnable)]
pub enum LiteClientAppSampleCmd {
    /// Start a lite client instance and keep updating its head.
    Start(StartCmd),
    /// View the currently trusted head.
    ViewHead(ViewHeadCmd),
    /// View the cached block producers of a certain epoch.
    ViewBps(ViewBpsCmd),
    /// Verify a certain transaction against the trusted head.
    VerifyTransaction(VerifyTransactionCmd),
}

/// Entry point for the application. It needs to be a struct to allow using subcommands!
#[derive(clap::Parser, Command, Debug)]
#[command(author, about, version)]
pub struct EntryPoint {
    #[command(subcommand)]
    cmd: LiteClientAppSampleCmd,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Use the specified config file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Runnable for EntryPoint {
    fn run(&self) {
        self.cmd.run()
    }
}

/// This trait allows you to define how application configuration is loaded.
impl Configurable<LiteClientAppSampleConfig> for EntryPoint {
    /// Location of the configuration file
    fn config_path(&self) -> Option<PathBuf> {
        // Check if the config file exists, and if it does not, ignore it.
        // If you'd like for a missing configuration file to be a hard error
        // instead, always return `Some(CONFIG_FILE)` here.
        let filename = self
            .config
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| CONFIG_FILE.into());

        if filename.exists() {
            Some(filename)
        } else {
            None
        }
    }

    /// Apply changes to the config after it's been loaded, e.g. overriding
    /// values in a config file using command-line options.
    fn process_config(
        &self,
        config: LiteClientAppSampleConfig,
    ) -> Result<LiteClientAppSampleConfig, FrameworkError> {
        match &self.cmd {
            LiteClientAppSampleCmd::Start(cmd) => cmd.override_config(config),
            //
            // If you don't need special overrides for some
            // subcommands, you can just use a catch all
            _ => Ok(config),
        }
    }
}
