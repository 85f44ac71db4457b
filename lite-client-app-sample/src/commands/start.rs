//! `start` subcommand - start an instance of the lite client.

use std::{thread, time::Duration};

use crate::config::LiteClientAppSampleConfig;
use crate::rpc::NearRpcClient;
use crate::state::ClientStateStore;
/// App-local prelude includes `app_reader()`/`app_writer()`/`app_config()`
/// accessors along with logging macros. Customize as you see fit.
use crate::{info_with_time, prelude::*};
use abscissa_core::{config, Command, FrameworkError, Runnable};
use near_lite_client::{HeadVerdict, LiteClient, TrustedCheckpoint};

/// `start` subcommand
///
/// The `Parser` proc macro generates an option parser based on the struct
/// definition, and is defined in the `clap` crate. See their documentation
/// for a more comprehensive example:
///
/// <https://docs.rs/clap/>
#[derive(clap::Parser, Command, Debug)]
pub struct StartCmd {
    /// Override the RPC endpoint from the config file
    #[arg(long)]
    pub rpc_endpoint: Option<String>,
}

impl Runnable for StartCmd {
    /// Start the application.
    fn run(&self) {
        start_lite_client();
    }
}

impl config::Override<LiteClientAppSampleConfig> for StartCmd {
    // Process the given command line options, overriding settings from
    // a configuration file using explicit flags taken from command-line
    // arguments.
    fn override_config(
        &self,
        mut config: LiteClientAppSampleConfig,
    ) -> Result<LiteClientAppSampleConfig, FrameworkError> {
        if let Some(rpc_endpoint) = &self.rpc_endpoint {
            config.near_rpc.rpc_endpoint = rpc_endpoint.clone();
        }
        Ok(config)
    }
}

fn start_lite_client() {
    let config = APP.config();
    let rpc_client = NearRpcClient::new(config.near_rpc.rpc_endpoint.as_str());
    let state_store = ClientStateStore::new(config.state_data.data_folder.clone());
    let poll_interval = Duration::from_secs(config.near_rpc.poll_interval_secs);

    let mut lite_client = match state_store
        .load_state()
        .expect("Failed to load lite client state.")
    {
        Some(state) => {
            info_with_time!(
                "Restored lite client head at height {}.",
                state.head.inner_lite.height
            );
            LiteClient::from_persisted_state(state)
        }
        None => bootstrap_from_checkpoint(&rpc_client, &state_store),
    };

    //
    // Keep updating the head and save state to file
    //
    loop {
        let head_hash = lite_client.head().current_block_hash();
        let block_view = match rpc_client.next_light_client_block(&head_hash) {
            Ok(Some(block_view)) => block_view,
            Ok(None) => {
                thread::sleep(poll_interval);
                continue;
            }
            Err(err) => {
                status_err!("Failed to get next light client block: {}", err);
                thread::sleep(poll_interval);
                continue;
            }
        };
        match lite_client.advance_head(&block_view) {
            Ok(HeadVerdict::Accepted) => {
                info_with_time!(
                    "Advanced head to height {} on epoch {}.",
                    block_view.inner_lite.height,
                    block_view.inner_lite.epoch_id
                );
                lite_client.prune_block_producers();
                state_store
                    .save_state(&lite_client.persisted_state())
                    .expect("Failed to save lite client state to file.");
            }
            Ok(HeadVerdict::Rejected(reason)) => {
                status_warn!(
                    "Rejected block at height {}: {:?}",
                    block_view.inner_lite.height,
                    reason
                );
                if let Err(err) = state_store.save_failed_head(&block_view) {
                    status_err!("Failed to save rejected block: {}", err);
                }
            }
            Err(err) => {
                status_err!(
                    "Unrecoverable error validating block at height {}: {}",
                    block_view.inner_lite.height,
                    err
                );
                return;
            }
        }
        thread::sleep(poll_interval);
    }
}

/// With no persisted state, the latest block the network considers final is
/// taken as the trusted checkpoint.
fn bootstrap_from_checkpoint(
    rpc_client: &NearRpcClient,
    state_store: &ClientStateStore,
) -> LiteClient {
    let (final_block_hash, height) = rpc_client
        .latest_final_block()
        .expect("Failed to get a finalized block to bootstrap from.");
    info_with_time!(
        "Bootstrapping from finalized block {} at height {}.",
        final_block_hash,
        height
    );
    let checkpoint_view = rpc_client
        .next_light_client_block(&final_block_hash)
        .expect("Failed to get the checkpoint block view.")
        .expect("The node returned no light client block for the checkpoint.");
    let checkpoint = TrustedCheckpoint::new(checkpoint_view)
        .expect("The checkpoint block carries no next block producers.");
    let lite_client = LiteClient::new_from_checkpoint(checkpoint);
    state_store
        .save_state(&lite_client.persisted_state())
        .expect("Failed to save lite client state to file.");
    info_with_time!(
        "Lite client initialized at height {}.",
        lite_client.head().inner_lite.height
    );
    lite_client
}
