//! `view-bps` subcommand - to print the block producers data corresponding to a certain epoch.

/// App-local prelude includes `app_reader()`/`app_writer()`/`app_config()`
/// accessors along with logging macros. Customize as you see fit.
use crate::prelude::*;
use crate::state::ClientStateStore;
use abscissa_core::{Command, Runnable};
use near_lite_client::near_types::hash::CryptoHash;

/// `view-bps` subcommand
///
/// The `Parser` proc macro generates an option parser based on the struct
/// definition, and is defined in the `clap` crate. See their documentation
/// for a more comprehensive example:
///
/// <https://docs.rs/clap/>
#[derive(clap::Parser, Command, Debug)]
pub struct ViewBpsCmd {
    /// base58 formatted epoch id
    pub epoch_id: String,
}

impl Runnable for ViewBpsCmd {
    /// Start the application.
    fn run(&self) {
        let epoch_id = match self.epoch_id.parse::<CryptoHash>() {
            Ok(epoch_id) => epoch_id,
            Err(err) => {
                status_err!("Invalid epoch id {}: {}", self.epoch_id, err);
                return;
            }
        };
        let state_store = ClientStateStore::new(APP.config().state_data.data_folder.clone());
        let state = match state_store.load_state() {
            Ok(Some(state)) => state,
            Ok(None) => {
                status_err!("Uninitialized lite client: no persisted state found.");
                return;
            }
            Err(err) => {
                status_err!("Failed to load lite client state: {}", err);
                return;
            }
        };
        if let Some(bps) = state.epoch_block_producers.get(&epoch_id) {
            status_info!("Info", "Bps count of epoch {}: {}", self.epoch_id, bps.len());
            for block_producer in bps {
                status_info!(
                    "Info",
                    "{}\t{}\t{}",
                    block_producer.account_id(),
                    block_producer.public_key(),
                    block_producer.stake()
                );
            }
        } else {
            status_err!("Missing bps data of epoch {}.", self.epoch_id);
        }
    }
}
