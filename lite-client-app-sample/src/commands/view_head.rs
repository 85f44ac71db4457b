//! `view-head` subcommand - to print the currently trusted head.

/// App-local prelude includes `app_reader()`/`app_writer()`/`app_config()`
/// accessors along with logging macros. Customize as you see fit.
use crate::prelude::*;
use crate::state::ClientStateStore;
use abscissa_core::{Command, Runnable};

/// `view-head` subcommand
///
/// The `Parser` proc macro generates an option parser based on the struct
/// definition, and is defined in the `clap` crate. See their documentation
/// for a more comprehensive example:
///
/// <https://docs.rs/clap/>
#[derive(clap::Parser, Command, Debug)]
pub struct ViewHeadCmd {
    /// Print the whole block view instead of a summary
    #[arg(long)]
    pub with_detail: bool,
}

impl Runnable for ViewHeadCmd {
    /// Start the application.
    fn run(&self) {
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
        let head = &state.head;
        if self.with_detail {
            status_info!("Info", "Head data: {:?}", head);
            return;
        }
        status_info!("Info", "Head height: {}", head.inner_lite.height);
        status_info!("Info", "Head block hash: {}", head.current_block_hash());
        status_info!("Info", "Epoch: {}", head.inner_lite.epoch_id);
        status_info!("Info", "Next epoch: {}", head.inner_lite.next_epoch_id);
        status_info!(
            "Info",
            "Block merkle root: {}",
            head.inner_lite.block_merkle_root
        );
        status_info!(
            "Info",
            "Cached producer tables: {}",
            state.epoch_block_producers.len()
        );
    }
}
