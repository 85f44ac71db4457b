//! `verify-transaction` subcommand
//! Verify a certain transaction with the latest lite client head.

use crate::rpc::NearRpcClient;
use crate::state::ClientStateStore;
/// App-local prelude includes `app_reader()`/`app_writer()`/`app_config()`
/// accessors along with logging macros. Customize as you see fit.
use crate::{info_with_time, prelude::*};
use abscissa_core::{Command, Runnable};
use near_lite_client::near_types::hash::CryptoHash;
use near_lite_client::{InclusionVerdict, LiteClient};

/// `verify-transaction` subcommand
///
/// The `Parser` proc macro generates an option parser based on the struct
/// definition, and is defined in the `clap` crate. See their documentation
/// for a more comprehensive example:
///
/// <https://docs.rs/clap/>
#[derive(clap::Parser, Command, Debug)]
pub struct VerifyTransactionCmd {
    /// base58 formatted transaction hash
    pub tx_hash: String,
    /// Account id of the transaction sender
    pub sender_id: String,
}

impl Runnable for VerifyTransactionCmd {
    /// Start the application.
    fn run(&self) {
        let transaction_hash = match self.tx_hash.parse::<CryptoHash>() {
            Ok(transaction_hash) => transaction_hash,
            Err(err) => {
                status_err!("Invalid transaction hash {}: {}", self.tx_hash, err);
                return;
            }
        };
        let config = APP.config();
        let state_store = ClientStateStore::new(config.state_data.data_folder.clone());
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
        let lite_client = LiteClient::from_persisted_state(state);
        let head_hash = lite_client.head().current_block_hash();
        info_with_time!("Verifying against head {}.", head_hash);

        let rpc_client = NearRpcClient::new(config.near_rpc.rpc_endpoint.as_str());
        let proof = match rpc_client.light_client_proof_of_transaction(
            &transaction_hash,
            &self.sender_id,
            &head_hash,
        ) {
            Ok(proof) => proof,
            Err(err) => {
                status_err!("Failed to get light client proof: {}", err);
                return;
            }
        };
        info_with_time!(
            "Proof places the outcome in block {} at height {}.",
            proof.outcome_proof.block_hash,
            proof.block_header_lite.inner_lite.height
        );
        match lite_client.verify_transaction(&proof) {
            InclusionVerdict::Valid => status_ok!("Finished", "Transaction inclusion verified."),
            InclusionVerdict::Invalid(mismatch) => {
                status_err!("Invalid inclusion proof: {:?}", mismatch)
            }
        }
    }
}
