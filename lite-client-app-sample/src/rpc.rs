//! JSON-RPC connector for a NEAR full node.
//!
//! Speaks plain JSON-RPC 2.0 over HTTP and hands every payload to the
//! [`crate::near_views`] layer for decoding, so only well-typed values
//! leave this module. Transient transport failures are retried a fixed
//! number of times.

use crate::error::{Error, ErrorKind};
use crate::near_views::{LightClientBlockViewJson, RpcLightClientExecutionProofResponseJson};
use near_lite_client::near_types::{
    hash::CryptoHash, transaction::RpcLightClientExecutionProofResponse, LightClientBlockView,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{thread, time::Duration};

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// A client for the subset of the node's JSON-RPC interface the light
/// client needs.
pub struct NearRpcClient {
    /// Endpoint of the RPC service.
    pub rpc_addr: String,
    agent: ureq::Agent,
}

#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

impl NearRpcClient {
    pub fn new(rpc_addr: &str) -> Self {
        Self {
            rpc_addr: rpc_addr.to_owned(),
            agent: ureq::agent(),
        }
    }

    /// One JSON-RPC call, retried on transport errors.
    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, Error> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": "dontcare",
        });
        let mut last_error: Option<ureq::Error> = None;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.agent.post(&self.rpc_addr).send_json(request.clone()) {
                Ok(response) => {
                    let envelope: Envelope<T> = response
                        .into_json()
                        .map_err(|err| ErrorKind::Rpc.context(err))?;
                    if let Some(error) = envelope.error {
                        return Err(ErrorKind::Rpc
                            .context(format!("{} failed: {}", method, error))
                            .into());
                    }
                    return Ok(envelope.result);
                }
                Err(err) => {
                    tracing::debug!(
                        "rpc call {} attempt {}/{} failed: {}",
                        method,
                        attempt,
                        RETRY_ATTEMPTS,
                        err
                    );
                    last_error = Some(err);
                    if attempt < RETRY_ATTEMPTS {
                        thread::sleep(RETRY_INTERVAL);
                    }
                }
            }
        }
        Err(ErrorKind::Rpc
            .context(last_error.expect("at least one attempt was made"))
            .into())
    }

    /// Hash and height of an already finalized recent block, for
    /// bootstrapping a checkpoint.
    pub fn latest_final_block(&self) -> Result<(CryptoHash, u64), Error> {
        #[derive(Debug, serde::Deserialize)]
        struct BlockResult {
            header: Header,
        }
        #[derive(Debug, serde::Deserialize)]
        struct Header {
            prev_hash: String,
            height: u64,
        }

        let result: BlockResult = self
            .call("block", json!({ "finality": "final" }))?
            .ok_or_else(|| ErrorKind::Rpc.context("block returned no result"))?;
        let prev_hash = result
            .header
            .prev_hash
            .parse::<CryptoHash>()
            .map_err(|err| ErrorKind::Rpc.context(err))?;
        Ok((prev_hash, result.header.height))
    }

    /// The next block the light client can advance to after
    /// `last_known_hash`. `None` when the node has nothing newer yet.
    pub fn next_light_client_block(
        &self,
        last_known_hash: &CryptoHash,
    ) -> Result<Option<LightClientBlockView>, Error> {
        let json_view: Option<LightClientBlockViewJson> = self.call(
            "next_light_client_block",
            json!([last_known_hash.to_string()]),
        )?;
        json_view
            .map(|view| {
                LightClientBlockView::try_from(view).map_err(|err| ErrorKind::Rpc.context(err).into())
            })
            .transpose()
    }

    /// The full inclusion proof of a transaction against the given light
    /// client head.
    pub fn light_client_proof_of_transaction(
        &self,
        transaction_hash: &CryptoHash,
        sender_id: &str,
        light_client_head: &CryptoHash,
    ) -> Result<RpcLightClientExecutionProofResponse, Error> {
        let json_proof: RpcLightClientExecutionProofResponseJson = self
            .call(
                "EXPERIMENTAL_light_client_proof",
                json!({
                    "type": "transaction",
                    "transaction_hash": transaction_hash.to_string(),
                    "sender_id": sender_id,
                    "light_client_head": light_client_head.to_string(),
                }),
            )?
            .ok_or_else(|| ErrorKind::Rpc.context("light_client_proof returned no result"))?;
        RpcLightClientExecutionProofResponse::try_from(json_proof)
            .map_err(|err| ErrorKind::Rpc.context(err).into())
    }
}
