use alloc::{string::String, vec, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};

use super::{
    hash::{sha256, CryptoHash},
    merkle::MerklePath,
    AccountId, Balance, Gas, LightClientBlockLiteView,
};

/// Execution status of a transaction or receipt.
///
/// The tag byte values follow the declaration order and are part of the
/// wire format.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ExecutionStatus {
    /// The execution is pending or unknown.
    Unknown,
    /// The execution has failed; the payload is the serialized error.
    Failure(Vec<u8>),
    /// The final action succeeded and returned some value or an empty vec,
    /// base64 encoded.
    SuccessValue(String),
    /// The final action of the receipt returned a promise or the signed
    /// transaction was converted to a receipt. Contains the receipt id of
    /// the generated receipt.
    SuccessReceiptId(CryptoHash),
}

/// Execution outcome of a transaction or receipt.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExecutionOutcome {
    /// Logs from this transaction or receipt.
    pub logs: Vec<String>,
    /// Receipt ids generated by this transaction or receipt.
    pub receipt_ids: Vec<CryptoHash>,
    /// The amount of gas burnt by the given transaction or receipt.
    pub gas_burnt: Gas,
    /// The amount of tokens burnt corresponding to the burnt gas.
    pub tokens_burnt: Balance,
    /// The account on which the execution happens. For transactions this is
    /// the signer, for receipts the receiver.
    pub executor_id: AccountId,
    /// Execution status, with the result in case of success.
    pub status: ExecutionStatus,
}

/// Execution outcome bound to the transaction or receipt id it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct ExecutionOutcomeWithId {
    /// The transaction hash or the receipt id.
    pub id: CryptoHash,
    pub outcome: ExecutionOutcome,
}

/// Execution outcome with the merkle path that proves it under a shard
/// outcome root.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct ExecutionOutcomeWithIdView {
    pub proof: MerklePath,
    /// Hash of the block that contains the outcome root.
    pub block_hash: CryptoHash,
    pub id: CryptoHash,
    pub outcome: ExecutionOutcome,
}

/// The full proof material for one execution outcome, as returned by the
/// `light_client_proof` RPC method after decoding.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct RpcLightClientExecutionProofResponse {
    /// Proof of the execution outcome under its shard outcome root.
    pub outcome_proof: ExecutionOutcomeWithIdView,
    /// Proof of the shard outcome root under the block outcome root.
    pub outcome_root_proof: MerklePath,
    /// The block that contains the outcome root.
    pub block_header_lite: LightClientBlockLiteView,
    /// Proof of the block under the block merkle tree of the light client
    /// head.
    pub block_proof: MerklePath,
}

impl ExecutionOutcomeWithId {
    /// Merkle leaf hash committing to the outcome.
    ///
    /// Commits to the id plus the merkelization hashes, prefixed with
    /// their total count.
    pub fn hash(&self) -> CryptoHash {
        let merkelization_hashes = self.outcome.merkelization_hashes();
        let mut bytes = Vec::with_capacity(4 + 32 * (1 + merkelization_hashes.len()));
        bytes.extend_from_slice(&(merkelization_hashes.len() as u32 + 1).to_le_bytes());
        bytes.extend_from_slice(self.id.as_bytes());
        for hash in &merkelization_hashes {
            bytes.extend_from_slice(hash.as_bytes());
        }
        CryptoHash(sha256(&bytes))
    }
}

impl ExecutionOutcome {
    /// The hashes committing to this outcome: first the hash of the
    /// non-log fields (each borsh-encoded separately, concatenated in
    /// field order), then the hash of each log line.
    pub fn merkelization_hashes(&self) -> Vec<CryptoHash> {
        let fields_payload = [
            borsh::to_vec(&self.receipt_ids).expect("in-memory serialization never fails"),
            borsh::to_vec(&self.gas_burnt).expect("in-memory serialization never fails"),
            borsh::to_vec(&self.tokens_burnt).expect("in-memory serialization never fails"),
            borsh::to_vec(&self.executor_id).expect("in-memory serialization never fails"),
            borsh::to_vec(&self.status).expect("in-memory serialization never fails"),
        ]
        .concat();
        let mut result = vec![CryptoHash(sha256(&fields_payload))];
        result.extend(
            self.logs
                .iter()
                .map(|log| CryptoHash(sha256(log.as_bytes()))),
        );
        result
    }
}
