//! JSON views of the chain RPC payloads and their conversions into the
//! core types.
//!
//! The RPC encodes everything byte-like as a string: hashes are base58
//! (Bitcoin alphabet), keys and signatures are `"ed25519:<base58>"`,
//! 128-bit amounts are decimal strings. The types here mirror that JSON
//! shape one to one; `TryFrom` impls decode them into the strongly typed
//! core structures, rejecting anything malformed at this boundary so the
//! core only ever sees well-formed values.

use near_lite_client::near_types::{
    hash::CryptoHash,
    merkle::{Direction, MerklePath, MerklePathItem},
    signature::{ED25519PublicKey, PublicKey, Signature},
    transaction::{
        ExecutionOutcome, ExecutionOutcomeWithIdView, ExecutionStatus,
        RpcLightClientExecutionProofResponse,
    },
    BlockHeaderInnerLiteView, LightClientBlockLiteView, LightClientBlockView,
    ValidatorStakeView, ValidatorStakeViewV1, ValidatorStakeViewV2,
};
use serde::Deserialize;
use std::fmt;

/// Error decoding an RPC payload into core types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewConversionError {
    /// Not a base58 encoded 32-byte hash.
    InvalidHash(String),
    /// Not an `ed25519:<base58>` public key of 32 bytes.
    InvalidPublicKey(String),
    /// Not an `ed25519:<base58>` signature of 64 bytes.
    InvalidSignature(String),
    /// Not a decimal u128 amount.
    InvalidBalance(String),
    /// Not a decimal u64 timestamp.
    InvalidTimestamp(String),
    /// Merkle path direction other than Left/Right.
    UnknownDirection(String),
    /// Execution status that cannot be mapped onto the wire enum.
    UnsupportedExecutionStatus(String),
    /// Validator stake version other than V1/V2.
    UnsupportedStakeVersion(String),
}

impl fmt::Display for ViewConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHash(value) => write!(f, "invalid base58 hash: {}", value),
            Self::InvalidPublicKey(value) => write!(f, "invalid public key: {}", value),
            Self::InvalidSignature(value) => write!(f, "invalid signature: {}", value),
            Self::InvalidBalance(value) => write!(f, "invalid balance: {}", value),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp: {}", value),
            Self::UnknownDirection(value) => write!(f, "unknown merkle direction: {}", value),
            Self::UnsupportedExecutionStatus(value) => {
                write!(f, "unsupported execution status: {}", value)
            }
            Self::UnsupportedStakeVersion(value) => {
                write!(f, "unsupported validator stake version: {}", value)
            }
        }
    }
}

impl std::error::Error for ViewConversionError {}

fn decode_hash(value: &str) -> Result<CryptoHash, ViewConversionError> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|_| ViewConversionError::InvalidHash(value.to_owned()))?;
    CryptoHash::try_from(bytes.as_slice())
        .map_err(|_| ViewConversionError::InvalidHash(value.to_owned()))
}

/// Strips the `ed25519:` prefix and decodes the base58 payload; any other
/// prefix is rejected.
fn decode_ed25519_payload(value: &str) -> Option<Vec<u8>> {
    let payload = value.strip_prefix("ed25519:")?;
    bs58::decode(payload).into_vec().ok()
}

fn decode_public_key(value: &str) -> Result<PublicKey, ViewConversionError> {
    let bytes = decode_ed25519_payload(value)
        .ok_or_else(|| ViewConversionError::InvalidPublicKey(value.to_owned()))?;
    let bytes = <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| ViewConversionError::InvalidPublicKey(value.to_owned()))?;
    Ok(PublicKey::ED25519(ED25519PublicKey(bytes)))
}

fn decode_signature(value: &str) -> Result<Signature, ViewConversionError> {
    let bytes = decode_ed25519_payload(value)
        .ok_or_else(|| ViewConversionError::InvalidSignature(value.to_owned()))?;
    let bytes = <[u8; 64]>::try_from(bytes.as_slice())
        .map_err(|_| ViewConversionError::InvalidSignature(value.to_owned()))?;
    Ok(Signature::ED25519(bytes))
}

fn decode_balance(value: &str) -> Result<u128, ViewConversionError> {
    value
        .parse::<u128>()
        .map_err(|_| ViewConversionError::InvalidBalance(value.to_owned()))
}

/// JSON form of `BlockHeaderInnerLiteView`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeaderInnerLiteViewJson {
    pub height: u64,
    pub epoch_id: String,
    pub next_epoch_id: String,
    pub prev_state_root: String,
    pub outcome_root: String,
    /// Legacy json number. Should not be used.
    pub timestamp: u64,
    pub timestamp_nanosec: String,
    pub next_bp_hash: String,
    pub block_merkle_root: String,
}

impl TryFrom<BlockHeaderInnerLiteViewJson> for BlockHeaderInnerLiteView {
    type Error = ViewConversionError;

    fn try_from(json: BlockHeaderInnerLiteViewJson) -> Result<Self, Self::Error> {
        Ok(BlockHeaderInnerLiteView {
            height: json.height,
            epoch_id: decode_hash(&json.epoch_id)?,
            next_epoch_id: decode_hash(&json.next_epoch_id)?,
            prev_state_root: decode_hash(&json.prev_state_root)?,
            outcome_root: decode_hash(&json.outcome_root)?,
            timestamp: json.timestamp,
            timestamp_nanosec: json
                .timestamp_nanosec
                .parse::<u64>()
                .map_err(|_| ViewConversionError::InvalidTimestamp(json.timestamp_nanosec))?,
            next_bp_hash: decode_hash(&json.next_bp_hash)?,
            block_merkle_root: decode_hash(&json.block_merkle_root)?,
        })
    }
}

/// JSON form of one validator stake entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorStakeViewJson {
    pub account_id: String,
    pub public_key: String,
    pub stake: String,
    /// Absent on older RPC versions, which only ever emit V1.
    #[serde(default)]
    pub validator_stake_struct_version: Option<String>,
    #[serde(default)]
    pub is_chunk_only: Option<bool>,
}

impl TryFrom<ValidatorStakeViewJson> for ValidatorStakeView {
    type Error = ViewConversionError;

    fn try_from(json: ValidatorStakeViewJson) -> Result<Self, Self::Error> {
        let public_key = decode_public_key(&json.public_key)?;
        let stake = decode_balance(&json.stake)?;
        match json.validator_stake_struct_version.as_deref() {
            None | Some("V1") => Ok(ValidatorStakeView::V1(ValidatorStakeViewV1 {
                account_id: json.account_id,
                public_key,
                stake,
            })),
            Some("V2") => Ok(ValidatorStakeView::V2(ValidatorStakeViewV2 {
                account_id: json.account_id,
                public_key,
                stake,
                is_chunk_only: json.is_chunk_only.unwrap_or(false),
            })),
            Some(version) => Err(ViewConversionError::UnsupportedStakeVersion(
                version.to_owned(),
            )),
        }
    }
}

/// JSON form of `LightClientBlockView` as returned by
/// `next_light_client_block`.
#[derive(Debug, Clone, Deserialize)]
pub struct LightClientBlockViewJson {
    pub prev_block_hash: String,
    pub next_block_inner_hash: String,
    pub inner_lite: BlockHeaderInnerLiteViewJson,
    pub inner_rest_hash: String,
    #[serde(default)]
    pub next_bps: Option<Vec<ValidatorStakeViewJson>>,
    pub approvals_after_next: Vec<Option<String>>,
}

impl TryFrom<LightClientBlockViewJson> for LightClientBlockView {
    type Error = ViewConversionError;

    fn try_from(json: LightClientBlockViewJson) -> Result<Self, Self::Error> {
        let next_bps = json
            .next_bps
            .map(|bps| {
                bps.into_iter()
                    .map(ValidatorStakeView::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let approvals_after_next = json
            .approvals_after_next
            .into_iter()
            .map(|maybe_signature| {
                maybe_signature
                    .map(|signature| decode_signature(&signature))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LightClientBlockView {
            prev_block_hash: decode_hash(&json.prev_block_hash)?,
            next_block_inner_hash: decode_hash(&json.next_block_inner_hash)?,
            inner_lite: json.inner_lite.try_into()?,
            inner_rest_hash: decode_hash(&json.inner_rest_hash)?,
            next_bps,
            approvals_after_next,
        })
    }
}

/// JSON form of `LightClientBlockLiteView`.
#[derive(Debug, Clone, Deserialize)]
pub struct LightClientBlockLiteViewJson {
    pub prev_block_hash: String,
    pub inner_rest_hash: String,
    pub inner_lite: BlockHeaderInnerLiteViewJson,
}

impl TryFrom<LightClientBlockLiteViewJson> for LightClientBlockLiteView {
    type Error = ViewConversionError;

    fn try_from(json: LightClientBlockLiteViewJson) -> Result<Self, Self::Error> {
        Ok(LightClientBlockLiteView {
            prev_block_hash: decode_hash(&json.prev_block_hash)?,
            inner_rest_hash: decode_hash(&json.inner_rest_hash)?,
            inner_lite: json.inner_lite.try_into()?,
        })
    }
}

/// JSON form of one merkle path item.
#[derive(Debug, Clone, Deserialize)]
pub struct MerklePathItemJson {
    pub hash: String,
    pub direction: String,
}

impl TryFrom<MerklePathItemJson> for MerklePathItem {
    type Error = ViewConversionError;

    fn try_from(json: MerklePathItemJson) -> Result<Self, Self::Error> {
        let direction = if json.direction.eq_ignore_ascii_case("left") {
            Direction::Left
        } else if json.direction.eq_ignore_ascii_case("right") {
            Direction::Right
        } else {
            return Err(ViewConversionError::UnknownDirection(json.direction));
        };
        Ok(MerklePathItem {
            hash: decode_hash(&json.hash)?,
            direction,
        })
    }
}

fn convert_path(path: Vec<MerklePathItemJson>) -> Result<MerklePath, ViewConversionError> {
    path.into_iter().map(MerklePathItem::try_from).collect()
}

/// JSON form of an execution outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionOutcomeViewJson {
    pub logs: Vec<String>,
    pub receipt_ids: Vec<String>,
    pub gas_burnt: u64,
    pub tokens_burnt: String,
    pub executor_id: String,
    /// Either the string `"Unknown"` or a single-key object naming the
    /// status variant.
    pub status: serde_json::Value,
}

/// Maps the JSON status onto the wire enum.
///
/// `Failure` cannot be supported here: its canonical serialization is the
/// full node's error enum, which is not reconstructible from the JSON
/// view, so outcome hashes of failed executions cannot be recomputed.
fn convert_status(status: &serde_json::Value) -> Result<ExecutionStatus, ViewConversionError> {
    let unsupported =
        |value: &serde_json::Value| ViewConversionError::UnsupportedExecutionStatus(value.to_string());
    match status {
        serde_json::Value::String(tag) if tag == "Unknown" => Ok(ExecutionStatus::Unknown),
        serde_json::Value::Object(map) => {
            let (tag, value) = map.iter().next().ok_or_else(|| unsupported(status))?;
            match (tag.as_str(), value) {
                ("Unknown", _) => Ok(ExecutionStatus::Unknown),
                ("SuccessValue", serde_json::Value::String(encoded)) => {
                    Ok(ExecutionStatus::SuccessValue(encoded.clone()))
                }
                ("SuccessReceiptId", serde_json::Value::String(receipt_id)) => Ok(
                    ExecutionStatus::SuccessReceiptId(decode_hash(receipt_id)?),
                ),
                _ => Err(unsupported(status)),
            }
        }
        _ => Err(unsupported(status)),
    }
}

impl TryFrom<ExecutionOutcomeViewJson> for ExecutionOutcome {
    type Error = ViewConversionError;

    fn try_from(json: ExecutionOutcomeViewJson) -> Result<Self, Self::Error> {
        Ok(ExecutionOutcome {
            logs: json.logs,
            receipt_ids: json
                .receipt_ids
                .iter()
                .map(|receipt_id| decode_hash(receipt_id))
                .collect::<Result<Vec<_>, _>>()?,
            gas_burnt: json.gas_burnt,
            tokens_burnt: decode_balance(&json.tokens_burnt)?,
            executor_id: json.executor_id,
            status: convert_status(&json.status)?,
        })
    }
}

/// JSON form of an execution outcome with its shard proof.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionOutcomeWithIdViewJson {
    pub proof: Vec<MerklePathItemJson>,
    pub block_hash: String,
    pub id: String,
    pub outcome: ExecutionOutcomeViewJson,
}

impl TryFrom<ExecutionOutcomeWithIdViewJson> for ExecutionOutcomeWithIdView {
    type Error = ViewConversionError;

    fn try_from(json: ExecutionOutcomeWithIdViewJson) -> Result<Self, Self::Error> {
        Ok(ExecutionOutcomeWithIdView {
            proof: convert_path(json.proof)?,
            block_hash: decode_hash(&json.block_hash)?,
            id: decode_hash(&json.id)?,
            outcome: json.outcome.try_into()?,
        })
    }
}

/// JSON form of the `light_client_proof` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcLightClientExecutionProofResponseJson {
    pub outcome_proof: ExecutionOutcomeWithIdViewJson,
    pub outcome_root_proof: Vec<MerklePathItemJson>,
    pub block_header_lite: LightClientBlockLiteViewJson,
    pub block_proof: Vec<MerklePathItemJson>,
}

impl TryFrom<RpcLightClientExecutionProofResponseJson> for RpcLightClientExecutionProofResponse {
    type Error = ViewConversionError;

    fn try_from(json: RpcLightClientExecutionProofResponseJson) -> Result<Self, Self::Error> {
        Ok(RpcLightClientExecutionProofResponse {
            outcome_proof: json.outcome_proof.try_into()?,
            outcome_root_proof: convert_path(json.outcome_root_proof)?,
            block_header_lite: json.block_header_lite.try_into()?,
            block_proof: convert_path(json.block_proof)?,
        })
    }
}
