pub mod hash;
pub mod merkle;
pub mod signature;
pub mod transaction;

use self::{
    hash::{combine_hash, sha256, CryptoHash},
    signature::{PublicKey, Signature},
};
use alloc::{string::String, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};

pub type BlockHeight = u64;
pub type AccountId = String;
pub type Balance = u128;
pub type Gas = u64;

/// The part of the block header that light clients receive in full.
///
/// This is the view form delivered over RPC; hashing converts it to the
/// wire form [`BlockHeaderInnerLite`] first.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct BlockHeaderInnerLiteView {
    pub height: BlockHeight,
    pub epoch_id: CryptoHash,
    pub next_epoch_id: CryptoHash,
    pub prev_state_root: CryptoHash,
    pub outcome_root: CryptoHash,
    /// Legacy json number. Should not be used.
    pub timestamp: u64,
    pub timestamp_nanosec: u64,
    pub next_bp_hash: CryptoHash,
    pub block_merkle_root: CryptoHash,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Eq, PartialEq)]
pub struct EpochId(pub CryptoHash);

/// The wire form of the lite header, whose borsh serialization is hashed
/// into the block hash.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Eq, PartialEq)]
pub struct BlockHeaderInnerLite {
    /// Height of this block.
    pub height: BlockHeight,
    /// Epoch start hash of this block's epoch.
    /// Used for retrieving validator information.
    pub epoch_id: EpochId,
    pub next_epoch_id: EpochId,
    /// Root hash of the state at the previous block.
    pub prev_state_root: CryptoHash,
    /// Root of the outcomes of transactions and receipts.
    pub outcome_root: CryptoHash,
    /// Timestamp at which the block was built (number of non-leap-nanoseconds
    /// since January 1, 1970 0:00:00 UTC).
    pub timestamp: u64,
    /// Hash of the next epoch block producers set.
    pub next_bp_hash: CryptoHash,
    /// Merkle root of block hashes up to the current block.
    pub block_merkle_root: CryptoHash,
}

impl From<BlockHeaderInnerLiteView> for BlockHeaderInnerLite {
    fn from(view: BlockHeaderInnerLiteView) -> Self {
        BlockHeaderInnerLite {
            height: view.height,
            epoch_id: EpochId(view.epoch_id),
            next_epoch_id: EpochId(view.next_epoch_id),
            prev_state_root: view.prev_state_root,
            outcome_root: view.outcome_root,
            timestamp: view.timestamp_nanosec,
            next_bp_hash: view.next_bp_hash,
            block_merkle_root: view.block_merkle_root,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidatorStakeViewV1 {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub stake: Balance,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidatorStakeViewV2 {
    pub account_id: AccountId,
    pub public_key: PublicKey,
    pub stake: Balance,
    pub is_chunk_only: bool,
}

/// Versioned validator stake. The tag byte (0 = V1, 1 = V2) is part of the
/// wire format; the hash of the serialized producer set is pinned in block
/// headers as `next_bp_hash`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorStakeView {
    V1(ValidatorStakeViewV1),
    V2(ValidatorStakeViewV2),
}

impl ValidatorStakeView {
    pub fn account_id(&self) -> &AccountId {
        match self {
            Self::V1(v1) => &v1.account_id,
            Self::V2(v2) => &v2.account_id,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        match self {
            Self::V1(v1) => &v1.public_key,
            Self::V2(v2) => &v2.public_key,
        }
    }

    pub fn stake(&self) -> Balance {
        match self {
            Self::V1(v1) => v1.stake,
            Self::V2(v2) => v2.stake,
        }
    }
}

/// The block data a light client needs to advance its head.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct LightClientBlockView {
    pub prev_block_hash: CryptoHash,
    pub next_block_inner_hash: CryptoHash,
    pub inner_lite: BlockHeaderInnerLiteView,
    pub inner_rest_hash: CryptoHash,
    /// Producers of the next epoch; present only on the last blocks of an
    /// epoch.
    pub next_bps: Option<Vec<ValidatorStakeView>>,
    /// Signatures endorsing the block after next, positionally aligned with
    /// the producer table of this block's epoch.
    pub approvals_after_next: Vec<Option<Signature>>,
}

/// A light weight representation of a block, sufficient to recompute its
/// hash.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct LightClientBlockLiteView {
    pub prev_block_hash: CryptoHash,
    pub inner_rest_hash: CryptoHash,
    pub inner_lite: BlockHeaderInnerLiteView,
}

/// The inner part of a block approval, endorsing either the direct
/// descendant or a skip target. Only endorsements occur on the light client
/// path.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum ApprovalInner {
    Endorsement(CryptoHash),
    Skip(BlockHeight),
}

/// The hash of the block is:
/// ```text
/// sha256(concat(
///     sha256(concat(
///         sha256(borsh(inner_lite)),
///         inner_rest_hash,
///     )),
///     prev_block_hash,
/// ))
/// ```
fn block_hash(
    inner_lite: &BlockHeaderInnerLiteView,
    inner_rest_hash: &CryptoHash,
    prev_block_hash: &CryptoHash,
) -> CryptoHash {
    let inner_lite_hash = CryptoHash(sha256(
        &borsh::to_vec(&BlockHeaderInnerLite::from(inner_lite.clone()))
            .expect("in-memory serialization never fails"),
    ));
    combine_hash(
        &combine_hash(&inner_lite_hash, inner_rest_hash),
        prev_block_hash,
    )
}

impl LightClientBlockView {
    pub fn current_block_hash(&self) -> CryptoHash {
        block_hash(&self.inner_lite, &self.inner_rest_hash, &self.prev_block_hash)
    }

    /// Hash of the block following this one, reconstructed from the inner
    /// hash the producers committed to.
    pub fn next_block_hash(&self) -> CryptoHash {
        combine_hash(&self.next_block_inner_hash, &self.current_block_hash())
    }

    /// The exact bytes each block producer signs to endorse the block after
    /// next: the serialized endorsement of the next block hash followed by
    /// the little-endian target height.
    pub fn approval_message(&self) -> Vec<u8> {
        let mut message = borsh::to_vec(&ApprovalInner::Endorsement(self.next_block_hash()))
            .expect("in-memory serialization never fails");
        message.extend_from_slice(&(self.inner_lite.height + 2).to_le_bytes());
        message
    }
}

impl LightClientBlockLiteView {
    pub fn current_block_hash(&self) -> CryptoHash {
        block_hash(&self.inner_lite, &self.inner_rest_hash, &self.prev_block_hash)
    }
}
