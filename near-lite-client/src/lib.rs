//! # NEAR lite client
//!
//! A trust-minimized verification kernel for following a NEAR chain head
//! without running a full node:
//! 1. validate chain head transitions by checking the stake-weighted
//!    approvals of each epoch's block producers, and
//! 2. verify that a transaction or receipt execution outcome is included
//!    in a block below the validated head.
//!
//! The crate owns no I/O: hosts feed it decoded [`near_types`] values and
//! get accept/reject verdicts back. See [`client::LiteClient`] for the
//! entry points.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod client;
pub mod near_types;
pub mod types;

use alloc::string::String;
use core::fmt;

use near_types::{hash::CryptoHash, AccountId, Balance};

pub use client::LiteClient;
pub use types::{PersistedState, TrustedCheckpoint};

/// Hard faults of the lite client. Anything adversarial or merely stale is
/// reported through [`HeadVerdict`] / [`InclusionVerdict`] instead; an
/// `Err` of this type means the feed or the stored state is broken and
/// warrants alerting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteClientError {
    /// No producer table is cached for the epoch of the incoming block;
    /// the checkpoint is corrupt or blocks were fed out of order.
    MissingEpochBlockProducers { epoch_id: CryptoHash },
    /// Canonical (de)serialization failed on data that should be
    /// well-formed.
    Codec(String),
}

impl fmt::Display for LiteClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEpochBlockProducers { epoch_id } => {
                write!(f, "missing block producers for epoch {}", epoch_id)
            }
            Self::Codec(message) => write!(f, "codec error: {}", message),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LiteClientError {}

/// Outcome of [`LiteClient::advance_head`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadVerdict {
    /// The block passed every check; the head was moved to it.
    Accepted,
    /// The block is stale, off-epoch or not properly finalized. The head is
    /// unchanged; rejections are expected from an adversarial or lagging
    /// feed.
    Rejected(RejectionReason),
}

/// Why a proposed head was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The height of the block is not higher than the height of the
    /// current head.
    InvalidBlockHeight {
        block_height: u64,
        head_height: u64,
    },
    /// The epoch of the block is neither the epoch nor the next epoch
    /// known to the current head.
    InvalidEpochId,
    /// A block starting the next epoch must carry the producers of the
    /// epoch after it.
    MissingNextBlockProducers,
    /// An approval signature did not verify against the producer's key
    /// and the reconstructed approval message.
    InvalidValidatorSignature { account_id: AccountId },
    /// The approvals carry less than (strictly) two thirds of the total
    /// stake of the epoch.
    BlockIsNotFinal {
        approved_stake: Balance,
        total_stake: Balance,
    },
    /// `sha256(borsh(next_bps))` does not match `next_bp_hash` pinned in
    /// the header.
    InvalidNextBlockProducersHash,
}

/// Outcome of transaction inclusion verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InclusionVerdict {
    /// Both merkle folds reproduce the committed roots.
    Valid,
    /// One of the folds does not reach the expected root.
    Invalid(ProofMismatch),
}

/// Which stage of the inclusion proof failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofMismatch {
    /// The shard-to-block fold does not reproduce the outcome root of the
    /// block the proof claims to be in.
    OutcomeRoot {
        computed: CryptoHash,
        expected: CryptoHash,
    },
    /// The block fold does not reproduce the block merkle root of the
    /// trusted head.
    BlockMerkleRoot {
        computed: CryptoHash,
        expected: CryptoHash,
    },
}
