//! Client state types: the trusted checkpoint a client boots from and the
//! snapshot form of its runtime state.

use alloc::{collections::BTreeMap, string::ToString, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};

use crate::near_types::{hash::CryptoHash, LightClientBlockView, ValidatorStakeView};
use crate::LiteClientError;

/// A block view that is trusted out of band and used to bootstrap a
/// [`crate::LiteClient`].
///
/// A checkpoint must carry the producer set of its next epoch: that table
/// is the seed from which every later producer set is validated, so a
/// block without one cannot anchor a client.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct TrustedCheckpoint(LightClientBlockView);

impl TrustedCheckpoint {
    pub fn new(block_view: LightClientBlockView) -> Result<Self, LiteClientError> {
        if block_view.next_bps.is_none() {
            return Err(LiteClientError::MissingEpochBlockProducers {
                epoch_id: block_view.inner_lite.next_epoch_id,
            });
        }
        Ok(Self(block_view))
    }
}

impl From<TrustedCheckpoint> for LightClientBlockView {
    fn from(checkpoint: TrustedCheckpoint) -> Self {
        checkpoint.0
    }
}

/// Snapshot of a client's mutable state, serializable with the canonical
/// codec for crash recovery.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct PersistedState {
    pub head: LightClientBlockView,
    pub epoch_block_producers: BTreeMap<CryptoHash, Vec<ValidatorStakeView>>,
}

impl PersistedState {
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("in-memory serialization never fails")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LiteClientError> {
        Self::try_from_slice(bytes).map_err(|err| LiteClientError::Codec(err.to_string()))
    }
}
