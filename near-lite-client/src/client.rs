//! Head verification state machine and transaction inclusion checking.

use alloc::{collections::BTreeMap, vec::Vec};

use crate::near_types::{
    hash::{sha256, CryptoHash},
    merkle::compute_root_from_path,
    transaction::{ExecutionOutcomeWithId, RpcLightClientExecutionProofResponse},
    Balance, LightClientBlockView, ValidatorStakeView,
};
use crate::types::{PersistedState, TrustedCheckpoint};
use crate::{
    HeadVerdict, InclusionVerdict, LiteClientError, ProofMismatch, RejectionReason,
};

/// The lite client state: the most recent cryptographically validated head
/// and the producer tables of the epochs reachable from it.
///
/// The state is only ever mutated by a successful [`advance_head`]; hosts
/// that share a client between threads must serialize those calls.
///
/// [`advance_head`]: LiteClient::advance_head
pub struct LiteClient {
    head: LightClientBlockView,
    epoch_block_producers: BTreeMap<CryptoHash, Vec<ValidatorStakeView>>,
}

impl LiteClient {
    /// Boot a client from a block trusted out of band, seeding the producer
    /// table of the checkpoint's next epoch.
    pub fn new_from_checkpoint(checkpoint: TrustedCheckpoint) -> Self {
        let head = LightClientBlockView::from(checkpoint);
        let mut epoch_block_producers = BTreeMap::new();
        if let Some(next_bps) = &head.next_bps {
            epoch_block_producers.insert(head.inner_lite.next_epoch_id, next_bps.clone());
        }
        Self {
            head,
            epoch_block_producers,
        }
    }

    /// Restore a client from a persisted snapshot.
    pub fn from_persisted_state(state: PersistedState) -> Self {
        Self {
            head: state.head,
            epoch_block_producers: state.epoch_block_producers,
        }
    }

    /// Snapshot of the mutable state for persistence.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            head: self.head.clone(),
            epoch_block_producers: self.epoch_block_producers.clone(),
        }
    }

    /// The currently trusted head.
    pub fn head(&self) -> &LightClientBlockView {
        &self.head
    }

    /// The cached producer table active in the given epoch.
    pub fn epoch_block_producers(&self, epoch_id: &CryptoHash) -> Option<&Vec<ValidatorStakeView>> {
        self.epoch_block_producers.get(epoch_id)
    }

    /// Validate a proposed new head and move to it if every check passes.
    ///
    /// Implements the chain's light client protocol
    /// (`https://nomicon.io/ChainSpec/LightClient`):
    ///
    /// 1. the height of the block is higher than the height of the head;
    /// 2. the epoch of the block is the epoch or the next epoch known to
    ///    the head;
    /// 3. if the block starts a new epoch, it carries the producers of the
    ///    epoch after it;
    /// 4. the approvals contain valid signatures on the reconstructed
    ///    approval message from the producers of the block's epoch, and the
    ///    signed-for stake is strictly more than 2/3 of the total;
    /// 5. if `next_bps` is present, its serialization hashes to the
    ///    `next_bp_hash` pinned in the header.
    ///
    /// Failing one of the checks rejects the block and leaves the state
    /// untouched. Only a producer table missing for the block's epoch is an
    /// error: that cannot happen on a well-formed feed.
    pub fn advance_head(
        &mut self,
        block_view: &LightClientBlockView,
    ) -> Result<HeadVerdict, LiteClientError> {
        let head = &self.head;

        // (1)
        if block_view.inner_lite.height <= head.inner_lite.height {
            return Ok(HeadVerdict::Rejected(RejectionReason::InvalidBlockHeight {
                block_height: block_view.inner_lite.height,
                head_height: head.inner_lite.height,
            }));
        }

        // (2)
        if block_view.inner_lite.epoch_id != head.inner_lite.epoch_id
            && block_view.inner_lite.epoch_id != head.inner_lite.next_epoch_id
        {
            return Ok(HeadVerdict::Rejected(RejectionReason::InvalidEpochId));
        }

        // (3)
        if block_view.inner_lite.epoch_id == head.inner_lite.next_epoch_id
            && block_view.next_bps.is_none()
        {
            return Ok(HeadVerdict::Rejected(
                RejectionReason::MissingNextBlockProducers,
            ));
        }

        // (4)
        let epoch_block_producers = self
            .epoch_block_producers
            .get(&block_view.inner_lite.epoch_id)
            .ok_or(LiteClientError::MissingEpochBlockProducers {
                epoch_id: block_view.inner_lite.epoch_id,
            })?;

        let approval_message = block_view.approval_message();
        let mut total_stake: Balance = 0;
        let mut approved_stake: Balance = 0;

        // The pairing is positional over the full producer table. Approvals
        // past the end of the table carry no weight, and a shorter approval
        // list simply leaves the trailing producers unapproved.
        for (index, block_producer) in epoch_block_producers.iter().enumerate() {
            let bp_stake = block_producer.stake();
            total_stake += bp_stake;

            let signature = match block_view.approvals_after_next.get(index) {
                Some(Some(signature)) => signature,
                _ => continue,
            };
            if !signature.verify(&approval_message, block_producer.public_key()) {
                return Ok(HeadVerdict::Rejected(
                    RejectionReason::InvalidValidatorSignature {
                        account_id: block_producer.account_id().clone(),
                    },
                ));
            }
            approved_stake += bp_stake;
        }

        // Strictly more than 2/3; multiply instead of divide so no
        // rounding is involved.
        if approved_stake * 3 <= total_stake * 2 {
            return Ok(HeadVerdict::Rejected(RejectionReason::BlockIsNotFinal {
                approved_stake,
                total_stake,
            }));
        }

        // (5)
        if let Some(next_bps) = &block_view.next_bps {
            let serialized =
                borsh::to_vec(next_bps).expect("in-memory serialization never fails");
            if CryptoHash(sha256(&serialized)) != block_view.inner_lite.next_bp_hash {
                return Ok(HeadVerdict::Rejected(
                    RejectionReason::InvalidNextBlockProducersHash,
                ));
            }
        }

        if let Some(next_bps) = &block_view.next_bps {
            self.epoch_block_producers
                .insert(block_view.inner_lite.next_epoch_id, next_bps.clone());
        }
        self.head = block_view.clone();

        Ok(HeadVerdict::Accepted)
    }

    /// Verify that an execution outcome is included in a block below the
    /// current head. See [`verify_transaction_inclusion`].
    pub fn verify_transaction(
        &self,
        proof: &RpcLightClientExecutionProofResponse,
    ) -> InclusionVerdict {
        verify_transaction_inclusion(proof, &self.head.inner_lite.block_merkle_root)
    }

    /// Drop producer tables no longer reachable from the head. A single
    /// head advancement only ever consults the tables of the head's epoch
    /// and the next one.
    pub fn prune_block_producers(&mut self) {
        let epoch_id = self.head.inner_lite.epoch_id;
        let next_epoch_id = self.head.inner_lite.next_epoch_id;
        self.epoch_block_producers
            .retain(|epoch, _| *epoch == epoch_id || *epoch == next_epoch_id);
    }
}

/// Verify an execution outcome proof against a trusted block merkle root.
///
/// Two merkle folds chain the outcome to the root: the outcome leaf is
/// folded to its shard outcome root, the (re-hashed) shard root to the
/// outcome root of the containing block, and the hash of that block to the
/// block merkle root of the head. Note the hash wrapping between the
/// stages: each shard root is committed before entering the block's
/// outcome tree.
pub fn verify_transaction_inclusion(
    proof: &RpcLightClientExecutionProofResponse,
    block_merkle_root: &CryptoHash,
) -> InclusionVerdict {
    let outcome_with_id = ExecutionOutcomeWithId {
        id: proof.outcome_proof.id,
        outcome: proof.outcome_proof.outcome.clone(),
    };
    let shard_outcome_root =
        compute_root_from_path(&proof.outcome_proof.proof, outcome_with_id.hash());
    let block_outcome_root = compute_root_from_path(
        &proof.outcome_root_proof,
        CryptoHash::hash_borsh(&shard_outcome_root),
    );

    let expected_outcome_root = proof.block_header_lite.inner_lite.outcome_root;
    if block_outcome_root != expected_outcome_root {
        return InclusionVerdict::Invalid(ProofMismatch::OutcomeRoot {
            computed: block_outcome_root,
            expected: expected_outcome_root,
        });
    }

    let block_hash = proof.block_header_lite.current_block_hash();
    let computed_block_merkle_root = compute_root_from_path(&proof.block_proof, block_hash);
    if computed_block_merkle_root != *block_merkle_root {
        return InclusionVerdict::Invalid(ProofMismatch::BlockMerkleRoot {
            computed: computed_block_merkle_root,
            expected: *block_merkle_root,
        });
    }

    InclusionVerdict::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::near_types::{
        merkle::{Direction, MerklePathItem},
        signature::{ED25519PublicKey, PublicKey, Signature},
        transaction::{ExecutionOutcome, ExecutionOutcomeWithIdView, ExecutionStatus},
        BlockHeaderInnerLiteView, LightClientBlockLiteView, ValidatorStakeViewV1,
    };
    use alloc::{format, vec};
    use ed25519_dalek::{ExpandedSecretKey, SecretKey};

    fn epoch(tag: u8) -> CryptoHash {
        CryptoHash([tag; 32])
    }

    fn secret(seed: u8) -> SecretKey {
        SecretKey::from_bytes(&[seed; 32]).unwrap()
    }

    fn sign(secret: &SecretKey, message: &[u8]) -> Signature {
        let public = ed25519_dalek::PublicKey::from(secret);
        Signature::ED25519(ExpandedSecretKey::from(secret).sign(message, &public).to_bytes())
    }

    fn producer_set(stakes: &[Balance]) -> (Vec<SecretKey>, Vec<ValidatorStakeView>) {
        let secrets: Vec<SecretKey> =
            (0..stakes.len()).map(|i| secret(100 + i as u8)).collect();
        let block_producers = secrets
            .iter()
            .zip(stakes.iter())
            .enumerate()
            .map(|(i, (secret, stake))| {
                let public = ed25519_dalek::PublicKey::from(secret);
                ValidatorStakeView::V1(ValidatorStakeViewV1 {
                    account_id: format!("node{}", i),
                    public_key: PublicKey::ED25519(ED25519PublicKey(public.to_bytes())),
                    stake: *stake,
                })
            })
            .collect();
        (secrets, block_producers)
    }

    fn bps_hash(bps: &[ValidatorStakeView]) -> CryptoHash {
        CryptoHash(sha256(&borsh::to_vec(&bps.to_vec()).unwrap()))
    }

    fn block_at(
        height: u64,
        epoch_id: CryptoHash,
        next_epoch_id: CryptoHash,
        next_bps: Option<Vec<ValidatorStakeView>>,
    ) -> LightClientBlockView {
        let next_bp_hash = next_bps
            .as_ref()
            .map(|bps| bps_hash(bps))
            .unwrap_or_default();
        LightClientBlockView {
            prev_block_hash: CryptoHash::hash_bytes(&height.to_le_bytes()),
            next_block_inner_hash: CryptoHash::hash_bytes(b"next inner"),
            inner_lite: BlockHeaderInnerLiteView {
                height,
                epoch_id,
                next_epoch_id,
                prev_state_root: CryptoHash::hash_bytes(b"state"),
                outcome_root: CryptoHash::hash_bytes(b"outcomes"),
                timestamp: height * 1_000_000_000,
                timestamp_nanosec: height * 1_000_000_000,
                next_bp_hash,
                block_merkle_root: CryptoHash::hash_bytes(b"blocks"),
            },
            inner_rest_hash: CryptoHash::hash_bytes(b"rest"),
            next_bps,
            approvals_after_next: Vec::new(),
        }
    }

    fn approve(block_view: &mut LightClientBlockView, secrets: &[SecretKey], approvers: &[bool]) {
        let message = block_view.approval_message();
        block_view.approvals_after_next = secrets
            .iter()
            .zip(approvers.iter())
            .map(|(secret, approves)| approves.then(|| sign(secret, &message)))
            .collect();
    }

    /// Checkpoint in epoch 1 announcing the given producers for epoch 2.
    fn checkpoint_with(bps: &[ValidatorStakeView]) -> TrustedCheckpoint {
        TrustedCheckpoint::new(block_at(1000, epoch(1), epoch(2), Some(bps.to_vec()))).unwrap()
    }

    #[test]
    fn checkpoint_requires_next_block_producers() {
        assert!(TrustedCheckpoint::new(block_at(1000, epoch(1), epoch(2), None)).is_err());
    }

    #[test]
    fn accepts_block_starting_the_next_epoch() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let (_, next_bps) = producer_set(&[20, 20]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(next_bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);

        assert_eq!(client.advance_head(&block_view), Ok(HeadVerdict::Accepted));
        assert_eq!(client.head().inner_lite.height, 1010);
        // The announced producers are now cached for epoch 3.
        assert_eq!(client.epoch_block_producers(&epoch(3)), Some(&next_bps));
    }

    #[test]
    fn accepts_intra_epoch_block_without_next_bps() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut first = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut first, &secrets, &[true, true, true]);
        assert_eq!(client.advance_head(&first), Ok(HeadVerdict::Accepted));

        let mut second = block_at(1020, epoch(2), epoch(3), None);
        approve(&mut second, &secrets, &[true, true, true]);
        assert_eq!(client.advance_head(&second), Ok(HeadVerdict::Accepted));
        assert_eq!(client.head().inner_lite.height, 1020);
    }

    #[test]
    fn rejects_replayed_head_without_state_change() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(client.advance_head(&block_view), Ok(HeadVerdict::Accepted));

        let state_before = client.persisted_state();
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(RejectionReason::InvalidBlockHeight {
                block_height: 1010,
                head_height: 1010,
            }))
        );
        assert_eq!(client.persisted_state(), state_before);
    }

    #[test]
    fn rejects_block_from_unrelated_epoch() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(9), epoch(10), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(RejectionReason::InvalidEpochId))
        );
    }

    #[test]
    fn rejects_epoch_transition_without_next_bps() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), None);
        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(
                RejectionReason::MissingNextBlockProducers
            ))
        );
    }

    #[test]
    fn threshold_is_strictly_greater_than_two_thirds() {
        // Three equal stakes: two approvals carry exactly 2/3 and must be
        // rejected; all three must pass.
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, false]);
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(RejectionReason::BlockIsNotFinal {
                approved_stake: 20,
                total_stake: 30,
            }))
        );

        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(client.advance_head(&block_view), Ok(HeadVerdict::Accepted));
    }

    #[test]
    fn rejects_signature_over_wrong_message() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        block_view.approvals_after_next[1] =
            Some(sign(&secrets[1], b"some other approval message"));
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(
                RejectionReason::InvalidValidatorSignature {
                    account_id: "node1".into(),
                }
            ))
        );
        assert_eq!(client.head().inner_lite.height, 1000);
    }

    #[test]
    fn rejects_tampered_next_bps() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let (_, tampered_bps) = producer_set(&[1, 1, 1]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        // Swap the producer set after the header hash was fixed.
        block_view.next_bps = Some(tampered_bps);
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(
                RejectionReason::InvalidNextBlockProducersHash
            ))
        );
    }

    #[test]
    fn missing_producer_table_is_a_hard_error() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        // The checkpoint's own epoch has no cached table: only the next
        // epoch's was announced.
        let mut block_view = block_at(1010, epoch(1), epoch(2), None);
        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(
            client.advance_head(&block_view),
            Err(LiteClientError::MissingEpochBlockProducers {
                epoch_id: epoch(1)
            })
        );
    }

    #[test]
    fn extra_approvals_past_the_producer_table_are_ignored() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        let message = block_view.approval_message();
        let stranger = secret(250);
        block_view
            .approvals_after_next
            .push(Some(sign(&stranger, &message)));
        assert_eq!(client.advance_head(&block_view), Ok(HeadVerdict::Accepted));
    }

    #[test]
    fn short_approval_list_counts_missing_entries_as_absent() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(bps.clone()));
        approve(&mut block_view, &secrets, &[true, true, true]);
        // Dropping the last approval leaves 2/3 of the stake: not final.
        block_view.approvals_after_next.pop();
        assert_eq!(
            client.advance_head(&block_view),
            Ok(HeadVerdict::Rejected(RejectionReason::BlockIsNotFinal {
                approved_stake: 20,
                total_stake: 30,
            }))
        );
    }

    #[test]
    fn prune_retains_reachable_tables_only() {
        let (secrets, bps) = producer_set(&[10, 10, 10]);
        let (_, next_bps) = producer_set(&[20, 20]);
        let mut client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let mut block_view = block_at(1010, epoch(2), epoch(3), Some(next_bps));
        approve(&mut block_view, &secrets, &[true, true, true]);
        assert_eq!(client.advance_head(&block_view), Ok(HeadVerdict::Accepted));

        client.prune_block_producers();
        // Epoch 2 (current) and 3 (next) stay; nothing else was cached.
        assert!(client.epoch_block_producers(&epoch(2)).is_some());
        assert!(client.epoch_block_producers(&epoch(3)).is_some());
    }

    #[test]
    fn persisted_state_round_trips() {
        let (_, bps) = producer_set(&[10, 10, 10]);
        let client = LiteClient::new_from_checkpoint(checkpoint_with(&bps));

        let bytes = client.persisted_state().to_bytes();
        let restored = LiteClient::from_persisted_state(PersistedState::from_bytes(&bytes).unwrap());
        assert_eq!(restored.head(), client.head());
        assert_eq!(
            restored.epoch_block_producers(&epoch(2)),
            client.epoch_block_producers(&epoch(2))
        );
    }

    #[test]
    fn persisted_state_rejects_garbage() {
        assert!(matches!(
            PersistedState::from_bytes(&[0, 1, 2, 3]),
            Err(LiteClientError::Codec(_))
        ));
    }

    fn sample_proof() -> (RpcLightClientExecutionProofResponse, CryptoHash) {
        let outcome_with_id = ExecutionOutcomeWithId {
            id: CryptoHash::hash_bytes(b"tx id"),
            outcome: ExecutionOutcome {
                logs: vec!["log line".into()],
                receipt_ids: vec![CryptoHash::hash_bytes(b"receipt")],
                gas_burnt: 1_000_000,
                tokens_burnt: 100_000_000_000_000_000_000,
                executor_id: "relay.testnet".into(),
                status: ExecutionStatus::SuccessValue("".into()),
            },
        };

        let outcome_path = vec![MerklePathItem {
            hash: CryptoHash::hash_bytes(b"sibling outcome"),
            direction: Direction::Right,
        }];
        let shard_outcome_root = compute_root_from_path(&outcome_path, outcome_with_id.hash());

        let outcome_root_proof = vec![MerklePathItem {
            hash: CryptoHash::hash_bytes(b"other shard"),
            direction: Direction::Left,
        }];
        let block_outcome_root = compute_root_from_path(
            &outcome_root_proof,
            CryptoHash::hash_borsh(&shard_outcome_root),
        );

        let block_header_lite = LightClientBlockLiteView {
            prev_block_hash: CryptoHash::hash_bytes(b"prev"),
            inner_rest_hash: CryptoHash::hash_bytes(b"rest"),
            inner_lite: BlockHeaderInnerLiteView {
                height: 2000,
                epoch_id: epoch(4),
                next_epoch_id: epoch(5),
                prev_state_root: CryptoHash::hash_bytes(b"state"),
                outcome_root: block_outcome_root,
                timestamp: 1,
                timestamp_nanosec: 1,
                next_bp_hash: CryptoHash::hash_bytes(b"bps"),
                block_merkle_root: CryptoHash::hash_bytes(b"blocks"),
            },
        };

        let block_proof = vec![MerklePathItem {
            hash: CryptoHash::hash_bytes(b"uncle block"),
            direction: Direction::Left,
        }];
        let block_merkle_root =
            compute_root_from_path(&block_proof, block_header_lite.current_block_hash());

        let proof = RpcLightClientExecutionProofResponse {
            outcome_proof: ExecutionOutcomeWithIdView {
                proof: outcome_path,
                block_hash: block_header_lite.current_block_hash(),
                id: outcome_with_id.id,
                outcome: outcome_with_id.outcome,
            },
            outcome_root_proof,
            block_header_lite,
            block_proof,
        };
        (proof, block_merkle_root)
    }

    #[test]
    fn verifies_consistent_inclusion_proof() {
        let (proof, block_merkle_root) = sample_proof();
        assert_eq!(
            verify_transaction_inclusion(&proof, &block_merkle_root),
            InclusionVerdict::Valid
        );
    }

    #[test]
    fn detects_tampered_outcome() {
        let (mut proof, block_merkle_root) = sample_proof();
        proof.outcome_proof.outcome.gas_burnt += 1;
        assert!(matches!(
            verify_transaction_inclusion(&proof, &block_merkle_root),
            InclusionVerdict::Invalid(ProofMismatch::OutcomeRoot { .. })
        ));
    }

    #[test]
    fn detects_proof_against_wrong_head() {
        let (proof, _) = sample_proof();
        let unrelated_root = CryptoHash::hash_bytes(b"unrelated");
        assert!(matches!(
            verify_transaction_inclusion(&proof, &unrelated_root),
            InclusionVerdict::Invalid(ProofMismatch::BlockMerkleRoot { .. })
        ));
    }

    #[test]
    fn client_verifies_against_its_own_head() {
        let (proof, block_merkle_root) = sample_proof();
        let (_, bps) = producer_set(&[10]);
        let mut checkpoint_block = block_at(1000, epoch(1), epoch(2), Some(bps));
        checkpoint_block.inner_lite.block_merkle_root = block_merkle_root;
        let client =
            LiteClient::new_from_checkpoint(TrustedCheckpoint::new(checkpoint_block).unwrap());
        assert_eq!(client.verify_transaction(&proof), InclusionVerdict::Valid);
    }
}
