//! Head advancement scenarios over captured testnet RPC responses.

use lite_client_app_sample::near_views::LightClientBlockViewJson;
use near_lite_client::near_types::LightClientBlockView;
use near_lite_client::{HeadVerdict, LiteClient, RejectionReason, TrustedCheckpoint};
use serde::Deserialize;

const BLOCK_86380519: &str = include_str!("data/client_block_86380519.json");
const BLOCK_86441383: &str = include_str!("data/client_block_86441383.json");
const BLOCK_86456070: &str = include_str!("data/client_block_86456070.json");

#[derive(Debug, Deserialize)]
struct Envelope {
    result: LightClientBlockViewJson,
}

fn block_view(payload: &str) -> LightClientBlockView {
    let envelope: Envelope = serde_json::from_str(payload).expect("fixture is valid json");
    LightClientBlockView::try_from(envelope.result).expect("fixture decodes into a block view")
}

#[test]
fn current_block_hash_matches_testnet_block() {
    let block_view = block_view(BLOCK_86380519);
    assert_eq!(block_view.inner_lite.height, 86380519);
    assert_eq!(
        block_view.current_block_hash().to_string(),
        "DixB3qV9kRwPDWMKTuhBLM67QgW7bpJ6M5hrZr79kC8F"
    );
}

#[test]
fn next_block_hash_matches_testnet_block() {
    let block_view = block_view(BLOCK_86380519);
    assert_eq!(
        block_view.next_block_hash().to_string(),
        "HNfD1Kex1awMexrsjCUa8bUrykMecGUpysLv5dBTj5pK"
    );
}

#[test]
fn approval_message_matches_testnet_block() {
    let block_view = block_view(BLOCK_86380519);
    assert_eq!(
        bs58::encode(&block_view.approval_message()).into_string(),
        "1D66k83oBABk1APcAcLQ1PAbXNixddhUJxhqWuGwTe8hLoxwsu8FJtgP"
    );
}

#[test]
fn decoded_producer_set_matches_the_rpc_payload() {
    let block_view = block_view(BLOCK_86441383);
    let next_bps = block_view.next_bps.as_ref().unwrap();
    assert_eq!(next_bps[0].account_id(), "node1");
    assert_eq!(
        next_bps[0].public_key().to_string(),
        "ed25519:ydgzeXHJ5Xyt7M1gXLxqLBW1Ejx6scNV5Nx2pxFM8su"
    );
    assert_eq!(next_bps[0].stake(), 22922510070824652286443844340832);
}

#[test]
fn advances_across_the_epoch_boundary() {
    let checkpoint_view = block_view(BLOCK_86441383);
    let candidate = block_view(BLOCK_86456070);
    // The candidate opens the epoch the checkpoint announced producers for.
    assert_eq!(
        candidate.inner_lite.epoch_id,
        checkpoint_view.inner_lite.next_epoch_id
    );

    let checkpoint = TrustedCheckpoint::new(checkpoint_view).unwrap();
    let mut lite_client = LiteClient::new_from_checkpoint(checkpoint);
    assert_eq!(
        lite_client.advance_head(&candidate),
        Ok(HeadVerdict::Accepted)
    );
    assert_eq!(lite_client.head().inner_lite.height, 86456070);
    assert!(lite_client
        .epoch_block_producers(&candidate.inner_lite.next_epoch_id)
        .is_some());
}

#[test]
fn rejects_a_block_older_than_the_head() {
    let head_view = block_view(BLOCK_86456070);
    let stale = block_view(BLOCK_86441383);

    let checkpoint = TrustedCheckpoint::new(head_view).unwrap();
    let mut lite_client = LiteClient::new_from_checkpoint(checkpoint);
    assert_eq!(
        lite_client.advance_head(&stale),
        Ok(HeadVerdict::Rejected(RejectionReason::InvalidBlockHeight {
            block_height: 86441383,
            head_height: 86456070,
        }))
    );
    assert_eq!(lite_client.head().inner_lite.height, 86456070);
}

#[test]
fn replaying_the_accepted_block_is_rejected() {
    let checkpoint = TrustedCheckpoint::new(block_view(BLOCK_86441383)).unwrap();
    let candidate = block_view(BLOCK_86456070);
    let mut lite_client = LiteClient::new_from_checkpoint(checkpoint);

    assert_eq!(
        lite_client.advance_head(&candidate),
        Ok(HeadVerdict::Accepted)
    );
    assert!(matches!(
        lite_client.advance_head(&candidate),
        Ok(HeadVerdict::Rejected(RejectionReason::InvalidBlockHeight { .. }))
    ));
}
