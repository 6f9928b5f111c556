//! Integration tests for the vote ledger and click counter.

mod common;

use crate::common::{create_test_key, create_test_resource, TestHarness};
use server_core::common::ApiError;
use server_core::domains::resources::actions::{add_click, cast_vote, get_resource};
use server_core::domains::resources::models::{VoteDirection, VoteInformation};
use test_context::test_context;

// =============================================================================
// Vote ledger state machine
// =============================================================================

/// First vote creates the ledger row and bumps the matching counter.
#[test_context(TestHarness)]
#[tokio::test]
async fn first_vote_creates_ledger_row(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let key = create_test_key(&ctx.db_pool, "voter-first").await.unwrap();
    let id = create_test_resource(
        &ctx.db_pool,
        "First vote",
        "https://example.com/vote-first",
        "Tutorials",
        &[],
    )
    .await
    .unwrap();

    let after = cast_vote(id, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap();

    assert_eq!(after.upvotes, 1);
    assert_eq!(after.downvotes, 0);

    let row = VoteInformation::find(&key.apikey, id, &ctx.db_pool)
        .await
        .unwrap()
        .expect("ledger row must exist");
    assert_eq!(row.direction(), Some(VoteDirection::Upvote));
}

/// Casting the same direction twice returns the voter to none and restores
/// the original counter.
#[test_context(TestHarness)]
#[tokio::test]
async fn same_direction_twice_toggles_off(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let key = create_test_key(&ctx.db_pool, "voter-toggle").await.unwrap();
    let id = create_test_resource(
        &ctx.db_pool,
        "Toggle vote",
        "https://example.com/vote-toggle",
        "Tutorials",
        &[],
    )
    .await
    .unwrap();

    cast_vote(id, VoteDirection::Downvote, &key.apikey, &deps)
        .await
        .unwrap();
    let after = cast_vote(id, VoteDirection::Downvote, &key.apikey, &deps)
        .await
        .unwrap();

    assert_eq!(after.upvotes, 0);
    assert_eq!(after.downvotes, 0);

    let row = VoteInformation::find(&key.apikey, id, &ctx.db_pool)
        .await
        .unwrap()
        .expect("ledger row persists after toggling off");
    assert_eq!(row.direction(), None);
}

/// The worked scenario: upvote, then downvote, then downvote again.
#[test_context(TestHarness)]
#[tokio::test]
async fn vote_flip_and_toggle_scenario(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let key = create_test_key(&ctx.db_pool, "voter-scenario").await.unwrap();
    let id = create_test_resource(
        &ctx.db_pool,
        "Scenario",
        "https://example.com/vote-scenario",
        "Tutorials",
        &["Python"],
    )
    .await
    .unwrap();

    // upvote -> upvotes=1
    let after = cast_vote(id, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap();
    assert_eq!((after.upvotes, after.downvotes), (1, 0));

    // downvote -> flips: upvotes=0, downvotes=1
    let after = cast_vote(id, VoteDirection::Downvote, &key.apikey, &deps)
        .await
        .unwrap();
    assert_eq!((after.upvotes, after.downvotes), (0, 1));
    let row = VoteInformation::find(&key.apikey, id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.direction(), Some(VoteDirection::Downvote));

    // downvote again -> toggles off: downvotes=0
    let after = cast_vote(id, VoteDirection::Downvote, &key.apikey, &deps)
        .await
        .unwrap();
    assert_eq!((after.upvotes, after.downvotes), (0, 0));
    let row = VoteInformation::find(&key.apikey, id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.direction(), None);
}

/// A voter re-activating a toggled-off row counts again.
#[test_context(TestHarness)]
#[tokio::test]
async fn toggled_off_row_can_vote_again(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let key = create_test_key(&ctx.db_pool, "voter-revote").await.unwrap();
    let id = create_test_resource(
        &ctx.db_pool,
        "Revote",
        "https://example.com/vote-revote",
        "Tutorials",
        &[],
    )
    .await
    .unwrap();

    cast_vote(id, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap();
    cast_vote(id, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap();
    let after = cast_vote(id, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap();

    assert_eq!(after.upvotes, 1);
}

/// Counters always equal the number of ledger rows pointing each way, and a
/// voter never counts toward both at once.
#[test_context(TestHarness)]
#[tokio::test]
async fn counters_match_ledger_rows(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let alice = create_test_key(&ctx.db_pool, "voter-alice").await.unwrap();
    let bob = create_test_key(&ctx.db_pool, "voter-bob").await.unwrap();
    let carol = create_test_key(&ctx.db_pool, "voter-carol").await.unwrap();
    let id = create_test_resource(
        &ctx.db_pool,
        "Ledger invariant",
        "https://example.com/vote-invariant",
        "Tutorials",
        &[],
    )
    .await
    .unwrap();

    cast_vote(id, VoteDirection::Upvote, &alice.apikey, &deps)
        .await
        .unwrap();
    cast_vote(id, VoteDirection::Downvote, &bob.apikey, &deps)
        .await
        .unwrap();
    cast_vote(id, VoteDirection::Upvote, &carol.apikey, &deps)
        .await
        .unwrap();
    // Alice flips; she must stop counting as an upvote
    cast_vote(id, VoteDirection::Downvote, &alice.apikey, &deps)
        .await
        .unwrap();

    let resource = get_resource(id, &ctx.db_pool).await.unwrap();
    let up_rows = VoteInformation::count_with_direction(id, VoteDirection::Upvote, &ctx.db_pool)
        .await
        .unwrap();
    let down_rows =
        VoteInformation::count_with_direction(id, VoteDirection::Downvote, &ctx.db_pool)
            .await
            .unwrap();

    assert_eq!(resource.upvotes as i64, up_rows);
    assert_eq!(resource.downvotes as i64, down_rows);
    assert_eq!((resource.upvotes, resource.downvotes), (1, 2));
}

/// Voting on a missing resource is NotFound and writes nothing.
#[test_context(TestHarness)]
#[tokio::test]
async fn vote_on_unknown_resource_is_not_found(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let key = create_test_key(&ctx.db_pool, "voter-ghost").await.unwrap();

    let err = cast_vote(0, VoteDirection::Upvote, &key.apikey, &deps)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound));
}

// =============================================================================
// Click counter
// =============================================================================

/// N sequential clicks increase the counter by exactly N; no credential is
/// involved anywhere in the path.
#[test_context(TestHarness)]
#[tokio::test]
async fn clicks_are_monotonic(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();
    let id = create_test_resource(
        &ctx.db_pool,
        "Clicked",
        "https://example.com/click-monotonic",
        "Tutorials",
        &[],
    )
    .await
    .unwrap();

    let before = get_resource(id, &ctx.db_pool).await.unwrap();

    for _ in 0..5 {
        add_click(id, &deps).await.unwrap();
    }

    let after = get_resource(id, &ctx.db_pool).await.unwrap();
    assert_eq!(after.times_clicked, before.times_clicked + 5);
}

/// Clicking a missing resource fails like every other operation.
#[test_context(TestHarness)]
#[tokio::test]
async fn click_on_unknown_resource_is_not_found(ctx: &TestHarness) {
    let (_index, deps) = ctx.deps();

    let err = add_click(0, &deps).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}
