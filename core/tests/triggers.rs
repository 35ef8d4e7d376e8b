//! Trigger behavior: error swallowing, and the review trigger's
//! inherited id mismatch.

use masquerade_core::{
    catalog::BadgeCatalog, engine::AwardEngine, store::BadgeStore, triggers,
};

const CHAMPION: i64 = 7;

fn build_engine() -> AwardEngine {
    let store = BadgeStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    AwardEngine::new(BadgeCatalog::standard(), store)
}

/// The review trigger forwards the participation row id where the badge
/// pass expects a user id. With diverging id sequences the qualifying
/// user is never checked. This documents the inherited call-site bug;
/// fixing it means resolving the participation to its user first, which
/// is a conscious behavior change, not a cleanup.
#[test]
fn review_trigger_checks_the_wrong_id() {
    let engine = build_engine();
    let store = engine.store();

    // User 50 wins a competition; the participation row id is 1.
    store.insert_user(50, "rin", 1_000).expect("insert user");
    let pid = store
        .insert_participation(50, "WinterCon", Some("first place"), 2_000)
        .expect("insert participation");
    store.verify_participation(pid, 2_100).expect("verify");
    assert_eq!(pid, 1, "participation ids start at 1, diverging from the user id");

    triggers::on_participation_reviewed(&engine, pid);

    // The pass ran against "user" 1, which does not exist, so the real
    // winner still has nothing.
    assert_eq!(store.award_count(50, CHAMPION).expect("count"), 0);
    assert_eq!(store.awards_for_user(50).expect("awards").len(), 0);

    // A pass with the correct id awards as expected.
    triggers::on_participation_submitted(&engine, 50);
    assert_eq!(store.award_count(50, CHAMPION).expect("count"), 1);
}

#[test]
fn triggers_never_panic_on_missing_users() {
    let engine = build_engine();

    triggers::on_user_registered(&engine, 12345);
    triggers::on_profile_saved(&engine, 12345);
    triggers::on_participation_submitted(&engine, 12345);
    triggers::on_participation_reviewed(&engine, 12345);

    assert_eq!(engine.store().awards_for_user(12345).expect("awards").len(), 0);
}

/// Even with the schema missing entirely, a trigger must swallow the
/// failure so the primary user action would have gone through.
#[test]
fn triggers_swallow_storage_failures() {
    let store = BadgeStore::in_memory().expect("open in-memory store");
    // No migrate: every store call inside the pass fails.
    let engine = AwardEngine::new(BadgeCatalog::standard(), store);

    triggers::on_user_registered(&engine, 1);
    triggers::on_profile_saved(&engine, 1);
}
