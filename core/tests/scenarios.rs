//! End-to-end scenarios: registration (Early Adopter plus its
//! notification), the social-links boundary, placement milestones, and
//! notification-failure tolerance.

use masquerade_core::{
    catalog::BadgeCatalog,
    engine::AwardEngine,
    models::{ProfileRow, NOTIFICATION_BADGE_EARNED},
    store::BadgeStore,
    triggers,
};

const PROFILE_COMPLETE: i64 = 1;
const SOCIAL_BUTTERFLY: i64 = 2;
const CHAMPION: i64 = 7;
const TOP_PERFORMER: i64 = 8;
const EARLY_ADOPTER: i64 = 9;
const COMMUNITY_BUILDER: i64 = 10;

fn build_engine() -> AwardEngine {
    let store = BadgeStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    AwardEngine::new(BadgeCatalog::standard(), store)
}

#[test]
fn registration_within_the_first_hundred_earns_early_adopter() {
    let engine = build_engine();
    let store = engine.store();
    for i in 1..=100i64 {
        store
            .insert_user(i, &format!("user{i}"), 1_000 + i)
            .expect("insert user");
    }

    triggers::on_user_registered(&engine, 100);

    assert_eq!(store.award_count(100, EARLY_ADOPTER).expect("count"), 1);
    let notes = store.notifications_for_user(100).expect("notifications");
    let badge_notes: Vec<_> = notes
        .iter()
        .filter(|n| n.kind == NOTIFICATION_BADGE_EARNED)
        .collect();
    assert_eq!(badge_notes.len(), 1);
    assert_eq!(badge_notes[0].related_id, Some(EARLY_ADOPTER));
    assert!(badge_notes[0].title.contains("Early Adopter"));
}

#[test]
fn the_hundred_and_first_user_misses_early_adopter() {
    let engine = build_engine();
    let store = engine.store();
    for i in 1..=101i64 {
        store
            .insert_user(i, &format!("user{i}"), 1_000 + i)
            .expect("insert user");
    }

    triggers::on_user_registered(&engine, 101);

    assert_eq!(store.award_count(101, EARLY_ADOPTER).expect("count"), 0);
    assert_eq!(store.notifications_for_user(101).expect("notes").len(), 0);
}

#[test]
fn two_social_links_miss_the_badge_and_a_third_earns_it() {
    let engine = build_engine();
    let store = engine.store();
    store.insert_user(1, "rin", 1_000).expect("insert user");
    let mut profile = ProfileRow {
        user_id: 1,
        avatar: "default-avatar.png".into(),
        instagram: Some("https://instagram.com/rin".into()),
        twitter: Some("https://twitter.com/rin".into()),
        ..Default::default()
    };
    store.upsert_profile(&profile).expect("upsert profile");

    triggers::on_profile_saved(&engine, 1);
    assert_eq!(store.award_count(1, SOCIAL_BUTTERFLY).expect("count"), 0);

    profile.youtube = Some("https://youtube.com/@rin".into());
    store.upsert_profile(&profile).expect("update profile");

    triggers::on_profile_saved(&engine, 1);
    assert_eq!(store.award_count(1, SOCIAL_BUTTERFLY).expect("count"), 1);
}

#[test]
fn profile_with_placeholder_avatar_is_not_complete() {
    let engine = build_engine();
    let store = engine.store();
    store.insert_user(1, "rin", 1_000).expect("insert user");
    let mut profile = ProfileRow {
        user_id: 1,
        display_name: Some("Rin".into()),
        bio: Some("Armor builds.".into()),
        avatar: "default-avatar.png".into(),
        ..Default::default()
    };
    store.upsert_profile(&profile).expect("upsert profile");

    triggers::on_profile_saved(&engine, 1);
    assert_eq!(store.award_count(1, PROFILE_COMPLETE).expect("count"), 0);

    profile.avatar = "rin.png".into();
    store.upsert_profile(&profile).expect("update profile");

    triggers::on_profile_saved(&engine, 1);
    assert_eq!(store.award_count(1, PROFILE_COMPLETE).expect("count"), 1);
}

#[test]
fn placements_gate_champion_and_top_performer() {
    let engine = build_engine();
    let store = engine.store();
    store.insert_user(1, "rin", 1_000).expect("insert user");

    // Verified second place: Top Performer yes, Champion no.
    let pid = store
        .insert_participation(1, "WinterCon", Some("second place"), 2_000)
        .expect("insert participation");
    store.verify_participation(pid, 2_100).expect("verify");
    engine.check_all_badges(1).expect("pass");
    assert_eq!(store.award_count(1, TOP_PERFORMER).expect("count"), 1);
    assert_eq!(store.award_count(1, CHAMPION).expect("count"), 0);

    // Unverified first place changes nothing.
    store
        .insert_participation(1, "SummerCon", Some("first place"), 3_000)
        .expect("insert participation");
    engine.check_all_badges(1).expect("pass");
    assert_eq!(store.award_count(1, CHAMPION).expect("count"), 0);

    // Verified first place finally earns Champion.
    let pid = store
        .insert_participation(1, "AutumnCon", Some("first place"), 4_000)
        .expect("insert participation");
    store.verify_participation(pid, 4_100).expect("verify");
    engine.check_all_badges(1).expect("pass");
    assert_eq!(store.award_count(1, CHAMPION).expect("count"), 1);
}

#[test]
fn community_builder_never_fires() {
    // Deliberate dead rule: the verification-assist feature it would
    // count does not exist.
    let engine = build_engine();
    let store = engine.store();
    store.insert_user(1, "rin", 1_000).expect("insert user");

    engine.check_all_badges(1).expect("pass");
    assert_eq!(store.award_count(1, COMMUNITY_BUILDER).expect("count"), 0);

    let report = engine.badge_progress(1).expect("progress");
    let entry = report
        .iter()
        .find(|e| e.badge.id == COMMUNITY_BUILDER)
        .expect("catalog entry present");
    assert!(!entry.earned);
    assert_eq!(entry.requirement, Some(5));
}

#[test]
fn notification_failure_does_not_roll_back_the_award() {
    let path =
        std::env::temp_dir().join(format!("masquerade-test-{}.db", uuid::Uuid::new_v4()));
    let path_str = path.to_str().expect("utf-8 temp path").to_string();

    let store = BadgeStore::open(&path_str).expect("open store");
    store.migrate().expect("migrate");
    store.insert_user(1, "rin", 1_000).expect("insert user");

    // Break the notification sink out from under the engine.
    let raw = rusqlite::Connection::open(&path_str).expect("raw connection");
    raw.execute_batch("DROP TABLE notifications;").expect("drop table");

    let engine = AwardEngine::new(BadgeCatalog::standard(), store);
    let newly = engine.check_all_badges(1).expect("pass must not error");

    // Early Adopter still counts and its row persists; the missed
    // notification is the worst observable symptom.
    assert_eq!(newly, 1);
    assert_eq!(engine.store().award_count(1, EARLY_ADOPTER).expect("count"), 1);

    for suffix in ["", "-wal", "-shm"] {
        let mut p = path.clone().into_os_string();
        p.push(suffix);
        let _ = std::fs::remove_file(p);
    }
}
