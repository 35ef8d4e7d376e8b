//! badge-admin: headless admin runner for the Masquerade badge engine.
//!
//! Usage:
//!   badge-admin --db masquerade.db init
//!   badge-admin --db masquerade.db check 42
//!   badge-admin --db masquerade.db progress 42
//!   badge-admin --db masquerade.db seed-demo

use anyhow::{bail, Result};
use masquerade_core::{
    catalog::BadgeCatalog,
    engine::AwardEngine,
    models::ProfileRow,
    store::BadgeStore,
    triggers,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "masquerade.db".to_string());
    let positional = positional_args(&args);

    let store = BadgeStore::open(&db)?;
    store.migrate()?;
    log::debug!("database ready at {db}");
    let engine = AwardEngine::new(BadgeCatalog::standard(), store);

    match positional.first().map(String::as_str) {
        Some("init") => {
            // Fatal on storage failure: the admin must see a broken
            // initialization. The upsert is idempotent per entry, so a
            // failed call can simply be rerun.
            engine.initialize_catalog()?;
            println!(
                "catalog initialized: {} badges in {}",
                engine.store().badge_count()?,
                db
            );
        }
        Some("check") => {
            let user_id = parse_user_id(positional.get(1), "check")?;
            let awarded = engine.check_all_badges(user_id)?;
            println!("user {user_id}: {awarded} newly awarded badge(s)");
            for award in engine.store().awards_for_user(user_id)? {
                let when = award
                    .awarded_at_utc()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| award.awarded_at.to_string());
                println!("  badge {} awarded {}", award.badge_id, when);
            }
        }
        Some("progress") => {
            let user_id = parse_user_id(positional.get(1), "progress")?;
            let report: serde_json::Value = serde_json::from_str(&engine.progress_json(user_id)?)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some("seed-demo") => {
            seed_demo(&engine)?;
            println!("demo data seeded into {db}");
        }
        Some(other) => bail!("unknown command '{other}' (expected init|check|progress|seed-demo)"),
        None => bail!("missing command (expected init|check|progress|seed-demo)"),
    }

    Ok(())
}

/// Arguments that are neither flags nor flag values, program name dropped.
fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--db" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn parse_user_id(arg: Option<&String>, command: &str) -> Result<i64> {
    match arg.and_then(|a| a.parse().ok()) {
        Some(id) => Ok(id),
        None => bail!("usage: badge-admin {command} <user_id>"),
    }
}

/// A handful of users in interesting states for manual poking.
fn seed_demo(engine: &AwardEngine) -> Result<()> {
    let store = engine.store();
    let now = chrono::Utc::now().timestamp();

    store.insert_user(1, "sakura_cos", now - 86_400)?;
    store.upsert_profile(&ProfileRow {
        user_id: 1,
        display_name: Some("Sakura".into()),
        bio: Some("Competing since 2019.".into()),
        avatar: "sakura.png".into(),
        instagram: Some("https://instagram.com/sakura_cos".into()),
        twitter: Some("https://twitter.com/sakura_cos".into()),
        youtube: Some("https://youtube.com/@sakura_cos".into()),
        ..Default::default()
    })?;
    for i in 0..5i64 {
        let placement = if i == 0 { Some("first place") } else { None };
        let pid = store.insert_participation(1, "WinterCon", placement, now - 3_600 * i)?;
        store.verify_participation(pid, now - 3_000 * i)?;
    }

    store.insert_user(2, "lurker", now)?;

    triggers::on_user_registered(engine, 1);
    triggers::on_user_registered(engine, 2);
    Ok(())
}
