//! Read-side progress reporting for the badge UI.
//!
//! Performs no writes. Progress is numeric only for participation
//! badges; every other kind reports 0 even where a continuous notion of
//! progress exists. That asymmetry matches the original ruleset and is
//! deliberate.

use crate::{
    catalog::BadgeCatalog,
    error::BadgeResult,
    models::{BadgeKind, BadgeRow},
    store::BadgeStore,
    types::UserId,
};
use serde::Serialize;

/// One badge's standing for one user, shaped for JSON consumption.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeProgress {
    pub badge: BadgeRow,
    pub earned: bool,
    pub current_progress: i64,
    pub requirement: Option<i64>,
}

/// One entry per catalog definition, in catalog order, for any user.
pub fn report(
    catalog: &BadgeCatalog,
    store: &BadgeStore,
    user_id: UserId,
) -> BadgeResult<Vec<BadgeProgress>> {
    // Computed once per pass; shared by all participation badges.
    let verified = store.verified_participation_count(user_id)?;

    let mut entries = Vec::with_capacity(catalog.len());
    for def in catalog.definitions() {
        let earned = store.has_award(user_id, def.id)?;
        let current_progress = match def.kind {
            BadgeKind::Participation => verified,
            _ => 0,
        };
        entries.push(BadgeProgress {
            badge: def.as_row(),
            earned,
            current_progress,
            requirement: def.requirement,
        });
    }
    Ok(entries)
}
