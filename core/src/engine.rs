//! The award engine — the heart of the badge system.
//!
//! RULES:
//!   - Definitions are checked in catalog order, one pass per trigger.
//!   - An already-awarded badge is never re-evaluated and never
//!     re-notified.
//!   - A failure inside one badge's check never aborts the pass; the
//!     badge is treated as not qualifying and the pass continues.
//!   - The UNIQUE(user_id, badge_id) constraint is the only concurrency
//!     guard: a duplicate insert from a racing pass means the other pass
//!     won, not an error.

use crate::{
    catalog::{BadgeCatalog, BadgeDefinition},
    error::BadgeResult,
    models::NOTIFICATION_BADGE_EARNED,
    progress::{self, BadgeProgress},
    store::BadgeStore,
    types::UserId,
};
use chrono::Utc;

pub struct AwardEngine {
    catalog: BadgeCatalog,
    store: BadgeStore,
}

impl AwardEngine {
    pub fn new(catalog: BadgeCatalog, store: BadgeStore) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &BadgeStore {
        &self.store
    }

    /// Tear down the engine and hand the store back, e.g. to rebuild
    /// with a different catalog.
    pub fn into_store(self) -> BadgeStore {
        self.store
    }

    /// Mirror the catalog into storage. Fatal on storage failure; the
    /// upsert is idempotent per entry, so the caller may retry.
    pub fn initialize_catalog(&self) -> BadgeResult<()> {
        self.catalog.initialize(&self.store)
    }

    /// Evaluate every not-yet-earned badge for this user and persist new
    /// awards plus one notification each. Returns the number of badges
    /// newly awarded in this pass.
    pub fn check_all_badges(&self, user_id: UserId) -> BadgeResult<usize> {
        let mut newly_awarded = 0;

        for def in self.catalog.definitions() {
            match self.check_one(def, user_id) {
                Ok(true) => newly_awarded += 1,
                Ok(false) => {}
                // One broken rule must not starve the rest of the pass.
                Err(err) => {
                    log::warn!(
                        "badge check failed for user={user_id} badge={} ({}): {err}",
                        def.id,
                        def.name,
                    );
                }
            }
        }

        log::debug!("user={user_id}: {newly_awarded} new badge(s) this pass");
        Ok(newly_awarded)
    }

    /// The per-badge unit: existence check, rule evaluation, award.
    /// Returns Ok(true) only when this pass created the award row.
    fn check_one(&self, def: &BadgeDefinition, user_id: UserId) -> BadgeResult<bool> {
        if self.store.has_award(user_id, def.id)? {
            return Ok(false);
        }

        if !def.rule.qualifies(&self.store, user_id)? {
            return Ok(false);
        }

        // Self-healing: make sure the badges row exists even if
        // initialize was never run, so the award's FK holds.
        self.store.upsert_badge(&def.as_row())?;

        let now = Utc::now().timestamp();
        if let Err(err) = self.store.insert_award(user_id, def.id, now) {
            if err.is_constraint_violation() {
                // A concurrent pass inserted first. Already awarded,
                // nothing to count, nothing to notify.
                log::debug!(
                    "award race lost for user={user_id} badge={}; treating as already awarded",
                    def.id,
                );
                return Ok(false);
            }
            return Err(err);
        }

        log::info!("user={user_id} earned badge {} ({})", def.id, def.name);

        // The award stands even if the notification write fails; the
        // worst observable symptom is a missed notification.
        let title = format!("Badge earned: {}", def.name);
        let body = format!("You earned the \"{}\" badge. {}", def.name, def.description);
        if let Err(err) = self.store.insert_notification(
            user_id,
            NOTIFICATION_BADGE_EARNED,
            &title,
            &body,
            Some(def.id),
            now,
        ) {
            log::warn!(
                "notification write failed for user={user_id} badge={}: {err}",
                def.id,
            );
        }

        Ok(true)
    }

    /// Read-only progress report: one entry per catalog definition, in
    /// catalog order, regardless of user state.
    pub fn badge_progress(&self, user_id: UserId) -> BadgeResult<Vec<BadgeProgress>> {
        progress::report(&self.catalog, &self.store, user_id)
    }

    /// The progress report serialized for the read-side JSON surface.
    pub fn progress_json(&self, user_id: UserId) -> BadgeResult<String> {
        let report = self.badge_progress(user_id)?;
        Ok(serde_json::to_string(&report)?)
    }
}
