//! Store methods for the badge mirror table and user awards.

use crate::{
    error::{BadgeError, BadgeResult},
    models::{AwardRow, BadgeKind, BadgeRow},
    types::{BadgeId, UnixTime, UserId},
};
use rusqlite::{params, OptionalExtension};

use super::BadgeStore;

impl BadgeStore {
    /// Upsert one catalog entry into the badges mirror, keyed by id.
    /// Overwrites every metadata column so code and storage never drift.
    pub fn upsert_badge(&self, badge: &BadgeRow) -> BadgeResult<()> {
        self.conn().execute(
            "INSERT INTO badges (id, name, description, icon, kind, requirement)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 name        = excluded.name,
                 description = excluded.description,
                 icon        = excluded.icon,
                 kind        = excluded.kind,
                 requirement = excluded.requirement",
            params![
                badge.id,
                badge.name,
                badge.description,
                badge.icon,
                badge.kind.as_str(),
                badge.requirement,
            ],
        )?;
        Ok(())
    }

    pub fn get_badge(&self, id: BadgeId) -> BadgeResult<Option<BadgeRow>> {
        let row = self
            .conn()
            .query_row(
                "SELECT id, name, description, icon, kind, requirement
                 FROM badges WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<i64>>(5)?,
                    ))
                },
            )
            .optional()?;
        match row {
            None => Ok(None),
            Some((id, name, description, icon, kind, requirement)) => {
                let kind = BadgeKind::parse(&kind)
                    .ok_or_else(|| anyhow::anyhow!("unknown badge kind '{kind}' for badge {id}"))?;
                Ok(Some(BadgeRow {
                    id,
                    name,
                    description,
                    icon,
                    kind,
                    requirement,
                }))
            }
        }
    }

    /// Number of rows in the badges mirror (for the admin tool and tests).
    pub fn badge_count(&self) -> BadgeResult<i64> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM badges", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Awards ─────────────────────────────────────────────────

    pub fn has_award(&self, user_id: UserId, badge_id: BadgeId) -> BadgeResult<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM user_badges WHERE user_id = ?1 AND badge_id = ?2",
            params![user_id, badge_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert an award. The UNIQUE(user_id, badge_id) constraint is the
    /// authoritative concurrency guard; a violation surfaces as a
    /// `BadgeError` for which `is_constraint_violation()` is true, and
    /// the engine treats it as already-awarded.
    pub fn insert_award(
        &self,
        user_id: UserId,
        badge_id: BadgeId,
        awarded_at: UnixTime,
    ) -> BadgeResult<()> {
        self.conn()
            .execute(
                "INSERT INTO user_badges (user_id, badge_id, awarded_at)
                 VALUES (?1, ?2, ?3)",
                params![user_id, badge_id, awarded_at],
            )
            .map_err(BadgeError::from)?;
        Ok(())
    }

    pub fn awards_for_user(&self, user_id: UserId) -> BadgeResult<Vec<AwardRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT user_id, badge_id, awarded_at FROM user_badges
             WHERE user_id = ?1 ORDER BY badge_id ASC",
        )?;
        let awards = stmt
            .query_map(params![user_id], |row| {
                Ok(AwardRow {
                    user_id: row.get(0)?,
                    badge_id: row.get(1)?,
                    awarded_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(awards)
    }

    /// Number of award rows for one user/badge pair (for tests asserting
    /// the no-duplicates invariant).
    pub fn award_count(&self, user_id: UserId, badge_id: BadgeId) -> BadgeResult<i64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM user_badges WHERE user_id = ?1 AND badge_id = ?2",
            params![user_id, badge_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
