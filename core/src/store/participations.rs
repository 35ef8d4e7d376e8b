//! Store methods for competition participations.
//!
//! Participations are written by the competition workflow; the badge
//! engine only reads them. The insert/verify methods back the admin
//! tool's demo seeding and test setup.

use crate::{error::BadgeResult, models::ParticipationRow, types::{UnixTime, UserId}};
use rusqlite::params;

use super::BadgeStore;

impl BadgeStore {
    /// Insert a participation and return its row id.
    pub fn insert_participation(
        &self,
        user_id: UserId,
        competition: &str,
        placement: Option<&str>,
        submitted_at: UnixTime,
    ) -> BadgeResult<i64> {
        self.conn().execute(
            "INSERT INTO participations (user_id, competition, placement, submitted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, competition, placement, submitted_at],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Mark a participation as verified by an organizer.
    pub fn verify_participation(&self, id: i64, verified_at: UnixTime) -> BadgeResult<()> {
        self.conn().execute(
            "UPDATE participations SET verified_at = ?2 WHERE id = ?1",
            params![id, verified_at],
        )?;
        Ok(())
    }

    pub fn get_participation(&self, id: i64) -> BadgeResult<Option<ParticipationRow>> {
        use rusqlite::OptionalExtension;
        let row = self
            .conn()
            .query_row(
                "SELECT id, user_id, competition, placement, submitted_at, verified_at
                 FROM participations WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ParticipationRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        competition: row.get(2)?,
                        placement: row.get(3)?,
                        submitted_at: row.get(4)?,
                        verified_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Number of the user's verified participations. Unverified entries
    /// never count toward badges.
    pub fn verified_participation_count(&self, user_id: UserId) -> BadgeResult<i64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM participations
             WHERE user_id = ?1 AND verified_at IS NOT NULL",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Placements of the user's verified participations, null placements
    /// excluded. Order is insertion order; callers only test membership.
    pub fn verified_placements(&self, user_id: UserId) -> BadgeResult<Vec<String>> {
        let mut stmt = self.conn().prepare(
            "SELECT placement FROM participations
             WHERE user_id = ?1 AND verified_at IS NOT NULL AND placement IS NOT NULL
             ORDER BY id ASC",
        )?;
        let placements = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(placements)
    }
}
