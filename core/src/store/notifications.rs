//! Store methods for the notification sink.
//!
//! The wider application renders and delivers these; the badge engine
//! only inserts one row per new award.

use crate::{
    error::BadgeResult,
    models::NotificationRow,
    types::{UnixTime, UserId},
};
use rusqlite::params;

use super::BadgeStore;

impl BadgeStore {
    pub fn insert_notification(
        &self,
        user_id: UserId,
        kind: &str,
        title: &str,
        body: &str,
        related_id: Option<i64>,
        created_at: UnixTime,
    ) -> BadgeResult<()> {
        self.conn().execute(
            "INSERT INTO notifications (user_id, kind, title, body, related_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![user_id, kind, title, body, related_id, created_at],
        )?;
        Ok(())
    }

    pub fn notifications_for_user(&self, user_id: UserId) -> BadgeResult<Vec<NotificationRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, user_id, kind, title, body, related_id, created_at
             FROM notifications WHERE user_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(NotificationRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    kind: row.get(2)?,
                    title: row.get(3)?,
                    body: row.get(4)?,
                    related_id: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
