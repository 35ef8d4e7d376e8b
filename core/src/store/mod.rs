//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The engine, rules and triggers call store methods — they never
//! execute SQL directly.

use crate::{
    error::BadgeResult,
    models::{ProfileRow, UserRow},
    types::{UnixTime, UserId},
};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;

mod awards;
mod notifications;
mod participations;

pub struct BadgeStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl BadgeStore {
    /// Open (or create) the application database at `path`.
    pub fn open(path: &str) -> BadgeResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        // Concurrent award passes contend on the same file; wait for the
        // write lock instead of failing with SQLITE_BUSY.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> BadgeResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database
    /// (isolated). For file-based databases, this opens the same file.
    pub fn reopen(&self) -> BadgeResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> BadgeResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_badges.sql"))?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ── Users ──────────────────────────────────────────────────

    /// Insert a user with an explicit id and registration timestamp.
    /// The wider application owns registration; this exists for the
    /// admin tool's demo seeding and for test setup.
    pub fn insert_user(&self, id: UserId, username: &str, created_at: UnixTime) -> BadgeResult<()> {
        self.conn.execute(
            "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
            params![id, username, created_at],
        )?;
        Ok(())
    }

    pub fn get_user(&self, id: UserId) -> BadgeResult<Option<UserRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, username, created_at FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// How many users registered at or before this user, including the
    /// user itself. Ties on created_at all count, so the rank is an
    /// upper bound under timestamp collisions. None when the user row
    /// does not exist.
    pub fn registration_rank(&self, id: UserId) -> BadgeResult<Option<i64>> {
        let created_at: Option<UnixTime> = self
            .conn
            .query_row(
                "SELECT created_at FROM users WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(created_at) = created_at else {
            return Ok(None);
        };
        let rank: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE created_at <= ?1",
            params![created_at],
            |row| row.get(0),
        )?;
        Ok(Some(rank))
    }

    // ── Profiles ───────────────────────────────────────────────

    pub fn upsert_profile(&self, profile: &ProfileRow) -> BadgeResult<()> {
        self.conn.execute(
            "INSERT INTO profiles
                 (user_id, display_name, bio, avatar,
                  facebook, instagram, twitter, tiktok, youtube)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(user_id) DO UPDATE SET
                 display_name = excluded.display_name,
                 bio          = excluded.bio,
                 avatar       = excluded.avatar,
                 facebook     = excluded.facebook,
                 instagram    = excluded.instagram,
                 twitter      = excluded.twitter,
                 tiktok       = excluded.tiktok,
                 youtube      = excluded.youtube",
            params![
                profile.user_id,
                profile.display_name,
                profile.bio,
                profile.avatar,
                profile.facebook,
                profile.instagram,
                profile.twitter,
                profile.tiktok,
                profile.youtube,
            ],
        )?;
        Ok(())
    }

    pub fn get_profile(&self, user_id: UserId) -> BadgeResult<Option<ProfileRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT user_id, display_name, bio, avatar,
                        facebook, instagram, twitter, tiktok, youtube
                 FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(ProfileRow {
                        user_id: row.get(0)?,
                        display_name: row.get(1)?,
                        bio: row.get(2)?,
                        avatar: row.get(3)?,
                        facebook: row.get(4)?,
                        instagram: row.get(5)?,
                        twitter: row.get(6)?,
                        tiktok: row.get(7)?,
                        youtube: row.get(8)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Count of the user's non-empty social URL fields. 0 when the
    /// profile does not exist.
    pub fn social_link_count(&self, user_id: UserId) -> BadgeResult<i64> {
        let Some(profile) = self.get_profile(user_id)? else {
            return Ok(0);
        };
        let count = profile
            .social_links()
            .iter()
            .filter(|link| matches!(link, Some(url) if !url.is_empty()))
            .count();
        Ok(count as i64)
    }
}
