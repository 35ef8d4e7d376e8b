//! Row types as persisted to SQLite.
//!
//! RULE: these are plain data. All reads and writes go through
//! `BadgeStore`; nothing here touches the database.

use crate::types::{BadgeId, UnixTime, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The avatar value the application assigns at profile creation.
/// A profile still carrying it has never uploaded a picture.
pub const DEFAULT_AVATAR: &str = "default-avatar.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub created_at: UnixTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRow {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
}

impl ProfileRow {
    /// The five social URL slots, in the order the original form lists them.
    pub fn social_links(&self) -> [&Option<String>; 5] {
        [
            &self.facebook,
            &self.instagram,
            &self.twitter,
            &self.tiktok,
            &self.youtube,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationRow {
    pub id: i64,
    pub user_id: UserId,
    pub competition: String,
    pub placement: Option<String>,
    pub submitted_at: UnixTime,
    /// Set when an organizer approves the entry. Only verified
    /// participations count toward badges.
    pub verified_at: Option<UnixTime>,
}

/// Badge kind, persisted as the original SCREAMING_SNAKE strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeKind {
    ProfileCompletion,
    Participation,
    CompetitionMilestone,
    SpecialAchievement,
}

impl BadgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileCompletion => "PROFILE_COMPLETION",
            Self::Participation => "PARTICIPATION",
            Self::CompetitionMilestone => "COMPETITION_MILESTONE",
            Self::SpecialAchievement => "SPECIAL_ACHIEVEMENT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PROFILE_COMPLETION" => Some(Self::ProfileCompletion),
            "PARTICIPATION" => Some(Self::Participation),
            "COMPETITION_MILESTONE" => Some(Self::CompetitionMilestone),
            "SPECIAL_ACHIEVEMENT" => Some(Self::SpecialAchievement),
            _ => None,
        }
    }
}

/// A row of the badges table: the persisted mirror of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeRow {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub kind: BadgeKind,
    pub requirement: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRow {
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub awarded_at: UnixTime,
}

impl AwardRow {
    pub fn awarded_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.awarded_at, 0)
    }
}

/// Notification kind emitted on each new award.
pub const NOTIFICATION_BADGE_EARNED: &str = "BADGE_EARNED";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: UserId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub related_id: Option<i64>,
    pub created_at: UnixTime,
}
