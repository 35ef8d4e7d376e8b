//! Shared primitive types used across the badge engine.

/// A user's stable numeric key, assigned by the application's
/// registration flow.
pub type UserId = i64;

/// A badge's stable numeric key. Assigned in the catalog and mirrored
/// into the badges table so awards can reference it.
pub type BadgeId = i64;

/// Unix seconds, UTC. All persisted timestamps use this representation.
pub type UnixTime = i64;
