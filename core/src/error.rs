use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    /// True when the underlying SQLite error is a constraint violation,
    /// i.e. the UNIQUE(user_id, badge_id) guard fired on an award insert.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            BadgeError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type BadgeResult<T> = Result<T, BadgeError>;
