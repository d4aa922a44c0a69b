//! # Database Error Types
//!
//! Failures raised by the snapshot store. Persistence is best-effort from
//! the cart's point of view: the service layer logs these and keeps the
//! in-memory state authoritative.

use thiserror::Error;

/// Database operation failures.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not open or connect to the SQLite database.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// A migration failed to apply.
    #[error("database migration failed: {0}")]
    MigrationFailed(#[from] sqlx::migrate::MigrateError),

    /// A query failed at runtime.
    #[error("database query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    /// A snapshot payload could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for Results with DbError.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_message() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: DbError = bad.unwrap_err().into();
        assert!(err.to_string().starts_with("snapshot serialization failed"));
    }
}
