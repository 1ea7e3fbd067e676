//! Common error types for Huddle
//!
//! Raw store errors are classified into typed kinds exactly once, at the
//! `From<sqlx::Error>` boundary. Service code matches on kinds, never on
//! driver error codes or message text.

use thiserror::Error;

/// Common result type for Huddle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Huddle service
#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed an empty or malformed identifier or parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced attendee/facilitator/record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated (duplicate check-in, duplicate contact)
    #[error("Duplicate: {0}")]
    DuplicateKey(String),

    /// Store-level access-control rejection
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Domain rule violated (facilitator assignment, gender mismatch)
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// Transport or connection failure reaching the store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Uncategorized failure, message passed through
    #[error("{0}")]
    Unknown(String),
}

impl Error {
    /// Prefix the carried message with added context, keeping the kind.
    ///
    /// Used to report partial progress ("registered but check-in failed")
    /// without collapsing the underlying kind into an opaque error.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Error::InvalidArgument(m) => Error::InvalidArgument(format!("{context}: {m}")),
            Error::NotFound(m) => Error::NotFound(format!("{context}: {m}")),
            Error::DuplicateKey(m) => Error::DuplicateKey(format!("{context}: {m}")),
            Error::PermissionDenied(m) => Error::PermissionDenied(format!("{context}: {m}")),
            Error::PolicyViolation(m) => Error::PolicyViolation(format!("{context}: {m}")),
            Error::StoreUnavailable(m) => Error::StoreUnavailable(format!("{context}: {m}")),
            Error::Config(m) => Error::Config(format!("{context}: {m}")),
            Error::Io(e) => Error::Unknown(format!("{context}: {e}")),
            Error::Unknown(m) => Error::Unknown(format!("{context}: {m}")),
        }
    }

    /// True for the kinds that indicate the store itself misbehaved rather
    /// than the request being wrong.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_) | Error::Unknown(_))
    }
}

/// Classify a raw sqlx error into the Huddle taxonomy.
///
/// Constraint violations keep enough of the driver message to tell which
/// constraint fired; callers rewrite them into user-facing text at the
/// operation layer.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Error::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) => {
                use sqlx::error::ErrorKind;
                match db.kind() {
                    ErrorKind::UniqueViolation => Error::DuplicateKey(db.message().to_string()),
                    ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => Error::InvalidArgument(db.message().to_string()),
                    _ => Error::Unknown(db.message().to_string()),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => Error::StoreUnavailable(err.to_string()),
            _ => Error::Unknown(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_pool_closed_maps_to_store_unavailable() {
        let err: Error = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert!(err.is_store_failure());
    }

    #[test]
    fn test_with_context_preserves_kind() {
        let err = Error::DuplicateKey("UNIQUE constraint failed".to_string())
            .with_context("attendee registered but check-in failed");
        match err {
            Error::DuplicateKey(msg) => {
                assert!(msg.starts_with("attendee registered but check-in failed"));
                assert!(msg.contains("UNIQUE constraint failed"));
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_policy_violation_is_not_store_failure() {
        assert!(!Error::PolicyViolation("gender mismatch".to_string()).is_store_failure());
    }
}
