//! Error handling for snac-store
//!
//! Wraps snac-core ExError with store-specific helpers

use snac_core::errors::{ExError, ExErrorKind, SnacError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a snippet-not-found error
pub fn snippet_not_found(op: &str, id: &str) -> ExError {
    ExError::from(SnacError::SnippetNotFound { id: id.to_string() }).with_op(op)
}

/// Create a team-not-found error
pub fn team_not_found(op: &str, team_id: &str) -> ExError {
    ExError::from(SnacError::TeamNotFound {
        team_id: team_id.to_string(),
    })
    .with_op(op)
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a write failure, translating key constraint violations
///
/// A primary key clash becomes `AlreadyExists`; a dangling `team_id` becomes
/// `TeamNotFound`.
pub fn from_rusqlite_write(op: &str, key: &str, team_id: &str, err: rusqlite::Error) -> ExError {
    if let rusqlite::Error::SqliteFailure(ffi_err, _) = &err {
        match ffi_err.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return ExError::new(ExErrorKind::AlreadyExists)
                    .with_op(op)
                    .with_entity_id(key)
                    .with_message(format!("'{}' already exists", key));
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return team_not_found(op, team_id);
            }
            _ => {}
        }
    }
    from_rusqlite(err).with_op(op).with_entity_id(key)
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message("database connection lock poisoned")
}
