//! snac core - entity model and storage capability
//!
//! This crate provides the foundational pieces shared by the storage backend,
//! the execution engine and the CLI:
//! - Snippet, partial snippet and team value types with their storage rows
//! - Snippet ID generation and parsing
//! - Password hashing and verification (argon2)
//! - The `Database` storage capability trait
//! - The structured error facility (`ExError`) and logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod password;
pub mod storage;

pub use snac_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ExResult, Result, SnacError};
pub use model::{NewTeam, PartialSnippet, Snippet, SnippetBuilder, SnippetId, Team};
pub use storage::Database;
