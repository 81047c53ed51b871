//! snac store - SQLite persistence for snippets and teams
//!
//! Provides:
//! - `SqliteDatabase`, the SQLite implementation of the `Database` capability
//! - Embedded, checksummed schema migrations
//! - Connection helpers and store-specific error constructors

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteDatabase;
