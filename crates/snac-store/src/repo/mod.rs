//! Repository layer persisting snippets and teams to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteDatabase;
