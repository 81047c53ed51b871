#![allow(dead_code)]

use argon2::{Algorithm, Argon2, Params, Version};
use chrono::Utc;
use snac_core::model::{NewTeam, Snippet, SnippetBuilder, Team};
use snac_core::storage::Database;
use snac_store::SqliteDatabase;

/// Argon2 with minimal cost so hashing does not dominate test time
pub fn cheap_hasher() -> Argon2<'static> {
    Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(8, 1, 1, None).expect("valid argon2 params"),
    )
}

pub fn setup_db() -> SqliteDatabase {
    SqliteDatabase::open_in_memory()
        .expect("Failed to open in-memory database")
        .with_hasher(cheap_hasher())
}

pub fn create_team(db: &SqliteDatabase, name: &str, password: &str, admin: &str) -> Team {
    db.insert_team(&NewTeam::new(name, name.to_uppercase(), password, admin), Utc::now())
        .expect("Failed to insert team")
}

pub fn stamped_snippet(title: &str, team: &str, tags: &[&str]) -> Snippet {
    let mut snippet = SnippetBuilder::new(title, team)
        .tags(tags.iter().map(|t| t.to_string()).collect())
        .language("rust")
        .content(format!("// {}", title))
        .build();
    snippet.last_modified = Utc::now();
    snippet
}
