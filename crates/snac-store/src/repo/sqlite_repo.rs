//! SQLite implementation of the storage capability
//!
//! One connection behind a mutex; every trait call locks it for the duration
//! of a single statement. Timestamps are stored in the canonical RFC 3339
//! text form exactly as handed in.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use argon2::Argon2;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use snac_core::errors::ExError;
use snac_core::model::{
    NewTeam, PartialSnippet, PartialSnippetRow, Snippet, SnippetId, SnippetRow, Team, TeamRow,
};
use snac_core::password;
use snac_core::storage::Database;

use crate::db;
use crate::errors::{
    from_rusqlite, from_rusqlite_write, lock_poisoned, snippet_not_found, team_not_found, Result,
};
use crate::migrations::apply_migrations;

const SNIPPET_COLUMNS: &str =
    "id, team_id, title, description, tags, language, content, last_modified";
const PARTIAL_COLUMNS: &str = "id, team_id, title, tags";
const TEAM_COLUMNS: &str =
    "name, display_name, created, last_modified, password_hash, admin_hash";

/// SQLite-backed snippet and team storage
pub struct SqliteDatabase {
    conn: Mutex<Connection>,
    hasher: Argon2<'static>,
}

impl SqliteDatabase {
    /// Open (or create) a database file and bring its schema up to date
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, configured or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path.as_ref())?;
        db::configure(&conn, true)?;
        tracing::debug!(path = %path.as_ref().display(), "opened sqlite database");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Fails if configuration or migration fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        db::configure(&conn, false)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            hasher: Argon2::default(),
        })
    }

    /// Replace the argon2 hasher used for new team passwords
    ///
    /// Verification reads parameters from each stored hash, so hashes made
    /// by different hashers keep verifying.
    pub fn with_hasher(mut self, hasher: Argon2<'static>) -> Self {
        self.hasher = hasher;
        self
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned(op))
    }
}

fn snippet_row(row: &Row<'_>) -> rusqlite::Result<SnippetRow> {
    Ok(SnippetRow {
        id: row.get(0)?,
        team_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        tags: row.get(4)?,
        language: row.get(5)?,
        content: row.get(6)?,
        last_modified: row.get(7)?,
    })
}

fn partial_row(row: &Row<'_>) -> rusqlite::Result<PartialSnippetRow> {
    Ok(PartialSnippetRow {
        id: row.get(0)?,
        team_id: row.get(1)?,
        title: row.get(2)?,
        tags: row.get(3)?,
    })
}

fn team_row(row: &Row<'_>) -> rusqlite::Result<TeamRow> {
    Ok(TeamRow {
        name: row.get(0)?,
        display_name: row.get(1)?,
        created: row.get(2)?,
        last_modified: row.get(3)?,
        password_hash: row.get(4)?,
        admin_hash: row.get(5)?,
    })
}

impl Database for SqliteDatabase {
    fn get_by_id(&self, id: &SnippetId) -> Result<Snippet> {
        let conn = self.lock("get_by_id")?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM snippets WHERE id = ?1", SNIPPET_COLUMNS),
                [id.as_str()],
                snippet_row,
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_op("get_by_id"))?;

        match row {
            Some(row) => Ok(row.into_snippet()?),
            None => Err(snippet_not_found("get_by_id", id.as_str())),
        }
    }

    fn get_by_team_id(&self, team_id: &str) -> Result<Vec<PartialSnippet>> {
        let conn = self.lock("get_by_team_id")?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM snippets WHERE team_id = ?1 ORDER BY title COLLATE NOCASE, id",
                PARTIAL_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([team_id], partial_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        tracing::debug!(team_id, count = rows.len(), "listed partial snippets");
        Ok(rows.into_iter().map(PartialSnippetRow::into_partial).collect())
    }

    fn get_snippets_by_team_id(&self, team_id: &str) -> Result<Vec<Snippet>> {
        let conn = self.lock("get_snippets_by_team_id")?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM snippets WHERE team_id = ?1 ORDER BY title COLLATE NOCASE, id",
                SNIPPET_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([team_id], snippet_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter()
            .map(|row| row.into_snippet().map_err(ExError::from))
            .collect()
    }

    fn insert_snippet(&self, snippet: &Snippet) -> Result<Snippet> {
        let row = snippet.to_row();
        let conn = self.lock("insert_snippet")?;
        conn.execute(
            &format!(
                "INSERT INTO snippets ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                SNIPPET_COLUMNS
            ),
            rusqlite::params![
                row.id,
                row.team_id,
                row.title,
                row.description,
                row.tags,
                row.language,
                row.content,
                row.last_modified,
            ],
        )
        .map_err(|e| from_rusqlite_write("insert_snippet", &row.id, &row.team_id, e))?;

        tracing::debug!(snippet_id = %row.id, team_id = %row.team_id, "inserted snippet");
        Ok(snippet.clone())
    }

    fn update_snippet(&self, snippet: &Snippet) -> Result<()> {
        let row = snippet.to_row();
        let conn = self.lock("update_snippet")?;
        let changed = conn
            .execute(
                "UPDATE snippets SET title = ?1, description = ?2, tags = ?3, language = ?4,
                    content = ?5, last_modified = ?6
                 WHERE id = ?7 AND team_id = ?8",
                rusqlite::params![
                    row.title,
                    row.description,
                    row.tags,
                    row.language,
                    row.content,
                    row.last_modified,
                    row.id,
                    row.team_id,
                ],
            )
            .map_err(|e| from_rusqlite_write("update_snippet", &row.id, &row.team_id, e))?;

        if changed == 0 {
            return Err(snippet_not_found("update_snippet", &row.id).with_team_id(row.team_id));
        }
        Ok(())
    }

    fn delete_snippet(&self, id: &SnippetId, team_id: &str) -> Result<()> {
        let conn = self.lock("delete_snippet")?;
        let changed = conn
            .execute(
                "DELETE FROM snippets WHERE id = ?1 AND team_id = ?2",
                [id.as_str(), team_id],
            )
            .map_err(|e| from_rusqlite(e).with_op("delete_snippet"))?;

        tracing::debug!(snippet_id = %id, team_id, changed, "deleted snippet");
        Ok(())
    }

    fn get_team_by_id(&self, team_id: &str) -> Result<Team> {
        let conn = self.lock("get_team_by_id")?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM teams WHERE name = ?1", TEAM_COLUMNS),
                [team_id],
                team_row,
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_op("get_team_by_id"))?;

        match row {
            Some(row) => Ok(row.into_team()?),
            None => Err(team_not_found("get_team_by_id", team_id)),
        }
    }

    fn insert_team(&self, team: &NewTeam, now: DateTime<Utc>) -> Result<Team> {
        let password_hash = password::hash_password_with(&self.hasher, team.password.expose())?;
        let admin_hash =
            password::hash_password_with(&self.hasher, team.admin_password.expose())?;

        let created = Team {
            name: team.name.clone(),
            display_name: team.display_name.clone(),
            created: now,
            last_modified: now,
            password_hash,
            admin_hash,
        };
        let row = created.to_row();

        let conn = self.lock("insert_team")?;
        conn.execute(
            &format!(
                "INSERT INTO teams ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                TEAM_COLUMNS
            ),
            rusqlite::params![
                row.name,
                row.display_name,
                row.created,
                row.last_modified,
                row.password_hash,
                row.admin_hash,
            ],
        )
        .map_err(|e| from_rusqlite_write("insert_team", &row.name, &row.name, e))?;

        tracing::debug!(team_id = %row.name, "inserted team");
        Ok(created)
    }

    fn update_team(&self, team: &Team) -> Result<()> {
        let row = team.to_row();
        let conn = self.lock("update_team")?;
        let changed = conn
            .execute(
                "UPDATE teams SET display_name = ?1, created = ?2, last_modified = ?3,
                    password_hash = ?4, admin_hash = ?5
                 WHERE name = ?6",
                rusqlite::params![
                    row.display_name,
                    row.created,
                    row.last_modified,
                    row.password_hash,
                    row.admin_hash,
                    row.name,
                ],
            )
            .map_err(|e| from_rusqlite(e).with_op("update_team"))?;

        if changed == 0 {
            return Err(team_not_found("update_team", &row.name));
        }
        Ok(())
    }

    fn delete_team(&self, team_id: &str) -> Result<()> {
        let conn = self.lock("delete_team")?;
        let changed = conn
            .execute("DELETE FROM teams WHERE name = ?1", [team_id])
            .map_err(|e| from_rusqlite(e).with_op("delete_team"))?;

        if changed == 0 {
            return Err(team_not_found("delete_team", team_id));
        }
        tracing::debug!(team_id, "deleted team and its snippets");
        Ok(())
    }

    fn check_team_password(&self, team_id: &str, password: &str, admin: bool) -> Result<bool> {
        let column = if admin { "admin_hash" } else { "password_hash" };
        let hash: Option<String> = {
            let conn = self.lock("check_team_password")?;
            conn.query_row(
                &format!("SELECT {} FROM teams WHERE name = ?1", column),
                [team_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_op("check_team_password"))?
        };

        let Some(hash) = hash else {
            return Err(team_not_found("check_team_password", team_id));
        };

        password::verify_password(password, &hash)
            .map_err(|e| ExError::from(e).with_op("check_team_password").with_team_id(team_id))
    }

    fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| lock_poisoned("close"))?;
        conn.close().map_err(|(_, e)| from_rusqlite(e).with_op("close"))?;
        tracing::debug!("closed sqlite database");
        Ok(())
    }
}
