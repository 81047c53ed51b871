#![allow(dead_code)]

use std::sync::Mutex;

use argon2::{Algorithm, Argon2, Params, Version};
use chrono::{DateTime, Utc};
use snac_core::errors::{ExError, ExErrorKind, ExResult};
use snac_core::model::{NewTeam, PartialSnippet, Snippet, SnippetId, Team};
use snac_core::storage::Database;
use snac_store::SqliteDatabase;
use tempfile::TempDir;

/// How the fake answers `check_team_password`
#[derive(Debug, Clone, Copy)]
pub enum PasswordAnswer {
    Accept,
    Reject,
    UnknownTeam,
    Broken,
}

/// Storage fake that records every call and answers from fixed data
pub struct RecordingDatabase {
    pub calls: Mutex<Vec<String>>,
    /// `(id, team_id)` of every delete_snippet call
    pub deleted: Mutex<Vec<(String, String)>>,
    pub password: PasswordAnswer,
    pub snippets: Vec<Snippet>,
    pub fail_writes: bool,
}

impl RecordingDatabase {
    pub fn new(password: PasswordAnswer) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            password,
            snippets: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the password check
    pub fn dispatched(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "check_team_password")
            .collect()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn write_result(&self) -> ExResult<()> {
        if self.fail_writes {
            return Err(ExError::new(ExErrorKind::Persistence).with_message("disk I/O error"));
        }
        Ok(())
    }
}

impl Database for RecordingDatabase {
    fn get_by_id(&self, id: &SnippetId) -> ExResult<Snippet> {
        self.record("get_by_id");
        self.snippets
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| ExError::new(ExErrorKind::NotFound).with_message("Snippet not found"))
    }

    fn get_by_team_id(&self, team_id: &str) -> ExResult<Vec<PartialSnippet>> {
        self.record("get_by_team_id");
        Ok(self
            .snippets
            .iter()
            .filter(|s| s.team_id == team_id)
            .map(Snippet::to_partial)
            .collect())
    }

    fn get_snippets_by_team_id(&self, team_id: &str) -> ExResult<Vec<Snippet>> {
        self.record("get_snippets_by_team_id");
        Ok(self
            .snippets
            .iter()
            .filter(|s| s.team_id == team_id)
            .cloned()
            .collect())
    }

    fn insert_snippet(&self, snippet: &Snippet) -> ExResult<Snippet> {
        self.record("insert_snippet");
        self.write_result()?;
        Ok(snippet.clone())
    }

    fn update_snippet(&self, _snippet: &Snippet) -> ExResult<()> {
        self.record("update_snippet");
        self.write_result()
    }

    fn delete_snippet(&self, id: &SnippetId, team_id: &str) -> ExResult<()> {
        self.record("delete_snippet");
        self.deleted
            .lock()
            .unwrap()
            .push((id.to_string(), team_id.to_string()));
        self.write_result()
    }

    fn get_team_by_id(&self, team_id: &str) -> ExResult<Team> {
        self.record("get_team_by_id");
        Ok(team(team_id, DateTime::<Utc>::default()))
    }

    fn insert_team(&self, new_team: &NewTeam, now: DateTime<Utc>) -> ExResult<Team> {
        self.record("insert_team");
        self.write_result()?;
        Ok(team(&new_team.name, now))
    }

    fn update_team(&self, _team: &Team) -> ExResult<()> {
        self.record("update_team");
        self.write_result()
    }

    fn delete_team(&self, _team_id: &str) -> ExResult<()> {
        self.record("delete_team");
        self.write_result()
    }

    fn check_team_password(&self, team_id: &str, _password: &str, _admin: bool) -> ExResult<bool> {
        self.record("check_team_password");
        match self.password {
            PasswordAnswer::Accept => Ok(true),
            PasswordAnswer::Reject => Ok(false),
            PasswordAnswer::UnknownTeam => Err(ExError::new(ExErrorKind::TeamNotFound)
                .with_team_id(team_id)
                .with_message(format!("Team with name '{}' was not found", team_id))),
            PasswordAnswer::Broken => {
                Err(ExError::new(ExErrorKind::Persistence).with_message("database is locked"))
            }
        }
    }

    fn close(self) -> ExResult<()> {
        Ok(())
    }
}

pub fn team(name: &str, at: DateTime<Utc>) -> Team {
    Team {
        name: name.to_string(),
        display_name: name.to_uppercase(),
        created: at,
        last_modified: at,
        password_hash: "$argon2id$regular".to_string(),
        admin_hash: "$argon2id$admin".to_string(),
    }
}

pub fn cheap_hasher() -> Argon2<'static> {
    Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(8, 1, 1, None).expect("valid argon2 params"),
    )
}

/// File-backed SQLite database in a scratch directory
pub fn setup_sqlite() -> (TempDir, SqliteDatabase) {
    let temp_dir = TempDir::new().unwrap();
    let db = SqliteDatabase::open(temp_dir.path().join("snac.db"))
        .unwrap()
        .with_hasher(cheap_hasher());
    (temp_dir, db)
}
