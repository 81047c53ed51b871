//! Storage capability
//!
//! The interface a backend must satisfy for the execution engine: keyed CRUD
//! for snippets and teams plus a password check. Implementations own their
//! connection; the engine never opens or closes it.

use chrono::{DateTime, Utc};

use crate::errors::ExResult;
use crate::model::{NewTeam, PartialSnippet, Snippet, SnippetId, Team};

/// Backend for snippets and teams
///
/// # Contract
///
/// - Timestamps are persisted exactly as given; stamping happens upstream.
/// - Lookups of absent snippets fail with `NotFound`, absent teams with
///   `TeamNotFound`.
/// - Listing a team without snippets is an empty list, not an error.
/// - No `rusqlite` (or other driver) types in signatures.
pub trait Database: Send + Sync {
    /// Fetch one snippet
    ///
    /// # Errors
    ///
    /// `NotFound` if no snippet has this ID; backend failures otherwise.
    fn get_by_id(&self, id: &SnippetId) -> ExResult<Snippet>;

    /// List the snippets of a team in listing shape
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn get_by_team_id(&self, team_id: &str) -> ExResult<Vec<PartialSnippet>>;

    /// List the full snippets of a team
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn get_snippets_by_team_id(&self, team_id: &str) -> ExResult<Vec<Snippet>>;

    /// Persist a new snippet and return it as stored
    ///
    /// # Errors
    ///
    /// `AlreadyExists` on a duplicate ID, `TeamNotFound` when the owning team
    /// does not exist, backend failures otherwise.
    fn insert_snippet(&self, snippet: &Snippet) -> ExResult<Snippet>;

    /// Replace every column of the snippet with this ID
    ///
    /// # Errors
    ///
    /// `NotFound` if no snippet has this ID; backend failures otherwise.
    fn update_snippet(&self, snippet: &Snippet) -> ExResult<()>;

    /// Delete a snippet of `team_id`; deleting an absent ID, or one owned by
    /// another team, succeeds without touching anything
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn delete_snippet(&self, id: &SnippetId, team_id: &str) -> ExResult<()>;

    /// Fetch one team
    ///
    /// # Errors
    ///
    /// `TeamNotFound` if no team has this name; backend failures otherwise.
    fn get_team_by_id(&self, team_id: &str) -> ExResult<Team>;

    /// Create a team, hashing both passwords
    ///
    /// `now` becomes both `created` and `last_modified`.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the name is taken, `PasswordHash` if hashing fails,
    /// backend failures otherwise.
    fn insert_team(&self, team: &NewTeam, now: DateTime<Utc>) -> ExResult<Team>;

    /// Replace display name, timestamps and hashes of an existing team
    ///
    /// # Errors
    ///
    /// `TeamNotFound` if no team has this name; backend failures otherwise.
    fn update_team(&self, team: &Team) -> ExResult<()>;

    /// Delete a team and, with it, all of its snippets
    ///
    /// # Errors
    ///
    /// `TeamNotFound` if no team has this name; backend failures otherwise.
    fn delete_team(&self, team_id: &str) -> ExResult<()>;

    /// Compare a password against the team's regular or admin hash
    ///
    /// A mismatch is `Ok(false)`. The regular and admin hashes never
    /// cross-validate.
    ///
    /// # Errors
    ///
    /// `TeamNotFound` for an unknown team, `PasswordHash` for an unreadable
    /// stored hash, backend failures otherwise.
    fn check_team_password(&self, team_id: &str, password: &str, admin: bool) -> ExResult<bool>;

    /// Release the backend; called once by the owner on its exit path
    ///
    /// # Errors
    ///
    /// Backend failures while closing.
    fn close(self) -> ExResult<()>
    where
        Self: Sized;
}
