//! Request execution
//!
//! ## Pipeline (in order):
//! 1. Authorization gate: one password check for every operation but
//!    `InsertTeam`; a failed check stops the request before dispatch
//! 2. Payload validation: snippets and team records must belong to the
//!    authorized team
//! 3. Storage invocation: exactly one call, no retry
//! 4. Result tagging: an `Outcome` whose `kind()` names its shape
//!
//! ## Logging Ownership
//!
//! The engine owns lifecycle logging for every request (`log_op_start!`,
//! `log_op_end!`, `log_op_error!`). Storage uses only `tracing::debug!()`.

#![allow(clippy::result_large_err)]

use chrono::Utc;
use snac_core::errors::{ExError, ExErrorKind, ExResult};
use snac_core::model::{PartialSnippet, Snippet, SnippetId, Team};
use snac_core::storage::Database;
use snac_core::{log_op_end, log_op_error, log_op_start};

use crate::commands::request::{Credentials, Operation, OperationKind, Request};

/// Shape of a successful result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    SingleSnippet,
    SnippetList,
    PartialList,
    Team,
    /// Acknowledged mutation without payload
    Boolean,
    None,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::SingleSnippet => "single_snippet",
            ResultKind::SnippetList => "snippet_list",
            ResultKind::PartialList => "partial_list",
            ResultKind::Team => "team",
            ResultKind::Boolean => "boolean",
            ResultKind::None => "none",
        }
    }
}

/// Result of executing a request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Snippet(Snippet),
    Snippets(Vec<Snippet>),
    Partials(Vec<PartialSnippet>),
    Team(Team),
    /// The mutation was applied
    Applied,
    Empty,
}

impl Outcome {
    pub fn kind(&self) -> ResultKind {
        match self {
            Outcome::Snippet(_) => ResultKind::SingleSnippet,
            Outcome::Snippets(_) => ResultKind::SnippetList,
            Outcome::Partials(_) => ResultKind::PartialList,
            Outcome::Team(_) => ResultKind::Team,
            Outcome::Applied => ResultKind::Boolean,
            Outcome::Empty => ResultKind::None,
        }
    }

    /// Number of entities carried
    pub fn len(&self) -> usize {
        match self {
            Outcome::Snippet(_) | Outcome::Team(_) => 1,
            Outcome::Snippets(s) => s.len(),
            Outcome::Partials(p) => p.len(),
            Outcome::Applied | Outcome::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_snippet(self) -> Option<Snippet> {
        match self {
            Outcome::Snippet(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_snippets(self) -> Option<Vec<Snippet>> {
        match self {
            Outcome::Snippets(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_partials(self) -> Option<Vec<PartialSnippet>> {
        match self {
            Outcome::Partials(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_team(self) -> Option<Team> {
        match self {
            Outcome::Team(t) => Some(t),
            _ => None,
        }
    }
}

/// Execute a frozen request against a storage backend
///
/// ## Errors
///
/// - `MalformedRequest`: credentials missing for an operation that needs them
/// - `AuthorizationFailed`: the password did not match
/// - `TeamNotFound`: the credentials name an unknown team
/// - `MalformedPayload`: the payload targets another team, a snippet update
///   has no ID, or a team update carries no password hashes
/// - `NotFound`: the snippet does not exist
/// - `StorageFailure`: any other backend error, wrapped
pub fn execute(request: Request, storage: &dyn Database) -> ExResult<Outcome> {
    let kind = request.kind();
    let op = kind.as_str();
    let request_id = request.context().request_id.clone();
    let trace_id = request.context().trace_id.clone();
    let team_id = request.team_id().unwrap_or_default().to_string();

    log_op_start!(op, request_id = request_id.as_str(), team_id = team_id.as_str());
    let start = std::time::Instant::now();

    let outcome = execute_impl(request, storage).map_err(|e| {
        let mut e = e.with_request_id(request_id.clone());
        if let Some(trace_id) = &trace_id {
            e = e.with_trace_id(trace_id.clone());
        }
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str(),
            team_id = team_id.as_str()
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        team_id = team_id.as_str(),
        result_kind = outcome.kind().as_str(),
        result_len = outcome.len() as u64
    );

    Ok(outcome)
}

fn execute_impl(request: Request, storage: &dyn Database) -> ExResult<Outcome> {
    let Request {
        credentials,
        operation,
        ..
    } = request;
    let kind = operation.kind();

    if !kind.requires_auth() {
        return dispatch(operation, None, false, storage);
    }

    let credentials = credentials.ok_or_else(|| {
        ExError::new(ExErrorKind::MalformedRequest)
            .with_op(kind.as_str())
            .with_message(format!("Operation '{}' requires credentials", kind))
    })?;
    authorize(kind, &credentials, storage)?;
    dispatch(operation, Some(&credentials.team_id), credentials.admin, storage)
}

fn authorize(kind: OperationKind, credentials: &Credentials, storage: &dyn Database) -> ExResult<()> {
    let team = credentials.team_id.as_str();
    match storage.check_team_password(team, credentials.password.expose(), credentials.admin) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ExError::new(ExErrorKind::AuthorizationFailed)
            .with_op(kind.as_str())
            .with_team_id(team)
            .with_message(format!("Incorrect password for team '{}'", team))),
        Err(e) if e.kind() == ExErrorKind::TeamNotFound => {
            Err(ExError::new(ExErrorKind::TeamNotFound)
                .with_op(kind.as_str())
                .with_team_id(team)
                .with_message(format!("Team with name '{}' was not found", team))
                .with_source(e))
        }
        Err(e) => Err(ExError::new(ExErrorKind::StorageFailure)
            .with_op(kind.as_str())
            .with_team_id(team)
            .with_message(format!("Error while checking password for team '{}'", team))
            .with_source(e)),
    }
}

fn dispatch(
    operation: Operation,
    team: Option<&str>,
    admin: bool,
    storage: &dyn Database,
) -> ExResult<Outcome> {
    let kind = operation.kind();
    let team = team.unwrap_or_default();

    match operation {
        Operation::Get(id) => {
            let snippet = storage
                .get_by_id(&id)
                .map_err(|e| storage_error(kind, id.as_str(), e))?;
            // A snippet of another team is reported as absent
            if snippet.team_id != team {
                return Err(not_found(kind, &id));
            }
            Ok(Outcome::Snippet(snippet))
        }

        Operation::GetAllPartials => storage
            .get_by_team_id(team)
            .map(Outcome::Partials)
            .map_err(|e| storage_error(kind, team, e)),

        Operation::GetAll => storage
            .get_snippets_by_team_id(team)
            .map(Outcome::Snippets)
            .map_err(|e| storage_error(kind, team, e)),

        Operation::Insert(mut snippet) => {
            scope_snippet(kind, &mut snippet, team)?;
            if snippet.id.is_empty() {
                snippet.id = SnippetId::generate();
            }
            snippet.last_modified = Utc::now();
            let stored = storage
                .insert_snippet(&snippet)
                .map_err(|e| storage_error(kind, snippet.id.as_str(), e))?;
            Ok(Outcome::Snippet(stored))
        }

        Operation::Update(mut snippet) => {
            scope_snippet(kind, &mut snippet, team)?;
            if snippet.id.is_empty() {
                return Err(ExError::new(ExErrorKind::MalformedPayload)
                    .with_op(kind.as_str())
                    .with_team_id(team)
                    .with_message("Snippet to update has no ID"));
            }
            snippet.last_modified = Utc::now();
            storage
                .update_snippet(&snippet)
                .map_err(|e| storage_error(kind, snippet.id.as_str(), e))?;
            Ok(Outcome::Applied)
        }

        Operation::Delete(id) => {
            storage
                .delete_snippet(&id, team)
                .map_err(|e| storage_error(kind, id.as_str(), e))?;
            Ok(Outcome::Applied)
        }

        Operation::InsertTeam(new_team) => {
            storage
                .insert_team(&new_team, Utc::now())
                .map_err(|e| storage_error(kind, &new_team.name, e))?;
            Ok(Outcome::Applied)
        }

        Operation::GetTeam => {
            let record = storage
                .get_team_by_id(team)
                .map_err(|e| storage_error(kind, team, e))?;
            // Hashes are only handed out to the admin role
            if admin {
                Ok(Outcome::Team(record))
            } else {
                Ok(Outcome::Team(record.without_hashes()))
            }
        }

        Operation::UpdateTeam(mut record) => {
            ensure_own_team(kind, &record.name, team)?;
            if record.password_hash.is_empty() || record.admin_hash.is_empty() {
                return Err(ExError::new(ExErrorKind::MalformedPayload)
                    .with_op(kind.as_str())
                    .with_team_id(team)
                    .with_message(
                        "Team payload has no password hashes; fetch it with the admin role",
                    ));
            }
            record.last_modified = Utc::now();
            storage
                .update_team(&record)
                .map_err(|e| storage_error(kind, &record.name, e))?;
            Ok(Outcome::Applied)
        }

        Operation::DeleteTeam(target) => {
            ensure_own_team(kind, &target, team)?;
            storage
                .delete_team(&target)
                .map_err(|e| storage_error(kind, &target, e))?;
            Ok(Outcome::Empty)
        }
    }
}

/// Assign an unowned snippet to the team; reject one owned by another team
fn scope_snippet(kind: OperationKind, snippet: &mut Snippet, team: &str) -> ExResult<()> {
    if snippet.team_id.is_empty() {
        snippet.team_id = team.to_string();
    }
    if snippet.team_id != team {
        return Err(ExError::new(ExErrorKind::MalformedPayload)
            .with_op(kind.as_str())
            .with_entity_id(snippet.id.as_str())
            .with_team_id(team)
            .with_message(format!(
                "Snippet belongs to team '{}', not to the authorized team '{}'",
                snippet.team_id, team
            )));
    }
    Ok(())
}

fn ensure_own_team(kind: OperationKind, target: &str, team: &str) -> ExResult<()> {
    if target != team {
        return Err(ExError::new(ExErrorKind::MalformedPayload)
            .with_op(kind.as_str())
            .with_team_id(team)
            .with_message(format!(
                "Operation '{}' targets team '{}', not the authorized team '{}'",
                kind, target, team
            )));
    }
    Ok(())
}

fn not_found(kind: OperationKind, id: &SnippetId) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(kind.as_str())
        .with_entity_id(id.as_str())
        .with_message(format!("Snippet not found: {}", id))
}

/// Attach operation context to a storage error
///
/// Lookup misses keep their kind; anything else becomes `StorageFailure`
/// wrapping the backend error.
fn storage_error(kind: OperationKind, key: &str, err: ExError) -> ExError {
    match err.kind() {
        ExErrorKind::NotFound | ExErrorKind::TeamNotFound => ExError::new(err.kind())
            .with_op(kind.as_str())
            .with_entity_id(key)
            .with_message(err.message().to_string())
            .with_source(err),
        _ => ExError::new(ExErrorKind::StorageFailure)
            .with_op(kind.as_str())
            .with_entity_id(key)
            .with_message(format!("Error while executing {}", kind))
            .with_source(err),
    }
}
