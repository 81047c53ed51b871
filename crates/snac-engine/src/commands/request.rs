//! Requests and their builder
//!
//! A `Request` is frozen: team credentials, exactly one operation with its
//! payload, and a correlation context. `RequestBuilder` is the only way to
//! make one and rejects misuse at `build()`.

#![allow(clippy::result_large_err)]

use snac_core::errors::{ExError, ExErrorKind, ExResult};
use snac_core::model::{NewTeam, Snippet, SnippetId, Team};
use snac_core_types::{RequestContext, Sensitive};

/// Operation discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    GetAllPartials,
    GetAll,
    Insert,
    Update,
    Delete,
    InsertTeam,
    GetTeam,
    UpdateTeam,
    DeleteTeam,
}

impl OperationKind {
    /// Stable name used for the `op` log field and error context
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::GetAllPartials => "get_all_partials",
            OperationKind::GetAll => "get_all",
            OperationKind::Insert => "insert",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::InsertTeam => "insert_team",
            OperationKind::GetTeam => "get_team",
            OperationKind::UpdateTeam => "update_team",
            OperationKind::DeleteTeam => "delete_team",
        }
    }

    /// Whether the team password is checked before dispatch
    ///
    /// Only team creation runs without credentials.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, OperationKind::InsertTeam)
    }

    /// Whether the credentials must be for the admin role
    pub fn requires_admin(&self) -> bool {
        matches!(self, OperationKind::UpdateTeam | OperationKind::DeleteTeam)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Get(SnippetId),
    GetAllPartials,
    GetAll,
    Insert(Snippet),
    Update(Snippet),
    Delete(SnippetId),
    InsertTeam(NewTeam),
    GetTeam,
    UpdateTeam(Team),
    /// Name of the team to delete
    DeleteTeam(String),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Get(_) => OperationKind::Get,
            Operation::GetAllPartials => OperationKind::GetAllPartials,
            Operation::GetAll => OperationKind::GetAll,
            Operation::Insert(_) => OperationKind::Insert,
            Operation::Update(_) => OperationKind::Update,
            Operation::Delete(_) => OperationKind::Delete,
            Operation::InsertTeam(_) => OperationKind::InsertTeam,
            Operation::GetTeam => OperationKind::GetTeam,
            Operation::UpdateTeam(_) => OperationKind::UpdateTeam,
            Operation::DeleteTeam(_) => OperationKind::DeleteTeam,
        }
    }
}

/// Team and password a request is authorized with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub team_id: String,
    pub password: Sensitive<String>,
    /// Check against the admin hash instead of the regular one
    pub admin: bool,
}

/// A frozen request, ready for `execute`
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) credentials: Option<Credentials>,
    pub(crate) operation: Operation,
    pub(crate) context: RequestContext,
}

impl Request {
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Team the request acts for: the credentials' team, or the team being
    /// created for `InsertTeam`
    pub fn team_id(&self) -> Option<&str> {
        match (&self.credentials, &self.operation) {
            (Some(c), _) => Some(c.team_id.as_str()),
            (None, Operation::InsertTeam(team)) => Some(team.name.as_str()),
            (None, _) => None,
        }
    }

    /// Run the request against a storage backend
    ///
    /// # Errors
    ///
    /// See [`crate::commands::engine_command::execute`].
    pub fn execute(
        self,
        storage: &dyn snac_core::storage::Database,
    ) -> ExResult<crate::commands::engine_command::Outcome> {
        crate::commands::engine_command::execute(self, storage)
    }
}

/// Fluent builder for [`Request`]
///
/// Select exactly one operation. Misuse is recorded and reported by
/// `build()`, so calls can be chained without intermediate checks.
///
/// # Example
///
/// ```
/// use snac_engine::RequestBuilder;
///
/// let request = RequestBuilder::new()
///     .for_team("core", "pw", false)
///     .get("ab3cd")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.kind().as_str(), "get");
/// ```
#[derive(Debug, Default)]
pub struct RequestBuilder {
    credentials: Option<Credentials>,
    selected: Option<OperationKind>,
    operation: Option<Operation>,
    context: Option<RequestContext>,
    error: Option<ExError>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the team and password the request is authorized with
    pub fn for_team(
        mut self,
        team_id: impl Into<String>,
        password: impl Into<Sensitive<String>>,
        admin: bool,
    ) -> Self {
        self.credentials = Some(Credentials {
            team_id: team_id.into(),
            password: password.into(),
            admin,
        });
        self
    }

    /// Use an existing correlation context instead of a fresh one
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Fetch one snippet by ID (case-insensitive)
    pub fn get(self, id: impl AsRef<str>) -> Self {
        let parsed = parse_id(OperationKind::Get, id.as_ref());
        self.select(OperationKind::Get, parsed.map(Operation::Get))
    }

    /// List the team's snippets in listing shape
    pub fn get_all_partials(self) -> Self {
        self.select(OperationKind::GetAllPartials, Ok(Operation::GetAllPartials))
    }

    /// List the team's full snippets
    pub fn get_all(self) -> Self {
        self.select(OperationKind::GetAll, Ok(Operation::GetAll))
    }

    /// Create a snippet; an empty ID or team is filled in by the engine
    pub fn insert(self, snippet: Snippet) -> Self {
        self.select(OperationKind::Insert, Ok(Operation::Insert(snippet)))
    }

    /// Replace an existing snippet
    pub fn update(self, snippet: Snippet) -> Self {
        self.select(OperationKind::Update, Ok(Operation::Update(snippet)))
    }

    /// Delete one snippet by ID (case-insensitive)
    pub fn delete(self, id: impl AsRef<str>) -> Self {
        let parsed = parse_id(OperationKind::Delete, id.as_ref());
        self.select(OperationKind::Delete, parsed.map(Operation::Delete))
    }

    /// Create a team; needs no credentials
    pub fn new_team(self, team: NewTeam) -> Self {
        self.select(OperationKind::InsertTeam, Ok(Operation::InsertTeam(team)))
    }

    /// Fetch the authorized team
    pub fn get_team(self) -> Self {
        self.select(OperationKind::GetTeam, Ok(Operation::GetTeam))
    }

    /// Replace the authorized team's record
    pub fn update_team(self, team: Team) -> Self {
        self.select(OperationKind::UpdateTeam, Ok(Operation::UpdateTeam(team)))
    }

    /// Delete the authorized team and all of its snippets
    pub fn delete_team(self, team_id: impl Into<String>) -> Self {
        self.select(
            OperationKind::DeleteTeam,
            Ok(Operation::DeleteTeam(team_id.into())),
        )
    }

    fn select(mut self, kind: OperationKind, operation: ExResult<Operation>) -> Self {
        if let Some(previous) = self.selected {
            self.record(
                ExError::new(ExErrorKind::MalformedRequest)
                    .with_op(kind.as_str())
                    .with_message(format!(
                        "Request already has operation '{}'; cannot also select '{}'",
                        previous, kind
                    )),
            );
            return self;
        }

        self.selected = Some(kind);
        match operation {
            Ok(operation) => self.operation = Some(operation),
            Err(e) => self.record(e),
        }
        self
    }

    // First error wins
    fn record(&mut self, error: ExError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Freeze the builder into a request
    ///
    /// # Errors
    ///
    /// - `MalformedRequest`: no operation, more than one operation, missing
    ///   credentials, or a non-admin role for a team mutation
    /// - `MalformedPayload`: an ID argument is not a snippet ID
    pub fn build(self) -> ExResult<Request> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let Some(operation) = self.operation else {
            return Err(ExError::new(ExErrorKind::MalformedRequest)
                .with_message("Request has no operation selected"));
        };
        let kind = operation.kind();

        match &self.credentials {
            None if kind.requires_auth() => {
                return Err(ExError::new(ExErrorKind::MalformedRequest)
                    .with_op(kind.as_str())
                    .with_message(format!(
                        "Operation '{}' requires credentials; call for_team first",
                        kind
                    )));
            }
            Some(credentials) if kind.requires_admin() && !credentials.admin => {
                return Err(ExError::new(ExErrorKind::MalformedRequest)
                    .with_op(kind.as_str())
                    .with_team_id(credentials.team_id.clone())
                    .with_message(format!("Operation '{}' requires the admin role", kind)));
            }
            _ => {}
        }

        Ok(Request {
            credentials: self.credentials,
            operation,
            context: self.context.unwrap_or_default(),
        })
    }
}

fn parse_id(kind: OperationKind, input: &str) -> ExResult<SnippetId> {
    SnippetId::parse(input).map_err(|e| {
        ExError::new(ExErrorKind::MalformedPayload)
            .with_op(kind.as_str())
            .with_entity_id(input)
            .with_message(format!(
                "Operation '{}' expects a SnippetId payload: {}",
                kind, e
            ))
    })
}
