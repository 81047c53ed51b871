use snac_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias for model-level operations
pub type Result<T> = std::result::Result<T, SnacError>;

/// Result type alias for storage and engine operations
pub type ExResult<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that crosses a crate boundary is classified by one of these
/// kinds. Each kind maps to a stable code for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Caller-fixable request errors
    /// Payload has the wrong shape for the selected operation
    MalformedPayload,
    /// Builder misuse: no operation, two operations, missing credentials
    MalformedRequest,

    // Authorization
    /// Credentials were checked and did not match
    AuthorizationFailed,
    /// The team named by the credentials or payload does not exist
    TeamNotFound,

    // Lookups
    NotFound,
    AlreadyExists,

    // Backend
    /// Backend failure surfaced by the engine (wraps the storage error)
    StorageFailure,
    /// Raw persistence error inside the storage layer
    Persistence,
    /// Stored value could not be decoded (e.g. a malformed timestamp)
    Parse,
    PasswordHash,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedPayload => "ERR_MALFORMED_PAYLOAD",
            ExErrorKind::MalformedRequest => "ERR_MALFORMED_REQUEST",
            ExErrorKind::AuthorizationFailed => "ERR_AUTHORIZATION_FAILED",
            ExErrorKind::TeamNotFound => "ERR_TEAM_NOT_FOUND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::StorageFailure => "ERR_STORAGE_FAILURE",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::PasswordHash => "ERR_PASSWORD_HASH",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for errors the caller can fix by changing the request
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedPayload | ExErrorKind::MalformedRequest
        )
    }

    /// True for credential problems that should be shown to the user as such
    pub fn is_authorization_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::AuthorizationFailed | ExErrorKind::TeamNotFound
        )
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus context (operation, key,
/// team, request id) for humans and logs. Wrapped errors are kept in
/// `source` and exposed through `std::error::Error::source`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    team_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            team_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the key of the entity the operation targeted
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Wrap an underlying error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the wrapped error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Kind of the innermost wrapped error
    pub fn root_kind(&self) -> ExErrorKind {
        let mut current = self;
        while let Some(inner) = current.source_error() {
            current = inner;
        }
        current.kind
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (id: {})", entity_id)?;
        }
        if let Some(team_id) = &self.team_id {
            write!(f, " (team: {})", team_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the entity model and password primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnacError {
    /// Text is not a 5-character snippet ID from the allowed alphabet
    #[error("Invalid snippet ID '{value}': expected 5 characters from A-Z (no O) and 1-9")]
    InvalidSnippetId { value: String },

    /// Stored timestamp does not use the canonical format
    #[error("Invalid timestamp '{value}': {reason}")]
    TimestampParse { value: String, reason: String },

    /// Snippet does not exist
    #[error("Snippet not found: {id}")]
    SnippetNotFound { id: String },

    /// Team does not exist
    #[error("Team with name '{team_id}' was not found")]
    TeamNotFound { team_id: String },

    /// Stored password hash could not be parsed or computed
    #[error("Password hash error: {reason}")]
    PasswordHash { reason: String },
}

impl From<SnacError> for ExError {
    fn from(err: SnacError) -> Self {
        let message = err.to_string();
        match err {
            SnacError::InvalidSnippetId { value } => ExError::new(ExErrorKind::MalformedPayload)
                .with_entity_id(value)
                .with_message(message),

            SnacError::TimestampParse { .. } => ExError::new(ExErrorKind::Parse)
                .with_op("parse_timestamp")
                .with_message(message),

            SnacError::SnippetNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id)
                .with_message(message),

            SnacError::TeamNotFound { team_id } => ExError::new(ExErrorKind::TeamNotFound)
                .with_team_id(team_id)
                .with_message(message),

            SnacError::PasswordHash { .. } => {
                ExError::new(ExErrorKind::PasswordHash).with_message(message)
            }
        }
    }
}
