use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// mindmeld-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Validation errors raised while importing a session file.
///
/// Import is all-or-nothing: any of these aborts the operation with no
/// partial state change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("invalid session file: {0}")]
    InvalidJson(String),

    #[error("invalid session file: not a JSON object")]
    NotAnObject,

    #[error("invalid session file: missing or invalid required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid session file: 'ideas' must be an array")]
    IdeasNotAnArray,

    #[error("invalid session file: idea #{index} is malformed")]
    MalformedIdea { index: usize },
}

/// Errors from the auth provider.
///
/// Surfaced inline to the user; never retried automatically.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NotSignedIn,

    #[error("auth provider error: {0}")]
    Provider(String),

    #[error("could not read or write cached credentials: {0}")]
    CredentialCache(String),
}
