use thiserror::Error;

/// Failures reported by a credential store adapter.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The insert collided with an existing email.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("datastore unavailable: {0}")]
    Unavailable(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already exists")]
    EmailAlreadyExists,
    /// Shared by "no such account" and "wrong password".
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("repository error: {0}")]
    Repository(#[source] RepositoryError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::EmailAlreadyExists => 1002,
            AuthError::InvalidCredentials => 1004,
            AuthError::Hash(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Stable kind string used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyExists => "EmailAlreadyExists",
            AuthError::InvalidCredentials => "InvalidCredentials",
            AuthError::Hash(_) | AuthError::Repository(_) => "InternalError",
        }
    }

    /// Business errors are expected outcomes safe to show to the caller.
    pub fn is_business(&self) -> bool {
        matches!(self, AuthError::EmailAlreadyExists | AuthError::InvalidCredentials)
    }
}
