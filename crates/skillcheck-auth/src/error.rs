//! Auth capability error types.

use thiserror::Error;

/// Errors from authentication and profile persistence.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password pair was not accepted.
    #[error("invalid credentials for '{username}'")]
    InvalidCredentials { username: String },

    /// An operation that needs a signed-in user was called without one.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The profile store could not be read or written.
    #[error("profile storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Returns `true` if retrying the same call cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials { .. } | AuthError::NotAuthenticated
        )
    }
}
