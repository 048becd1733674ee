//! Authentication error types.

use thiserror::Error;

use lamore_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password doesn't meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// The message shown to clients; hashing and repository failures are
    /// not leaked.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid credentials".to_owned(),
            Self::UserAlreadyExists => "An account with this email already exists".to_owned(),
            Self::WeakPassword(msg) => msg.clone(),
            Self::InvalidEmail(_) => "Invalid email address".to_owned(),
            Self::PasswordHash | Self::Repository(_) => "Authentication error".to_owned(),
        }
    }
}
