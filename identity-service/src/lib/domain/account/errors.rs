use thiserror::Error;

use auth::JwtError;
use auth::PasswordError;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not confirmed")]
    UserNotConfirmed,

    #[error("Invalid confirmation token")]
    InvalidConfirmationToken,

    #[error("Federated authentication failed: {0}")]
    FederatedAuthFailed(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("User store error: {0}")]
    StoreError(String),
}
