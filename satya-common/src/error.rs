//! Common error types for Satya

use thiserror::Error;

/// Common result type for Satya operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Satya crates
#[derive(Error, Debug)]
pub enum Error {
    /// Submission kind and payload do not agree (or kind is unknown)
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Submission payload is empty or whitespace only
    #[error("Please enter text, a URL, or an image to analyze.")]
    EmptySubmission,

    /// No identity is present for the caller
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Sign-up attempted with an email that is already registered
    #[error("Email already in use")]
    EmailInUse,

    /// Sign-in attempted with an unknown email
    #[error("User not found")]
    UserNotFound,

    /// Sign-in attempted with the wrong password
    #[error("Wrong password")]
    WrongPassword,

    /// Password rejected by the identity backend
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Identity backend unreachable or returned an unexpected response
    #[error("Identity backend error: {0}")]
    IdentityBackend(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::IdentityBackend(err.to_string())
    }
}
