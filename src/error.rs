//! Error types for the portfolio assistant.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for assistant operations.
#[derive(Error, Debug)]
pub enum AssistError {
    /// The question was empty or blank; rejected before any backend work.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The targeted backend has no configuration or cannot be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// No translation stage produced a usable query. Carries the raw model
    /// reply so the caller can see what failed to parse.
    #[error("Could not translate question: {reason} (model output: {reply})")]
    Translation { reply: String, reason: String },

    /// The store rejected a statement (syntax errors, unknown columns, etc.)
    #[error("Statement error: {0}")]
    Statement(String),

    /// LLM API errors (rate limits, auth, timeouts, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AssistError {
    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an unavailable-backend error with the given message.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates a translation error from the raw model reply and a parse reason.
    pub fn translation(reply: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Translation {
            reply: reply.into(),
            reason: reason.into(),
        }
    }

    /// Creates a statement error with the given message.
    pub fn statement(msg: impl Into<String>) -> Self {
        Self::Statement(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid Input",
            Self::Unavailable(_) => "Backend Unavailable",
            Self::Translation { .. } => "Translation Error",
            Self::Statement(_) => "Statement Error",
            Self::Llm(_) => "LLM Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using AssistError.
pub type Result<T> = std::result::Result<T, AssistError>;
