//! Failure types for the language registry and the two remote services.
//!
//! The `Display` text of each variant is the detail that ends up after the `Error: `
//! prefix in the output panel or the assistant dialog, so it carries no prefix itself.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown language: {0}")]
    NotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("{0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("No API key configured for the assistant. Set gemini-api-key or GEMINI_API_KEY.")]
    MissingCredential,
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("{0}")]
    Malformed(String),
    #[error("The assistant returned an empty reply")]
    EmptyReply,
}

impl From<reqwest::Error> for ExecutionError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            return ExecutionError::Malformed(err.to_string());
        }
        ExecutionError::Transport(err.to_string())
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            return AssistantError::Malformed(err.to_string());
        }
        AssistantError::Transport(err.to_string())
    }
}
