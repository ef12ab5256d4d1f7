//! Error types for the chat engine
//!
//! Only store failures escape the matching core. Invalid regex patterns,
//! missing matches and rules without responses are normal outcomes.

use thiserror::Error;

/// Failure reading from the rule store. Never retried by the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Rule store unavailable: {0}")]
    Unavailable(String),

    #[error("Rule store query failed: {0}")]
    Query(String),
}

/// Dataset import errors
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset has no top-level 'data' array")]
    MissingData,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Fuzzy threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(i64),
}

/// Errors surfaced by the chat service to its transport
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Message is required")]
    EmptyMessage,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChatError {
    /// True for errors caused by the request rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::EmptyMessage | ChatError::InvalidJson(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
