//! Error types for sitegrant

use thiserror::Error;

/// Result alias used across sitegrant crates
pub type SiteGrantResult<T> = Result<T, SiteGrantError>;

/// Errors raised while classifying requirements or talking to the host authority
#[derive(Debug, Error)]
pub enum SiteGrantError {
    /// The manifest descriptor is malformed or missing required fields
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Classifier conventions are invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A host authority query or request failed
    #[error("Host authority error: {0}")]
    Authority(String),

    /// An origin match pattern could not be parsed
    #[error("Invalid match pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SiteGrantError {
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn authority(msg: impl Into<String>) -> Self {
        Self::Authority(msg.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
