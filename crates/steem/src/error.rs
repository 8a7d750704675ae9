//! Error types for the client facade.

use steem_core::{CoreError, PublicKey};
use thiserror::Error;

/// Errors that can occur while preparing, signing or (de)serializing payloads.
#[derive(Debug, Error)]
pub enum SteemError {
    /// Codec, key or signing error from the core.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// JSON payload error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Signing was requested with an empty key list.
    #[error("no signing keys given")]
    NoSigningKeys,

    /// A signed transaction does not carry a signature from an expected key.
    #[error("missing signature from {0}")]
    MissingSignature(PublicKey),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, SteemError>;
