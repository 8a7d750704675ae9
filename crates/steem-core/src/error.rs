//! Error types for the Steem core.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or signing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Binary input does not match the expected layout.
    #[error("decoding error at byte {offset}: {reason}")]
    Decode { offset: usize, reason: String },

    /// JSON input does not match the expected shape.
    #[error("json error: {0}")]
    Json(String),

    /// The value is decode-only and has no wire encoding.
    #[error("value is not encodable: {0}")]
    NotEncodable(String),

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("invalid chain id: {0}")]
    InvalidChainId(String),

    #[error("invalid authority: {0}")]
    InvalidAuthority(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),

    /// The input uses a protocol feature that has no defined layout here.
    #[error("not yet supported: {0}")]
    Unsupported(String),
}

impl CoreError {
    pub(crate) fn decode(offset: usize, reason: impl Into<String>) -> Self {
        CoreError::Decode {
            offset,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Json(e.to_string())
    }
}

impl From<secp256k1::Error> for CoreError {
    fn from(e: secp256k1::Error) -> Self {
        match e {
            secp256k1::Error::InvalidSecretKey => CoreError::InvalidPrivateKey,
            secp256k1::Error::InvalidPublicKey => {
                CoreError::InvalidPublicKey("not a curve point".into())
            }
            secp256k1::Error::InvalidSignature | secp256k1::Error::InvalidRecoveryId => {
                CoreError::InvalidSignature(e.to_string())
            }
            other => CoreError::SigningFailed(other.to_string()),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
