//! Client configuration.

use serde::{Deserialize, Serialize};
use steem_core::{AddressPrefix, ChainId, CounterNonce, NonceSource, RandomNonce};

use crate::error::{Result, SteemError};

/// Default transaction time-to-live in seconds.
pub const DEFAULT_EXPIRATION_SECS: u32 = 60;

/// Network maximum for transaction time-to-live.
pub const MAX_EXPIRATION_SECS: u32 = 3600;

/// How signing nonces are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceMode {
    /// Fresh randomness per attempt.
    #[default]
    Random,
    /// Counter starting at 1 for every signature. Reproducible; for tests.
    Deterministic,
}

impl NonceMode {
    /// A nonce source for a single signature.
    pub fn source(self) -> Box<dyn NonceSource> {
        match self {
            NonceMode::Random => Box::new(RandomNonce),
            NonceMode::Deterministic => Box::new(CounterNonce::new()),
        }
    }
}

/// Configuration for a [`Signer`](crate::Signer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteemConfig {
    /// Network the signatures are scoped to.
    pub chain_id: ChainId,
    /// Prefix used when deriving or recovering public keys.
    pub address_prefix: AddressPrefix,
    pub nonce_mode: NonceMode,
    /// Transaction time-to-live used by `prepare_transaction`.
    pub expiration_secs: u32,
}

impl Default for SteemConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl SteemConfig {
    pub fn mainnet() -> Self {
        Self {
            chain_id: ChainId::MainNet,
            address_prefix: AddressPrefix::MainNet,
            nonce_mode: NonceMode::Random,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
        }
    }

    pub fn testnet() -> Self {
        Self {
            chain_id: ChainId::TestNet,
            address_prefix: AddressPrefix::TestNet,
            ..Self::mainnet()
        }
    }

    pub fn with_nonce_mode(mut self, nonce_mode: NonceMode) -> Self {
        self.nonce_mode = nonce_mode;
        self
    }

    /// Load from JSON. Missing fields take main network defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SteemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expiration_secs == 0 || self.expiration_secs > MAX_EXPIRATION_SECS {
            return Err(SteemError::Config(format!(
                "expiration_secs must be in 1..={}, got {}",
                MAX_EXPIRATION_SECS, self.expiration_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SteemConfig::default();
        assert_eq!(config.chain_id, ChainId::MainNet);
        assert_eq!(config.address_prefix, AddressPrefix::MainNet);
        assert_eq!(config.nonce_mode, NonceMode::Random);
        assert_eq!(config.expiration_secs, 60);
    }

    #[test]
    fn test_from_json() {
        let config = SteemConfig::from_json(
            r#"{
                "chain_id": "46d82ab7d8db682eb1959aed0ada039a6d49afa1602491f93dde9cac3e8e6c32",
                "address_prefix": "TST",
                "nonce_mode": "deterministic"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SteemConfig::testnet().with_nonce_mode(NonceMode::Deterministic)
        );
    }

    #[test]
    fn test_custom_prefix_from_json() {
        let config = SteemConfig::from_json(r#"{"address_prefix": "HORSE"}"#).unwrap();
        assert_eq!(config.address_prefix, AddressPrefix::Custom("HORSE".into()));
        assert_eq!(config.chain_id, ChainId::MainNet);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            SteemConfig::from_json(r#"{"expiration_secs": 0}"#),
            Err(SteemError::Config(_))
        ));
        assert!(matches!(
            SteemConfig::from_json(r#"{"chain_id": "00"}"#),
            Err(SteemError::Json(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SteemConfig::testnet();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SteemConfig::from_json(&json).unwrap(), config);
    }
}
