//! Chain identity used to scope signatures to one network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

const TESTNET_ID: [u8; 32] = [
    0x46, 0xd8, 0x2a, 0xb7, 0xd8, 0xdb, 0x68, 0x2e, 0xb1, 0x95, 0x9a, 0xed, 0x0a, 0xda, 0x03, 0x9a,
    0x6d, 0x49, 0xaf, 0xa1, 0x60, 0x24, 0x91, 0xf9, 0x3d, 0xde, 0x9c, 0xac, 0x3e, 0x8e, 0x6c, 0x32,
];

/// 32-byte network identifier prepended to transactions before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainId {
    /// All zero bytes.
    #[default]
    MainNet,
    TestNet,
    Custom([u8; 32]),
}

impl ChainId {
    /// Map raw bytes onto the named variants where they match.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        if bytes == [0u8; 32] {
            ChainId::MainNet
        } else if bytes == TESTNET_ID {
            ChainId::TestNet
        } else {
            ChainId::Custom(bytes)
        }
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidChainId(e.to_string()))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CoreError::InvalidChainId(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Self::from_bytes(arr))
    }

    pub fn as_bytes(&self) -> [u8; 32] {
        match self {
            ChainId::MainNet => [0u8; 32],
            ChainId::TestNet => TESTNET_ID,
            ChainId::Custom(bytes) => *bytes,
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ChainId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChainId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
