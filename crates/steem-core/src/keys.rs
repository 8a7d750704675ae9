//! Steem public and private keys.
//!
//! Public keys are 33-byte compressed secp256k1 points rendered as
//! `<prefix><base58(key ++ ripemd160(key)[..4])>`. Private keys are 32-byte
//! scalars rendered as WIF (Base58Check, version byte 0x80).

use std::fmt;
use std::str::FromStr;

use secp256k1::SecretKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{base58_graphene_decode, base58_graphene_encode, Secp256k1Context, Sha256Hash};
use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

/// Length of a compressed public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// WIF version byte.
const WIF_VERSION: u8 = 0x80;

/// Base58 length of a checksummed compressed key.
const ADDRESS_KEY_LEN: usize = 50;

/// Network tag prepended to public key addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AddressPrefix {
    /// "STM"
    #[default]
    MainNet,
    /// "TST"
    TestNet,
    Custom(String),
}

impl AddressPrefix {
    pub fn new(prefix: &str) -> Self {
        match prefix {
            "STM" => AddressPrefix::MainNet,
            "TST" => AddressPrefix::TestNet,
            other => AddressPrefix::Custom(other.to_string()),
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            AddressPrefix::MainNet => "STM".to_string(),
            AddressPrefix::TestNet => "TST".to_string(),
            AddressPrefix::Custom(prefix) => prefix.to_uppercase(),
        }
    }
}

impl fmt::Display for AddressPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for AddressPrefix {
    fn from(value: &str) -> Self {
        AddressPrefix::new(value)
    }
}

impl Serialize for AddressPrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for AddressPrefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AddressPrefix::new(&s))
    }
}

/// A compressed secp256k1 public key tagged with its address prefix.
///
/// Equality covers both the key bytes and the prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    key: [u8; PUBLIC_KEY_LEN],
    prefix: AddressPrefix,
}

impl PublicKey {
    /// Create from raw key bytes. Only the length is checked.
    pub fn from_slice(key: &[u8], prefix: AddressPrefix) -> Result<Self> {
        let key: [u8; PUBLIC_KEY_LEN] = key.try_into().map_err(|_| {
            CoreError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LEN,
                key.len()
            ))
        })?;
        Ok(Self { key, prefix })
    }

    pub const fn from_bytes(key: [u8; PUBLIC_KEY_LEN], prefix: AddressPrefix) -> Self {
        Self { key, prefix }
    }

    /// Parse an address such as `STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv`.
    pub fn from_address(address: &str) -> Result<Self> {
        let (prefix, encoded) = split_address(address)?;
        let payload = base58_graphene_decode(encoded)?;
        Self::from_slice(&payload, AddressPrefix::new(prefix))
    }

    /// The all-zero key the network uses as an "unset" placeholder.
    pub fn null(prefix: AddressPrefix) -> Self {
        Self {
            key: [0u8; PUBLIC_KEY_LEN],
            prefix,
        }
    }

    pub fn is_null(&self) -> bool {
        self.key.iter().all(|b| *b == 0)
    }

    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.key
    }

    pub fn prefix(&self) -> &AddressPrefix {
        &self.prefix
    }

    /// Same key under a different network prefix.
    pub fn with_prefix(&self, prefix: AddressPrefix) -> Self {
        Self {
            key: self.key,
            prefix,
        }
    }

    pub fn to_address(&self) -> String {
        format!("{}{}", self.prefix, base58_graphene_encode(&self.key))
    }
}

/// Split an address into prefix and Base58 body.
fn split_address(address: &str) -> Result<(&str, &str)> {
    for known in ["STM", "TST"] {
        if let Some(rest) = address.strip_prefix(known) {
            return Ok((known, rest));
        }
    }
    if !address.is_ascii() || address.len() <= ADDRESS_KEY_LEN {
        return Err(CoreError::InvalidPublicKey(format!(
            "address {:?} has no prefix",
            address
        )));
    }
    Ok(address.split_at(address.len() - ADDRESS_KEY_LEN))
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_address())
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_address(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_address())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_address(&s).map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for PublicKey {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_raw(&self.key);
        Ok(())
    }
}

impl BinaryDecode for PublicKey {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let key = r.read_array()?;
        Ok(Self {
            key,
            prefix: r.prefix().clone(),
        })
    }
}

/// A secp256k1 secret key. Never part of the wire format.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Create from a 32-byte secret, rejecting invalid scalars.
    pub fn from_slice(secret: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_slice(secret)?;
        Ok(Self { secret })
    }

    /// Create from the 33-byte WIF payload (0x80 ++ secret).
    pub fn from_wif_payload(data: &[u8]) -> Result<Self> {
        match data.split_first() {
            Some((&WIF_VERSION, secret)) => Self::from_slice(secret),
            _ => Err(CoreError::InvalidPrivateKey),
        }
    }

    /// Parse a WIF string.
    pub fn from_wif(wif: &str) -> Result<Self> {
        let data = bs58::decode(wif)
            .with_check(None)
            .into_vec()
            .map_err(|_| CoreError::InvalidPrivateKey)?;
        Self::from_wif_payload(&data)
    }

    /// Key whose secret is SHA-256 of `seed`.
    pub fn from_seed(seed: &str) -> Result<Self> {
        Self::from_slice(Sha256Hash::hash(seed.as_bytes()).as_bytes())
    }

    /// Password-derived key for an account role ("owner", "active", "posting", "memo").
    pub fn from_login(account: &str, password: &str, role: &str) -> Result<Self> {
        Self::from_seed(&format!("{}{}{}", account, role, password))
    }

    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn to_wif(&self) -> String {
        let mut data = Vec::with_capacity(33);
        data.push(WIF_VERSION);
        data.extend_from_slice(&self.secret.secret_bytes());
        bs58::encode(data).with_check().into_string()
    }

    /// Derive the public key with the given address prefix.
    pub fn public_key(&self, ctx: &Secp256k1Context, prefix: AddressPrefix) -> PublicKey {
        PublicKey::from_bytes(ctx.derive_public(&self.secret), prefix)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl FromStr for PrivateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wif(s)
    }
}
