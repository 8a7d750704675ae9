//! Compact recoverable ECDSA signatures.
//!
//! Wire form is 65 bytes: a recovery marker (`recovery_id + 31`) followed by
//! the 64-byte compact `r ++ s` signature. JSON form is the same 65 bytes as
//! lowercase hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{Secp256k1Context, Sha256Hash};
use crate::error::{CoreError, Result};
use crate::keys::{AddressPrefix, PublicKey};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

/// Offset added to the recovery id to form the marker byte (compressed keys).
pub const RECOVERY_MARKER_OFFSET: u8 = 31;

/// Length of the serialized signature.
pub const SIGNATURE_LEN: usize = 65;

/// Whether both halves of a compact signature are in canonical low form.
pub fn is_canonical(compact: &[u8; 64]) -> bool {
    compact[0] & 0x80 == 0
        && !(compact[0] == 0 && compact[1] & 0x80 == 0)
        && compact[32] & 0x80 == 0
        && !(compact[32] == 0 && compact[33] & 0x80 == 0)
}

/// A compact signature plus its recovery id (0..=3).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    data: [u8; 64],
    recovery_id: u8,
}

impl Signature {
    pub fn new(data: [u8; 64], recovery_id: u8) -> Result<Self> {
        if recovery_id > 3 {
            return Err(CoreError::InvalidSignature(format!(
                "recovery id {} out of range",
                recovery_id
            )));
        }
        Ok(Self { data, recovery_id })
    }

    /// Parse the 65-byte marker-prefixed form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CoreError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let marker = bytes[0];
        let recovery_id = marker.checked_sub(RECOVERY_MARKER_OFFSET).ok_or_else(|| {
            CoreError::InvalidSignature(format!("bad recovery marker {:#04x}", marker))
        })?;
        let mut data = [0u8; 64];
        data.copy_from_slice(&bytes[1..]);
        Self::new(data, recovery_id)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidSignature(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub const fn data(&self) -> &[u8; 64] {
        &self.data
    }

    pub const fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[0] = self.recovery_id + RECOVERY_MARKER_OFFSET;
        out[1..].copy_from_slice(&self.data);
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.data)
    }

    /// Recover the public key that signed `digest`.
    pub fn recover(
        &self,
        ctx: &Secp256k1Context,
        digest: &Sha256Hash,
        prefix: AddressPrefix,
    ) -> Result<PublicKey> {
        let key = ctx.recover(digest, &self.data, self.recovery_id)?;
        Ok(PublicKey::from_bytes(key, prefix))
    }

    /// Check this signature against a known public key.
    pub fn verify(&self, ctx: &Secp256k1Context, digest: &Sha256Hash, key: &PublicKey) -> bool {
        ctx.verify(digest, &self.data, key.as_bytes())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..10])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for Signature {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_raw(&self.to_bytes());
        Ok(())
    }
}

impl BinaryDecode for Signature {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let start = r.position();
        let bytes: [u8; SIGNATURE_LEN] = r.read_array()?;
        Signature::from_slice(&bytes).map_err(|e| CoreError::decode(start, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{from_bytes, to_bytes};

    const SIG_HEX: &str = "207a6fa349f1f624643119f667f394a435c1d31d6f39d8191389305e519a0c051222df037180dc86e00ca4fe43ab638f1e8a96403b3857780abaad4017e03d1ef0";

    #[test]
    fn test_parse_marker() {
        let sig = Signature::from_hex(SIG_HEX).unwrap();
        assert_eq!(sig.recovery_id(), 1);
        assert_eq!(sig.to_hex(), SIG_HEX);
        assert_eq!(sig.to_string().len(), 130);
    }

    #[test]
    fn test_recover_known_signer() {
        let ctx = Secp256k1Context::new();
        let sig: Signature = SIG_HEX.parse().unwrap();
        let digest = Sha256Hash::from_bytes([0u8; 32]);
        let key = sig.recover(&ctx, &digest, AddressPrefix::MainNet).unwrap();
        assert_eq!(
            key.to_string(),
            "STM6BohVaUq55WgAD38pYVMZE4oxmoX7hAgxsni5EdNdgaKJ8FQDR"
        );
        assert!(sig.verify(&ctx, &digest, &key));
    }

    #[test]
    fn test_invalid_signatures() {
        assert!(Signature::from_hex("20").is_err());
        assert!(Signature::from_hex(&"zz".repeat(65)).is_err());

        let mut bytes = [0u8; 65];
        bytes[0] = 30;
        assert!(Signature::from_slice(&bytes).is_err());
        bytes[0] = 35;
        assert!(Signature::from_slice(&bytes).is_err());
        bytes[0] = 34;
        assert_eq!(Signature::from_slice(&bytes).unwrap().recovery_id(), 3);
    }

    #[test]
    fn test_canonical_predicate() {
        let mut sig = [0x11u8; 64];
        assert!(is_canonical(&sig));

        sig[0] = 0x80;
        assert!(!is_canonical(&sig));

        sig[0] = 0x00;
        sig[1] = 0x7f;
        assert!(!is_canonical(&sig));

        sig[1] = 0x80;
        assert!(is_canonical(&sig));

        sig[32] = 0x00;
        sig[33] = 0x01;
        assert!(!is_canonical(&sig));

        sig[32] = 0x90;
        assert!(!is_canonical(&sig));
    }

    #[test]
    fn test_binary_and_json_forms() {
        let sig = Signature::from_hex(SIG_HEX).unwrap();
        let bytes = to_bytes(&sig).unwrap();
        assert_eq!(hex::encode(&bytes), SIG_HEX);
        assert_eq!(from_bytes::<Signature>(&bytes).unwrap(), sig);

        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", SIG_HEX));
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), sig);
    }
}
