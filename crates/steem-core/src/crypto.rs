//! Cryptographic primitives: SHA-256, RIPEMD-160, Base58 and secp256k1.
//!
//! The raw curve math is delegated to libsecp256k1. This module only holds
//! the protocol around it: nonce injection, compact recoverable signatures
//! and the graphene-style Base58 checksum.

use std::fmt;

use rand::Rng;
use ripemd::Ripemd160;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey as SecpPublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, Result};

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Hash several slices as one message.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::Json(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::Json("sha256 hash must be 32 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// RIPEMD-160 of data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Base58 with the graphene checksum: first 4 bytes of RIPEMD-160(payload).
pub fn base58_graphene_encode(payload: &[u8]) -> String {
    let checksum = ripemd160(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Decode graphene Base58, verifying and stripping the checksum.
pub fn base58_graphene_decode(s: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(s)
        .into_vec()
        .map_err(|e| CoreError::InvalidPublicKey(e.to_string()))?;
    if data.len() < 4 {
        return Err(CoreError::InvalidPublicKey("base58 payload too short".into()));
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    if ripemd160(payload)[..4] != *checksum {
        return Err(CoreError::InvalidPublicKey("checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

/// Shared secp256k1 context.
///
/// Construction is expensive and randomizes the context once; afterwards the
/// context is only read, so one instance can be shared (e.g. behind an `Arc`)
/// by concurrent signers.
pub struct Secp256k1Context {
    inner: Secp256k1<All>,
}

impl Secp256k1Context {
    /// Create a new context randomized with thread-local entropy.
    pub fn new() -> Self {
        let mut inner = Secp256k1::new();
        let seed: [u8; 32] = rand::thread_rng().gen();
        inner.seeded_randomize(&seed);
        Self { inner }
    }

    /// Derive the 33-byte compressed public key for a secret.
    pub fn derive_public(&self, secret: &SecretKey) -> [u8; 33] {
        SecpPublicKey::from_secret_key(&self.inner, secret).serialize()
    }

    /// Produce a compact recoverable signature over a 32-byte digest.
    ///
    /// `nonce_data` is mixed into the RFC 6979 nonce derivation, so each
    /// distinct value yields a distinct signature.
    pub fn sign_recoverable(
        &self,
        digest: &Sha256Hash,
        secret: &SecretKey,
        nonce_data: &[u8; 32],
    ) -> (u8, [u8; 64]) {
        let message = Message::from_digest(digest.0);
        let sig = self
            .inner
            .sign_ecdsa_recoverable_with_noncedata(&message, secret, nonce_data);
        let (recovery_id, compact) = sig.serialize_compact();
        (recovery_id.to_i32() as u8, compact)
    }

    /// Recover the compressed public key that produced a compact signature.
    pub fn recover(
        &self,
        digest: &Sha256Hash,
        compact: &[u8; 64],
        recovery_id: u8,
    ) -> Result<[u8; 33]> {
        let recid = RecoveryId::from_i32(i32::from(recovery_id))?;
        let sig = RecoverableSignature::from_compact(compact, recid)?;
        let message = Message::from_digest(digest.0);
        let key = self
            .inner
            .recover_ecdsa(&message, &sig)
            .map_err(|e| CoreError::RecoveryFailed(e.to_string()))?;
        Ok(key.serialize())
    }

    /// Verify a compact signature against a known public key.
    pub fn verify(&self, digest: &Sha256Hash, compact: &[u8; 64], public_key: &[u8; 33]) -> bool {
        let Ok(key) = SecpPublicKey::from_slice(public_key) else {
            return false;
        };
        let Ok(sig) = secp256k1::ecdsa::Signature::from_compact(compact) else {
            return false;
        };
        let message = Message::from_digest(digest.0);
        self.inner.verify_ecdsa(&message, &sig, &key).is_ok()
    }
}

impl Default for Secp256k1Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Secp256k1Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secp256k1Context")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_HEX: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn secret() -> SecretKey {
        SecretKey::from_slice(&hex::decode(SECRET_HEX).unwrap()).unwrap()
    }

    #[test]
    fn test_sha256_known_value() {
        // sha256("hello")
        assert_eq!(Sha256Hash::hash(b"hello").to_hex(), SECRET_HEX);
        assert_eq!(
            Sha256Hash::hash_parts(&[b"hel", b"lo"]),
            Sha256Hash::hash(b"hello")
        );
    }

    #[test]
    fn test_graphene_base58_roundtrip() {
        let payload = [0x02u8; 33];
        let encoded = base58_graphene_encode(&payload);
        assert_eq!(base58_graphene_decode(&encoded).unwrap(), payload.to_vec());
    }

    #[test]
    fn test_graphene_base58_bad_checksum() {
        let mut encoded = base58_graphene_encode(&[0x03u8; 33]).into_bytes();
        let last = encoded.len() - 1;
        encoded[last] = if encoded[last] == b'2' { b'3' } else { b'2' };
        let tampered = String::from_utf8(encoded).unwrap();
        assert!(base58_graphene_decode(&tampered).is_err());
    }

    #[test]
    fn test_sign_and_recover() {
        let ctx = Secp256k1Context::new();
        let digest = Sha256Hash::hash(b"message");
        let (recid, sig) = ctx.sign_recoverable(&digest, &secret(), &[1u8; 32]);
        assert!(recid <= 3);

        let recovered = ctx.recover(&digest, &sig, recid).unwrap();
        assert_eq!(recovered, ctx.derive_public(&secret()));
        assert!(ctx.verify(&digest, &sig, &recovered));
    }

    #[test]
    fn test_nonce_data_changes_signature() {
        let ctx = Secp256k1Context::new();
        let digest = Sha256Hash::hash(b"message");
        let (_, a) = ctx.sign_recoverable(&digest, &secret(), &[1u8; 32]);
        let (_, b) = ctx.sign_recoverable(&digest, &secret(), &[2u8; 32]);
        let (_, c) = ctx.sign_recoverable(&digest, &secret(), &[1u8; 32]);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_recover_rejects_bad_recovery_id() {
        let ctx = Secp256k1Context::new();
        let digest = Sha256Hash::hash(b"message");
        let (recid, sig) = ctx.sign_recoverable(&digest, &secret(), &[1u8; 32]);
        assert!(matches!(
            ctx.recover(&digest, &sig, 4),
            Err(CoreError::InvalidSignature(_))
        ));
        assert!(ctx.recover(&digest, &sig, recid).is_ok());
    }
}
