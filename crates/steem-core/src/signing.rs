//! Canonical recoverable signing.
//!
//! libsecp256k1 produces low-S signatures, but the network additionally
//! requires the top bit of `r` to be clear and neither half to start with a
//! redundant zero byte. Signing retries with fresh nonce data until the
//! result passes [`is_canonical`](crate::signature::is_canonical).

use rand::Rng;
use tracing::{debug, trace};

use crate::crypto::{Secp256k1Context, Sha256Hash};
use crate::error::{CoreError, Result};
use crate::keys::PrivateKey;
use crate::signature::{is_canonical, Signature};

/// Attempts before giving up. About half of all attempts are canonical.
pub const MAX_SIGNING_ATTEMPTS: u32 = 1024;

/// Supplies the extra nonce data mixed into each signing attempt.
pub trait NonceSource {
    fn next_nonce(&mut self) -> [u8; 32];
}

/// Fresh random nonce data for every attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn next_nonce(&mut self) -> [u8; 32] {
        rand::thread_rng().gen()
    }
}

/// Reproducible nonce data: a little-endian u32 counter in the first four
/// bytes, incremented before every attempt. Use a new instance per signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterNonce {
    counter: u32,
}

impl CounterNonce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nonces handed out so far.
    pub fn count(&self) -> u32 {
        self.counter
    }
}

impl NonceSource for CounterNonce {
    fn next_nonce(&mut self) -> [u8; 32] {
        self.counter = self.counter.wrapping_add(1);
        let mut nonce = [0u8; 32];
        nonce[..4].copy_from_slice(&self.counter.to_le_bytes());
        nonce
    }
}

/// Sign a digest, retrying until the signature is canonical.
pub fn sign_digest<N: NonceSource + ?Sized>(
    ctx: &Secp256k1Context,
    digest: &Sha256Hash,
    key: &PrivateKey,
    nonces: &mut N,
) -> Result<Signature> {
    for attempt in 1..=MAX_SIGNING_ATTEMPTS {
        let nonce = nonces.next_nonce();
        let (recovery_id, compact) = ctx.sign_recoverable(digest, key.secret_key(), &nonce);
        if is_canonical(&compact) {
            debug!(attempts = attempt, digest = %digest, "produced canonical signature");
            return Signature::new(compact, recovery_id);
        }
        trace!(attempt, "discarding non-canonical signature");
    }
    Err(CoreError::SigningFailed(format!(
        "no canonical signature after {} attempts",
        MAX_SIGNING_ATTEMPTS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::AddressPrefix;

    const WIF: &str = "5JEB2fkmEqHSfGqL96eTtQ2emYodeTBBnXvETwe2vUSMe4pxdLj";

    struct FixedNonce([u8; 32]);

    impl NonceSource for FixedNonce {
        fn next_nonce(&mut self) -> [u8; 32] {
            self.0
        }
    }

    #[test]
    fn test_counter_nonce_sequence() {
        let mut nonces = CounterNonce::new();
        let first = nonces.next_nonce();
        let second = nonces.next_nonce();
        assert_eq!(first[..4], [1, 0, 0, 0]);
        assert_eq!(second[..4], [2, 0, 0, 0]);
        assert!(first[4..].iter().all(|b| *b == 0));
        assert_eq!(nonces.count(), 2);
    }

    #[test]
    fn test_deterministic_signature_matches_reference() {
        let ctx = Secp256k1Context::new();
        let key = PrivateKey::from_wif(WIF).unwrap();
        let digest = Sha256Hash::from_hex(
            "44424a1259aba312780ca6957a91dbd8a8eef8c2c448d89eccee34a425c77512",
        )
        .unwrap();
        let sig = sign_digest(&ctx, &digest, &key, &mut CounterNonce::new()).unwrap();
        assert_eq!(
            sig.to_hex(),
            "20598c2f2301db5559d42663f8f79cbc4258697cd645b6df56be2e83d786a66590437acf0041bda94c4ff4d8e5bce0ac1765a2c32bd796cb1d002081e4a5f8691a"
        );
    }

    #[test]
    fn test_random_signatures_are_canonical_and_recoverable() {
        let ctx = Secp256k1Context::new();
        let key = PrivateKey::from_wif(WIF).unwrap();
        let expected = key.public_key(&ctx, AddressPrefix::MainNet);
        for i in 0u8..16 {
            let digest = Sha256Hash::hash(&[i]);
            let sig = sign_digest(&ctx, &digest, &key, &mut RandomNonce).unwrap();
            assert!(sig.is_canonical());
            assert_eq!(sig.recover(&ctx, &digest, AddressPrefix::MainNet).unwrap(), expected);
        }
    }

    #[test]
    fn test_counter_advances_on_retry() {
        let ctx = Secp256k1Context::new();
        let key = PrivateKey::from_wif(WIF).unwrap();
        // Over many digests some first attempts are rejected; each rejection
        // must consume one more counter value.
        let mut retried = false;
        for i in 0u8..64 {
            let digest = Sha256Hash::hash(&[i, 1]);
            let mut nonces = CounterNonce::new();
            let sig = sign_digest(&ctx, &digest, &key, &mut nonces).unwrap();
            assert!(sig.is_canonical());
            retried |= nonces.count() > 1;

            let again = sign_digest(&ctx, &digest, &key, &mut CounterNonce::new()).unwrap();
            assert_eq!(sig, again);
        }
        assert!(retried);
    }

    #[test]
    fn test_gives_up_when_nonce_never_yields_canonical() {
        let ctx = Secp256k1Context::new();
        let key = PrivateKey::from_wif(WIF).unwrap();
        let digest = Sha256Hash::hash(b"stuck");

        // find a nonce whose signature is non-canonical, then repeat it forever
        let mut candidate = 0u8;
        let stuck = loop {
            let nonce = [candidate; 32];
            let (_, compact) = ctx.sign_recoverable(&digest, key.secret_key(), &nonce);
            if !is_canonical(&compact) {
                break nonce;
            }
            candidate += 1;
        };
        let result = sign_digest(&ctx, &digest, &key, &mut FixedNonce(stuck));
        assert!(matches!(result, Err(CoreError::SigningFailed(_))));
    }
}
