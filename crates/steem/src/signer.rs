//! The Signer: prepares and signs transactions for one network.

use std::sync::Arc;

use steem_core::{
    BlockId, Operation, PrivateKey, PublicKey, Secp256k1Context, SignedTransaction, Transaction,
    TimePointSec,
};

use crate::config::SteemConfig;
use crate::error::{Result, SteemError};

/// Signs transactions for the network named in its [`SteemConfig`].
///
/// The secp256k1 context is shared; clones of a signer are cheap and can be
/// used from several threads.
#[derive(Clone)]
pub struct Signer {
    ctx: Arc<Secp256k1Context>,
    config: SteemConfig,
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(SteemConfig::default())
    }
}

impl Signer {
    /// Create a signer with a fresh context.
    pub fn new(config: SteemConfig) -> Self {
        Self::with_context(Arc::new(Secp256k1Context::new()), config)
    }

    /// Create a signer sharing an existing context.
    pub fn with_context(ctx: Arc<Secp256k1Context>, config: SteemConfig) -> Self {
        Self { ctx, config }
    }

    pub fn config(&self) -> &SteemConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<Secp256k1Context> {
        &self.ctx
    }

    /// Public key of `key` with the configured address prefix.
    pub fn public_key(&self, key: &PrivateKey) -> PublicKey {
        key.public_key(&self.ctx, self.config.address_prefix.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preparation
    // ─────────────────────────────────────────────────────────────────────────

    /// Build an unsigned transaction referencing `head` that expires
    /// `expiration_secs` after `now`.
    pub fn prepare_transaction(
        &self,
        head: &BlockId,
        now: TimePointSec,
        operations: impl IntoIterator<Item = Operation>,
    ) -> Transaction {
        Transaction::builder()
            .reference_block(head)
            .expiration(now.saturating_add(self.config.expiration_secs))
            .operations(operations)
            .build()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign `tx` with every key in order. Each signature gets its own nonce
    /// source.
    pub fn sign_transaction(
        &self,
        tx: Transaction,
        keys: &[PrivateKey],
    ) -> Result<SignedTransaction> {
        if keys.is_empty() {
            return Err(SteemError::NoSigningKeys);
        }

        let mut signed = SignedTransaction::new(tx);
        for key in keys {
            self.append_signature(&mut signed, key)?;
        }
        Ok(signed)
    }

    /// Add one more signature to an already signed transaction.
    pub fn append_signature(&self, signed: &mut SignedTransaction, key: &PrivateKey) -> Result<()> {
        let mut nonces = self.config.nonce_mode.source();
        let signature = signed.sign(&self.ctx, &self.config.chain_id, key, nonces.as_mut())?;
        tracing::debug!(
            chain = %self.config.chain_id,
            signer = %self.public_key(key),
            signature = %signature.to_hex(),
            "signed transaction"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Public keys recovered from the signatures, in order.
    pub fn signing_keys(&self, signed: &SignedTransaction) -> Result<Vec<PublicKey>> {
        Ok(signed.signing_keys(
            &self.ctx,
            &self.config.chain_id,
            &self.config.address_prefix,
        )?)
    }

    /// Whether every key in `expected` signed the transaction.
    pub fn verify_signers(
        &self,
        signed: &SignedTransaction,
        expected: &[PublicKey],
    ) -> Result<bool> {
        let recovered = self.signing_keys(signed)?;
        for key in expected {
            if !recovered.iter().any(|r| r.as_bytes() == key.as_bytes()) {
                tracing::warn!(key = %key, "transaction not signed by expected key");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Like [`verify_signers`](Self::verify_signers) but names the first
    /// missing key.
    pub fn require_signers(
        &self,
        signed: &SignedTransaction,
        expected: &[PublicKey],
    ) -> Result<()> {
        let recovered = self.signing_keys(signed)?;
        match expected
            .iter()
            .find(|key| !recovered.iter().any(|r| r.as_bytes() == key.as_bytes()))
        {
            Some(missing) => Err(SteemError::MissingSignature(missing.clone())),
            None => Ok(()),
        }
    }
}
