//! Transactions: ordered operations plus replay-protection metadata.
//!
//! The signing digest is `SHA-256(chain_id ++ binary(transaction))`, with the
//! binary layout:
//!
//! ```text
//! ref_block_num     u16
//! ref_block_prefix  u32
//! expiration        u32 (epoch seconds)
//! operations        varint count ++ tagged operations
//! extensions        varint count ++ extensions
//! ```
//!
//! A signed transaction appends a varint count and 65-byte signatures.

use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::crypto::{Secp256k1Context, Sha256Hash};
use crate::error::{CoreError, Result};
use crate::extensions::FutureExtension;
use crate::keys::{AddressPrefix, PrivateKey, PublicKey};
use crate::operation::Operation;
use crate::serializer::{to_bytes, BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};
use crate::signature::Signature;
use crate::signing::{sign_digest, NonceSource};
use crate::time::TimePointSec;
use crate::types::{BlockId, TransactionId};

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Bytes 4..8 of the reference block id.
    pub ref_block_prefix: u32,
    pub expiration: TimePointSec,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub extensions: Vec<FutureExtension>,
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Canonical binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }

    /// The digest signatures are made over.
    pub fn digest(&self, chain_id: &ChainId) -> Result<Sha256Hash> {
        let body = self.to_bytes()?;
        Ok(Sha256Hash::hash_parts(&[&chain_id.as_bytes()[..], &body[..]]))
    }

    /// Network transaction id: first 20 bytes of SHA-256 of the encoding.
    pub fn id(&self) -> Result<TransactionId> {
        let hash = Sha256Hash::hash(&self.to_bytes()?);
        let mut id = [0u8; 20];
        id.copy_from_slice(&hash.as_bytes()[..20]);
        Ok(TransactionId(id))
    }

    /// Produce one canonical signature for `chain_id`.
    pub fn sign<N: NonceSource + ?Sized>(
        &self,
        ctx: &Secp256k1Context,
        chain_id: &ChainId,
        key: &PrivateKey,
        nonces: &mut N,
    ) -> Result<Signature> {
        let digest = self.digest(chain_id)?;
        sign_digest(ctx, &digest, key, nonces)
    }
}

impl BinaryEncode for Transaction {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.ref_block_num.binary_encode(w)?;
        self.ref_block_prefix.binary_encode(w)?;
        self.expiration.binary_encode(w)?;
        self.operations.binary_encode(w)?;
        self.extensions.binary_encode(w)
    }
}

impl BinaryDecode for Transaction {
    /// Operations are not length-prefixed, so an unknown operation id inside
    /// a transaction is a decode error rather than an unknown sentinel.
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let ref_block_num = u16::binary_decode(r)?;
        let ref_block_prefix = u32::binary_decode(r)?;
        let expiration = TimePointSec::binary_decode(r)?;

        let count = r.read_len()?;
        let mut operations = Vec::with_capacity(count.min(r.remaining()));
        for _ in 0..count {
            let start = r.position();
            let op = Operation::binary_decode(r)?;
            if let Operation::Unknown(unknown) = &op {
                return Err(CoreError::decode(
                    start,
                    format!("{} inside transaction", unknown),
                ));
            }
            operations.push(op);
        }

        let extensions = Vec::binary_decode(r)?;
        Ok(Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions,
        })
    }
}

/// Builder for transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    /// Take `ref_block_num` and `ref_block_prefix` from a block id.
    pub fn reference_block(mut self, block_id: &BlockId) -> Self {
        self.tx.ref_block_num = block_id.ref_num();
        self.tx.ref_block_prefix = block_id.prefix();
        self
    }

    pub fn ref_block_num(mut self, num: u16) -> Self {
        self.tx.ref_block_num = num;
        self
    }

    pub fn ref_block_prefix(mut self, prefix: u32) -> Self {
        self.tx.ref_block_prefix = prefix;
        self
    }

    pub fn expiration(mut self, expiration: TimePointSec) -> Self {
        self.tx.expiration = expiration;
        self
    }

    pub fn operation(mut self, op: impl Into<Operation>) -> Self {
        self.tx.operations.push(op.into());
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.tx.operations.extend(ops);
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// A transaction with signatures attached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            signatures: Vec::new(),
        }
    }

    pub fn append_signature(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }

    /// Sign with one more key and append the signature.
    pub fn sign<N: NonceSource + ?Sized>(
        &mut self,
        ctx: &Secp256k1Context,
        chain_id: &ChainId,
        key: &PrivateKey,
        nonces: &mut N,
    ) -> Result<&Signature> {
        let signature = self.transaction.sign(ctx, chain_id, key, nonces)?;
        self.signatures.push(signature);
        Ok(&self.signatures[self.signatures.len() - 1])
    }

    pub fn digest(&self, chain_id: &ChainId) -> Result<Sha256Hash> {
        self.transaction.digest(chain_id)
    }

    /// Id of the underlying transaction. Signatures do not contribute.
    pub fn id(&self) -> Result<TransactionId> {
        self.transaction.id()
    }

    /// Recover the public key behind every signature, in order.
    pub fn signing_keys(
        &self,
        ctx: &Secp256k1Context,
        chain_id: &ChainId,
        prefix: &AddressPrefix,
    ) -> Result<Vec<PublicKey>> {
        let digest = self.digest(chain_id)?;
        self.signatures
            .iter()
            .map(|sig| sig.recover(ctx, &digest, prefix.clone()))
            .collect()
    }

    pub fn into_inner(self) -> Transaction {
        self.transaction
    }
}

impl From<Transaction> for SignedTransaction {
    fn from(transaction: Transaction) -> Self {
        Self::new(transaction)
    }
}

impl BinaryEncode for SignedTransaction {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.transaction.binary_encode(w)?;
        self.signatures.binary_encode(w)
    }
}

impl BinaryDecode for SignedTransaction {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let transaction = Transaction::binary_decode(r)?;
        let signatures = Vec::binary_decode(r)?;
        Ok(Self {
            transaction,
            signatures,
        })
    }
}
