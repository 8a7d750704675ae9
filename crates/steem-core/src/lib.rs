//! # Steem Core
//!
//! Pure codec and signing primitives for the Steem blockchain.
//!
//! This crate contains no I/O and no networking. It converts typed operations
//! into the byte-exact binary form signatures are computed over and into the
//! JSON form used by the RPC API, and it produces canonical recoverable
//! signatures over transaction digests.
//!
//! ## Key Types
//!
//! - [`Operation`] - Tagged union of every protocol action
//! - [`Transaction`] / [`SignedTransaction`] - Operations plus replay protection
//! - [`Asset`] - Fixed-precision token amount
//! - [`Authority`] - Weighted accounts and keys
//! - [`PublicKey`] / [`PrivateKey`] / [`Signature`] - Key material
//! - [`ChainId`] - Network identity mixed into every digest
//!
//! ## Binary Encoding
//!
//! See the [`serializer`] module for the wire rules.

pub mod asset;
pub mod authority;
pub mod block;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod extensions;
pub mod keys;
pub mod operation;
pub mod serializer;
pub mod signature;
pub mod signing;
pub mod time;
pub mod transaction;
pub mod types;

pub use asset::{Asset, Price, Symbol};
pub use authority::{Auth, Authority, AuthorityBuilder};
pub use block::{BlockHeader, SignedBlock, SignedBlockHeader};
pub use chain::ChainId;
pub use crypto::{Secp256k1Context, Sha256Hash};
pub use error::{CoreError, Result};
pub use extensions::{BeneficiaryRoute, BlockExtension, CommentOptionsExtension, FutureExtension};
pub use keys::{AddressPrefix, PrivateKey, PublicKey};
pub use operation::{Operation, OperationKind, UnknownOperation};
pub use serializer::{from_bytes, from_bytes_with_prefix, to_bytes, BinaryDecode, BinaryEncode};
pub use signature::Signature;
pub use signing::{sign_digest, CounterNonce, NonceSource, RandomNonce};
pub use time::TimePointSec;
pub use transaction::{SignedTransaction, Transaction, TransactionBuilder};
pub use types::{BlockId, HexBytes, MerkleRoot, TransactionId};
