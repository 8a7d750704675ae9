//! # Steem
//!
//! Client-side API for the Steem blockchain: build transactions, sign them
//! for a given network, and shape the JSON payloads the RPC API expects.
//!
//! ## Overview
//!
//! - **Operations**: Typed protocol actions with exact binary and JSON codecs
//! - **Transactions**: Operations plus a reference block and expiration
//! - **Signing**: Canonical recoverable secp256k1 signatures scoped by chain id
//! - **Payloads**: Request parameters and response bodies for broadcasting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use steem::{Operation, Signer, SteemConfig};
//! use steem::core::operation::VoteOperation;
//! use steem::core::{BlockId, PrivateKey, TimePointSec};
//!
//! fn example() -> steem::Result<()> {
//!     let signer = Signer::new(SteemConfig::mainnet());
//!     let key = PrivateKey::from_wif("5JEB2fkmEqHSfGqL96eTtQ2emYodeTBBnXvETwe2vUSMe4pxdLj")?;
//!
//!     let head = BlockId::from_hex("001e847f77b2d0bc1c29caf02b1a98d79aefb7ad")?;
//!     let vote = Operation::from(VoteOperation {
//!         voter: "foo".into(),
//!         author: "bar".into(),
//!         permlink: "baz".into(),
//!         weight: 10_000,
//!     });
//!     let tx = signer.prepare_transaction(&head, TimePointSec::now(), vec![vote]);
//!
//!     let signed = signer.sign_transaction(tx, &[key])?;
//!     let params = steem::api::broadcast_transaction_params(&signed);
//!     let _body = steem::api::to_json_bytes(&params)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `steem::core` - Codec, key and signing primitives

pub mod api;
pub mod config;
pub mod error;
pub mod signer;

pub use config::{NonceMode, SteemConfig};
pub use error::{Result, SteemError};
pub use signer::Signer;

pub use steem_core as core;

pub use steem_core::{
    Asset, Authority, BlockId, ChainId, Operation, PrivateKey, PublicKey, Signature,
    SignedTransaction, Transaction,
};
