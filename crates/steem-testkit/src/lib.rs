//! # Steem Testkit
//!
//! Testing utilities for the Steem client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known transactions with pinned bytes, digests and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Accounts with keys and deterministic signers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use steem_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, signature) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, signature);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use steem_testkit::generators::{transaction_from_params, TransactionParams};
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(params: TransactionParams) {
//!         let tx = transaction_from_params(&params);
//!         prop_assert_eq!(tx.digest(&ChainId::MainNet)?, tx.digest(&ChainId::MainNet)?);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use steem_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let signed = fixture.sign(fixture.make_vote("bob", "hello-world"));
//! assert_eq!(signed.signatures.len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{transaction_from_params, TransactionParams};
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector};
