//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use steem::{NonceMode, Signer, SteemConfig};
use steem_core::operation::{CommentOperation, TransferOperation, VoteOperation};
use steem_core::{
    Asset, BlockId, Operation, PrivateKey, PublicKey, SignedTransaction, TimePointSec,
    Transaction,
};

/// Reference block used by fixture transactions.
pub const FIXTURE_HEAD: &str = "001e847f77b2d0bc1c29caf02b1a98d79aefb7ad";

/// A test fixture with a named account, its key and a deterministic signer.
pub struct TestFixture {
    pub account: String,
    pub key: PrivateKey,
    pub signer: Signer,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a fixture for account "alice" on the main network.
    pub fn new() -> Self {
        Self::with_config("alice", SteemConfig::mainnet())
    }

    /// Create a fixture for `account`. The key is derived from the name.
    pub fn with_config(account: &str, config: SteemConfig) -> Self {
        let key = PrivateKey::from_login(account, "fixture-password", "active")
            .expect("derived fixture key is valid");
        Self {
            account: account.to_string(),
            key,
            signer: Signer::new(config.with_nonce_mode(NonceMode::Deterministic)),
        }
    }

    /// Public key with the signer's prefix.
    pub fn public_key(&self) -> PublicKey {
        self.signer.public_key(&self.key)
    }

    pub fn head(&self) -> BlockId {
        BlockId::from_hex(FIXTURE_HEAD).expect("fixture head is valid hex")
    }

    /// An upvote from this account.
    pub fn make_vote(&self, author: &str, permlink: &str) -> Transaction {
        self.prepare(VoteOperation {
            voter: self.account.clone(),
            author: author.to_string(),
            permlink: permlink.to_string(),
            weight: 10_000,
        })
    }

    /// A STEEM transfer from this account.
    pub fn make_transfer(&self, to: &str, amount: i64, memo: &str) -> Transaction {
        self.prepare(TransferOperation {
            from: self.account.clone(),
            to: to.to_string(),
            amount: Asset::steem(amount),
            memo: memo.to_string(),
        })
    }

    /// A top-level post by this account.
    pub fn make_post(&self, permlink: &str, title: &str, body: &str) -> Transaction {
        self.prepare(CommentOperation {
            parent_author: String::new(),
            parent_permlink: "steem".into(),
            author: self.account.clone(),
            permlink: permlink.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            json_metadata: "{}".into(),
        })
    }

    /// Sign with this fixture's key.
    pub fn sign(&self, tx: Transaction) -> SignedTransaction {
        self.signer
            .sign_transaction(tx, std::slice::from_ref(&self.key))
            .expect("fixture signing succeeds")
    }

    fn prepare(&self, op: impl Into<Operation>) -> Transaction {
        let op: Operation = op.into();
        self.signer
            .prepare_transaction(&self.head(), TimePointSec(1_464_911_925), [op])
    }
}

/// Create fixtures for several accounts on the same network.
pub fn multi_party_fixtures(accounts: &[&str], config: SteemConfig) -> Vec<TestFixture> {
    accounts
        .iter()
        .map(|account| TestFixture::with_config(account, config.clone()))
        .collect()
}
