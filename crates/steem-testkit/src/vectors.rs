//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the binary encoding, chain-scoped digest and
//! counter-nonce signature of known transactions. Every client library for
//! the network produces the same values.

use steem_core::operation::{TransferOperation, VoteOperation};
use steem_core::{
    Asset, ChainId, CounterNonce, PrivateKey, Result, Secp256k1Context, TimePointSec,
    Transaction,
};

/// Key used by every vector.
pub const VECTOR_WIF: &str = "5JEB2fkmEqHSfGqL96eTtQ2emYodeTBBnXvETwe2vUSMe4pxdLj";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Chain id (hex).
    pub chain_id: &'static str,
    /// Expected transaction bytes (hex).
    pub expected_bytes: &'static str,
    /// Expected digest (hex).
    pub expected_digest: &'static str,
    /// Expected signature with a fresh counter nonce (hex).
    pub expected_signature: &'static str,
}

const SAMPLE_BYTES: &str = "00000000000000000000020003666f6f03666f6f0362617ae8030203666f6f03626172102700000000000003535445454d00000362617a00";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "vote and transfer on main network",
            chain_id: "0000000000000000000000000000000000000000000000000000000000000000",
            expected_bytes: SAMPLE_BYTES,
            expected_digest: "44424a1259aba312780ca6957a91dbd8a8eef8c2c448d89eccee34a425c77512",
            expected_signature: "20598c2f2301db5559d42663f8f79cbc4258697cd645b6df56be2e83d786a66590437acf0041bda94c4ff4d8e5bce0ac1765a2c32bd796cb1d002081e4a5f8691a",
        },
        GoldenVector {
            name: "vote and transfer on custom chain",
            chain_id: "79276aea5d4877d9a25892eaa01b0adf019d3e5cb12a97478df3298ccdd01673",
            expected_bytes: SAMPLE_BYTES,
            expected_digest: "43ca08db53ad0289ccb268654497e0799c02b50ac8535e0c0f753067417be953",
            expected_signature: "1f15c78daabdbc30866897f7d01d61ba385b599f1438fe8b501ee4982eaba969f371474d0c4bd6ed927d74f5e94f59565506bdf4478400d5fe2330f61473d6ae8f",
        },
        GoldenVector {
            name: "vote and transfer on test network",
            chain_id: "46d82ab7d8db682eb1959aed0ada039a6d49afa1602491f93dde9cac3e8e6c32",
            expected_bytes: SAMPLE_BYTES,
            expected_digest: "13512dc5d07bd3653e40f4e9493c2626e5c9a6e9349039363aea04ceb40c09b1",
            expected_signature: "1f6e1fb571ceaf7d91ee4156b89ec3d2de944f6173b1139a749914d6fce8bb6d0e42b02e5db098ec20f0782fef43749c3f53d94a40c76e0bef3bf9de436e8b64db",
        },
    ]
}

/// The transaction every vector signs.
pub fn vector_transaction() -> Transaction {
    Transaction::builder()
        .ref_block_num(0)
        .ref_block_prefix(0)
        .expiration(TimePointSec(0))
        .operation(VoteOperation {
            voter: "foo".into(),
            author: "foo".into(),
            permlink: "baz".into(),
            weight: 1000,
        })
        .operation(TransferOperation {
            from: "foo".into(),
            to: "bar".into(),
            amount: Asset::steem(10_000),
            memo: "baz".into(),
        })
        .build()
}

/// Computed outputs for one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOutput {
    pub bytes: String,
    pub digest: String,
    pub signature: String,
}

/// Compute the outputs of a vector.
pub fn compute_vector(ctx: &Secp256k1Context, vector: &GoldenVector) -> Result<VectorOutput> {
    let tx = vector_transaction();
    let chain_id = ChainId::from_hex(vector.chain_id)?;
    let key = PrivateKey::from_wif(VECTOR_WIF)?;

    let bytes = tx.to_bytes()?;
    let digest = tx.digest(&chain_id)?;
    let signature = tx.sign(ctx, &chain_id, &key, &mut CounterNonce::new())?;

    Ok(VectorOutput {
        bytes: hex::encode(bytes),
        digest: digest.to_hex(),
        signature: signature.to_hex(),
    })
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, signature_hex)` per vector, or the error text
/// in place of the signature.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let ctx = Secp256k1Context::new();
    all_vectors()
        .iter()
        .map(|v| match compute_vector(&ctx, v) {
            Err(e) => (v.name.to_string(), false, e.to_string()),
            Ok(out) => {
                let matches = out.bytes == v.expected_bytes
                    && out.digest == v.expected_digest
                    && out.signature == v.expected_signature;
                (v.name.to_string(), matches, out.signature)
            }
        })
        .collect()
}
