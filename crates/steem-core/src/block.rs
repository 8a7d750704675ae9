//! Blocks as returned by the RPC API.

use serde::{Deserialize, Serialize};

use crate::extensions::BlockExtension;
use crate::keys::PublicKey;
use crate::signature::Signature;
use crate::time::TimePointSec;
use crate::transaction::SignedTransaction;
use crate::types::{BlockId, MerkleRoot, TransactionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Id of the preceding block.
    pub previous: BlockId,
    pub timestamp: TimePointSec,
    /// Producing witness.
    pub witness: String,
    pub transaction_merkle_root: MerkleRoot,
    #[serde(default)]
    pub extensions: Vec<BlockExtension>,
}

impl BlockHeader {
    /// Height of this block.
    pub fn num(&self) -> u32 {
        self.previous.num().wrapping_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlockHeader {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub witness_signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlock {
    #[serde(flatten)]
    pub header: SignedBlockHeader,
    pub transactions: Vec<SignedTransaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_ids: Option<Vec<TransactionId>>,
}

impl SignedBlock {
    pub fn num(&self) -> u32 {
        self.header.header.num()
    }

    pub fn previous(&self) -> &BlockId {
        &self.header.header.previous
    }

    pub fn timestamp(&self) -> TimePointSec {
        self.header.header.timestamp
    }

    pub fn witness(&self) -> &str {
        &self.header.header.witness
    }

    pub fn witness_signature(&self) -> &Signature {
        &self.header.witness_signature
    }

    pub fn extensions(&self) -> &[BlockExtension] {
        &self.header.header.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header_json() -> serde_json::Value {
        json!({
            "previous": "001e847f77b2d0bc1c29caf02b1a98d79aefb7ad",
            "timestamp": "2016-06-02T23:58:45",
            "witness": "steempty",
            "transaction_merkle_root": "3335e6efe04f09aac61ad1fcc241ada1e1e8fc62",
            "extensions": [],
            "witness_signature": "1f26706cb7da8528a303f55c7e260b8b43ba2aaddb2970d01563f5b1d1dc1d8e0342e4afe22e95277d37b4e7a429df499771f8db064e64aa964a0ba4a17a18fb2b"
        })
    }

    #[test]
    fn test_header_decode() {
        let header: SignedBlockHeader = serde_json::from_value(header_json()).unwrap();
        assert_eq!(header.header.num(), 2_000_000);
        assert_eq!(header.header.timestamp, TimePointSec(1_464_911_925));
        assert_eq!(serde_json::to_value(&header).unwrap(), header_json());
    }

    #[test]
    fn test_empty_block() {
        let mut value = header_json();
        value["transactions"] = json!([]);
        let block: SignedBlock = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(block.num(), 2_000_000);
        assert_eq!(block.witness(), "steempty");
        assert!(block.block_id.is_none());
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn test_block_with_version_extension() {
        let mut value = header_json();
        value["extensions"] = json!([[1, "0.19.2"]]);
        value["transactions"] = json!([]);
        let block: SignedBlock = serde_json::from_value(value).unwrap();
        assert_eq!(block.extensions(), &[BlockExtension::Version("0.19.2".into())]);
    }

    #[test]
    fn test_block_with_hardfork_vote_is_unsupported() {
        let mut value = header_json();
        value["extensions"] = json!([[2, {"hf_version": "0.20.0", "hf_time": "2018-09-25T15:00:00"}]]);
        value["transactions"] = json!([]);
        let err = serde_json::from_value::<SignedBlock>(value).unwrap_err();
        assert!(err.to_string().contains("not yet supported"));
    }
}
