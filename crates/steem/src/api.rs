//! RPC request and response payloads.
//!
//! Only the `params` and `result` bodies are modelled here. The JSON-RPC
//! envelope and the transport belong to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde::ser::SerializeSeq;
use steem_core::{Asset, BlockId, SignedTransaction, TimePointSec, TransactionId};

use crate::error::Result;

pub const BROADCAST_API: &str = "network_broadcast_api";
pub const BROADCAST_METHOD: &str = "broadcast_transaction_synchronous";

/// Serialize a payload to JSON bytes.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize a payload from JSON bytes.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parameters of a legacy `call` request: `[api, method, [params...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParams<T> {
    pub api: String,
    pub method: String,
    pub params: Vec<T>,
}

impl<T> CallParams<T> {
    pub fn new(api: impl Into<String>, method: impl Into<String>, params: Vec<T>) -> Self {
        Self {
            api: api.into(),
            method: method.into(),
            params,
        }
    }
}

impl<T: Serialize> Serialize for CallParams<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.api)?;
        seq.serialize_element(&self.method)?;
        seq.serialize_element(&self.params)?;
        seq.end()
    }
}

/// `call` parameters broadcasting `tx` and waiting for inclusion.
pub fn broadcast_transaction_params(tx: &SignedTransaction) -> CallParams<&SignedTransaction> {
    CallParams::new(BROADCAST_API, BROADCAST_METHOD, vec![tx])
}

/// Result of `get_dynamic_global_properties`. Fields not listed are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u32,
    pub head_block_id: BlockId,
    pub time: TimePointSec,
    pub current_supply: Asset,
    pub virtual_supply: Asset,
}

impl DynamicGlobalProperties {
    /// The head block, for use as a transaction's reference block.
    pub fn reference_block(&self) -> &BlockId {
        &self.head_block_id
    }
}

/// Result of a synchronous broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfirmation {
    pub id: TransactionId,
    pub block_num: i32,
    pub trx_num: i32,
    pub expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use steem_core::operation::VoteOperation;
    use steem_core::Transaction;

    #[test]
    fn test_call_params_shape() {
        let params = CallParams::new("database_api", "get_accounts", vec![vec!["steemit"]]);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!(["database_api", "get_accounts", [["steemit"]]])
        );
    }

    #[test]
    fn test_broadcast_params() {
        let tx = SignedTransaction::new(
            Transaction::builder()
                .ref_block_num(12345)
                .ref_block_prefix(1_122_334_455)
                .expiration(TimePointSec::parse("2017-07-15T16:51:19").unwrap())
                .operation(VoteOperation {
                    voter: "foo".into(),
                    author: "bar".into(),
                    permlink: "baz".into(),
                    weight: 10_000,
                })
                .build(),
        );
        let value: serde_json::Value =
            from_json_bytes(&to_json_bytes(&broadcast_transaction_params(&tx)).unwrap()).unwrap();
        assert_eq!(value[0], "network_broadcast_api");
        assert_eq!(value[1], "broadcast_transaction_synchronous");
        assert_eq!(value[2][0]["ref_block_num"], 12345);
        assert_eq!(value[2][0]["expiration"], "2017-07-15T16:51:19");
        assert_eq!(
            value[2][0]["operations"],
            json!([["vote", {"voter": "foo", "author": "bar", "permlink": "baz", "weight": 10000}]])
        );
        assert_eq!(value[2][0]["signatures"], json!([]));
    }

    #[test]
    fn test_dynamic_global_properties() {
        let body = br#"{
            "id": 0,
            "head_block_number": 19020807,
            "head_block_id": "01223c077a4c9d4e05e7d1df26f15fb4d1a4ef4f",
            "time": "2018-01-16T09:47:51",
            "current_witness": "someguy123",
            "current_supply": "262325082.941 STEEM",
            "virtual_supply": "264964208.357 STEEM",
            "current_sbd_supply": "7689373.926 SBD",
            "maximum_block_size": 65536
        }"#;
        let props: DynamicGlobalProperties = from_json_bytes(body).unwrap();
        assert_eq!(props.head_block_number, 19_020_807);
        assert_eq!(props.reference_block().num(), 19_020_807);
        assert_eq!(props.current_supply, Asset::steem(262_325_082_941));
        assert_eq!(props.time, TimePointSec::parse("2018-01-16T09:47:51").unwrap());
    }

    #[test]
    fn test_transaction_confirmation() {
        let body = br#"{"id":"a0e3ab40b2d2c5fd9d8e6b6d93e34e8d3b1b2e6c","block_num":19020810,"trx_num":2,"expired":false}"#;
        let confirmation: TransactionConfirmation = from_json_bytes(body).unwrap();
        assert_eq!(confirmation.block_num, 19_020_810);
        assert_eq!(confirmation.trx_num, 2);
        assert!(!confirmation.expired);
        assert_eq!(
            confirmation.id.to_hex(),
            "a0e3ab40b2d2c5fd9d8e6b6d93e34e8d3b1b2e6c"
        );
    }

    #[test]
    fn test_malformed_payload() {
        assert!(from_json_bytes::<TransactionConfirmation>(b"{\"id\":\"zz\"}").is_err());
    }
}
