//! Extension tagged unions.
//!
//! Extensions are `[type_code, payload]` pairs. Unknown type codes received as
//! JSON are kept as an `Unknown` sentinel holding the raw payload; such values
//! cannot be encoded again in either form. In binary form an unknown code is
//! a decode error since its payload length is not self-describing.

use serde::ser::{Error as _, SerializeTuple};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

fn not_encodable(what: &str, type_id: u64) -> CoreError {
    CoreError::NotEncodable(format!("unknown {} type {}", what, type_id))
}

fn serialize_pair<S: Serializer, T: Serialize + ?Sized>(
    serializer: S,
    type_id: u64,
    payload: &T,
) -> std::result::Result<S::Ok, S::Error> {
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&type_id)?;
    tuple.serialize_element(payload)?;
    tuple.end()
}

/// Read a type code, failing unless it is `expected`.
fn expect_type(r: &mut BinaryReader<'_>, what: &str, expected: u64) -> Result<()> {
    let start = r.position();
    let type_id = r.read_varint()?;
    if type_id != expected {
        return Err(CoreError::decode(
            start,
            format!("unknown {} type {}", what, type_id),
        ));
    }
    Ok(())
}

/// Reserved extension slot on transactions and operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FutureExtension {
    Void,
    Unknown {
        type_id: u64,
        value: serde_json::Value,
    },
}

impl Serialize for FutureExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FutureExtension::Void => {
                serialize_pair(serializer, 0, &serde_json::Map::new())
            }
            FutureExtension::Unknown { type_id, .. } => Err(S::Error::custom(not_encodable(
                "future extension",
                *type_id,
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for FutureExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (type_id, value) = <(u64, serde_json::Value)>::deserialize(deserializer)?;
        Ok(match type_id {
            0 => FutureExtension::Void,
            _ => FutureExtension::Unknown { type_id, value },
        })
    }
}

impl BinaryEncode for FutureExtension {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        match self {
            FutureExtension::Void => {
                w.write_varint(0);
                Ok(())
            }
            FutureExtension::Unknown { type_id, .. } => {
                Err(not_encodable("future extension", *type_id))
            }
        }
    }
}

impl BinaryDecode for FutureExtension {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        expect_type(r, "future extension", 0)?;
        Ok(FutureExtension::Void)
    }
}

/// A share of comment rewards routed to another account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryRoute {
    pub account: String,
    /// Basis points, 10000 = 100%.
    pub weight: u16,
}

crate::binary_fields!(BeneficiaryRoute { account, weight });

#[derive(Serialize, Deserialize)]
struct BeneficiariesPayload<T> {
    beneficiaries: T,
}

/// Extensions carried by `comment_options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOptionsExtension {
    Beneficiaries(Vec<BeneficiaryRoute>),
    Unknown {
        type_id: u64,
        value: serde_json::Value,
    },
}

impl Serialize for CommentOptionsExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CommentOptionsExtension::Beneficiaries(routes) => serialize_pair(
                serializer,
                0,
                &BeneficiariesPayload {
                    beneficiaries: routes,
                },
            ),
            CommentOptionsExtension::Unknown { type_id, .. } => Err(S::Error::custom(
                not_encodable("comment options extension", *type_id),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for CommentOptionsExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (type_id, value) = <(u64, serde_json::Value)>::deserialize(deserializer)?;
        match type_id {
            0 => {
                let payload: BeneficiariesPayload<Vec<BeneficiaryRoute>> =
                    serde_json::from_value(value).map_err(de::Error::custom)?;
                Ok(CommentOptionsExtension::Beneficiaries(payload.beneficiaries))
            }
            _ => Ok(CommentOptionsExtension::Unknown { type_id, value }),
        }
    }
}

impl BinaryEncode for CommentOptionsExtension {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        match self {
            CommentOptionsExtension::Beneficiaries(routes) => {
                w.write_varint(0);
                routes.binary_encode(w)
            }
            CommentOptionsExtension::Unknown { type_id, .. } => {
                Err(not_encodable("comment options extension", *type_id))
            }
        }
    }
}

impl BinaryDecode for CommentOptionsExtension {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        expect_type(r, "comment options extension", 0)?;
        Ok(CommentOptionsExtension::Beneficiaries(Vec::binary_decode(r)?))
    }
}

/// Extensions found in block headers. JSON only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockExtension {
    /// Witness software version, type 1.
    Version(String),
    Unknown {
        type_id: u64,
        value: serde_json::Value,
    },
}

impl Serialize for BlockExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            BlockExtension::Version(version) => serialize_pair(serializer, 1, version),
            BlockExtension::Unknown { type_id, .. } => Err(S::Error::custom(not_encodable(
                "block extension",
                *type_id,
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for BlockExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (type_id, value) = <(u64, serde_json::Value)>::deserialize(deserializer)?;
        match type_id {
            1 => {
                let version = serde_json::from_value(value).map_err(de::Error::custom)?;
                Ok(BlockExtension::Version(version))
            }
            // hardfork version vote: layout never specified
            2 => Err(de::Error::custom(CoreError::Unsupported(
                "block extension type 2 (hardfork version vote)".into(),
            ))),
            _ => Ok(BlockExtension::Unknown { type_id, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{from_bytes, to_bytes};
    use serde_json::json;

    #[test]
    fn test_future_extension() {
        assert_eq!(hex::encode(to_bytes(&FutureExtension::Void).unwrap()), "00");
        assert_eq!(from_bytes::<FutureExtension>(&[0]).unwrap(), FutureExtension::Void);
        assert!(matches!(
            from_bytes::<FutureExtension>(&[5]),
            Err(CoreError::Decode { offset: 0, .. })
        ));

        assert_eq!(serde_json::to_value(FutureExtension::Void).unwrap(), json!([0, {}]));
        let unknown: FutureExtension = serde_json::from_value(json!([7, {"x": 1}])).unwrap();
        assert_eq!(
            unknown,
            FutureExtension::Unknown {
                type_id: 7,
                value: json!({"x": 1})
            }
        );
        assert!(serde_json::to_string(&unknown).is_err());
        assert!(matches!(to_bytes(&unknown), Err(CoreError::NotEncodable(_))));
    }

    #[test]
    fn test_beneficiaries() {
        let ext = CommentOptionsExtension::Beneficiaries(vec![
            BeneficiaryRoute {
                account: "foo".into(),
                weight: 1000,
            },
            BeneficiaryRoute {
                account: "bar".into(),
                weight: 500,
            },
        ]);
        let bytes = to_bytes(&ext).unwrap();
        assert_eq!(hex::encode(&bytes), "000203666f6fe80303626172f401");
        assert_eq!(from_bytes::<CommentOptionsExtension>(&bytes).unwrap(), ext);

        let value = serde_json::to_value(&ext).unwrap();
        assert_eq!(
            value,
            json!([0, {"beneficiaries": [
                {"account": "foo", "weight": 1000},
                {"account": "bar", "weight": 500}
            ]}])
        );
        assert_eq!(
            serde_json::from_value::<CommentOptionsExtension>(value).unwrap(),
            ext
        );
    }

    #[test]
    fn test_unknown_comment_options_extension() {
        let ext: CommentOptionsExtension = serde_json::from_value(json!([3, "anything"])).unwrap();
        assert!(matches!(ext, CommentOptionsExtension::Unknown { type_id: 3, .. }));
        assert!(matches!(to_bytes(&ext), Err(CoreError::NotEncodable(_))));
    }

    #[test]
    fn test_block_extensions() {
        let ext: BlockExtension = serde_json::from_value(json!([1, "0.19.0"])).unwrap();
        assert_eq!(ext, BlockExtension::Version("0.19.0".into()));
        assert_eq!(serde_json::to_value(&ext).unwrap(), json!([1, "0.19.0"]));

        let err = serde_json::from_value::<BlockExtension>(json!([2, {"hf_version": "0.20.0"}]))
            .unwrap_err();
        assert!(err.to_string().contains("not yet supported"));

        let unknown: BlockExtension = serde_json::from_value(json!([9, null])).unwrap();
        assert!(matches!(unknown, BlockExtension::Unknown { type_id: 9, .. }));
    }

    #[test]
    fn test_malformed_pair() {
        assert!(serde_json::from_value::<FutureExtension>(json!([0])).is_err());
        assert!(serde_json::from_value::<FutureExtension>(json!({"type": 0})).is_err());
    }
}
