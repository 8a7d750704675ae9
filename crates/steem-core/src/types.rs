//! Strong type definitions for identifiers and opaque payloads.
//!
//! All identifiers are newtypes to prevent misuse at compile time. Their JSON
//! form is lowercase hex.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

macro_rules! ripemd_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub [u8; 20]);

        impl $name {
            pub const fn from_bytes(bytes: [u8; 20]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; 20] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn from_hex(s: &str) -> Result<Self> {
                let bytes = hex::decode(s).map_err(|e| CoreError::Json(e.to_string()))?;
                let arr: [u8; 20] = bytes.try_into().map_err(|b: Vec<u8>| {
                    CoreError::Json(format!(
                        "{} must be 20 bytes, got {}",
                        stringify!($name),
                        b.len()
                    ))
                })?;
                Ok(Self(arr))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl From<[u8; 20]> for $name {
            fn from(bytes: [u8; 20]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }

        impl BinaryEncode for $name {
            fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
                w.write_raw(&self.0);
                Ok(())
            }
        }

        impl BinaryDecode for $name {
            fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
                Ok(Self(r.read_array()?))
            }
        }
    };
}

ripemd_id!(
    /// First 20 bytes of SHA-256 over a transaction's binary encoding.
    TransactionId
);

ripemd_id!(
    /// Merkle root of a block's transaction ids.
    MerkleRoot
);

ripemd_id!(
    /// Block identifier. The first four bytes are the big-endian block number.
    BlockId
);

impl BlockId {
    /// Block height encoded in the id.
    pub fn num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// The value transactions use as `ref_block_prefix`.
    pub fn prefix(&self) -> u32 {
        u32::from_le_bytes([self.0[4], self.0[5], self.0[6], self.0[7]])
    }

    /// The value transactions use as `ref_block_num`.
    pub fn ref_num(&self) -> u16 {
        (self.num() & 0xffff) as u16
    }
}

/// Opaque byte payload: varint-length bytes on the wire, hex in JSON.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct HexBytes(pub Bytes);

impl HexBytes {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CoreError::Json(e.to_string()))?;
        Ok(Self(Bytes::from(bytes)))
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({})", self.to_hex())
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

impl From<&'static [u8]> for HexBytes {
    fn from(data: &'static [u8]) -> Self {
        Self(Bytes::from_static(data))
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexBytes::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for HexBytes {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_len_prefixed(&self.0);
        Ok(())
    }
}

impl BinaryDecode for HexBytes {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self(Bytes::copy_from_slice(r.read_len_prefixed()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{from_bytes, to_bytes};

    #[test]
    fn test_block_id_fields() {
        let id = BlockId::from_hex("001e847f77b2d0bc1c29caf02b1a98d79aefb7ad").unwrap();
        assert_eq!(id.num(), 1_999_999);
        assert_eq!(id.ref_num(), 0x847f);
        assert_eq!(id.prefix(), 0xbcd0_b277);
        assert_eq!(id.to_string(), "001e847f77b2d0bc1c29caf02b1a98d79aefb7ad");
    }

    #[test]
    fn test_id_wrong_length() {
        assert!(TransactionId::from_hex("0011").is_err());
        assert!(BlockId::from_hex(&"00".repeat(21)).is_err());
    }

    #[test]
    fn test_id_json() {
        let id = TransactionId::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(20)));
        assert_eq!(serde_json::from_str::<TransactionId>(&json).unwrap(), id);
    }

    #[test]
    fn test_hex_bytes_codec() {
        let data = HexBytes::from(vec![0xde, 0xad, 0xbe, 0xef]);
        let bytes = to_bytes(&data).unwrap();
        assert_eq!(hex::encode(&bytes), "04deadbeef");
        assert_eq!(from_bytes::<HexBytes>(&bytes).unwrap(), data);
        assert_eq!(serde_json::to_string(&data).unwrap(), "\"deadbeef\"");
        assert!(HexBytes::from_hex("xyz").is_err());
    }
}
