//! Weighted multi-signature authorities.
//!
//! Account and key weights are kept as ordered lists, since their order is
//! part of the signed byte stream. Entries are unique by value.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{CoreError, Result};
use crate::keys::PublicKey;
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

/// One weighted entry. JSON form is `[value, weight]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Auth<T> {
    pub value: T,
    pub weight: u16,
}

impl<T> Auth<T> {
    pub fn new(value: T, weight: u16) -> Self {
        Self { value, weight }
    }
}

impl<T: Serialize> Serialize for Auth<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.weight)?;
        tuple.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Auth<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AuthVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for AuthVisitor<T> {
            type Value = Auth<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [value, weight] pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Auth<T>, A::Error> {
                let value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let weight = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(Auth { value, weight })
            }
        }

        deserializer.deserialize_tuple(2, AuthVisitor(PhantomData))
    }
}

impl<T: BinaryEncode> BinaryEncode for Auth<T> {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.value.binary_encode(w)?;
        self.weight.binary_encode(w)
    }
}

impl<T: BinaryDecode> BinaryDecode for Auth<T> {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let value = T::binary_decode(r)?;
        let weight = u16::binary_decode(r)?;
        Ok(Self { value, weight })
    }
}

/// Threshold plus weighted accounts and keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Authority {
    pub weight_threshold: u32,
    account_auths: Vec<Auth<String>>,
    key_auths: Vec<Auth<PublicKey>>,
}

impl Authority {
    /// An authority satisfied by a single key with weight 1.
    pub fn single_key(key: PublicKey) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![Auth::new(key, 1)],
        }
    }

    pub fn builder(weight_threshold: u32) -> AuthorityBuilder {
        AuthorityBuilder::new(weight_threshold)
    }

    pub fn account_auths(&self) -> &[Auth<String>] {
        &self.account_auths
    }

    pub fn key_auths(&self) -> &[Auth<PublicKey>] {
        &self.key_auths
    }

    /// Construct from parts, rejecting duplicate accounts or keys.
    pub fn from_parts(
        weight_threshold: u32,
        account_auths: Vec<Auth<String>>,
        key_auths: Vec<Auth<PublicKey>>,
    ) -> Result<Self> {
        check_unique(&account_auths, "account")?;
        check_unique(&key_auths, "key")?;
        Ok(Self {
            weight_threshold,
            account_auths,
            key_auths,
        })
    }
}

fn check_unique<T: PartialEq + fmt::Display>(auths: &[Auth<T>], what: &str) -> Result<()> {
    for (i, auth) in auths.iter().enumerate() {
        if auths[..i].iter().any(|earlier| earlier.value == auth.value) {
            return Err(CoreError::InvalidAuthority(format!(
                "duplicate {} {}",
                what, auth.value
            )));
        }
    }
    Ok(())
}

/// Builder for authorities. Entries keep insertion order.
#[derive(Debug, Clone)]
pub struct AuthorityBuilder {
    weight_threshold: u32,
    account_auths: Vec<Auth<String>>,
    key_auths: Vec<Auth<PublicKey>>,
}

impl AuthorityBuilder {
    pub fn new(weight_threshold: u32) -> Self {
        Self {
            weight_threshold,
            account_auths: Vec::new(),
            key_auths: Vec::new(),
        }
    }

    pub fn account(mut self, account: impl Into<String>, weight: u16) -> Self {
        self.account_auths.push(Auth::new(account.into(), weight));
        self
    }

    pub fn key(mut self, key: PublicKey, weight: u16) -> Self {
        self.key_auths.push(Auth::new(key, weight));
        self
    }

    pub fn build(self) -> Result<Authority> {
        Authority::from_parts(self.weight_threshold, self.account_auths, self.key_auths)
    }
}

#[derive(Deserialize)]
struct RawAuthority {
    weight_threshold: u32,
    account_auths: Vec<Auth<String>>,
    key_auths: Vec<Auth<PublicKey>>,
}

impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawAuthority::deserialize(deserializer)?;
        Authority::from_parts(raw.weight_threshold, raw.account_auths, raw.key_auths)
            .map_err(de::Error::custom)
    }
}

impl BinaryEncode for Authority {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.weight_threshold.binary_encode(w)?;
        self.account_auths.binary_encode(w)?;
        self.key_auths.binary_encode(w)
    }
}

impl BinaryDecode for Authority {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let start = r.position();
        let weight_threshold = u32::binary_decode(r)?;
        let account_auths = Vec::binary_decode(r)?;
        let key_auths = Vec::binary_decode(r)?;
        Authority::from_parts(weight_threshold, account_auths, key_auths)
            .map_err(|e| CoreError::decode(start, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::AddressPrefix;
    use crate::serializer::{from_bytes, to_bytes};

    fn key(address: &str) -> PublicKey {
        PublicKey::from_address(address).unwrap()
    }

    fn sample() -> Authority {
        Authority::builder(2)
            .account("foo", 1)
            .account("bar", 1)
            .key(key("STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv"), 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_binary_layout() {
        let auth = sample();
        let bytes = to_bytes(&auth).unwrap();
        let key_hex =
            hex::encode(key("STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv").as_bytes());
        // threshold, two account auths, one key auth
        let expected = format!("02000000{}01{}0200", "0203666f6f0100036261720100", key_hex);
        assert_eq!(hex::encode(&bytes), expected);
        assert_eq!(from_bytes::<Authority>(&bytes).unwrap(), auth);
    }

    #[test]
    fn test_order_is_preserved() {
        let a = Authority::builder(1).account("foo", 1).account("bar", 1).build().unwrap();
        let b = Authority::builder(1).account("bar", 1).account("foo", 1).build().unwrap();
        assert_ne!(to_bytes(&a).unwrap(), to_bytes(&b).unwrap());
        assert_eq!(a.account_auths()[0].value, "foo");
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = Authority::builder(1).account("foo", 1).account("foo", 2).build();
        assert!(matches!(err, Err(CoreError::InvalidAuthority(_))));

        let k = key("STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv");
        let err = Authority::builder(1).key(k.clone(), 1).key(k, 1).build();
        assert!(err.is_err());

        // same bytes under another prefix is a different key
        let k = key("STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv");
        let ok = Authority::builder(1)
            .key(k.clone(), 1)
            .key(k.with_prefix(AddressPrefix::TestNet), 1)
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_binary_decode_rejects_duplicates() {
        let bytes = hex::decode("010000000203666f6f010003666f6f010000").unwrap();
        assert!(matches!(
            from_bytes::<Authority>(&bytes),
            Err(CoreError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn test_json_form() {
        let auth = sample();
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "weight_threshold": 2,
                "account_auths": [["foo", 1], ["bar", 1]],
                "key_auths": [["STM6672Ei8X4yMfDmEhBD66xfpG177qrbuic8KpUe1GVV9GVGovcv", 2]],
            })
        );
        let back: Authority = serde_json::from_value(json).unwrap();
        assert_eq!(back, auth);

        let dup = serde_json::json!({
            "weight_threshold": 1,
            "account_auths": [["foo", 1], ["foo", 1]],
            "key_auths": [],
        });
        assert!(serde_json::from_value::<Authority>(dup).is_err());
    }
}
