//! Steem binary wire format.
//!
//! This is the encoding that transaction digests are computed over, so it
//! must be byte-exact with the reference network:
//! - Fixed-width integers are little-endian at their natural width
//! - Lengths and counts are LEB128 varints (7 bits per byte, high bit = more)
//! - Strings and byte blobs are varint length + raw bytes
//! - Booleans and optional-presence flags are a single 0/1 byte
//! - Sequences and ordered maps are varint count + elements in iteration order
//!
//! The encoder never sorts anything. Callers supply values in canonical order.

use crate::error::{CoreError, Result};
use crate::keys::AddressPrefix;

/// Maximum bytes a u64 varint can occupy.
const MAX_VARINT_LEN: usize = 10;

/// A value with a Steem binary encoding.
pub trait BinaryEncode {
    /// Append the encoding of `self` to the writer.
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()>;
}

/// A value that can be read back from Steem binary encoding.
pub trait BinaryDecode: Sized {
    /// Read one value from the reader.
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self>;
}

/// Encode a value to a fresh byte buffer.
pub fn to_bytes<T: BinaryEncode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    value.binary_encode(&mut w)?;
    Ok(w.into_bytes())
}

/// Decode a value, requiring that every input byte is consumed.
pub fn from_bytes<T: BinaryDecode>(bytes: &[u8]) -> Result<T> {
    let mut r = BinaryReader::new(bytes);
    let value = T::binary_decode(&mut r)?;
    r.finish()?;
    Ok(value)
}

/// Decode a value, attaching `prefix` to any public keys read.
pub fn from_bytes_with_prefix<T: BinaryDecode>(bytes: &[u8], prefix: AddressPrefix) -> Result<T> {
    let mut r = BinaryReader::with_prefix(bytes, prefix);
    let value = T::binary_decode(&mut r)?;
    r.finish()?;
    Ok(value)
}

/// Append-only byte sink.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append raw bytes with no length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_varint(&mut self, value: u64) {
        let mut v = value;
        while v > 0x7f {
            self.buf.push((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        self.buf.push(v as u8);
    }

    /// Varint length followed by the bytes.
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_raw(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over binary input.
///
/// Carries the address prefix attached to public keys, since the wire form
/// of a key is just its 33 bytes.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    prefix: AddressPrefix,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_prefix(data, AddressPrefix::MainNet)
    }

    pub fn with_prefix(data: &'a [u8], prefix: AddressPrefix) -> Self {
        Self {
            data,
            pos: 0,
            prefix,
        }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn prefix(&self) -> &AddressPrefix {
        &self.prefix
    }

    /// Build a decode error at the current offset.
    pub fn error(&self, reason: impl Into<String>) -> CoreError {
        CoreError::decode(self.pos, reason)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw(1)?[0])
    }

    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.error(format!(
                "unexpected end of input: need {} bytes, have {}",
                len,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.read_raw(N)?);
        Ok(arr)
    }

    /// Consume everything left in the input.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7f);
            let shift = 7 * i as u32;
            if shift == 63 && bits > 1 {
                return Err(CoreError::decode(start, "varint overflows u64"));
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CoreError::decode(start, "varint longer than 10 bytes"))
    }

    /// Read a varint count and check it is plausible for the remaining input.
    pub fn read_len(&mut self) -> Result<usize> {
        let start = self.pos;
        let len = self.read_varint()?;
        usize::try_from(len).map_err(|_| CoreError::decode(start, "length does not fit in usize"))
    }

    pub fn read_len_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.read_raw(len)
    }

    /// Fail if any input is left over.
    pub fn finish(&self) -> Result<()> {
        if self.remaining() > 0 {
            return Err(self.error(format!("{} trailing bytes", self.remaining())));
        }
        Ok(())
    }
}

macro_rules! impl_fixed_int {
    ($($ty:ty),*) => {
        $(
            impl BinaryEncode for $ty {
                fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
                    w.write_raw(&self.to_le_bytes());
                    Ok(())
                }
            }

            impl BinaryDecode for $ty {
                fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
                    Ok(<$ty>::from_le_bytes(r.read_array()?))
                }
            }
        )*
    };
}

impl_fixed_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl BinaryEncode for bool {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(u8::from(*self));
        Ok(())
    }
}

impl BinaryDecode for bool {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        match r.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CoreError::decode(
                r.position() - 1,
                format!("invalid bool byte {:#04x}", other),
            )),
        }
    }
}

impl BinaryEncode for str {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_len_prefixed(self.as_bytes());
        Ok(())
    }
}

impl BinaryEncode for String {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.as_str().binary_encode(w)
    }
}

impl BinaryDecode for String {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let start = r.position();
        let bytes = r.read_len_prefixed()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| CoreError::decode(start, "string is not valid utf-8"))
    }
}

/// Fixed-size arrays are written raw, with no length prefix.
impl<const N: usize> BinaryEncode for [u8; N] {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_raw(self);
        Ok(())
    }
}

impl<const N: usize> BinaryDecode for [u8; N] {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_array()
    }
}

impl<T: BinaryEncode> BinaryEncode for Option<T> {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        match self {
            Some(value) => {
                w.write_u8(1);
                value.binary_encode(w)
            }
            None => {
                w.write_u8(0);
                Ok(())
            }
        }
    }
}

impl<T: BinaryDecode> BinaryDecode for Option<T> {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        if bool::binary_decode(r)? {
            Ok(Some(T::binary_decode(r)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: BinaryEncode> BinaryEncode for [T] {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_varint(self.len() as u64);
        for item in self {
            item.binary_encode(w)?;
        }
        Ok(())
    }
}

impl<T: BinaryEncode> BinaryEncode for Vec<T> {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.as_slice().binary_encode(w)
    }
}

impl<T: BinaryDecode> BinaryDecode for Vec<T> {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let len = r.read_len()?;
        // Every element takes at least one byte.
        let mut items = Vec::with_capacity(len.min(r.remaining()));
        for _ in 0..len {
            items.push(T::binary_decode(r)?);
        }
        Ok(items)
    }
}

/// Map entries: key then value, so `Vec<(K, V)>` is an ordered map.
impl<A: BinaryEncode, B: BinaryEncode> BinaryEncode for (A, B) {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.0.binary_encode(w)?;
        self.1.binary_encode(w)
    }
}

impl<A: BinaryDecode, B: BinaryDecode> BinaryDecode for (A, B) {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let a = A::binary_decode(r)?;
        let b = B::binary_decode(r)?;
        Ok((a, b))
    }
}

impl<T: BinaryEncode + ?Sized> BinaryEncode for &T {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        (**self).binary_encode(w)
    }
}

/// Implement both binary traits for a struct by listing its fields in wire order.
#[macro_export]
macro_rules! binary_fields {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $crate::serializer::BinaryEncode for $name {
            fn binary_encode(
                &self,
                w: &mut $crate::serializer::BinaryWriter,
            ) -> $crate::error::Result<()> {
                $( $crate::serializer::BinaryEncode::binary_encode(&self.$field, w)?; )*
                let _ = w;
                Ok(())
            }
        }

        impl $crate::serializer::BinaryDecode for $name {
            fn binary_decode(
                r: &mut $crate::serializer::BinaryReader<'_>,
            ) -> $crate::error::Result<Self> {
                let _ = &r;
                Ok(Self {
                    $( $field: $crate::serializer::BinaryDecode::binary_decode(r)?, )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of<T: BinaryEncode + ?Sized>(value: &T) -> String {
        hex::encode(to_bytes(value).unwrap())
    }

    #[test]
    fn test_fixed_width_integers() {
        assert_eq!(hex_of(&0i8), "00");
        assert_eq!(hex_of(&-128i8), "80");
        assert_eq!(hex_of(&127i8), "7f");
        assert_eq!(hex_of(&-32768i16), "0080");
        assert_eq!(hex_of(&255i16), "ff00");
        assert_eq!(hex_of(&-4162i16), "beef");
        assert_eq!(hex_of(&-272_707_846i32), "facebeef");
        assert_eq!(hex_of(&9_007_199_254_740_991i64), "ffffffffffff1f00");
        assert_eq!(hex_of(&-9_007_199_254_740_991i64), "010000000000e0ff");
        assert_eq!(hex_of(&255u8), "ff");
        assert_eq!(hex_of(&61374u16), "beef");
        assert_eq!(hex_of(&4_022_259_450u32), "facebeef");
        assert_eq!(hex_of(&9_007_199_254_740_991u64), "ffffffffffff1f00");
    }

    #[test]
    fn test_varint_encoding() {
        let cases: [(u64, &str); 6] = [
            (0, "00"),
            (1, "01"),
            (127, "7f"),
            (128, "8001"),
            (300, "ac02"),
            (u64::MAX, "ffffffffffffffffff01"),
        ];
        for (value, expected) in cases {
            let mut w = BinaryWriter::new();
            w.write_varint(value);
            assert_eq!(hex::encode(w.as_bytes()), expected, "varint {}", value);

            let mut r = BinaryReader::new(w.as_bytes());
            assert_eq!(r.read_varint().unwrap(), value);
            r.finish().unwrap();
        }
    }

    #[test]
    fn test_varint_overflow_rejected() {
        let bytes = hex::decode("ffffffffffffffffff7f").unwrap();
        let mut r = BinaryReader::new(&bytes);
        assert!(matches!(r.read_varint(), Err(CoreError::Decode { offset: 0, .. })));

        let too_long = [0x80u8; 11];
        let mut r = BinaryReader::new(&too_long);
        assert!(r.read_varint().is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!(hex_of(""), "00");
        assert_eq!(
            hex_of("Hellö fröm Swäden!"),
            "1548656c6cc3b6206672c3b66d205377c3a464656e21"
        );
        assert_eq!(
            hex_of("大きなおっぱい"),
            "15e5a4a7e3818de381aae3818ae381a3e381b1e38184"
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            hex_of(&vec!["foo".to_string(), "bar".to_string()]),
            "0203666f6f03626172"
        );
        assert_eq!(hex_of(&vec![100u16, 200u16]), "026400c800");
    }

    #[test]
    fn test_ordered_map_keeps_insertion_order() {
        let map: Vec<(u8, u8)> = vec![(190, 239), (250, 206)];
        assert_eq!(hex_of(&map), "02beefface");

        let reversed: Vec<(u8, u8)> = vec![(250, 206), (190, 239)];
        assert_eq!(hex_of(&reversed), "02facebeef");
    }

    #[test]
    fn test_bool_and_option() {
        assert_eq!(hex_of(&true), "01");
        assert_eq!(hex_of(&false), "00");
        assert_eq!(hex_of(&Some(7u16)), "010700");
        assert_eq!(hex_of(&None::<u16>), "00");

        assert_eq!(from_bytes::<Option<u16>>(&[1, 7, 0]).unwrap(), Some(7));
        assert!(matches!(
            from_bytes::<bool>(&[2]),
            Err(CoreError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn test_decode_roundtrip_compound() {
        let value: Vec<(String, Option<i64>)> = vec![
            ("alpha".into(), Some(-5)),
            ("beta".into(), None),
        ];
        let bytes = to_bytes(&value).unwrap();
        let decoded: Vec<(String, Option<i64>)> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_truncated_input_reports_offset() {
        let err = from_bytes::<u32>(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Decode {
                offset: 0,
                reason: "unexpected end of input: need 4 bytes, have 2".into()
            }
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let err = from_bytes::<u8>(&[1, 2]).unwrap_err();
        assert!(matches!(err, CoreError::Decode { offset: 1, .. }));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(from_bytes::<String>(&[2, 0xc3, 0x28]).is_err());
    }

    proptest::proptest! {
        #[test]
        fn test_varint_roundtrip(value: u64) {
            let mut w = BinaryWriter::new();
            w.write_varint(value);
            let bytes = w.into_bytes();
            proptest::prop_assert!(bytes.len() <= MAX_VARINT_LEN);
            proptest::prop_assert_eq!(bytes.len() == 1, value < 0x80);

            let mut r = BinaryReader::new(&bytes);
            proptest::prop_assert_eq!(r.read_varint().unwrap(), value);
            proptest::prop_assert!(r.finish().is_ok());
        }

        #[test]
        fn test_string_roundtrip(value: String) {
            let bytes = to_bytes(&value).unwrap();
            proptest::prop_assert_eq!(from_bytes::<String>(&bytes).unwrap(), value);
        }

        #[test]
        fn test_truncated_input_is_error(values: Vec<u32>, cut in 1usize..16) {
            let bytes = to_bytes(&values).unwrap();
            let keep = bytes.len().saturating_sub(cut);
            proptest::prop_assert!(from_bytes::<Vec<u32>>(&bytes[..keep]).is_err());
        }
    }
}
