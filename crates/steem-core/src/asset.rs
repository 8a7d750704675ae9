//! Fixed-precision token amounts.
//!
//! An [`Asset`] is an integer amount scaled by its symbol's precision, so
//! `"10.000 STEEM"` is stored as 10000 with precision 3. The binary form is
//! `i64 amount ++ u8 precision ++ 7-byte zero-padded ticker`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

/// Width of the zero-padded ticker in binary form.
const SYMBOL_WIDTH: usize = 7;

/// Largest precision whose scale factor fits in an i64.
const MAX_PRECISION: u8 = 18;

/// Token symbol with its fixed precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Steem,
    Sbd,
    Vests,
    /// Any other ticker. Built with [`Symbol::custom`].
    Custom(CustomSymbol),
}

/// A non-native ticker: uppercase ASCII alphanumerics, precision at most 18.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomSymbol {
    name: String,
    precision: u8,
}

impl CustomSymbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl Symbol {
    /// Build a symbol from a ticker and precision.
    ///
    /// The ticker is uppercased. Native tickers resolve to their own variant
    /// and must carry their native precision.
    pub fn custom(name: &str, precision: u8) -> Result<Self> {
        let invalid = |reason: String| {
            CoreError::InvalidAsset(format!("symbol {:?}: {}", name, reason))
        };
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid("ticker must be ascii letters and digits".into()));
        }
        if precision > MAX_PRECISION {
            return Err(invalid(format!(
                "precision {} exceeds {}",
                precision, MAX_PRECISION
            )));
        }
        let name = name.to_ascii_uppercase();
        match Symbol::known(&name) {
            Some(native) if native.precision() == precision => Ok(native),
            Some(native) => Err(invalid(format!(
                "{} has precision {}",
                native.name(),
                native.precision()
            ))),
            None => Ok(Symbol::Custom(CustomSymbol { name, precision })),
        }
    }

    /// Number of decimal places.
    pub fn precision(&self) -> u8 {
        match self {
            Symbol::Steem | Symbol::Sbd => 3,
            Symbol::Vests => 6,
            Symbol::Custom(custom) => custom.precision,
        }
    }

    /// Ticker, e.g. "STEEM".
    pub fn name(&self) -> &str {
        match self {
            Symbol::Steem => "STEEM",
            Symbol::Sbd => "SBD",
            Symbol::Vests => "VESTS",
            Symbol::Custom(custom) => &custom.name,
        }
    }

    fn known(name: &str) -> Option<Self> {
        match name {
            "STEEM" => Some(Symbol::Steem),
            "SBD" => Some(Symbol::Sbd),
            "VESTS" => Some(Symbol::Vests),
            _ => None,
        }
    }

    fn scale(&self) -> i64 {
        10i64.pow(u32::from(self.precision()))
    }
}

/// An amount of some token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Create from a raw scaled amount, e.g. `Asset::new(10_000, Symbol::Steem)` is 10 STEEM.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn steem(amount: i64) -> Self {
        Self::new(amount, Symbol::Steem)
    }

    pub fn sbd(amount: i64) -> Self {
        Self::new(amount, Symbol::Sbd)
    }

    pub fn vests(amount: i64) -> Self {
        Self::new(amount, Symbol::Vests)
    }

    /// Create from a decimal value, rounding to the symbol's precision.
    pub fn from_f64(value: f64, symbol: Symbol) -> Result<Self> {
        let scaled = (value * symbol.scale() as f64).round();
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
            return Err(CoreError::InvalidAsset(format!(
                "{} does not fit in {}",
                value,
                symbol.name()
            )));
        }
        Ok(Self::new(scaled as i64, symbol))
    }

    /// Raw scaled amount.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn precision(&self) -> u8 {
        self.symbol.precision()
    }

    /// Amount as a float, for display purposes only.
    pub fn to_f64(&self) -> f64 {
        self.amount as f64 / self.symbol.scale() as f64
    }

    pub fn checked_add(&self, other: &Asset) -> Result<Asset> {
        self.same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| CoreError::InvalidAsset("addition overflows".into()))?;
        Ok(Self::new(amount, self.symbol.clone()))
    }

    pub fn checked_sub(&self, other: &Asset) -> Result<Asset> {
        self.same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| CoreError::InvalidAsset("subtraction overflows".into()))?;
        Ok(Self::new(amount, self.symbol.clone()))
    }

    fn same_symbol(&self, other: &Asset) -> Result<()> {
        if self.symbol != other.symbol {
            return Err(CoreError::InvalidAsset(format!(
                "symbol mismatch: {} vs {}",
                self.symbol.name(),
                other.symbol.name()
            )));
        }
        Ok(())
    }

    /// Parse `"<amount> <SYMBOL>"`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| CoreError::InvalidAsset(format!("{:?}: {}", s, reason));

        let mut parts = s.split(' ');
        let (Some(number), Some(ticker), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected \"<amount> <SYMBOL>\""));
        };
        if ticker.is_empty() {
            return Err(invalid("missing symbol"));
        }

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid("amount is not a decimal number"));
        }
        if digits.contains('.') && fraction.is_empty() {
            return Err(invalid("amount is not a decimal number"));
        }

        let symbol = match Symbol::known(&ticker.to_ascii_uppercase()) {
            Some(symbol) => {
                if fraction.len() > usize::from(symbol.precision()) {
                    return Err(invalid("too many decimal places"));
                }
                symbol
            }
            None => {
                let precision = u8::try_from(fraction.len())
                    .ok()
                    .filter(|p| *p <= MAX_PRECISION)
                    .ok_or_else(|| invalid("too many decimal places"))?;
                Symbol::custom(ticker, precision)?
            }
        };

        let padded = format!(
            "{}{}{}",
            whole,
            fraction,
            "0".repeat(usize::from(symbol.precision()) - fraction.len())
        );
        let magnitude: i64 = padded.parse().map_err(|_| invalid("amount out of range"))?;
        let amount = if negative { -magnitude } else { magnitude };
        Ok(Self::new(amount, symbol))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.symbol.precision());
        let scale = self.symbol.scale().unsigned_abs();
        let magnitude = self.amount.unsigned_abs();
        let sign = if self.amount < 0 { "-" } else { "" };
        if precision == 0 {
            write!(f, "{}{} {}", sign, magnitude, self.symbol.name())
        } else {
            write!(
                f,
                "{}{}.{:0width$} {}",
                sign,
                magnitude / scale,
                magnitude % scale,
                self.symbol.name(),
                width = precision
            )
        }
    }
}

impl FromStr for Asset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Asset::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for Asset {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        let name = self.symbol.name();
        if name.len() > SYMBOL_WIDTH {
            return Err(CoreError::InvalidAsset(format!(
                "symbol {} longer than {} bytes",
                name, SYMBOL_WIDTH
            )));
        }
        self.amount.binary_encode(w)?;
        w.write_u8(self.symbol.precision());
        let mut padded = [0u8; SYMBOL_WIDTH];
        padded[..name.len()].copy_from_slice(name.as_bytes());
        w.write_raw(&padded);
        Ok(())
    }
}

impl BinaryDecode for Asset {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        let amount = i64::binary_decode(r)?;
        let precision = r.read_u8()?;
        if precision > MAX_PRECISION {
            return Err(CoreError::decode(
                r.position() - 1,
                format!("asset precision {} out of range", precision),
            ));
        }
        let start = r.position();
        let padded: [u8; SYMBOL_WIDTH] = r.read_array()?;
        let end = padded.iter().position(|b| *b == 0).unwrap_or(SYMBOL_WIDTH);
        let name = std::str::from_utf8(&padded[..end])
            .map_err(|_| CoreError::decode(start, "asset symbol is not valid utf-8"))?;
        let symbol = Symbol::custom(name, precision)
            .map_err(|err| CoreError::decode(start, err.to_string()))?;
        Ok(Self::new(amount, symbol))
    }
}

/// Relative value of one asset against another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub base: Asset,
    pub quote: Asset,
}

crate::binary_fields!(Price { base, quote });
