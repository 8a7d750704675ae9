//! Second-precision UTC timestamps.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::serializer::{BinaryDecode, BinaryEncode, BinaryReader, BinaryWriter};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Unix epoch seconds, written as a u32 on the wire and as
/// `YYYY-MM-DDTHH:MM:SS` (UTC, no zone suffix) in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimePointSec(pub u32);

impl TimePointSec {
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn secs(&self) -> u32 {
        self.0
    }

    /// Current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Self(Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32)
    }

    pub fn saturating_add(&self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS`, tolerating a trailing `Z`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        let naive = NaiveDateTime::parse_from_str(trimmed, FORMAT)
            .map_err(|e| CoreError::Json(format!("invalid date {:?}: {}", s, e)))?;
        let secs = naive.and_utc().timestamp();
        u32::try_from(secs)
            .map(Self)
            .map_err(|_| CoreError::Json(format!("date {:?} out of range", s)))
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.0), 0)
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format(FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u32> for TimePointSec {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimePointSec::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for TimePointSec {
    fn binary_encode(&self, w: &mut BinaryWriter) -> Result<()> {
        self.0.binary_encode(w)
    }
}

impl BinaryDecode for TimePointSec {
    fn binary_decode(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self(u32::binary_decode(r)?))
    }
}
