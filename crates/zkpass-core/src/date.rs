//! # Passport Dates
//!
//! Passport dates travel as six ASCII digits in `yyMMdd` order (the MRZ
//! convention), and the circuit consumes them bit-packed: one byte per
//! ASCII character, hex-encoded with no delimiter. `"010616"` (16 June
//! 2001) becomes `0x303130363136`. This is NOT a numeric encoding — the
//! byte values are the ASCII code points of the digits.
//!
//! `"000000"` is the conventional zero date for an unset bound.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// A passport date: exactly six ASCII digits, `yyMMdd`.
///
/// Digit-shape only — `991332` is accepted, matching the MRZ fields this
/// mirrors. Calendar validity is the holder document's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PassportDate(String);

impl PassportDate {
    /// Validate and wrap a `yyMMdd` string.
    ///
    /// Returns [`ParamsError::InvalidPassportDate`] unless the input is
    /// exactly six ASCII digits.
    pub fn new(date: impl Into<String>) -> Result<Self, ParamsError> {
        let date = date.into();
        if date.len() != 6 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParamsError::InvalidPassportDate {
                field: "passport date",
                value: date,
            });
        }
        Ok(Self(date))
    }

    /// The `yyMMdd` form of a calendar date (two-digit year).
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:02}{:02}{:02}",
            date.year().rem_euclid(100),
            date.month(),
            date.day()
        ))
    }

    /// Decode the hex wire form back into a date.
    ///
    /// Trailing NUL bytes are trimmed first — on-chain sources return
    /// dates right-padded inside `bytes32` words.
    pub fn from_hex(hex: &str) -> Result<Self, ParamsError> {
        let digits = hex
            .strip_prefix("0x")
            .and_then(|h| hex::decode(h).ok())
            .map(|mut bytes| {
                while bytes.last() == Some(&0) {
                    bytes.pop();
                }
                bytes
            })
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| ParamsError::InvalidPassportDateHex(hex.to_string()))?;
        Self::new(digits).map_err(|_| ParamsError::InvalidPassportDateHex(hex.to_string()))
    }

    /// The six digits, `yyMMdd`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex wire form: `0x` plus two hex digits per ASCII character.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl std::fmt::Display for PassportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PassportDate {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<NaiveDate> for PassportDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive_date(date)
    }
}

impl<'de> Deserialize<'de> for PassportDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
