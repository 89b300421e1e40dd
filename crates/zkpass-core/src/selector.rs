//! # Query Selector
//!
//! The selector is a bitmask telling the query circuit which passport
//! attributes to reveal or range-check. The bit layout is fixed by the
//! circuit's public-signal ordering and must be preserved exactly:
//! 18 defined bits, 0 through 17.
//!
//! Selectors are accepted in three literal shapes — binary (`0b1010`),
//! plain decimal (`10`), and hex (`0xA`) — and normalized to a canonical
//! decimal string, so the three shapes are indistinguishable downstream.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParamsError;

/// One position in the query selector bitmask.
///
/// Discriminants are the circuit bit indices. Bits 0-7 reveal an attribute
/// in the public signals; bits 8-15 enable a range check; bits 16-17 switch
/// the citizenship mask between whitelist and blacklist semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SelectorBit {
    /// Reveal the nullifier (required for uniqueness checks).
    Nullifier = 0,
    /// Reveal the birth date.
    BirthDate = 1,
    /// Reveal the document expiration date.
    ExpirationDate = 2,
    /// Reveal the holder's name.
    Name = 3,
    /// Reveal the holder's nationality.
    Nationality = 4,
    /// Reveal the holder's citizenship.
    Citizenship = 5,
    /// Reveal the holder's sex.
    Sex = 6,
    /// Reveal the document number.
    DocumentNumber = 7,
    /// Enforce the timestamp lower bound.
    TimestampLowerBound = 8,
    /// Enforce the timestamp upper bound.
    TimestampUpperBound = 9,
    /// Enforce the identity counter lower bound.
    IdentityCounterLowerBound = 10,
    /// Enforce the identity counter upper bound.
    IdentityCounterUpperBound = 11,
    /// Enforce the expiration date lower bound.
    ExpirationDateLowerBound = 12,
    /// Enforce the expiration date upper bound.
    ExpirationDateUpperBound = 13,
    /// Enforce the birth date lower bound.
    BirthDateLowerBound = 14,
    /// Enforce the birth date upper bound.
    BirthDateUpperBound = 15,
    /// Treat the citizenship mask as a whitelist.
    CitizenshipMaskWhitelist = 16,
    /// Treat the citizenship mask as a blacklist.
    CitizenshipMaskBlacklist = 17,
}

impl SelectorBit {
    /// The circuit bit index of this position.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A validated query selector, stored in canonical decimal form.
///
/// ```
/// use zkpass_core::Selector;
///
/// let a = Selector::parse("0b1010").unwrap();
/// let b = Selector::parse("10").unwrap();
/// let c = Selector::parse("0xA").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b, c);
/// assert_eq!(a.to_decimal(), "10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(BigUint);

impl Selector {
    /// Parse a selector literal in any of the three recognized shapes.
    ///
    /// Returns [`ParamsError::InvalidSelectorLiteral`] for anything else.
    pub fn parse(literal: &str) -> Result<Self, ParamsError> {
        parse_uint_literal(literal)
            .map(Self)
            .ok_or_else(|| ParamsError::InvalidSelectorLiteral(literal.to_string()))
    }

    /// Compose a selector from individual bit positions.
    pub fn from_bits<I: IntoIterator<Item = SelectorBit>>(bits: I) -> Self {
        let mut value = BigUint::from(0u8);
        for bit in bits {
            value |= BigUint::from(1u8) << usize::from(bit.index());
        }
        Self(value)
    }

    /// Whether the given bit position is enabled.
    pub fn has_bit(&self, bit: SelectorBit) -> bool {
        (&self.0 >> usize::from(bit.index())) & BigUint::from(1u8) == BigUint::from(1u8)
    }

    /// The canonical decimal-string form consumed by the wire protocol.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl std::str::FromStr for Selector {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a non-negative integer literal in one of the three recognized
/// shapes: `0b…` binary, plain decimal, `0x…` hex. Returns `None` for
/// anything else (including empty digit runs, signs, and whitespace).
pub(crate) fn parse_uint_literal(literal: &str) -> Option<BigUint> {
    if let Some(bits) = literal.strip_prefix("0b") {
        if bits.is_empty() {
            return None;
        }
        return BigUint::parse_bytes(bits.as_bytes(), 2);
    }
    if let Some(digits) = literal.strip_prefix("0x") {
        if digits.is_empty() {
            return None;
        }
        return BigUint::parse_bytes(digits.as_bytes(), 16);
    }
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(literal.as_bytes(), 10)
}
