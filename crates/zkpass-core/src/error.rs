//! # Error Hierarchy
//!
//! Structured validation errors for proof-parameter encoding, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every variant carries the offending field name and value so that a
//! misconfigured integration can be diagnosed without guesswork. All of
//! these errors are local and non-retryable: they fire at configuration
//! time, before any network activity.

use thiserror::Error;

/// Validation errors raised while encoding proof parameters.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Selector literal matches none of the three recognized shapes
    /// (`0b…` binary, plain decimal, `0x…` hex).
    #[error("invalid selector literal: \"{0}\" (expected 0b-binary, decimal, or 0x-hex)")]
    InvalidSelectorLiteral(String),

    /// Event ID literal is not a recognizable non-negative integer.
    #[error("invalid event ID: \"{0}\" (expected non-negative decimal, 0x-hex, or 0b-binary)")]
    InvalidEventId(String),

    /// Event ID does not fit the circuit scalar field with headroom.
    #[error("event ID exceeds {limit}-bit limit (got {bits} bits)")]
    EventIdTooWide {
        /// Maximum permitted bit length (254).
        limit: u32,
        /// Bit length of the rejected value.
        bits: u64,
    },

    /// A numeric bound is not a non-negative decimal string.
    #[error("{field} must be a non-negative decimal string, got \"{value}\"")]
    InvalidBound {
        /// The bound field that failed to parse.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A numeric bound does not fit the wire's 64-bit integer range.
    #[error("{field} must fit in 64 bits, got \"{value}\"")]
    BoundOutOfRange {
        /// The bound field that overflowed.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A numeric bound pair has `upper < lower`.
    #[error("{field}: upper bound {upper} must be >= lower bound {lower}")]
    BoundInversion {
        /// The bound-pair field group (e.g. `timestamp_upper_bound`).
        field: &'static str,
        /// The lower bound as supplied.
        lower: String,
        /// The upper bound as supplied.
        upper: String,
    },

    /// A passport date is not exactly six ASCII digits.
    #[error("invalid {field}: \"{value}\" (expected 6-digit yyMMdd)")]
    InvalidPassportDate {
        /// The date field that failed to parse.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A hex-packed passport date could not be decoded back to `yyMMdd`.
    #[error("invalid passport date hex: \"{0}\" (expected 0x-prefixed ASCII digit bytes)")]
    InvalidPassportDateHex(String),

    /// Citizenship code is not ISO 3166-1 alpha-3 (or the `D<<` placeholder).
    #[error("invalid citizenship code: \"{0}\" (expected ISO 3166-1 alpha-3, e.g. \"UKR\", or \"D<<\")")]
    InvalidCitizenshipCode(String),

    /// Sex code is not one of `M`, `F`, `O`, or empty.
    #[error("invalid sex code: \"{0}\" (expected \"M\", \"F\", \"O\", or \"\")")]
    InvalidSexCode(String),

    /// `build()` was called before every required field was set.
    #[error("missing required fields: {missing} must be set before build()")]
    Incomplete {
        /// Comma-separated list of the unset required fields.
        missing: String,
    },
}
