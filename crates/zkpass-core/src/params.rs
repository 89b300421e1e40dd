//! # Proof Parameters
//!
//! [`ProofParams`] is the fully-validated parameter set handed to the
//! query circuit via the verificator service. [`ProofParamsBuilder`] is
//! the only way to construct one: each setter validates one attribute
//! group independently, and `build()` — which consumes the builder — is
//! the single completeness gate. A `ProofParams` value therefore never
//! exists partially validated.
//!
//! Numeric values are carried as canonical decimal strings and date
//! bounds as hex-packed byte strings, exactly as the wire protocol
//! expects (see [`crate::date`]).

use serde::Serialize;

use crate::date::PassportDate;
use crate::error::ParamsError;
use crate::passport::{CitizenshipCode, Sex};
use crate::selector::{parse_uint_literal, Selector};

/// Maximum bit length of an event ID.
///
/// One bit of headroom below typical ZK scalar-field moduli (~255 bits),
/// so a valid event ID can never silently wrap around the field.
pub const MAX_EVENT_ID_BITS: u32 = 254;

/// Fully-validated proof parameters for an advanced verification request.
///
/// Immutable once built; all fields are exposed through accessors in the
/// exact string encodings the wire protocol consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofParams {
    selector: String,
    event_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    citizenship_mask: Option<CitizenshipCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity_counter_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity_counter_upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date_upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date_upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_upper_bound: Option<String>,
}

impl ProofParams {
    /// Selector bitmask, canonical decimal string.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Event ID, canonical decimal string (≤ 254 bits).
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Citizenship mask, if set.
    pub fn citizenship_mask(&self) -> Option<&CitizenshipCode> {
        self.citizenship_mask.as_ref()
    }

    /// Sex, if set.
    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    /// Identity counter lower bound, decimal string.
    pub fn identity_counter_lower_bound(&self) -> Option<&str> {
        self.identity_counter_lower_bound.as_deref()
    }

    /// Identity counter upper bound, decimal string.
    pub fn identity_counter_upper_bound(&self) -> Option<&str> {
        self.identity_counter_upper_bound.as_deref()
    }

    /// Birth date lower bound, hex-packed `yyMMdd`.
    pub fn birth_date_lower_bound(&self) -> Option<&str> {
        self.birth_date_lower_bound.as_deref()
    }

    /// Birth date upper bound, hex-packed `yyMMdd`.
    pub fn birth_date_upper_bound(&self) -> Option<&str> {
        self.birth_date_upper_bound.as_deref()
    }

    /// Opaque event data, hex string.
    pub fn event_data(&self) -> Option<&str> {
        self.event_data.as_deref()
    }

    /// Expiration date lower bound, hex-packed `yyMMdd`.
    pub fn expiration_date_lower_bound(&self) -> Option<&str> {
        self.expiration_date_lower_bound.as_deref()
    }

    /// Expiration date upper bound, hex-packed `yyMMdd`.
    pub fn expiration_date_upper_bound(&self) -> Option<&str> {
        self.expiration_date_upper_bound.as_deref()
    }

    /// Timestamp lower bound, UNIX seconds as a decimal string.
    pub fn timestamp_lower_bound(&self) -> Option<&str> {
        self.timestamp_lower_bound.as_deref()
    }

    /// Timestamp upper bound, UNIX seconds as a decimal string.
    pub fn timestamp_upper_bound(&self) -> Option<&str> {
        self.timestamp_upper_bound.as_deref()
    }
}

/// Builder for [`ProofParams`], consumed by [`build`](Self::build).
///
/// Setters are independent of each other — no field's validation depends
/// on another field's value. Only `build()` checks completeness.
///
/// ```
/// use zkpass_core::ProofParamsBuilder;
///
/// let params = ProofParamsBuilder::new()
///     .selector("0b1010")?
///     .event_id("123")?
///     .timestamp_bounds("1000", "2000")?
///     .build()?;
/// assert_eq!(params.selector(), "10");
/// # Ok::<(), zkpass_core::ParamsError>(())
/// ```
#[derive(Debug, Default)]
pub struct ProofParamsBuilder {
    selector: Option<Selector>,
    event_id: Option<String>,
    citizenship_mask: Option<CitizenshipCode>,
    sex: Option<Sex>,
    identity_counter_bounds: Option<(String, String)>,
    birth_date_bounds: Option<(String, String)>,
    event_data: Option<String>,
    expiration_date_bounds: Option<(String, String)>,
    timestamp_bounds: Option<(String, String)>,
}

impl ProofParamsBuilder {
    /// An empty builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selector from a binary (`0b…`), decimal, or hex (`0x…`)
    /// literal. All three shapes normalize to one canonical decimal form.
    pub fn selector(mut self, literal: &str) -> Result<Self, ParamsError> {
        self.selector = Some(Selector::parse(literal)?);
        Ok(self)
    }

    /// Set a pre-composed [`Selector`].
    pub fn selector_value(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Set the event ID used for nullifier domain separation.
    ///
    /// Accepts decimal, `0x` hex, or `0b` binary literals; the value must
    /// fit within [`MAX_EVENT_ID_BITS`] bits. Two sessions with the same
    /// identity but different event IDs yield unlinkable nullifiers.
    pub fn event_id(mut self, literal: &str) -> Result<Self, ParamsError> {
        let value = parse_uint_literal(literal)
            .ok_or_else(|| ParamsError::InvalidEventId(literal.to_string()))?;
        let bits = value.bits();
        if bits > u64::from(MAX_EVENT_ID_BITS) {
            return Err(ParamsError::EventIdTooWide {
                limit: MAX_EVENT_ID_BITS,
                bits,
            });
        }
        self.event_id = Some(value.to_str_radix(10));
        Ok(self)
    }

    /// Set the citizenship mask.
    pub fn citizenship_mask(mut self, code: CitizenshipCode) -> Self {
        self.citizenship_mask = Some(code);
        self
    }

    /// Set the sex field.
    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Set both identity counter bounds (uniqueness enforcement).
    ///
    /// Both must be non-negative decimal strings fitting in 64 bits,
    /// with `upper >= lower`.
    pub fn identity_counter_bounds(
        mut self,
        lower: &str,
        upper: &str,
    ) -> Result<Self, ParamsError> {
        self.identity_counter_bounds = Some(decimal_bounds(
            lower,
            upper,
            "identity_counter_lower_bound",
            "identity_counter_upper_bound",
        )?);
        Ok(self)
    }

    /// Set both birth date bounds as `yyMMdd` strings; stored hex-packed.
    ///
    /// Ordering is deliberately NOT cross-validated — callers may invert
    /// the bounds to express "either side of a cutoff".
    pub fn birth_date_bounds(mut self, lower: &str, upper: &str) -> Result<Self, ParamsError> {
        self.birth_date_bounds = Some((
            passport_date(lower, "birth_date_lower_bound")?.to_hex(),
            passport_date(upper, "birth_date_upper_bound")?.to_hex(),
        ));
        Ok(self)
    }

    /// Set opaque event data bound into the proof (e.g. an address or a
    /// content hash), as a hex string. Not interpreted by the encoder.
    pub fn event_data(mut self, hex: impl Into<String>) -> Self {
        self.event_data = Some(hex.into());
        self
    }

    /// Set both expiration date bounds as `yyMMdd` strings; stored
    /// hex-packed. Ordering is not cross-validated (see
    /// [`birth_date_bounds`](Self::birth_date_bounds)).
    pub fn expiration_date_bounds(
        mut self,
        lower: &str,
        upper: &str,
    ) -> Result<Self, ParamsError> {
        self.expiration_date_bounds = Some((
            passport_date(lower, "expiration_date_lower_bound")?.to_hex(),
            passport_date(upper, "expiration_date_upper_bound")?.to_hex(),
        ));
        Ok(self)
    }

    /// Set both timestamp bounds as UNIX epoch seconds.
    ///
    /// Both must be non-negative decimal strings fitting in 64 bits,
    /// with `upper >= lower`.
    pub fn timestamp_bounds(mut self, lower: &str, upper: &str) -> Result<Self, ParamsError> {
        self.timestamp_bounds = Some(decimal_bounds(
            lower,
            upper,
            "timestamp_lower_bound",
            "timestamp_upper_bound",
        )?);
        Ok(self)
    }

    /// Finalize, consuming the builder.
    ///
    /// Returns [`ParamsError::Incomplete`] naming every unset required
    /// field (`selector`, `event_id`). Never returns a partially-populated
    /// record — this is the single gate before the value crosses into the
    /// network layer.
    pub fn build(self) -> Result<ProofParams, ParamsError> {
        let mut missing = Vec::new();
        if self.selector.is_none() {
            missing.push("selector");
        }
        if self.event_id.is_none() {
            missing.push("event_id");
        }
        let (Some(selector), Some(event_id)) = (self.selector, self.event_id) else {
            return Err(ParamsError::Incomplete {
                missing: missing.join(", "),
            });
        };

        let (identity_counter_lower_bound, identity_counter_upper_bound) =
            split(self.identity_counter_bounds);
        let (birth_date_lower_bound, birth_date_upper_bound) = split(self.birth_date_bounds);
        let (expiration_date_lower_bound, expiration_date_upper_bound) =
            split(self.expiration_date_bounds);
        let (timestamp_lower_bound, timestamp_upper_bound) = split(self.timestamp_bounds);

        Ok(ProofParams {
            selector: selector.to_decimal(),
            event_id,
            citizenship_mask: self.citizenship_mask,
            sex: self.sex,
            identity_counter_lower_bound,
            identity_counter_upper_bound,
            birth_date_lower_bound,
            birth_date_upper_bound,
            event_data: self.event_data,
            expiration_date_lower_bound,
            expiration_date_upper_bound,
            timestamp_lower_bound,
            timestamp_upper_bound,
        })
    }
}

fn split(pair: Option<(String, String)>) -> (Option<String>, Option<String>) {
    match pair {
        Some((lower, upper)) => (Some(lower), Some(upper)),
        None => (None, None),
    }
}

/// Validate a non-negative decimal bound pair with `upper >= lower`.
/// These bounds travel as JSON numbers, so each must fit in a `u64`;
/// anything wider would have to be silently mangled at the wire boundary.
fn decimal_bounds(
    lower: &str,
    upper: &str,
    lower_field: &'static str,
    upper_field: &'static str,
) -> Result<(String, String), ParamsError> {
    let lo = parse_decimal(lower, lower_field)?;
    let hi = parse_decimal(upper, upper_field)?;
    if hi < lo {
        return Err(ParamsError::BoundInversion {
            field: upper_field,
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
    Ok((lower.to_string(), upper.to_string()))
}

fn parse_decimal(value: &str, field: &'static str) -> Result<u64, ParamsError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParamsError::InvalidBound {
            field,
            value: value.to_string(),
        });
    }
    // Digit shape already checked, so a parse failure here is overflow.
    value.parse().map_err(|_| ParamsError::BoundOutOfRange {
        field,
        value: value.to_string(),
    })
}

fn passport_date(value: &str, field: &'static str) -> Result<PassportDate, ParamsError> {
    PassportDate::new(value).map_err(|_| ParamsError::InvalidPassportDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    // (1 << 254) in decimal: the smallest value needing 255 bits.
    const MIN_255_BIT_VALUE: &str =
        "28948022309329048855892746252171976963317496166410141009864396001978282409984";

    #[test]
    fn builds_with_selector_and_event_id() {
        let params = ProofParamsBuilder::new()
            .selector("0b1010")
            .unwrap()
            .event_id("123")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.selector(), "10");
        assert_eq!(params.event_id(), "123");
    }

    #[test]
    fn hex_selector_normalizes_to_decimal() {
        let params = ProofParamsBuilder::new()
            .selector("0x1f")
            .unwrap()
            .event_id("42")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.selector(), "31");
    }

    #[test]
    fn invalid_selector_fails() {
        let err = ProofParamsBuilder::new()
            .selector("invalid selector")
            .unwrap_err();
        assert!(matches!(err, ParamsError::InvalidSelectorLiteral(_)));
    }

    #[test]
    fn event_id_accepts_hex_literal() {
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("0x1a2b3c")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.event_id(), "1715004");
    }

    #[test]
    fn event_id_at_254_bits_succeeds() {
        let max_254: BigUint =
            BigUint::parse_bytes(MIN_255_BIT_VALUE.as_bytes(), 10).unwrap() - 1u8;
        let literal = max_254.to_str_radix(10);
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id(&literal)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.event_id(), literal);
    }

    #[test]
    fn event_id_at_255_bits_fails() {
        let err = ProofParamsBuilder::new()
            .event_id(MIN_255_BIT_VALUE)
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::EventIdTooWide { limit: 254, bits: 255 }
        ));
    }

    #[test]
    fn oversized_hex_event_id_fails() {
        let literal = format!("0x{}", "f".repeat(70));
        assert!(ProofParamsBuilder::new().event_id(&literal).is_err());
    }

    #[test]
    fn event_id_rejects_garbage() {
        for bad in ["", "-1", "ten", "0x", "1.5"] {
            assert!(
                matches!(
                    ProofParamsBuilder::new().event_id(bad),
                    Err(ParamsError::InvalidEventId(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn build_without_required_fields_names_both() {
        let err = ProofParamsBuilder::new().build().unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("selector"));
        assert!(msg.contains("event_id"));
    }

    #[test]
    fn build_with_only_selector_fails() {
        let err = ProofParamsBuilder::new()
            .selector("0b1")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(format!("{err}").contains("event_id"));
    }

    #[test]
    fn build_with_only_event_id_fails() {
        let err = ProofParamsBuilder::new()
            .event_id("1")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(format!("{err}").contains("selector"));
    }

    #[test]
    fn identity_counter_bounds_stored_as_given() {
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("2")
            .unwrap()
            .identity_counter_bounds("0", "10")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.identity_counter_lower_bound(), Some("0"));
        assert_eq!(params.identity_counter_upper_bound(), Some("10"));
    }

    #[test]
    fn inverted_identity_counter_bounds_fail() {
        let err = ProofParamsBuilder::new()
            .identity_counter_bounds("10", "5")
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::BoundInversion {
                field: "identity_counter_upper_bound",
                ..
            }
        ));
    }

    #[test]
    fn equal_bounds_succeed() {
        assert!(ProofParamsBuilder::new()
            .identity_counter_bounds("7", "7")
            .is_ok());
        assert!(ProofParamsBuilder::new().timestamp_bounds("7", "7").is_ok());
    }

    #[test]
    fn non_decimal_bounds_fail() {
        let err = ProofParamsBuilder::new()
            .timestamp_bounds("-1", "10")
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::InvalidBound { field: "timestamp_lower_bound", .. }
        ));
    }

    #[test]
    fn inverted_timestamp_bounds_fail() {
        assert!(ProofParamsBuilder::new().timestamp_bounds("100", "99").is_err());
    }

    #[test]
    fn bounds_wider_than_u64_fail_at_the_builder() {
        // Valid digit shape, too wide for the wire's JSON numbers.
        let wide = "99999999999999999999999999";
        let err = ProofParamsBuilder::new()
            .timestamp_bounds(wide, wide)
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::BoundOutOfRange { field: "timestamp_lower_bound", .. }
        ));

        let err = ProofParamsBuilder::new()
            .identity_counter_bounds("0", wide)
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::BoundOutOfRange { field: "identity_counter_upper_bound", .. }
        ));
    }

    #[test]
    fn bounds_at_u64_max_succeed() {
        let max = u64::MAX.to_string();
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("2")
            .unwrap()
            .timestamp_bounds(&max, &max)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.timestamp_lower_bound(), Some(max.as_str()));
    }

    #[test]
    fn birth_date_bounds_are_hex_packed() {
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("2")
            .unwrap()
            .birth_date_bounds("010101", "020202")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.birth_date_lower_bound(), Some("0x303130313031"));
        assert_eq!(params.birth_date_upper_bound(), Some("0x303230323032"));
    }

    #[test]
    fn date_bounds_allow_inverted_order() {
        // Intentional: a caller may express "either side of a cutoff".
        assert!(ProofParamsBuilder::new()
            .birth_date_bounds("990101", "010101")
            .is_ok());
    }

    #[test]
    fn malformed_date_bound_names_the_field() {
        let err = ProofParamsBuilder::new()
            .expiration_date_bounds("240101", "25011")
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::InvalidPassportDate {
                field: "expiration_date_upper_bound",
                ..
            }
        ));
    }

    #[test]
    fn full_parameter_set_round_trips() {
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("2")
            .unwrap()
            .citizenship_mask(CitizenshipCode::new("UKR").unwrap())
            .sex(Sex::Male)
            .identity_counter_bounds("0", "1")
            .unwrap()
            .birth_date_bounds("010101", "020202")
            .unwrap()
            .event_data("0xabcdef1234")
            .expiration_date_bounds("240101", "250101")
            .unwrap()
            .timestamp_bounds("1000", "2000")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(params.selector(), "1");
        assert_eq!(params.event_id(), "2");
        assert_eq!(params.citizenship_mask().map(|c| c.as_str()), Some("UKR"));
        assert_eq!(params.sex(), Some(Sex::Male));
        assert_eq!(params.identity_counter_lower_bound(), Some("0"));
        assert_eq!(params.identity_counter_upper_bound(), Some("1"));
        assert_eq!(params.birth_date_lower_bound(), Some("0x303130313031"));
        assert_eq!(params.birth_date_upper_bound(), Some("0x303230323032"));
        assert_eq!(params.event_data(), Some("0xabcdef1234"));
        assert_eq!(params.expiration_date_lower_bound(), Some("0x323430313031"));
        assert_eq!(params.expiration_date_upper_bound(), Some("0x323530313031"));
        assert_eq!(params.timestamp_lower_bound(), Some("1000"));
        assert_eq!(params.timestamp_upper_bound(), Some("2000"));
    }

    #[test]
    fn serializes_camel_case_and_omits_unset_fields() {
        let params = ProofParamsBuilder::new()
            .selector("0x2a")
            .unwrap()
            .event_id("3")
            .unwrap()
            .timestamp_bounds("1000", "2000")
            .unwrap()
            .build()
            .unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["selector"], "42");
        assert_eq!(json["eventId"], "3");
        assert_eq!(json["timestampLowerBound"], "1000");
        assert!(json.get("citizenshipMask").is_none());
        assert!(json.get("birthDateLowerBound").is_none());
    }
}
