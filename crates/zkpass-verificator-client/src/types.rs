//! Wire types for the verificator service JSON:API.
//!
//! Request bodies travel as `{ "data": { "id", "type", "attributes" } }`
//! envelopes with snake_case attribute names; responses come back in the
//! same envelope shape. Numeric bound attributes on the advanced endpoint
//! are JSON numbers, while `event_id` and `selector` stay strings — a
//! backend-contract detail that must match exactly.

use serde::{Deserialize, Serialize};
use zkpass_core::{CitizenshipCode, ProofParams};

/// Criteria for a verification request, chosen explicitly at the call
/// site. `Basic` routes to the v1 verification-link endpoint, `Advanced`
/// to the v2 endpoint with full proof parameters.
#[derive(Debug, Clone)]
pub enum VerificationOptions {
    /// A small set of named criteria; the service derives the proof
    /// parameters itself.
    Basic(BasicVerificationOpts),
    /// Fully-built proof parameters from
    /// [`ProofParamsBuilder`](zkpass_core::ProofParamsBuilder).
    Advanced(ProofParams),
}

/// Named criteria for basic verification.
#[derive(Debug, Clone, Default)]
pub struct BasicVerificationOpts {
    /// Minimum holder age, in years.
    pub age_lower_bound: Option<u32>,
    /// Check registration uniqueness via the identity counter and
    /// identity creation timestamp.
    pub uniqueness: Option<bool>,
    /// Require a specific nationality.
    pub nationality: Option<CitizenshipCode>,
    /// Include the holder's nationality in the proof's public signals.
    pub nationality_check: Option<bool>,
    /// Event ID for nullifier domain separation (decimal or hex string).
    pub event_id: Option<String>,
}

/// Verification status of a request, as reported by the service.
///
/// - `not_verified` — no proof has been generated yet
/// - `verified` — a proof was generated and verified
/// - `failed_verification` — a proof was generated but failed verification
/// - `uniqueness_check_failed` — the holder revoked their identity, so
///   uniqueness cannot be established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No proof yet; keep polling.
    NotVerified,
    /// Proof generated and verified.
    Verified,
    /// Proof generated but verification failed.
    FailedVerification,
    /// Identity revoked; uniqueness check failed.
    UniquenessCheckFailed,
    /// Forward-compatible catch-all for statuses the service introduces
    /// after this client version is deployed. Treated like `not_verified`.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotVerified => "not_verified",
            Self::Verified => "verified",
            Self::FailedVerification => "failed_verification",
            Self::UniquenessCheckFailed => "uniqueness_check_failed",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A Groth16 proof: three curve-point groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16Proof {
    /// First proof element.
    pub pi_a: Vec<String>,
    /// Second proof element, nested pairs.
    pub pi_b: Vec<Vec<String>>,
    /// Third proof element.
    pub pi_c: Vec<String>,
}

/// A verified zero-knowledge proof plus its public signals.
///
/// The public signals attest the requested passport-derived facts
/// without revealing the passport itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkProof {
    /// The Groth16 proof.
    pub proof: Groth16Proof,
    /// Query-circuit public signals.
    pub pub_signals: Vec<String>,
}

// -- JSON:API envelopes -------------------------------------------------------

/// Request envelope: `{ "data": { "id", "type", "attributes" } }`.
#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest<A> {
    pub data: ApiRequestData<A>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequestData<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: A,
}

/// Response envelope mirroring the request shape.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<A> {
    pub data: ApiResponseData<A>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponseData<A> {
    #[serde(default)]
    #[allow(dead_code)]
    pub id: Option<String>,
    pub attributes: A,
}

/// Attributes for `POST /private/verification-link`.
#[derive(Debug, Serialize)]
pub(crate) struct BasicLinkAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_lower_bound: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniqueness: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl From<&BasicVerificationOpts> for BasicLinkAttributes {
    fn from(opts: &BasicVerificationOpts) -> Self {
        Self {
            age_lower_bound: opts.age_lower_bound,
            uniqueness: opts.uniqueness,
            nationality: opts.nationality.as_ref().map(|c| c.as_str().to_string()),
            nationality_check: opts.nationality_check,
            event_id: opts.event_id.clone(),
        }
    }
}

/// Attributes for `POST /v2/private/verification-link`.
///
/// Timestamp and identity-counter bounds go out as JSON numbers; the
/// builder has already validated them as non-negative decimals fitting
/// in 64 bits, so the conversion below can never lose a set bound.
#[derive(Debug, Serialize)]
pub(crate) struct AdvancedLinkAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_lower_bound: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_upper_bound: Option<u64>,
    pub event_id: String,
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizenship_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_counter_lower_bound: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_counter_upper_bound: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date_upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_lower_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_upper_bound: Option<String>,
}

impl From<&ProofParams> for AdvancedLinkAttributes {
    fn from(params: &ProofParams) -> Self {
        let as_num = |v: Option<&str>| v.and_then(|s| s.parse::<u64>().ok());
        Self {
            timestamp_lower_bound: as_num(params.timestamp_lower_bound()),
            timestamp_upper_bound: as_num(params.timestamp_upper_bound()),
            event_id: params.event_id().to_string(),
            selector: params.selector().to_string(),
            citizenship_mask: params.citizenship_mask().map(|c| c.as_str().to_string()),
            sex: params.sex().map(|s| s.as_str().to_string()),
            identity_counter_lower_bound: as_num(params.identity_counter_lower_bound()),
            identity_counter_upper_bound: as_num(params.identity_counter_upper_bound()),
            birth_date_lower_bound: params.birth_date_lower_bound().map(str::to_string),
            birth_date_upper_bound: params.birth_date_upper_bound().map(str::to_string),
            event_data: params.event_data().map(str::to_string),
            expiration_date_lower_bound: params.expiration_date_lower_bound().map(str::to_string),
            expiration_date_upper_bound: params.expiration_date_upper_bound().map(str::to_string),
        }
    }
}

/// Attributes of a verification-link response.
#[derive(Debug, Deserialize)]
pub(crate) struct LinkAttributes {
    pub get_proof_params: String,
}

/// Attributes of a verification-status response.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusAttributes {
    pub status: VerificationStatus,
}

/// Attributes of a proof response.
#[derive(Debug, Deserialize)]
pub(crate) struct ProofAttributes {
    pub proof: ZkProof,
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkpass_core::{ProofParamsBuilder, Sex};

    #[test]
    fn status_deserializes_all_known_values() {
        for (raw, status) in [
            ("\"not_verified\"", VerificationStatus::NotVerified),
            ("\"verified\"", VerificationStatus::Verified),
            ("\"failed_verification\"", VerificationStatus::FailedVerification),
            (
                "\"uniqueness_check_failed\"",
                VerificationStatus::UniquenessCheckFailed,
            ),
        ] {
            let parsed: VerificationStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_falls_through_to_catch_all() {
        let parsed: VerificationStatus = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(parsed, VerificationStatus::Unknown);
    }

    #[test]
    fn basic_attributes_omit_unset_fields() {
        let attrs = BasicLinkAttributes::from(&BasicVerificationOpts {
            age_lower_bound: Some(18),
            uniqueness: Some(true),
            ..Default::default()
        });
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["age_lower_bound"], 18);
        assert_eq!(json["uniqueness"], true);
        assert!(json.get("nationality").is_none());
        assert!(json.get("event_id").is_none());
    }

    #[test]
    fn advanced_attributes_send_numeric_bounds_as_numbers() {
        let params = ProofParamsBuilder::new()
            .selector("0b101")
            .unwrap()
            .event_id("7")
            .unwrap()
            .sex(Sex::Female)
            .timestamp_bounds("1000", "2000")
            .unwrap()
            .identity_counter_bounds("0", "1")
            .unwrap()
            .birth_date_bounds("010101", "020202")
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_value(AdvancedLinkAttributes::from(&params)).unwrap();
        assert_eq!(json["selector"], "5");
        assert_eq!(json["event_id"], "7");
        assert_eq!(json["timestamp_lower_bound"], 1000);
        assert_eq!(json["timestamp_upper_bound"], 2000);
        assert_eq!(json["identity_counter_lower_bound"], 0);
        assert_eq!(json["identity_counter_upper_bound"], 1);
        assert_eq!(json["sex"], "F");
        assert_eq!(json["birth_date_lower_bound"], "0x303130313031");
        assert!(json.get("citizenship_mask").is_none());
        assert!(json.get("event_data").is_none());
    }

    #[test]
    fn advanced_attributes_keep_maximal_bounds() {
        // The widest bound the builder accepts must survive onto the wire.
        let max = u64::MAX.to_string();
        let params = ProofParamsBuilder::new()
            .selector("1")
            .unwrap()
            .event_id("2")
            .unwrap()
            .timestamp_bounds("0", &max)
            .unwrap()
            .identity_counter_bounds(&max, &max)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_value(AdvancedLinkAttributes::from(&params)).unwrap();
        assert_eq!(json["timestamp_upper_bound"], u64::MAX);
        assert_eq!(json["identity_counter_lower_bound"], u64::MAX);
        assert_eq!(json["identity_counter_upper_bound"], u64::MAX);
    }

    #[test]
    fn proof_envelope_deserializes_groth16_shape() {
        let raw = serde_json::json!({
            "proof": {
                "pi_a": ["1", "2", "1"],
                "pi_b": [["1", "2"], ["3", "4"], ["1", "0"]],
                "pi_c": ["5", "6", "1"]
            },
            "pub_signals": ["7", "8"]
        });
        let proof: ZkProof = serde_json::from_value(raw).unwrap();
        assert_eq!(proof.proof.pi_a.len(), 3);
        assert_eq!(proof.proof.pi_b[1], vec!["3", "4"]);
        assert_eq!(proof.pub_signals, vec!["7", "8"]);
    }
}
