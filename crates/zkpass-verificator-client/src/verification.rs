//! Typed client for the verificator service.
//!
//! Two logical REST operations: request a verification link, and fetch
//! status/proof for a request. Both are idempotent-safe for the caller to
//! retry — the client itself never retries.
//!
//! | Method | Path (relative to base) | Operation |
//! |--------|------------------------|-----------|
//! | POST   | `/private/verification-link` | Basic verification link |
//! | POST   | `/v2/private/verification-link` | Advanced verification link |
//! | GET    | `/private/verification-status/{id}` | Verification status |
//! | GET    | `/private/proof/{id}` | Verified proof (404 → absent) |

use std::time::Duration;

use url::Url;

use crate::config::VerificatorConfig;
use crate::error::VerificatorError;
use crate::types::{
    AdvancedLinkAttributes, ApiRequest, ApiRequestData, ApiResponse, BasicLinkAttributes,
    LinkAttributes, ProofAttributes, StatusAttributes, VerificationOptions, VerificationStatus,
    ZkProof,
};

/// Service context path for all verificator endpoints.
const API_PREFIX: &str = "integrations/verificator-svc";

/// Client for the verificator service.
#[derive(Debug, Clone)]
pub struct VerificatorClient {
    http: reqwest::Client,
    api_url: Url,
    app_url: Url,
}

impl VerificatorClient {
    /// Create a new client from configuration.
    pub fn new(config: VerificatorConfig) -> Result<Self, VerificatorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerificatorError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            api_url: config.api_url,
            app_url: config.app_url,
        })
    }

    /// Request a verification link for `id` (the caller's own stable
    /// identifier for this request, e.g. a user or account ID).
    ///
    /// Routes basic options to the v1 endpoint and full proof parameters
    /// to the v2 endpoint, then wraps the returned proof-params URL into
    /// a deep link the wallet app understands:
    /// `{app_url}?type=proof-request&proof_params_url=<url>`.
    pub async fn request_verification_link(
        &self,
        id: &str,
        options: &VerificationOptions,
    ) -> Result<Url, VerificatorError> {
        let proof_params_url = match options {
            VerificationOptions::Basic(opts) => {
                let endpoint = "POST /private/verification-link";
                let url = format!("{}{}/private/verification-link", self.api_url, API_PREFIX);
                let body = ApiRequest {
                    data: ApiRequestData {
                        id: id.to_string(),
                        kind: "user",
                        attributes: BasicLinkAttributes::from(opts),
                    },
                };
                self.post_link(endpoint, &url, &body).await?
            }
            VerificationOptions::Advanced(params) => {
                let endpoint = "POST /v2/private/verification-link";
                let url = format!("{}{}/v2/private/verification-link", self.api_url, API_PREFIX);
                let body = ApiRequest {
                    data: ApiRequestData {
                        id: id.to_string(),
                        kind: "advanced_verification",
                        attributes: AdvancedLinkAttributes::from(params),
                    },
                };
                self.post_link(endpoint, &url, &body).await?
            }
        };

        let mut link = self.app_url.clone();
        link.query_pairs_mut()
            .append_pair("type", "proof-request")
            .append_pair("proof_params_url", &proof_params_url);

        tracing::debug!(request_id = id, %link, "verification link obtained");
        Ok(link)
    }

    async fn post_link<B: serde::Serialize>(
        &self,
        endpoint: &str,
        url: &str,
        body: &B,
    ) -> Result<String, VerificatorError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| VerificatorError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(VerificatorError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let decoded: ApiResponse<LinkAttributes> =
            resp.json().await.map_err(|e| VerificatorError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        Ok(decoded.data.attributes.get_proof_params)
    }

    /// Get the verification status for `id`.
    pub async fn verification_status(
        &self,
        id: &str,
    ) -> Result<VerificationStatus, VerificatorError> {
        let endpoint = format!("GET /verification-status/{id}");
        let url = format!(
            "{}{}/private/verification-status/{id}",
            self.api_url, API_PREFIX
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| VerificatorError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(VerificatorError::Api {
                endpoint,
                status,
                body,
            });
        }

        let decoded: ApiResponse<StatusAttributes> =
            resp.json().await.map_err(|e| VerificatorError::Deserialization {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        tracing::debug!(request_id = id, status = %decoded.data.attributes.status, "status fetched");
        Ok(decoded.data.attributes.status)
    }

    /// Get the verified proof for `id`.
    ///
    /// A 404 from the service means the proof is not (yet) available and
    /// maps to `Ok(None)` — distinguishing "not yet available" from
    /// "request failed".
    pub async fn verified_proof(&self, id: &str) -> Result<Option<ZkProof>, VerificatorError> {
        let endpoint = format!("GET /proof/{id}");
        let url = format!("{}{}/private/proof/{id}", self.api_url, API_PREFIX);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| VerificatorError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(VerificatorError::Api {
                endpoint,
                status,
                body,
            });
        }

        let decoded: ApiResponse<ProofAttributes> =
            resp.json().await.map_err(|e| VerificatorError::Deserialization {
                endpoint,
                source: e,
            })?;

        Ok(Some(decoded.data.attributes.proof))
    }
}
