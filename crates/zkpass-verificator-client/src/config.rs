//! Verificator client configuration.
//!
//! Configures the verificator service base URL and the wallet app URL
//! used for proof-request deep links. Defaults point to the production
//! deployment. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;

/// Configuration for connecting to the verificator service.
#[derive(Debug, Clone)]
pub struct VerificatorConfig {
    /// Base URL of the verificator service API.
    /// Default: <https://api.app.rarime.com>
    pub api_url: Url,
    /// Base URL of the wallet app that consumes proof-request deep links.
    /// Default: <https://app.rarime.com/external>
    pub app_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl VerificatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ZKPASS_API_URL` (default: `https://api.app.rarime.com`)
    /// - `ZKPASS_APP_URL` (default: `https://app.rarime.com/external`)
    /// - `ZKPASS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env_url("ZKPASS_API_URL", "https://api.app.rarime.com")?,
            app_url: env_url("ZKPASS_APP_URL", "https://app.rarime.com/external")?,
            timeout_secs: std::env::var("ZKPASS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL cannot be parsed
    /// (should not occur for a valid base URI, but avoids `expect()`).
    pub fn local_mock(base_uri: &str) -> Result<Self, ConfigError> {
        let parse = |raw: &str| -> Result<Url, ConfigError> {
            Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))
        };
        Ok(Self {
            api_url: parse(base_uri)?,
            app_url: parse("https://app.rarime.com/external")?,
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL value failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_to_production_endpoints() {
        let config = VerificatorConfig::from_env().unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.app.rarime.com/");
        assert_eq!(config.app_url.as_str(), "https://app.rarime.com/external");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn local_mock_points_at_given_server() {
        let config = VerificatorConfig::local_mock("http://127.0.0.1:19000").unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:19000/");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn local_mock_rejects_garbage() {
        assert!(VerificatorConfig::local_mock("not a url").is_err());
    }
}
