//! Verificator service client error types.

/// Errors from verificator service calls.
#[derive(Debug, thiserror::Error)]
pub enum VerificatorError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The logical operation, e.g. `GET /verification-status/{id}`.
        endpoint: String,
        /// The underlying transport failure.
        source: reqwest::Error,
    },

    /// The verificator service returned a non-2xx status.
    #[error("verificator {endpoint} returned {status}: {body}")]
    Api {
        /// The logical operation.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt for diagnostics.
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The logical operation.
        endpoint: String,
        /// The underlying decode failure.
        source: reqwest::Error,
    },
}
