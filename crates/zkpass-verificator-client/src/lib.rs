//! Client for the verificator service: request passport-proof
//! verification links, poll verification status, and fetch verified
//! proofs.
//!
//! Two levels of API:
//!
//! - [`VerificatorClient`] exposes the raw REST operations.
//! - [`VerificationSession`] drives a full verification attempt: it
//!   requests the link, polls status in the background, and delivers
//!   [`SessionEvent`]s until the attempt succeeds or fails.
//!
//! Proof parameters for advanced verification come from
//! [`zkpass_core::ProofParamsBuilder`].

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod verification;

pub use config::{ConfigError, VerificatorConfig};
pub use error::VerificatorError;
pub use session::{SessionConfig, SessionError, SessionEvent, VerificationSession};
pub use types::{
    BasicVerificationOpts, Groth16Proof, VerificationOptions, VerificationStatus, ZkProof,
};
pub use verification::VerificatorClient;
