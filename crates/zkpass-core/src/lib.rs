#![deny(missing_docs)]

//! # zkpass-core — Proof-Parameter Encoding
//!
//! Leaf crate of the ZK passport verification SDK: turns high-level
//! verification criteria into the bit-packed, field-constrained parameter
//! set a query circuit and the verificator service consume. No I/O — the
//! network layer lives in `zkpass-verificator-client`.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`Selector`],
//!    [`CitizenshipCode`], [`PassportDate`] validate at construction time;
//!    an invalid value cannot exist past the type boundary.
//!
//! 2. **One completeness gate.** [`ProofParamsBuilder`] validates each
//!    attribute group independently and is consumed by `build()`, which
//!    checks required fields. A [`ProofParams`] value is never partially
//!    validated.
//!
//! 3. **[`ParamsError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod date;
pub mod error;
pub mod params;
pub mod passport;
pub mod selector;

// Re-export primary types at crate root for ergonomic imports.
pub use date::PassportDate;
pub use error::ParamsError;
pub use params::{ProofParams, ProofParamsBuilder, MAX_EVENT_ID_BITS};
pub use passport::{CitizenshipCode, Sex};
pub use selector::{Selector, SelectorBit};
