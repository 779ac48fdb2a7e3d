//! The calculator engine for the Trowel estimating toolkit.
//!
//! This crate provides the [`Calculator`] contract, the process-wide
//! [`Registry`], the coverage reference tables, and every built-in
//! calculator: the single-purpose material calculators, the NJ
//! compliance/pricing tools, and the integrated project calculator that
//! combines them into one estimate.
//!
//! Calculators are stateless, pure and thread-safe; a registry populated
//! once at startup can serve concurrent calculations without locking.

pub mod built_in;
pub mod categories;
pub mod contract;
pub mod coverage;
pub mod error;
pub mod inputs;
pub mod integrated;
pub mod registry;

pub use contract::{Calculator, FieldSpec, FieldType, InputSchema};
pub use error::CalcError;
pub use inputs::CalcInputs;
pub use registry::Registry;
