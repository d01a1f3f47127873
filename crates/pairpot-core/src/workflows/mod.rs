//! # Workflows Module
//!
//! High-level procedures that drive the kernels.
//!
//! - **Parameter Fitting** ([`fit`]) - Steepest-descent fit of per-type
//!   parameters to weighted reference interaction energies, with frozen
//!   slots and progress reporting.

pub mod fit;
