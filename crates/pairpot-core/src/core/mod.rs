//! # Core Module
//!
//! Stateless building blocks shared by every kernel.
//!
//! - **Potentials and kinds** ([`forcefield`]) - Closed-form potentials, the
//!   [`forcefield::kind::PotentialKind`] dispatch, combining rules and
//!   parameter tables
//! - **Input views** ([`models`]) - Borrowed, validated atom sets
//! - **Geometry** ([`utils`]) - Guarded separations and vector flattening

pub mod forcefield;
pub mod models;
pub mod utils;
