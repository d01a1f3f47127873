//! # Core Models Module
//!
//! Borrowed views over caller-owned coordinate and parameter arrays.
//!
//! - [`atom`] - An [`atom::AtomSet`] pairs `3n` coordinates with `n * npar`
//!   parameters and checks that the two agree before any kernel runs.

pub mod atom;
