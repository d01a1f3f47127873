//! # Force Field Module
//!
//! Pairwise potentials and everything needed to evaluate them from per-atom
//! parameters.
//!
//! ## Overview
//!
//! Every potential is a function of the pair distance `r` and a parameter
//! vector whose layout is fixed by its [`kind::PotentialKind`]:
//!
//! | kind                     | parameters          |
//! |--------------------------|---------------------|
//! | `Coulomb`                | `[qq]`              |
//! | `LennardJones`           | `[R0, E0]`          |
//! | `Morse`                  | `[R0, E0, k]`       |
//! | `LennardJonesCoulomb`    | `[R0, E0, qq]`      |
//! | `MorseCoulomb`           | `[R0, E0, qq, k]`   |
//!
//! ## Key Components
//!
//! - [`potentials`] - Energy, `dE/dr` and parameter derivatives per functional form
//! - [`kind`] - Potential kinds, their parameter slots and dispatch
//! - [`mixing`] - Combining rules and their reverse for gradient back-propagation
//! - [`params`] - Flat parameter tables and the TOML atom-type library
//! - [`term`] - Energy/derivative and energy/force value types

pub mod kind;
pub mod mixing;
pub mod params;
pub mod potentials;
pub mod term;
