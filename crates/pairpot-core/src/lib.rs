//! # Pairpot Core Library
//!
//! Analytic pairwise potentials (Coulomb, Lennard-Jones 12-6, Morse and their
//! charged combinations) with combining rules and the kernels that evaluate
//! them over flat coordinate and parameter arrays.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Pure potential functions, the closed set of
//!   potential kinds with their parameter layouts, combining rules and their
//!   reverse, validated parameter tables and atom sets.
//!
//! - **[`engine`]: The Kernels.** Stateless entry points for point evaluation,
//!   radial tabulation, fit gradients and all-pairs energy/force
//!   accumulation, together with the shared [`engine::config::KernelConfig`],
//!   the error type and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Higher-level procedures built on the
//!   kernels, currently least-squares fitting of per-type parameters.
//!
//! With the default `parallel` feature the outer loop of every kernel runs on
//! the `rayon` thread pool. Each output row is written by one iteration only,
//! so results do not depend on the feature.

pub mod core;
pub mod engine;
pub mod workflows;
