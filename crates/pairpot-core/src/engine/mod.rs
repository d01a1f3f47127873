//! # Engine Module
//!
//! The evaluation kernels and the ambient pieces they share.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Unit system, distance floor, pair-energy
//!   convention and fitting settings
//! - **Error Handling** ([`error`]) - [`error::EngineError`], wrapping layout,
//!   configuration and library errors
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Kernels** ([`tasks`]) - Point evaluation, fit gradients and all-pairs
//!   accumulation
//!
//! Every kernel is a free function over borrowed inputs. Nothing is cached
//! between calls, so kernels may be called concurrently.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
