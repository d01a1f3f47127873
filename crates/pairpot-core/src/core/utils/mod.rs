//! Geometric helpers shared by the kernels.

pub mod geometry;
