//! Evaluation kernels.
//!
//! - [`point_evaluation`] - Independent (separation, pre-mixed parameters)
//!   points, plus radial tabulation of a single pair
//! - [`fit_gradient`] - Interaction energy between atom sets and its gradient
//!   with respect to per-atom parameters, through the combining rule
//! - [`all_pairs`] - Energy and per-atom forces over all pairs of one set

pub mod all_pairs;
pub mod fit_gradient;
pub mod point_evaluation;
