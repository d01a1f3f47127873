//! Combining rules between per-atom and per-pair parameter vectors.
//!
//! The forward rule builds pair parameters from two atoms:
//! radii add, well depths and charges multiply (a plain product, not the
//! geometric mean), and Morse exponents are averaged. The reverse rule is the
//! chain rule of the forward one and only produces the contribution to the
//! first atom; kernels visit every pair from both sides to cover the second.

use super::kind::{ParamSlot, PotentialKind};

#[inline]
pub fn combine(slot: ParamSlot, a: f64, b: f64) -> f64 {
    match slot {
        ParamSlot::Radius => a + b,
        ParamSlot::WellDepth | ParamSlot::Charge => a * b,
        ParamSlot::Stiffness => 0.5 * (a + b),
    }
}

/// `d(pair value)/d(own value)` given the partner's own value.
#[inline]
pub fn combine_derivative(slot: ParamSlot, partner: f64) -> f64 {
    match slot {
        ParamSlot::Radius => 1.0,
        ParamSlot::WellDepth | ParamSlot::Charge => partner,
        ParamSlot::Stiffness => 0.5,
    }
}

/// Writes the pair parameters of atoms `pi` and `pj` into `pij`.
#[inline]
pub fn mix(kind: PotentialKind, pi: &[f64], pj: &[f64], pij: &mut [f64]) {
    for (p, &slot) in kind.slots().iter().enumerate() {
        pij[p] = combine(slot, pi[p], pj[p]);
    }
}

/// Accumulates `dE/d(pair params)` into `dpi`, the gradient of atom i's own
/// parameters, where `pj` are the parameters of the partner atom.
#[inline]
pub fn unmix_into(kind: PotentialKind, pj: &[f64], dpij: &[f64], dpi: &mut [f64]) {
    for (p, &slot) in kind.slots().iter().enumerate() {
        dpi[p] += dpij[p] * combine_derivative(slot, pj[p]);
    }
}
