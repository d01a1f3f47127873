use crate::core::forcefield::kind::MAX_NPAR;
use crate::core::forcefield::mixing;
use crate::core::forcefield::params::ParameterTable;
use crate::core::models::atom::AtomSet;
use crate::core::utils::geometry::separation;
use crate::engine::config::KernelConfig;
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which atom sets receive a parameter gradient in [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientSides {
    #[default]
    First,
    Both,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitGradient {
    pub energy: f64,
    /// `dE/d(own parameters)` for every atom of the first set.
    pub grad_a: ParameterTable,
    /// Same for the second set, when requested.
    pub grad_b: Option<ParameterTable>,
}

struct RowAccumulation {
    energy: f64,
    grad: [f64; MAX_NPAR],
}

/// Sums the interaction of atom `i` of `own` with every atom of `partners`,
/// reverse-mixing each pair derivative into atom `i`'s gradient.
fn accumulate_row(
    i: usize,
    own: &AtomSet,
    partners: &AtomSet,
    skip_same_index: bool,
    k_coulomb: f64,
    min_distance_sq: f64,
) -> RowAccumulation {
    let kind = own.kind();
    let npar = kind.npar();
    let pi = own.params(i);
    let xi = own.position(i);

    let mut pij = [0.0; MAX_NPAR];
    let mut dpij = [0.0; MAX_NPAR];
    let mut row = RowAccumulation {
        energy: 0.0,
        grad: [0.0; MAX_NPAR],
    };

    for j in 0..partners.len() {
        if skip_same_index && i == j {
            continue;
        }
        let pj = partners.params(j);
        let (_, r) = separation(&xi, &partners.position(j), min_distance_sq);
        mixing::mix(kind, pi, pj, &mut pij[..npar]);
        row.energy += kind.variational(r, &pij[..npar], k_coulomb, &mut dpij[..npar]);
        mixing::unmix_into(kind, pj, &dpij[..npar], &mut row.grad[..npar]);
    }
    row
}

fn accumulate_rows(
    own: &AtomSet,
    partners: &AtomSet,
    skip_same_index: bool,
    config: &KernelConfig,
) -> Vec<RowAccumulation> {
    let k_coulomb = config.coulomb_constant();
    let min_distance_sq = config.min_distance_sq;

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..own.len();

    #[cfg(feature = "parallel")]
    let iterator = (0..own.len()).into_par_iter();

    iterator
        .map(|i| accumulate_row(i, own, partners, skip_same_index, k_coulomb, min_distance_sq))
        .collect()
}

fn rows_to_table(rows: &[RowAccumulation], own: &AtomSet, scale: f64) -> ParameterTable {
    let npar = own.kind().npar();
    let mut table = ParameterTable::zeros(own.kind(), rows.len());
    for (i, row) in rows.iter().enumerate() {
        for (dst, &src) in table.row_mut(i).iter_mut().zip(&row.grad[..npar]) {
            *dst = scale * src;
        }
    }
    table
}

/// Interaction energy between two atom sets and its gradient with respect to
/// the per-atom parameters.
///
/// Every pair `(i in A, j in B)` is evaluated once for the energy. The
/// gradient of B, when requested, is obtained by visiting every pair again
/// from B's side, so each output row is written by exactly one outer
/// iteration.
#[instrument(skip_all, name = "fit_gradient_task", fields(kind = %set_a.kind()))]
pub fn run(
    set_a: &AtomSet,
    set_b: &AtomSet,
    sides: GradientSides,
    config: &KernelConfig,
) -> Result<FitGradient, EngineError> {
    config.validate()?;
    if set_a.kind() != set_b.kind() {
        return Err(EngineError::KindMismatch {
            expected: set_a.kind(),
            found: set_b.kind(),
        });
    }

    let rows_a = accumulate_rows(set_a, set_b, false, config);
    let energy: f64 = rows_a.iter().map(|row| row.energy).sum();
    let grad_a = rows_to_table(&rows_a, set_a, 1.0);

    let grad_b = match sides {
        GradientSides::First => None,
        GradientSides::Both => {
            let rows_b = accumulate_rows(set_b, set_a, false, config);
            Some(rows_to_table(&rows_b, set_b, 1.0))
        }
    };

    debug!(
        atoms_a = set_a.len(),
        atoms_b = set_b.len(),
        energy,
        "Accumulated fit gradient."
    );
    Ok(FitGradient {
        energy,
        grad_a,
        grad_b,
    })
}

/// Energy of one atom set with itself and its parameter gradient.
///
/// All ordered pairs `(i, j), i != j` are visited from `i`'s side. The energy
/// is weighted by the configured [`PairEnergyConvention`], and the gradient is
/// the exact derivative of that reported energy.
///
/// [`PairEnergyConvention`]: crate::engine::config::PairEnergyConvention
#[instrument(skip_all, name = "self_fit_gradient_task", fields(kind = %set.kind()))]
pub fn run_self(set: &AtomSet, config: &KernelConfig) -> Result<FitGradient, EngineError> {
    config.validate()?;
    let weight = config.pair_energy.ordered_pair_weight();
    let rows = accumulate_rows(set, set, true, config);
    let energy = weight * rows.iter().map(|row| row.energy).sum::<f64>();
    // Each pair enters the energy from both sides, and mixing is symmetric.
    let grad_a = rows_to_table(&rows, set, 2.0 * weight);

    debug!(atoms = set.len(), energy, "Accumulated self fit gradient.");
    Ok(FitGradient {
        energy,
        grad_a,
        grad_b: None,
    })
}
