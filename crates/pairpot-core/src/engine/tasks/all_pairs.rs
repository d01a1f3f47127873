use crate::core::forcefield::kind::MAX_NPAR;
use crate::core::forcefield::mixing;
use crate::core::forcefield::term::PairTerm;
use crate::core::models::atom::AtomSet;
use crate::core::utils::geometry::{flatten_vectors, separation};
use crate::engine::config::KernelConfig;
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsResult {
    /// Total energy, weighted by the configured pair-energy convention.
    pub energy: f64,
    pub forces: Vec<Vector3<f64>>,
}

impl AllPairsResult {
    pub fn forces_flat(&self) -> Vec<f64> {
        flatten_vectors(&self.forces)
    }
}

fn atom_term(i: usize, set: &AtomSet, k_coulomb: f64, min_distance_sq: f64) -> PairTerm {
    let kind = set.kind();
    let npar = kind.npar();
    let pi = set.params(i);
    let xi = set.position(i);
    let mut pij = [0.0; MAX_NPAR];
    let mut acc = PairTerm::default();

    for j in 0..set.len() {
        if i == j {
            continue;
        }
        let (d, r) = separation(&xi, &set.position(j), min_distance_sq);
        mixing::mix(kind, pi, set.params(j), &mut pij[..npar]);
        acc += kind.pair_term(&d, r, &pij[..npar], k_coulomb);
    }
    acc
}

/// Energy and per-atom forces of one atom set, summed over all pairs.
///
/// Every ordered pair `(i, j), i != j` is visited from `i`'s side and only
/// writes the force of atom `i`, so the outer loop needs no synchronisation.
/// Forces are exact. The energy visited this way counts every pair twice; it
/// is reported per unordered pair unless the configuration asks for
/// [`PairEnergyConvention::OrderedPairs`].
///
/// [`PairEnergyConvention::OrderedPairs`]: crate::engine::config::PairEnergyConvention::OrderedPairs
#[instrument(skip_all, name = "all_pairs_task", fields(kind = %set.kind(), atoms = set.len()))]
pub fn run(set: &AtomSet, config: &KernelConfig) -> Result<AllPairsResult, EngineError> {
    config.validate()?;
    let k_coulomb = config.coulomb_constant();
    let min_distance_sq = config.min_distance_sq;

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..set.len();

    #[cfg(feature = "parallel")]
    let iterator = (0..set.len()).into_par_iter();

    let terms: Vec<PairTerm> = iterator
        .map(|i| atom_term(i, set, k_coulomb, min_distance_sq))
        .collect();

    let visited: f64 = terms.iter().map(|t| t.energy).sum();
    let energy = config.pair_energy.ordered_pair_weight() * visited;
    debug!(energy, convention = ?config.pair_energy, "Accumulated all-pairs energy.");

    Ok(AllPairsResult {
        energy,
        forces: terms.into_iter().map(|t| t.force).collect(),
    })
}
