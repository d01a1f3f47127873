use crate::core::forcefield::kind::PotentialKind;
use crate::core::forcefield::params::check_length;
use crate::core::forcefield::term::{PairTerm, RadialTerm};
use crate::core::models::atom::AtomSet;
use crate::core::utils::geometry::{flatten_vectors, guarded_distance};
use crate::engine::config::KernelConfig;
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PointEvaluation {
    pub energies: Vec<f64>,
    pub forces: Vec<Vector3<f64>>,
}

impl PointEvaluation {
    pub fn forces_flat(&self) -> Vec<f64> {
        flatten_vectors(&self.forces)
    }
}

/// Evaluates `n` independent points. Point `i` is the separation vector
/// `separations[3i..3i+3]` with pre-mixed pair parameters
/// `pair_params[i*npar..(i+1)*npar]`.
#[instrument(skip_all, name = "point_evaluation_task", fields(kind = %kind))]
pub fn run(
    kind: PotentialKind,
    separations: &[f64],
    pair_params: &[f64],
    config: &KernelConfig,
) -> Result<PointEvaluation, EngineError> {
    config.validate()?;
    let points = AtomSet::new(kind, separations, pair_params)?;
    let k_coulomb = config.coulomb_constant();
    let min_distance_sq = config.min_distance_sq;

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..points.len();

    #[cfg(feature = "parallel")]
    let iterator = (0..points.len()).into_par_iter();

    let terms: Vec<PairTerm> = iterator
        .map(|i| {
            let d = points.position(i).coords;
            let r = guarded_distance(&d, min_distance_sq);
            kind.pair_term(&d, r, points.params(i), k_coulomb)
        })
        .collect();

    debug!(points = terms.len(), "Evaluated potential at points.");
    let (energies, forces) = terms.into_iter().map(|t| (t.energy, t.force)).unzip();
    Ok(PointEvaluation { energies, forces })
}

/// Tabulates energy and `dE/dr` of one pair parameter vector along `distances`.
#[instrument(skip_all, name = "radial_scan_task", fields(kind = %kind))]
pub fn tabulate(
    kind: PotentialKind,
    distances: &[f64],
    pair_params: &[f64],
    config: &KernelConfig,
) -> Result<Vec<RadialTerm>, EngineError> {
    config.validate()?;
    check_length("pair_params", pair_params, 1, kind.npar())?;
    let k_coulomb = config.coulomb_constant();
    let table = distances
        .iter()
        .map(|&r| {
            let r = (r * r + config.min_distance_sq).sqrt();
            kind.evaluate(r, pair_params, k_coulomb)
        })
        .collect();
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::ParamError;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn points_are_evaluated_independently() {
        let kind = PotentialKind::LennardJones;
        let separations = [3.0, 0.0, 0.0, 0.0, 0.0, -2.0];
        let params = [3.0, 0.1, 2.0, 0.5];
        let result = run(kind, &separations, &params, &KernelConfig::default()).unwrap();

        assert_eq!(result.energies.len(), 2);
        assert!((result.energies[0] - -0.1).abs() < TOLERANCE);
        assert!((result.energies[1] - -0.5).abs() < TOLERANCE);
        assert!(result.forces[0].norm() < TOLERANCE);
        assert!(result.forces[1].norm() < TOLERANCE);
    }

    #[test]
    fn force_is_along_separation_for_repulsive_point() {
        let separations = [0.0, 1.0, 0.0];
        let result = run(
            PotentialKind::Coulomb,
            &separations,
            &[1.0],
            &KernelConfig::default(),
        )
        .unwrap();
        let f = result.forces[0];
        assert!(f.y > 0.0);
        assert_eq!(f.x, 0.0);
        assert_eq!(f.z, 0.0);
        assert_eq!(result.forces_flat().len(), 3);
    }

    #[test]
    fn mismatched_parameter_length_is_an_error() {
        let result = run(
            PotentialKind::MorseCoulomb,
            &[1.0, 0.0, 0.0],
            &[1.0, 0.1, 1.0],
            &KernelConfig::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::Layout {
                source: ParamError::LengthMismatch {
                    expected: 4,
                    actual: 3,
                    ..
                }
            })
        ));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let result = run(PotentialKind::Morse, &[], &[], &KernelConfig::default()).unwrap();
        assert!(result.energies.is_empty());
        assert!(result.forces.is_empty());
    }

    #[test]
    fn tabulate_matches_direct_evaluation() {
        let kind = PotentialKind::MorseCoulomb;
        let params = [3.0, 0.2, 0.5, 1.6];
        let distances: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
        let config = KernelConfig::default();
        let table = tabulate(kind, &distances, &params, &config).unwrap();
        for (term, &r) in table.iter().zip(&distances) {
            let direct = kind.evaluate(r, &params, config.coulomb_constant());
            assert!((term.energy - direct.energy).abs() < TOLERANCE);
            assert!((term.de_dr - direct.de_dr).abs() < TOLERANCE);
        }
    }

    #[test]
    fn tabulate_rejects_wrong_parameter_count() {
        let result = tabulate(
            PotentialKind::LennardJones,
            &[1.0],
            &[1.0],
            &KernelConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::Layout { .. })));
    }

    #[test]
    fn invalid_config_is_rejected_before_evaluation() {
        let config = KernelConfig {
            min_distance_sq: -1.0,
            ..KernelConfig::default()
        };
        let points = run(PotentialKind::Coulomb, &[1.0, 0.0, 0.0], &[1.0], &config);
        assert!(matches!(points, Err(EngineError::Config { .. })));

        let config = KernelConfig {
            coulomb_constant: Some(f64::NAN),
            ..KernelConfig::default()
        };
        let table = tabulate(PotentialKind::Coulomb, &[1.0], &[1.0], &config);
        assert!(matches!(table, Err(EngineError::Config { .. })));
    }

    #[test]
    fn tabulate_at_zero_distance_stays_finite() {
        let table = tabulate(
            PotentialKind::Coulomb,
            &[0.0],
            &[1.0],
            &KernelConfig::default(),
        )
        .unwrap();
        assert!(table[0].energy.is_finite());
    }
}
