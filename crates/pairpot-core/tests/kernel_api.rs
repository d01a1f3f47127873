use pairpot::core::forcefield::kind::{ParamSlot, PotentialKind};
use pairpot::core::forcefield::params::{AtomTypeLibrary, ParamError, ParameterTable};
use pairpot::core::models::atom::AtomSet;
use pairpot::engine::config::{FitConfigBuilder, KernelConfig, PairEnergyConvention};
use pairpot::engine::error::EngineError;
use pairpot::engine::progress::ProgressReporter;
use pairpot::engine::tasks::{all_pairs, fit_gradient, point_evaluation};
use pairpot::workflows::fit::{self, FitSample};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn f64_approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * b.abs().max(1.0)
}

#[test]
fn ljq_point_matches_reference_values() {
    init_tracing();
    let result = point_evaluation::run(
        PotentialKind::LennardJonesCoulomb,
        &[1.5, 0.0, 0.0],
        &[3.0, 0.1, -1.0],
        &KernelConfig::default(),
    )
    .unwrap();

    assert!(f64_approx_equal(result.energies[0], 387.200236739, 1e-10));
    // F = -(dE/dr) along +x.
    assert!(f64_approx_equal(result.forces[0].x, 3219.200157826, 1e-10));
    assert_eq!(&result.forces_flat()[1..], &[0.0, 0.0]);
}

#[test]
fn library_parameters_flow_through_all_pairs() {
    init_tracing();
    let library = AtomTypeLibrary::from_toml_str(
        r#"
        kind = "morse-coulomb"

        [types.O]
        r0 = 1.75
        e0 = 0.15
        q = -0.8
        k = 1.2

        [types.H]
        r0 = 0.6
        e0 = 0.01
        q = 0.4
        k = 1.8
        "#,
    )
    .unwrap();
    let params = library.table_for(&["O", "H", "H"]).unwrap();
    let positions = [0.0, 0.0, 0.0, 0.96, 0.0, 0.0, -0.24, 0.93, 0.0];
    let set = AtomSet::from_table(&positions, &params).unwrap();

    let halved = all_pairs::run(&set, &KernelConfig::default()).unwrap();
    let doubled = all_pairs::run(
        &set,
        &KernelConfig::default().with_pair_energy(PairEnergyConvention::OrderedPairs),
    )
    .unwrap();
    assert!(f64_approx_equal(doubled.energy, 2.0 * halved.energy, 1e-12));

    let self_gradient = fit_gradient::run_self(&set, &KernelConfig::default()).unwrap();
    assert!(f64_approx_equal(self_gradient.energy, halved.energy, 1e-12));
}

#[test]
fn three_atom_gradient_matches_perturbed_energy() {
    init_tracing();
    let kind = PotentialKind::LennardJonesCoulomb;
    let config = KernelConfig::default();
    let pos_a = [0.0, 0.0, 0.0];
    let pos_b = [3.2, 0.0, 0.0, 0.0, 2.9, 0.4];
    let par_a = [1.7, 0.2, 0.5];
    let par_b = [1.5, 0.3, -0.4, 1.6, 0.1, 0.2];

    let energy = |par_a: &[f64]| {
        let a = AtomSet::new(kind, &pos_a, par_a).unwrap();
        let b = AtomSet::new(kind, &pos_b, &par_b).unwrap();
        fit_gradient::run(&a, &b, Default::default(), &config)
            .unwrap()
            .energy
    };
    let a = AtomSet::new(kind, &pos_a, &par_a).unwrap();
    let b = AtomSet::new(kind, &pos_b, &par_b).unwrap();
    let result = fit_gradient::run(&a, &b, Default::default(), &config).unwrap();

    let delta = 1e-6;
    for idx in 0..par_a.len() {
        let mut plus = par_a;
        let mut minus = par_a;
        plus[idx] += delta;
        minus[idx] -= delta;
        let fd = (energy(&plus) - energy(&minus)) / (2.0 * delta);
        assert!(f64_approx_equal(result.grad_a.row(0)[idx], fd, 1e-6), "slot {idx}");
    }
}

#[test]
fn fitting_recovers_well_depth() {
    init_tracing();
    let kind = PotentialKind::LennardJones;
    let samples: Vec<FitSample> = (0..10)
        .map(|i| {
            let d = 3.6 + 0.3 * i as f64;
            FitSample {
                positions_a: vec![0.0, 0.0, 0.0],
                types_a: vec![0],
                positions_b: vec![0.0, 0.0, d],
                types_b: vec![0],
                reference_energy: kind.evaluate(d, &[3.8, 0.04], 0.0).energy,
                weight: 1.0,
            }
        })
        .collect();
    let initial = ParameterTable::new(kind, vec![1.9, 0.15]).unwrap();
    let config = FitConfigBuilder::new()
        .max_iterations(500)
        .learning_rate(1.0)
        .convergence_threshold(0.0)
        .freeze(ParamSlot::Radius)
        .build()
        .unwrap();

    let result = fit::run(&samples, &initial, &config, &ProgressReporter::new()).unwrap();

    assert!(result.objective < 1e-3 * result.initial_objective);
    assert_eq!(result.parameters.row(0)[0], 1.9);
    assert!((result.parameters.row(0)[1] - 0.2).abs() < 1e-3);
}

#[test]
fn length_mismatch_is_reported_before_evaluation() {
    let result = point_evaluation::run(
        PotentialKind::Morse,
        &[1.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        &[1.0, 0.1, 1.0],
        &KernelConfig::default(),
    );
    match result {
        Err(EngineError::Layout {
            source:
                ParamError::LengthMismatch {
                    array,
                    expected,
                    actual,
                },
        }) => {
            assert_eq!(array, "parameters");
            assert_eq!(expected, 6);
            assert_eq!(actual, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
