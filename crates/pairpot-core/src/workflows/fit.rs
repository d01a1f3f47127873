use crate::core::forcefield::params::ParameterTable;
use crate::core::models::atom::AtomSet;
use crate::engine::config::{FitConfig, KernelConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::fit_gradient::{self, GradientSides};
use tracing::{debug, info, instrument};

const STEP_GROWTH: f64 = 2.0;
const STEP_SHRINK: f64 = 0.5;

/// One reference interaction energy between two fragments whose atoms carry
/// type indices into the fitted parameter table.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSample {
    pub positions_a: Vec<f64>,
    pub types_a: Vec<usize>,
    pub positions_b: Vec<f64>,
    pub types_b: Vec<usize>,
    pub reference_energy: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub parameters: ParameterTable,
    pub objective: f64,
    pub initial_objective: f64,
    pub iterations: usize,
    pub converged: bool,
}

fn expand_types(types: &ParameterTable, indices: &[usize]) -> Result<ParameterTable, EngineError> {
    types.expand(indices).ok_or_else(|| {
        let index = indices
            .iter()
            .copied()
            .find(|&t| t >= types.len())
            .unwrap_or_default();
        EngineError::UnknownAtomType {
            index,
            type_count: types.len(),
        }
    })
}

fn scatter_rows(target: &mut ParameterTable, indices: &[usize], rows: &ParameterTable, scale: f64) {
    for (&t, row) in indices.iter().zip(rows.rows()) {
        for (dst, &src) in target.row_mut(t).iter_mut().zip(row) {
            *dst += scale * src;
        }
    }
}

/// Weighted least-squares objective `sum w * (E - E_ref)^2` over `samples`
/// and its gradient with respect to every row of `type_params`.
pub fn evaluate_objective(
    samples: &[FitSample],
    type_params: &ParameterTable,
    kernel: &KernelConfig,
) -> Result<(f64, ParameterTable), EngineError> {
    let kind = type_params.kind();
    let mut objective = 0.0;
    let mut gradient = ParameterTable::zeros(kind, type_params.len());

    for sample in samples {
        let params_a = expand_types(type_params, &sample.types_a)?;
        let params_b = expand_types(type_params, &sample.types_b)?;
        let set_a = AtomSet::new(kind, &sample.positions_a, params_a.as_slice())?;
        let set_b = AtomSet::new(kind, &sample.positions_b, params_b.as_slice())?;

        let result = fit_gradient::run(&set_a, &set_b, GradientSides::Both, kernel)?;
        let residual = result.energy - sample.reference_energy;
        objective += sample.weight * residual * residual;

        let scale = 2.0 * sample.weight * residual;
        scatter_rows(&mut gradient, &sample.types_a, &result.grad_a, scale);
        if let Some(grad_b) = &result.grad_b {
            scatter_rows(&mut gradient, &sample.types_b, grad_b, scale);
        }
    }

    if !objective.is_finite() {
        return Err(EngineError::NonFinite {
            phase: "objective evaluation",
            quantity: "objective",
        });
    }
    if gradient.as_slice().iter().any(|g| !g.is_finite()) {
        return Err(EngineError::NonFinite {
            phase: "objective evaluation",
            quantity: "gradient",
        });
    }
    Ok((objective, gradient))
}

fn mask_frozen(gradient: &mut ParameterTable, config: &FitConfig) {
    let slots = gradient.kind().slots();
    let npar = slots.len();
    for (column, slot) in slots.iter().enumerate() {
        if config.frozen_slots.contains(slot) {
            for row in gradient.as_mut_slice().chunks_exact_mut(npar) {
                row[column] = 0.0;
            }
        }
    }
}

/// Fits per-type parameters to reference energies by steepest descent.
///
/// Each iteration tries a step along the negative gradient. An accepted step
/// lowers the objective and grows the step length; a rejected one leaves the
/// parameters untouched and halves it. Slots listed in
/// [`FitConfig::frozen_slots`] keep their initial values.
#[instrument(skip_all, name = "fit_workflow", fields(kind = %initial.kind(), samples = samples.len()))]
pub fn run(
    samples: &[FitSample],
    initial: &ParameterTable,
    config: &FitConfig,
    reporter: &ProgressReporter,
) -> Result<FitResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Parameter Fitting",
    });
    info!(
        types = initial.len(),
        max_iterations = config.max_iterations,
        "Starting parameter fit."
    );

    let mut parameters = initial.clone();
    let (mut objective, mut gradient) = evaluate_objective(samples, &parameters, &config.kernel)?;
    mask_frozen(&mut gradient, config);
    let initial_objective = objective;

    let mut step = config.learning_rate;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let gradient_norm = gradient.as_slice().iter().map(|g| g * g).sum::<f64>().sqrt();
        if gradient_norm == 0.0 || step * gradient_norm < config.convergence_threshold {
            converged = true;
            break;
        }

        let mut trial = parameters.clone();
        for (p, g) in trial.as_mut_slice().iter_mut().zip(gradient.as_slice()) {
            *p -= step * g;
        }

        let evaluated = match evaluate_objective(samples, &trial, &config.kernel) {
            Ok(pair) => Some(pair),
            Err(EngineError::NonFinite { .. }) => None,
            Err(e) => return Err(e),
        };

        match evaluated {
            Some((trial_objective, mut trial_gradient)) if trial_objective < objective => {
                let improvement = objective - trial_objective;
                mask_frozen(&mut trial_gradient, config);
                parameters = trial;
                objective = trial_objective;
                gradient = trial_gradient;
                reporter.report(Progress::Iteration {
                    iteration: iterations,
                    objective,
                    step,
                });
                debug!(iteration = iterations, objective, step, "Accepted step.");
                step *= STEP_GROWTH;

                if improvement < config.convergence_threshold {
                    converged = true;
                    break;
                }
            }
            _ => {
                reporter.report(Progress::StepRejected {
                    iteration: iterations,
                    step,
                });
                step *= STEP_SHRINK;
            }
        }
    }

    info!(
        iterations,
        converged, initial_objective, objective, "Parameter fit finished."
    );
    reporter.report(Progress::Message(format!(
        "Objective {initial_objective:.6e} -> {objective:.6e} after {iterations} iteration(s)"
    )));
    reporter.report(Progress::PhaseFinish);

    Ok(FitResult {
        parameters,
        objective,
        initial_objective,
        iterations,
        converged,
    })
}
