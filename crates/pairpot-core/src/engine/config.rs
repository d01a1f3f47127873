use crate::core::forcefield::kind::ParamSlot;
use crate::core::forcefield::potentials::{COULOMB_CONSTANT_EV, COULOMB_CONSTANT_KCAL};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MIN_DISTANCE_SQ: f64 = 1e-32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    /// Energies in eV, distances in Å, charges in e.
    #[default]
    ElectronVolt,
    /// Energies in kcal/mol, distances in Å, charges in e.
    KcalPerMol,
}

impl UnitSystem {
    pub fn coulomb_constant(self) -> f64 {
        match self {
            UnitSystem::ElectronVolt => COULOMB_CONSTANT_EV,
            UnitSystem::KcalPerMol => COULOMB_CONSTANT_KCAL,
        }
    }
}

/// How the all-pairs kernels report a total that visits each pair twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairEnergyConvention {
    /// Each unordered pair counted once.
    #[default]
    UnorderedPairs,
    /// Each ordered pair counted, i.e. twice the pairwise energy.
    OrderedPairs,
}

impl PairEnergyConvention {
    /// Weight applied to the sum over ordered pairs `(i, j), i != j`.
    #[inline]
    pub fn ordered_pair_weight(self) -> f64 {
        match self {
            PairEnergyConvention::UnorderedPairs => 0.5,
            PairEnergyConvention::OrderedPairs => 1.0,
        }
    }
}

/// Immutable constants shared by every kernel call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    pub units: UnitSystem,
    /// Overrides the Coulomb constant implied by `units`.
    pub coulomb_constant: Option<f64>,
    pub min_distance_sq: f64,
    pub pair_energy: PairEnergyConvention,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            units: UnitSystem::default(),
            coulomb_constant: None,
            min_distance_sq: DEFAULT_MIN_DISTANCE_SQ,
            pair_energy: PairEnergyConvention::default(),
        }
    }
}

impl KernelConfig {
    #[inline]
    pub fn coulomb_constant(&self) -> f64 {
        self.coulomb_constant
            .unwrap_or_else(|| self.units.coulomb_constant())
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn with_pair_energy(mut self, convention: PairEnergyConvention) -> Self {
        self.pair_energy = convention;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_distance_sq.is_finite() && self.min_distance_sq >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_distance_sq",
                reason: "must be finite and non-negative",
            });
        }
        if let Some(k) = self.coulomb_constant {
            if !k.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: "coulomb_constant",
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub max_iterations: usize,
    pub learning_rate: f64,
    pub convergence_threshold: f64,
    pub frozen_slots: Vec<ParamSlot>,
    pub kernel: KernelConfig,
}

#[derive(Default)]
pub struct FitConfigBuilder {
    max_iterations: Option<usize>,
    learning_rate: Option<f64>,
    convergence_threshold: Option<f64>,
    frozen_slots: Vec<ParamSlot>,
    kernel: Option<KernelConfig>,
}

impl FitConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = Some(rate);
        self
    }
    pub fn convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = Some(threshold);
        self
    }
    pub fn freeze(mut self, slot: ParamSlot) -> Self {
        if !self.frozen_slots.contains(&slot) {
            self.frozen_slots.push(slot);
        }
        self
    }
    pub fn kernel(mut self, config: KernelConfig) -> Self {
        self.kernel = Some(config);
        self
    }

    pub fn build(self) -> Result<FitConfig, ConfigError> {
        let learning_rate = self
            .learning_rate
            .ok_or(ConfigError::MissingParameter("learning_rate"))?;
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "learning_rate",
                reason: "must be finite and positive",
            });
        }
        let kernel = self.kernel.unwrap_or_default();
        kernel.validate()?;
        Ok(FitConfig {
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
            learning_rate,
            convergence_threshold: self
                .convergence_threshold
                .ok_or(ConfigError::MissingParameter("convergence_threshold"))?,
            frozen_slots: self.frozen_slots,
            kernel,
        })
    }
}
