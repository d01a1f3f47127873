use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::kind::PotentialKind;
use crate::core::forcefield::params::{ParamError, ParamLoadError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input layout: {source}")]
    Layout {
        #[from]
        source: ParamError,
    },

    #[error("Potential kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: PotentialKind,
        found: PotentialKind,
    },

    #[error("Atom type index {index} is out of range for {type_count} type(s)")]
    UnknownAtomType { index: usize, type_count: usize },

    #[error("Non-finite {quantity} encountered during {phase}")]
    NonFinite {
        phase: &'static str,
        quantity: &'static str,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Parameter library error: {source}")]
    ParamLoad {
        #[from]
        source: ParamLoadError,
    },
}
