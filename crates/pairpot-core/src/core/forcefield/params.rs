use super::kind::{ParamSlot, PotentialKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Array '{array}' holds {actual} values but {expected} were expected")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Array '{array}' holds {actual} values, which is not a multiple of {stride}")]
    RaggedArray {
        array: &'static str,
        stride: usize,
        actual: usize,
    },
}

/// Checks that `values` holds exactly `count * stride` entries.
pub fn check_length(
    array: &'static str,
    values: &[f64],
    count: usize,
    stride: usize,
) -> Result<(), ParamError> {
    let expected = count * stride;
    if values.len() != expected {
        return Err(ParamError::LengthMismatch {
            array,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Returns `values.len() / stride`, failing when the array is ragged.
pub fn count_rows(array: &'static str, values: &[f64], stride: usize) -> Result<usize, ParamError> {
    if values.len() % stride != 0 {
        return Err(ParamError::RaggedArray {
            array,
            stride,
            actual: values.len(),
        });
    }
    Ok(values.len() / stride)
}

/// Flat row-major table of parameter vectors, `npar` values per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    kind: PotentialKind,
    values: Vec<f64>,
}

impl ParameterTable {
    pub fn new(kind: PotentialKind, values: Vec<f64>) -> Result<Self, ParamError> {
        count_rows("parameters", &values, kind.npar())?;
        Ok(Self { kind, values })
    }

    pub fn with_rows(kind: PotentialKind, rows: usize, values: Vec<f64>) -> Result<Self, ParamError> {
        check_length("parameters", &values, rows, kind.npar())?;
        Ok(Self { kind, values })
    }

    pub fn zeros(kind: PotentialKind, rows: usize) -> Self {
        Self {
            kind,
            values: vec![0.0; rows * kind.npar()],
        }
    }

    #[inline]
    pub fn kind(&self) -> PotentialKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.kind.npar()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        let npar = self.kind.npar();
        &self.values[index * npar..(index + 1) * npar]
    }

    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        let npar = self.kind.npar();
        &mut self.values[index * npar..(index + 1) * npar]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.kind.npar())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Expands per-type rows into per-atom rows following `type_indices`.
    pub fn expand(&self, type_indices: &[usize]) -> Option<ParameterTable> {
        let mut values = Vec::with_capacity(type_indices.len() * self.kind.npar());
        for &t in type_indices {
            if t >= self.len() {
                return None;
            }
            values.extend_from_slice(self.row(t));
        }
        Some(Self {
            kind: self.kind,
            values,
        })
    }
}

/// Per-type parameters as written in a library file. Only the keys used by the
/// library's potential kind are read.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TypeParams {
    pub r0: Option<f64>,
    pub e0: Option<f64>,
    pub q: Option<f64>,
    pub k: Option<f64>,
}

impl TypeParams {
    pub fn get(&self, slot: ParamSlot) -> Option<f64> {
        match slot {
            ParamSlot::Radius => self.r0,
            ParamSlot::WellDepth => self.e0,
            ParamSlot::Charge => self.q,
            ParamSlot::Stiffness => self.k,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomTypeLibrary {
    pub kind: PotentialKind,
    #[serde(default)]
    pub types: HashMap<String, TypeParams>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
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
    #[error("Atom type '{0}' is not defined in the parameter library")]
    UnknownType(String),
    #[error("Atom type '{type_name}' has no value for '{key}'")]
    MissingValue {
        type_name: String,
        key: &'static str,
    },
}

impl AtomTypeLibrary {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamLoadError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ParamLoadError> {
        toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })
    }

    /// Parameter vector of one atom type, in the layout of the library's kind.
    pub fn type_parameters(&self, type_name: &str) -> Result<Vec<f64>, ParamLoadError> {
        let params = self
            .types
            .get(type_name)
            .ok_or_else(|| ParamLoadError::UnknownType(type_name.to_string()))?;
        self.kind
            .slots()
            .iter()
            .map(|&slot| {
                params.get(slot).ok_or_else(|| ParamLoadError::MissingValue {
                    type_name: type_name.to_string(),
                    key: slot.key(),
                })
            })
            .collect()
    }

    /// Builds one row per label, in label order.
    pub fn table_for<S: AsRef<str>>(&self, labels: &[S]) -> Result<ParameterTable, ParamLoadError> {
        let mut values = Vec::with_capacity(labels.len() * self.kind.npar());
        for label in labels {
            values.extend(self.type_parameters(label.as_ref())?);
        }
        Ok(ParameterTable {
            kind: self.kind,
            values,
        })
    }
}
