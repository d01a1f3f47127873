use crate::core::forcefield::kind::PotentialKind;
use crate::core::forcefield::params::{ParamError, ParameterTable, check_length, count_rows};
use nalgebra::Point3;

/// A borrowed set of atoms: flat coordinates plus one parameter vector per atom.
///
/// This is the validated view every kernel operates on. Positions are laid out
/// as `[x0, y0, z0, x1, y1, z1, ...]` and parameters as `npar` consecutive values
/// per atom, where `npar` is fixed by the potential kind. Both lengths are
/// checked once on construction, so kernels can index rows without further
/// bounds reasoning.
///
/// Physical validity of the parameters (positive radii, well depths) is not
/// checked; that is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomSet<'a> {
    kind: PotentialKind,
    positions: &'a [f64],
    params: &'a [f64],
}

impl<'a> AtomSet<'a> {
    /// Creates a new atom set.
    ///
    /// # Arguments
    ///
    /// * `kind` - The potential kind whose parameter layout `params` follows.
    /// * `positions` - Flat coordinates, 3 values per atom.
    /// * `params` - Flat per-atom parameters, `kind.npar()` values per atom.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::RaggedArray`] when `positions` is not a multiple of
    /// 3 long, and [`ParamError::LengthMismatch`] when `params` does not hold
    /// exactly `n * npar` values for the `n` atoms implied by `positions`.
    pub fn new(
        kind: PotentialKind,
        positions: &'a [f64],
        params: &'a [f64],
    ) -> Result<Self, ParamError> {
        let n = count_rows("positions", positions, 3)?;
        check_length("parameters", params, n, kind.npar())?;
        Ok(Self {
            kind,
            positions,
            params,
        })
    }

    /// Creates an atom set whose parameters come from a [`ParameterTable`].
    pub fn from_table(positions: &'a [f64], table: &'a ParameterTable) -> Result<Self, ParamError> {
        Self::new(table.kind(), positions, table.as_slice())
    }

    /// Returns the potential kind the parameters are laid out for.
    #[inline]
    pub fn kind(&self) -> PotentialKind {
        self.kind
    }

    /// Returns the number of atoms.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the position of atom `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        let p = &self.positions[3 * index..3 * index + 3];
        Point3::new(p[0], p[1], p[2])
    }

    /// Returns the own parameter vector of atom `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn params(&self, index: usize) -> &'a [f64] {
        let npar = self.kind.npar();
        &self.params[index * npar..(index + 1) * npar]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_consistent_arrays() {
        let positions = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0];
        let params = [1.5, 0.1, 1.7, 0.2];
        let set = AtomSet::new(PotentialKind::LennardJones, &positions, &params).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.position(1), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(set.params(1), &[1.7, 0.2]);
    }

    #[test]
    fn new_rejects_parameter_length_mismatch() {
        let positions = [0.0; 6];
        let params = [1.5, 0.1, 1.7];
        let result = AtomSet::new(PotentialKind::LennardJones, &positions, &params);
        assert_eq!(
            result,
            Err(ParamError::LengthMismatch {
                array: "parameters",
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn new_rejects_positions_not_in_triples() {
        let positions = [0.0; 4];
        let result = AtomSet::new(PotentialKind::Coulomb, &positions, &[1.0]);
        assert!(matches!(result, Err(ParamError::RaggedArray { .. })));
    }

    #[test]
    fn empty_set_is_valid() {
        let set = AtomSet::new(PotentialKind::MorseCoulomb, &[], &[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn from_table_uses_table_kind() {
        let table = ParameterTable::new(PotentialKind::Coulomb, vec![1.0, -1.0]).unwrap();
        let positions = [0.0; 6];
        let set = AtomSet::from_table(&positions, &table).unwrap();
        assert_eq!(set.kind(), PotentialKind::Coulomb);
        assert_eq!(set.params(0), &[1.0]);
    }
}
