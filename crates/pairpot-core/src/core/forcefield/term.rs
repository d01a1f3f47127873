use nalgebra::Vector3;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Energy of one pair together with its radial derivative dE/dr.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialTerm {
    pub energy: f64,
    pub de_dr: f64,
}

impl RadialTerm {
    pub fn new(energy: f64, de_dr: f64) -> Self {
        Self { energy, de_dr }
    }
}

impl Add for RadialTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            energy: self.energy + rhs.energy,
            de_dr: self.de_dr + rhs.de_dr,
        }
    }
}

/// Energy and force acting on the first atom of a pair (or summed over many pairs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairTerm {
    pub energy: f64,
    pub force: Vector3<f64>,
}

impl PairTerm {
    pub fn new(energy: f64, force: Vector3<f64>) -> Self {
        Self { energy, force }
    }

    /// Projects a radial term onto `separation = pos_i - pos_j` of length `r`,
    /// giving the force on atom i: `F_i = -(dE/dr) * separation / r`.
    #[inline]
    pub fn from_radial(term: RadialTerm, separation: &Vector3<f64>, r: f64) -> Self {
        Self {
            energy: term.energy,
            force: separation * (-term.de_dr / r),
        }
    }
}

impl Default for PairTerm {
    fn default() -> Self {
        Self {
            energy: 0.0,
            force: Vector3::zeros(),
        }
    }
}

impl Add for PairTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            energy: self.energy + rhs.energy,
            force: self.force + rhs.force,
        }
    }
}

impl AddAssign for PairTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.energy += rhs.energy;
        self.force += rhs.force;
    }
}

impl Sum for PairTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
