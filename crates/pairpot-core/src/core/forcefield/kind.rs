use super::potentials;
use super::term::{PairTerm, RadialTerm};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;

/// Largest parameter vector carried by any [`PotentialKind`].
pub const MAX_NPAR: usize = 4;

/// Physical role of one entry of a parameter vector. The role decides how the
/// entry is combined for a pair and how pair derivatives flow back to atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSlot {
    /// Equilibrium distance `R0`.
    Radius,
    /// Well depth `E0`.
    WellDepth,
    /// Charge `q` per atom, `q_i * q_j` per pair.
    Charge,
    /// Morse exponent `k`.
    Stiffness,
}

impl ParamSlot {
    /// Key used for this slot in parameter library files.
    pub fn key(self) -> &'static str {
        match self {
            ParamSlot::Radius => "r0",
            ParamSlot::WellDepth => "e0",
            ParamSlot::Charge => "q",
            ParamSlot::Stiffness => "k",
        }
    }
}

const COULOMB_SLOTS: [ParamSlot; 1] = [ParamSlot::Charge];
const LJ_SLOTS: [ParamSlot; 2] = [ParamSlot::Radius, ParamSlot::WellDepth];
const LJQ_SLOTS: [ParamSlot; 3] = [ParamSlot::Radius, ParamSlot::WellDepth, ParamSlot::Charge];
const MORSE_SLOTS: [ParamSlot; 3] = [
    ParamSlot::Radius,
    ParamSlot::WellDepth,
    ParamSlot::Stiffness,
];
const MORSEQ_SLOTS: [ParamSlot; 4] = [
    ParamSlot::Radius,
    ParamSlot::WellDepth,
    ParamSlot::Charge,
    ParamSlot::Stiffness,
];

/// The closed set of pairwise potentials. Each kind fixes the length and the
/// layout of its parameter vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PotentialKind {
    /// `[qq]`
    Coulomb,
    /// `[R0, E0]`
    LennardJones,
    /// `[R0, E0, k]`
    Morse,
    /// `[R0, E0, qq]`
    LennardJonesCoulomb,
    /// `[R0, E0, qq, k]`
    MorseCoulomb,
}

impl PotentialKind {
    pub const ALL: [PotentialKind; 5] = [
        PotentialKind::Coulomb,
        PotentialKind::LennardJones,
        PotentialKind::Morse,
        PotentialKind::LennardJonesCoulomb,
        PotentialKind::MorseCoulomb,
    ];

    pub const fn slots(self) -> &'static [ParamSlot] {
        match self {
            PotentialKind::Coulomb => &COULOMB_SLOTS,
            PotentialKind::LennardJones => &LJ_SLOTS,
            PotentialKind::Morse => &MORSE_SLOTS,
            PotentialKind::LennardJonesCoulomb => &LJQ_SLOTS,
            PotentialKind::MorseCoulomb => &MORSEQ_SLOTS,
        }
    }

    #[inline]
    pub const fn npar(self) -> usize {
        self.slots().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            PotentialKind::Coulomb => "coulomb",
            PotentialKind::LennardJones => "lennard-jones",
            PotentialKind::Morse => "morse",
            PotentialKind::LennardJonesCoulomb => "lennard-jones-coulomb",
            PotentialKind::MorseCoulomb => "morse-coulomb",
        }
    }

    /// Evaluates energy and `dE/dr` at distance `r` for pair parameters `params`.
    ///
    /// `params` must hold exactly [`npar`](Self::npar) values; callers validate
    /// lengths before entering the hot loop.
    #[inline]
    pub fn evaluate(self, r: f64, params: &[f64], k_coulomb: f64) -> RadialTerm {
        debug_assert_eq!(params.len(), self.npar());
        match self {
            PotentialKind::Coulomb => potentials::coulomb(r, params[0], k_coulomb),
            PotentialKind::LennardJones => potentials::lennard_jones_12_6(r, params[0], params[1]),
            PotentialKind::Morse => potentials::morse(r, params[0], params[1], params[2]),
            PotentialKind::LennardJonesCoulomb => {
                potentials::lennard_jones_12_6(r, params[0], params[1])
                    + potentials::coulomb(r, params[2], k_coulomb)
            }
            PotentialKind::MorseCoulomb => {
                potentials::morse(r, params[0], params[1], params[3])
                    + potentials::coulomb(r, params[2], k_coulomb)
            }
        }
    }

    /// Energy and force on atom i for `separation = pos_i - pos_j`, where `r`
    /// is the (guarded) length of `separation`.
    #[inline]
    pub fn pair_term(
        self,
        separation: &Vector3<f64>,
        r: f64,
        params: &[f64],
        k_coulomb: f64,
    ) -> PairTerm {
        PairTerm::from_radial(self.evaluate(r, params, k_coulomb), separation, r)
    }

    /// Evaluates the energy at fixed `r` and writes `dE/dp` for every pair
    /// parameter into `dparams`, in parameter order.
    #[inline]
    pub fn variational(self, r: f64, params: &[f64], k_coulomb: f64, dparams: &mut [f64]) -> f64 {
        debug_assert_eq!(params.len(), self.npar());
        debug_assert_eq!(dparams.len(), self.npar());
        match self {
            PotentialKind::Coulomb => {
                let (energy, de_dqq) = potentials::coulomb_variational(r, params[0], k_coulomb);
                dparams[0] = de_dqq;
                energy
            }
            PotentialKind::LennardJones => {
                let (energy, d) =
                    potentials::lennard_jones_12_6_variational(r, params[0], params[1]);
                dparams.copy_from_slice(&d);
                energy
            }
            PotentialKind::Morse => {
                let (energy, d) =
                    potentials::morse_variational(r, params[0], params[1], params[2]);
                dparams.copy_from_slice(&d);
                energy
            }
            PotentialKind::LennardJonesCoulomb => {
                let (e_lj, [d_r0, d_e0]) =
                    potentials::lennard_jones_12_6_variational(r, params[0], params[1]);
                let (e_coul, d_qq) = potentials::coulomb_variational(r, params[2], k_coulomb);
                dparams.copy_from_slice(&[d_r0, d_e0, d_qq]);
                e_lj + e_coul
            }
            PotentialKind::MorseCoulomb => {
                let (e_morse, [d_r0, d_e0, d_k]) =
                    potentials::morse_variational(r, params[0], params[1], params[3]);
                let (e_coul, d_qq) = potentials::coulomb_variational(r, params[2], k_coulomb);
                dparams.copy_from_slice(&[d_r0, d_e0, d_qq, d_k]);
                e_morse + e_coul
            }
        }
    }
}

impl fmt::Display for PotentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
