use super::term::RadialTerm;

pub const COULOMB_CONSTANT_EV: f64 = 14.3996448915; // In eV·Å/e²
pub const COULOMB_CONSTANT_KCAL: f64 = 332.0637; // In kcal·Å/(mol·e²)

#[inline]
pub fn coulomb(r: f64, qq: f64, k_coulomb: f64) -> RadialTerm {
    let energy = k_coulomb * qq / r;
    RadialTerm::new(energy, -energy / r)
}

#[inline]
pub fn lennard_jones_12_6(r: f64, r0: f64, e0: f64) -> RadialTerm {
    let inv_r = 1.0 / r;
    let rho = r0 * inv_r;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    RadialTerm::new(
        e0 * (rho12 - 2.0 * rho6),
        -12.0 * e0 * (rho12 - rho6) * inv_r,
    )
}

#[inline]
pub fn morse(r: f64, r0: f64, e0: f64, k: f64) -> RadialTerm {
    let e = (-k * (r - r0)).exp();
    let e2 = e * e;
    RadialTerm::new(e0 * (e2 - 2.0 * e), -2.0 * e0 * k * (e2 - e))
}

/// Returns the energy and `dE/dqq`.
#[inline]
pub fn coulomb_variational(r: f64, qq: f64, k_coulomb: f64) -> (f64, f64) {
    (k_coulomb * qq / r, k_coulomb / r)
}

/// Returns the energy and `[dE/dR0, dE/dE0]`.
#[inline]
pub fn lennard_jones_12_6_variational(r: f64, r0: f64, e0: f64) -> (f64, [f64; 2]) {
    let inv_r = 1.0 / r;
    let rho = r0 * inv_r;
    let rho5 = rho.powi(5);
    let rho6 = rho5 * rho;
    let rho11 = rho5 * rho6;
    let rho12 = rho6 * rho6;
    let de_de0 = rho12 - 2.0 * rho6;
    let de_dr0 = 12.0 * e0 * (rho11 - rho5) * inv_r;
    (e0 * de_de0, [de_dr0, de_de0])
}

/// Returns the energy and `[dE/dR0, dE/dE0, dE/dk]`.
#[inline]
pub fn morse_variational(r: f64, r0: f64, e0: f64, k: f64) -> (f64, [f64; 3]) {
    let dr = r - r0;
    let e = (-k * dr).exp();
    let e2 = e * e;
    let de_de0 = e2 - 2.0 * e;
    let de_dr0 = 2.0 * e0 * k * (e2 - e);
    let de_dk = -2.0 * e0 * dr * (e2 - e);
    (e0 * de_de0, [de_dr0, de_de0, de_dk])
}
