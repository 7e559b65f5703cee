//! Inclusive electron-scattering kinematics and time-of-flight helpers.

use super::lorentz::FourVector;
use crate::common::constants::{MASS_PROTON, SPEED_OF_LIGHT_CM_NS};

/// Virtual-photon four-vector `q = e - e'`.
pub fn virtual_photon(e_mu: FourVector, e_mu_prime: FourVector) -> FourVector {
    e_mu - e_mu_prime
}

/// `Q^2 = -q^2`, non-negative for physical scattering.
pub fn q2(e_mu: FourVector, e_mu_prime: FourVector) -> f64 {
    -virtual_photon(e_mu, e_mu_prime).mag2()
}

/// Invariant mass of the hadronic final state off a proton at rest.
///
/// Unphysical kinematics that leave `p + q` spacelike give NaN.
pub fn w(e_mu: FourVector, e_mu_prime: FourVector) -> f64 {
    let target = FourVector::at_rest(MASS_PROTON);
    (target + virtual_photon(e_mu, e_mu_prime)).mag()
}

/// Scintillator time propagated back to the vertex along `path` (cm).
pub fn vertex_time(sc_time: f64, sc_path: f64, beta: f64) -> f64 {
    sc_time - sc_path / (beta * SPEED_OF_LIGHT_CM_NS)
}

/// Time-of-flight residual under a mass hypothesis. Zero momentum yields NaN.
pub fn delta_t(vertex: f64, momentum: f64, sc_time: f64, sc_path: f64, mass: f64) -> f64 {
    if momentum == 0.0 {
        return f64::NAN;
    }
    let ratio = mass / momentum;
    let beta = 1.0 / (1.0 + ratio * ratio).sqrt();
    vertex - vertex_time(sc_time, sc_path, beta)
}

/// Calorimeter energy over momentum. NaN when the momentum is zero.
pub fn sampling_fraction(calorimeter_energy: f64, momentum: f64) -> f64 {
    if momentum == 0.0 {
        return f64::NAN;
    }
    calorimeter_energy / momentum
}
