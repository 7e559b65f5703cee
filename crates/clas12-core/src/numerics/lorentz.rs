//! Relativistic energy-momentum four-vectors in natural units (GeV, c = 1).

use std::ops::{Add, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LorentzError {
    #[error("invariant mass is imaginary for a spacelike four-vector (mag2={mag2})")]
    Spacelike { mag2: f64 },
}

/// Four-vector `(px, py, pz, E)`.
///
/// Components are fixed at construction; arithmetic returns new vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourVector {
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
}

impl FourVector {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// On-shell vector: `E = sqrt(|p|^2 + m^2)`.
    pub fn from_mass(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        let e = (px * px + py * py + pz * pz + mass * mass).sqrt();
        Self::new(px, py, pz, e)
    }

    pub const fn from_energy(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self::new(px, py, pz, e)
    }

    pub const fn at_rest(mass: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mass)
    }

    pub const fn px(&self) -> f64 {
        self.px
    }

    pub const fn py(&self) -> f64 {
        self.py
    }

    pub const fn pz(&self) -> f64 {
        self.pz
    }

    pub const fn e(&self) -> f64 {
        self.e
    }

    /// `E^2 - |p|^2`; negative for spacelike vectors.
    pub fn mag2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass. Spacelike vectors give NaN, exactly like `f64::sqrt`.
    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// `-sqrt(-mag2)` for spacelike vectors, `sqrt(mag2)` otherwise.
    pub fn signed_mag(&self) -> f64 {
        let mag2 = self.mag2();
        if mag2 < 0.0 {
            -(-mag2).sqrt()
        } else {
            mag2.sqrt()
        }
    }

    pub fn checked_mag(&self) -> Result<f64, LorentzError> {
        let mag2 = self.mag2();
        if mag2 < 0.0 {
            return Err(LorentzError::Spacelike { mag2 });
        }
        Ok(mag2.sqrt())
    }

    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    pub fn is_spacelike(&self) -> bool {
        self.mag2() < 0.0
    }
}

impl Add for FourVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.px + other.px,
            self.py + other.py,
            self.pz + other.pz,
            self.e + other.e,
        )
    }
}

impl Sub for FourVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.px - other.px,
            self.py - other.py,
            self.pz - other.pz,
            self.e - other.e,
        )
    }
}

impl Neg for FourVector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.px, -self.py, -self.pz, -self.e)
    }
}
