//! Physical constants and run defaults for the CLAS12 electron analysis.
//!
//! Masses are in GeV, lengths in cm and times in ns, matching the units of the
//! reconstructed particle and scintillator banks.

/// Nominal beam energy of the reference run.
pub const BEAM_ENERGY: f64 = 10.9;
pub const MASS_ELECTRON: f64 = 0.000_511;
/// Proton mass used for the fixed target at rest.
pub const MASS_PROTON: f64 = 0.938_27;
pub const MASS_PION_CHARGED: f64 = 0.139_570_18;
/// Speed of light in cm/ns.
pub const SPEED_OF_LIGHT_CM_NS: f64 = 29.979_245_8;

pub const SAMPLING_FRACTION_MIN: f64 = 0.2;
pub const SAMPLING_FRACTION_MAX: f64 = 0.3;
/// Events with more particles than this skip the secondary time-of-flight pass.
pub const MAX_PARTICLES_FOR_SECONDARIES: usize = 4;
pub const PROGRESS_INTERVAL: usize = 5000;
