pub mod kinematics;
pub mod lorentz;

pub use kinematics::{delta_t, q2, sampling_fraction, vertex_time, virtual_photon, w};
pub use lorentz::{FourVector, LorentzError};
