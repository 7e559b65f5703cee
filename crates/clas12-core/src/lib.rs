//! Electron-scattering kinematics and event selection for CLAS12 event records.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
