//! Electron-candidate selection and per-event histogram routing.

use super::histogram::AnalysisHistograms;
use crate::common::constants::{
    MASS_ELECTRON, MASS_PION_CHARGED, MAX_PARTICLES_FOR_SECONDARIES, SAMPLING_FRACTION_MAX,
    SAMPLING_FRACTION_MIN,
};
use crate::common::detector::DetectorRegion;
use crate::domain::Event;
use crate::numerics::kinematics::{delta_t, q2, sampling_fraction, vertex_time, w};
use crate::numerics::lorentz::FourVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionCuts {
    pub sampling_fraction_min: f64,
    pub sampling_fraction_max: f64,
    pub max_particles_for_secondaries: usize,
}

impl Default for SelectionCuts {
    fn default() -> Self {
        Self {
            sampling_fraction_min: SAMPLING_FRACTION_MIN,
            sampling_fraction_max: SAMPLING_FRACTION_MAX,
            max_particles_for_secondaries: MAX_PARTICLES_FOR_SECONDARIES,
        }
    }
}

impl SelectionCuts {
    /// Inclusive window; NaN never passes.
    pub fn accepts_sampling_fraction(&self, sf: f64) -> bool {
        sf >= self.sampling_fraction_min && sf <= self.sampling_fraction_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Empty event or leading particle charge other than -1.
    RejectedCharge,
    RejectedSamplingFraction { sampling_fraction: f64 },
    Accepted(AcceptedElectron),
}

impl EventOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedElectron {
    pub momentum: f64,
    pub sampling_fraction: f64,
    pub w: f64,
    pub q2: f64,
    pub vertex_time: f64,
    pub region: Option<DetectorRegion>,
    pub secondaries_filled: usize,
}

/// Applies the electron selection to one event at a time and fills the
/// accumulators it is handed. Holds no per-event state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventSelector {
    beam: FourVector,
    cuts: SelectionCuts,
}

impl EventSelector {
    pub fn new(beam: FourVector, cuts: SelectionCuts) -> Self {
        Self { beam, cuts }
    }

    pub fn beam(&self) -> FourVector {
        self.beam
    }

    pub fn cuts(&self) -> SelectionCuts {
        self.cuts
    }

    pub fn process(&self, event: &Event, histograms: &mut AnalysisHistograms) -> EventOutcome {
        let Some(leading) = event.leading().filter(|particle| particle.charge == -1) else {
            return EventOutcome::RejectedCharge;
        };

        let electron = leading.four_vector(MASS_ELECTRON);
        let momentum = electron.p();
        let sf = sampling_fraction(leading.ec_tot_energy, momentum);
        histograms.sampling_fraction.fill(momentum, sf);

        if !self.cuts.accepts_sampling_fraction(sf) {
            return EventOutcome::RejectedSamplingFraction {
                sampling_fraction: sf,
            };
        }

        let electron_vertex = vertex_time(leading.sc_ftof_1b_time, leading.sc_ftof_1b_path, 1.0);
        let w_value = w(self.beam, electron);
        let q2_value = q2(self.beam, electron);
        let region = leading.detector_region();
        if let Some(region) = region {
            histograms.region_mut(region).fill(w_value, q2_value);
        }

        let secondaries_filled = if event.len() <= self.cuts.max_particles_for_secondaries {
            fill_pion_timing(event, electron_vertex, histograms)
        } else {
            0
        };

        EventOutcome::Accepted(AcceptedElectron {
            momentum,
            sampling_fraction: sf,
            w: w_value,
            q2: q2_value,
            vertex_time: electron_vertex,
            region,
            secondaries_filled,
        })
    }
}

fn fill_pion_timing(event: &Event, electron_vertex: f64, histograms: &mut AnalysisHistograms) -> usize {
    for particle in event.secondaries() {
        let momentum = particle.four_vector(MASS_PION_CHARGED).p();
        let dt = delta_t(
            electron_vertex,
            momentum,
            particle.sc_ftof_1b_time,
            particle.sc_ftof_1b_path,
            MASS_PION_CHARGED,
        );
        histograms.delta_t_pip.fill(momentum, dt);
    }
    event.secondaries().len()
}
