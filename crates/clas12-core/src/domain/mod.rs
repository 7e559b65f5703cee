pub mod errors;

pub use errors::{AnalysisResult, Clas12Error, Clas12ErrorCategory, Clas12Result, ReaderResult};

use crate::common::detector::DetectorRegion;
use crate::numerics::lorentz::FourVector;
use serde::{Deserialize, Serialize};

/// One reconstructed particle as seen by the analysis.
///
/// Detector responses the particle did not produce (no calorimeter cluster, no
/// FTOF 1b hit) are NaN, the same convention the DST converter uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub charge: i32,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    #[serde(default = "missing_response")]
    pub ec_tot_energy: f64,
    #[serde(default = "missing_response")]
    pub sc_ftof_1b_time: f64,
    #[serde(default = "missing_response")]
    pub sc_ftof_1b_path: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

fn missing_response() -> f64 {
    f64::NAN
}

impl ParticleRecord {
    pub fn new(charge: i32, px: f64, py: f64, pz: f64) -> Self {
        Self {
            charge,
            px,
            py,
            pz,
            ec_tot_energy: f64::NAN,
            sc_ftof_1b_time: f64::NAN,
            sc_ftof_1b_path: f64::NAN,
            detector_system: None,
            status: None,
        }
    }

    pub fn with_calorimeter_energy(mut self, ec_tot_energy: f64) -> Self {
        self.ec_tot_energy = ec_tot_energy;
        self
    }

    pub fn with_ftof_1b(mut self, time: f64, path: f64) -> Self {
        self.sc_ftof_1b_time = time;
        self.sc_ftof_1b_path = path;
        self
    }

    pub fn with_detector_system(mut self, tag: impl Into<String>) -> Self {
        self.detector_system = Some(tag.into());
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn momentum_magnitude(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    pub fn four_vector(&self, mass: f64) -> FourVector {
        FourVector::from_mass(self.px, self.py, self.pz, mass)
    }

    /// An explicit tag wins over the status word; an unknown tag is not
    /// rescued by the status.
    pub fn detector_region(&self) -> Option<DetectorRegion> {
        match (&self.detector_system, self.status) {
            (Some(tag), _) => DetectorRegion::from_tag(tag),
            (None, Some(status)) => DetectorRegion::from_status(status),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    particles: Vec<ParticleRecord>,
}

impl Event {
    pub fn new(particles: Vec<ParticleRecord>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[ParticleRecord] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&ParticleRecord> {
        self.particles.get(index)
    }

    /// Index 0 is the trigger particle by convention.
    pub fn leading(&self) -> Option<&ParticleRecord> {
        self.particles.first()
    }

    pub fn secondaries(&self) -> &[ParticleRecord] {
        self.particles.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, ParticleRecord};
    use crate::common::detector::DetectorRegion;

    #[test]
    fn missing_detector_responses_deserialize_as_nan() {
        let record: ParticleRecord =
            serde_json::from_str(r#"{"charge":-1,"px":0.1,"py":0.2,"pz":3.0}"#)
                .expect("minimal record should parse");
        assert!(record.ec_tot_energy.is_nan());
        assert!(record.sc_ftof_1b_time.is_nan());
        assert!(record.sc_ftof_1b_path.is_nan());
        assert_eq!(record.detector_region(), None);
    }

    #[test]
    fn explicit_tag_takes_precedence_over_status() {
        let tagged = ParticleRecord::new(-1, 0.0, 0.0, 1.0)
            .with_detector_system("CD")
            .with_status(2110);
        assert_eq!(tagged.detector_region(), Some(DetectorRegion::CentralDetector));

        let unknown_tag = ParticleRecord::new(-1, 0.0, 0.0, 1.0)
            .with_detector_system("BAND")
            .with_status(2110);
        assert_eq!(unknown_tag.detector_region(), None);

        let status_only = ParticleRecord::new(-1, 0.0, 0.0, 1.0).with_status(-1010);
        assert_eq!(
            status_only.detector_region(),
            Some(DetectorRegion::ForwardTagger)
        );
    }

    #[test]
    fn empty_event_has_no_leading_particle_or_secondaries() {
        let event = Event::default();
        assert!(event.is_empty());
        assert!(event.leading().is_none());
        assert!(event.secondaries().is_empty());
    }

    #[test]
    fn secondaries_skip_the_leading_particle() {
        let event = Event::new(vec![
            ParticleRecord::new(-1, 0.0, 0.0, 2.0),
            ParticleRecord::new(1, 0.0, 0.0, 1.0),
            ParticleRecord::new(0, 0.0, 0.0, 0.5),
        ]);
        assert_eq!(event.len(), 3);
        assert_eq!(event.leading().map(|particle| particle.charge), Some(-1));
        let charges: Vec<i32> = event.secondaries().iter().map(|p| p.charge).collect();
        assert_eq!(charges, vec![1, 0]);
        assert_eq!(event.particle(2).map(|particle| particle.pz), Some(0.5));
        assert!(event.particle(3).is_none());
    }

    #[test]
    fn momentum_magnitude_is_euclidean_norm() {
        let record = ParticleRecord::new(1, 3.0, 4.0, 12.0);
        assert_eq!(record.momentum_magnitude(), 13.0);
    }
}
