//! Single-pass electron analysis driver.

use super::histogram::AnalysisHistograms;
use super::selection::{EventOutcome, EventSelector, SelectionCuts};
use super::traits::EventSource;
use crate::common::constants::{BEAM_ENERGY, PROGRESS_INTERVAL};
use crate::domain::AnalysisResult;
use crate::numerics::lorentz::FourVector;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub beam_energy: f64,
    pub cuts: SelectionCuts,
    /// Events between progress log lines; zero disables them.
    pub progress_every: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            beam_energy: BEAM_ENERGY,
            cuts: SelectionCuts::default(),
            progress_every: PROGRESS_INTERVAL,
        }
    }
}

impl AnalysisConfig {
    /// Massless beam electron along +z.
    pub fn beam(&self) -> FourVector {
        FourVector::from_energy(0.0, 0.0, self.beam_energy, self.beam_energy)
    }

    pub fn selector(&self) -> EventSelector {
        EventSelector::new(self.beam(), self.cuts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Events read from the source.
    pub total: usize,
    /// Events that passed the electron selection.
    pub processed: usize,
    pub rejected_charge: usize,
    pub rejected_sampling_fraction: usize,
    pub unclassified_region: usize,
    pub elapsed_seconds: f64,
}

impl RunReport {
    pub fn rate_hz(&self) -> f64 {
        rate(self.processed, self.elapsed_seconds)
    }

    pub fn read_rate_hz(&self) -> f64 {
        rate(self.total, self.elapsed_seconds)
    }

    fn record(&mut self, outcome: &EventOutcome) {
        match outcome {
            EventOutcome::RejectedCharge => self.rejected_charge += 1,
            EventOutcome::RejectedSamplingFraction { .. } => self.rejected_sampling_fraction += 1,
            EventOutcome::Accepted(accepted) => {
                self.processed += 1;
                if accepted.region.is_none() {
                    self.unclassified_region += 1;
                }
            }
        }
    }
}

pub(crate) fn rate(count: usize, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds > 0.0 {
        count as f64 / elapsed_seconds
    } else {
        0.0
    }
}

/// Draws `source` to completion, filling `histograms`. The first reader
/// error aborts the run.
pub fn run_analysis<S: EventSource>(
    source: &mut S,
    config: &AnalysisConfig,
    histograms: &mut AnalysisHistograms,
) -> AnalysisResult<RunReport> {
    let selector = config.selector();
    let expected = source.len();
    let start = Instant::now();
    let mut report = RunReport::default();

    tracing::info!(
        events = expected,
        beam_energy = config.beam_energy,
        "starting electron analysis"
    );

    for event in source.events() {
        let event = event?;
        report.total += 1;
        let outcome = selector.process(&event, histograms);
        report.record(&outcome);

        if config.progress_every > 0 && report.total % config.progress_every == 0 {
            tracing::info!(
                read = report.total,
                of = expected,
                processed = report.processed,
                "analysis progress"
            );
        }
    }

    report.elapsed_seconds = start.elapsed().as_secs_f64();
    tracing::info!(
        total = report.total,
        processed = report.processed,
        elapsed_seconds = report.elapsed_seconds,
        "electron analysis finished"
    );
    if report.total != expected {
        tracing::warn!(
            expected,
            read = report.total,
            "event source yielded a different count than it announced"
        );
    }
    Ok(report)
}

pub fn render_run_summary(report: &RunReport) -> String {
    format!(
        "{} sec\n{} hz\nEvents read: {}\nElectrons selected: {}",
        report.elapsed_seconds,
        report.rate_hz(),
        report.total,
        report.processed
    )
}

#[cfg(test)]
mod tests {
    use super::{AnalysisConfig, RunReport, render_run_summary, run_analysis};
    use crate::common::detector::DetectorRegion;
    use crate::domain::{Clas12Error, Event, ParticleRecord, ReaderResult};
    use crate::modules::histogram::AnalysisHistograms;
    use crate::modules::reader::MemoryEventSource;
    use crate::modules::traits::EventSource;

    fn electron(sf: f64, tag: &str) -> ParticleRecord {
        ParticleRecord::new(-1, 0.0, 0.0, 4.0)
            .with_calorimeter_energy(sf * 4.0)
            .with_ftof_1b(25.0, 700.0)
            .with_detector_system(tag)
    }

    #[test]
    fn three_event_stream_processes_one_electron() {
        let mut source = MemoryEventSource::new(vec![
            Event::new(vec![ParticleRecord::new(1, 0.0, 0.0, 4.0).with_calorimeter_energy(1.0)]),
            Event::new(vec![electron(0.25, "FD")]),
            Event::new(vec![electron(0.5, "FD")]),
        ]);
        let mut histograms = AnalysisHistograms::new();

        let report = run_analysis(&mut source, &AnalysisConfig::default(), &mut histograms)
            .expect("in-memory run should succeed");

        assert_eq!(report.total, 3);
        assert_eq!(report.processed, 1);
        assert_eq!(report.rejected_charge, 1);
        assert_eq!(report.rejected_sampling_fraction, 1);
        assert_eq!(report.unclassified_region, 0);
        assert_eq!(histograms.sampling_fraction.entries(), 2);
        let fd = histograms.region(DetectorRegion::ForwardDetector);
        assert_eq!(fd.w.entries(), 1);
        assert_eq!(histograms.region(DetectorRegion::ForwardTagger).entries(), 0);
        assert_eq!(histograms.region(DetectorRegion::CentralDetector).entries(), 0);
    }

    #[test]
    fn unclassified_regions_are_counted_as_processed() {
        let mut source = MemoryEventSource::new(vec![Event::new(vec![electron(0.25, "XX")])]);
        let mut histograms = AnalysisHistograms::new();
        let report = run_analysis(&mut source, &AnalysisConfig::default(), &mut histograms)
            .expect("in-memory run should succeed");
        assert_eq!(report.processed, 1);
        assert_eq!(report.unclassified_region, 1);
    }

    struct BrokenAfterFirst {
        served: bool,
    }

    impl EventSource for BrokenAfterFirst {
        fn len(&self) -> usize {
            5
        }

        fn next_event(&mut self) -> ReaderResult<Option<Event>> {
            if self.served {
                return Err(Clas12Error::io_system("IO.EVENT_FILE", "truncated input"));
            }
            self.served = true;
            Ok(Some(Event::new(vec![electron(0.25, "CD")])))
        }
    }

    #[test]
    fn reader_failure_aborts_the_run() {
        let mut histograms = AnalysisHistograms::new();
        let error = run_analysis(
            &mut BrokenAfterFirst { served: false },
            &AnalysisConfig::default(),
            &mut histograms,
        )
        .expect_err("reader error should propagate");
        assert_eq!(error.code(), "IO.EVENT_FILE");
        assert_eq!(
            histograms.region(DetectorRegion::CentralDetector).entries(),
            1
        );
    }

    #[test]
    fn custom_window_changes_acceptance() {
        let mut config = AnalysisConfig::default();
        config.cuts.sampling_fraction_max = 0.6;
        config.progress_every = 1;
        let mut source = MemoryEventSource::new(vec![Event::new(vec![electron(0.5, "FT")])]);
        let mut histograms = AnalysisHistograms::new();
        let report =
            run_analysis(&mut source, &config, &mut histograms).expect("run should succeed");
        assert_eq!(report.processed, 1);
        assert_eq!(histograms.region(DetectorRegion::ForwardTagger).entries(), 1);
    }

    #[test]
    fn rates_are_zero_without_elapsed_time() {
        let report = RunReport {
            total: 10,
            processed: 4,
            ..RunReport::default()
        };
        assert_eq!(report.rate_hz(), 0.0);
        assert_eq!(report.read_rate_hz(), 0.0);

        let timed = RunReport {
            elapsed_seconds: 2.0,
            ..report
        };
        assert_eq!(timed.rate_hz(), 2.0);
        assert_eq!(timed.read_rate_hz(), 5.0);
    }

    #[test]
    fn summary_lists_elapsed_time_and_rate() {
        let report = RunReport {
            total: 3,
            processed: 1,
            elapsed_seconds: 0.5,
            ..RunReport::default()
        };
        let summary = render_run_summary(&report);
        assert_eq!(
            summary,
            "0.5 sec\n2 hz\nEvents read: 3\nElectrons selected: 1"
        );
    }

    #[test]
    fn default_config_matches_reference_run() {
        let config = AnalysisConfig::default();
        assert_eq!(config.beam_energy, 10.9);
        assert_eq!(config.cuts.sampling_fraction_min, 0.2);
        assert_eq!(config.cuts.sampling_fraction_max, 0.3);
        assert_eq!(config.cuts.max_particles_for_secondaries, 4);
        assert_eq!(config.progress_every, 5000);
        assert_eq!(config.beam().mag2(), 0.0);
    }
}
