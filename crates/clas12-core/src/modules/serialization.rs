//! JSON artifact holding the run metadata and every accumulator.
//!
//! Only occupied bins are stored, as `[index, count]` for 1D and
//! `[ix, iy, count]` for 2D histograms.

use super::analysis::{AnalysisConfig, RunReport};
use super::histogram::{AnalysisHistograms, Axis, Hist1D, Hist2D};
use crate::domain::{Clas12Error, Clas12Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const ARTIFACT_FORMAT: &str = "clas12-histograms/1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1DRecord {
    pub name: String,
    pub title: String,
    pub axis: Axis,
    pub entries: u64,
    pub underflow: u64,
    pub overflow: u64,
    pub nan_fills: u64,
    pub bins: Vec<(usize, u64)>,
}

impl From<&Hist1D> for Histogram1DRecord {
    fn from(hist: &Hist1D) -> Self {
        Self {
            name: hist.name().to_owned(),
            title: hist.title().to_owned(),
            axis: hist.axis(),
            entries: hist.entries(),
            underflow: hist.underflow(),
            overflow: hist.overflow(),
            nan_fills: hist.nan_fills(),
            bins: hist
                .counts()
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(index, count)| (index, *count))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram2DRecord {
    pub name: String,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub entries: u64,
    pub out_of_range: u64,
    pub nan_fills: u64,
    pub bins: Vec<(usize, usize, u64)>,
}

impl From<&Hist2D> for Histogram2DRecord {
    fn from(hist: &Hist2D) -> Self {
        Self {
            name: hist.name().to_owned(),
            title: hist.title().to_owned(),
            x_axis: hist.x_axis(),
            y_axis: hist.y_axis(),
            entries: hist.entries(),
            out_of_range: hist.out_of_range(),
            nan_fills: hist.nan_fills(),
            bins: hist.occupied_cells().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisArtifact {
    pub format: String,
    pub input: String,
    pub config: AnalysisConfig,
    pub report: RunReport,
    pub histograms_2d: Vec<Histogram2DRecord>,
    pub histograms_1d: Vec<Histogram1DRecord>,
}

impl AnalysisArtifact {
    pub fn new(
        input: &Path,
        config: &AnalysisConfig,
        report: &RunReport,
        histograms: &AnalysisHistograms,
    ) -> Self {
        Self {
            format: ARTIFACT_FORMAT.to_owned(),
            input: input.display().to_string(),
            config: *config,
            report: *report,
            histograms_2d: histograms
                .hist2d_in_write_order()
                .into_iter()
                .map(Histogram2DRecord::from)
                .collect(),
            histograms_1d: histograms
                .hist1d_in_write_order()
                .into_iter()
                .map(Histogram1DRecord::from)
                .collect(),
        }
    }
}

pub fn write_analysis_artifact(path: &Path, artifact: &AnalysisArtifact) -> Clas12Result<()> {
    let mut content = serde_json::to_string_pretty(artifact).map_err(|source| {
        Clas12Error::internal(
            "SYS.ARTIFACT_ENCODE",
            format!("failed to encode histogram artifact: {}", source),
        )
    })?;
    content.push('\n');
    fs::write(path, content).map_err(|source| {
        Clas12Error::io_system(
            "IO.ARTIFACT_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })
}

pub fn read_analysis_artifact(path: &Path) -> Clas12Result<AnalysisArtifact> {
    let content = fs::read_to_string(path).map_err(|source| {
        Clas12Error::io_system(
            "IO.ARTIFACT_READ",
            format!("failed to read '{}': {}", path.display(), source),
        )
    })?;
    serde_json::from_str(&content).map_err(|source| {
        Clas12Error::input_validation(
            "INPUT.ARTIFACT",
            format!("invalid histogram artifact '{}': {}", path.display(), source),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{AnalysisArtifact, read_analysis_artifact, write_analysis_artifact};
    use crate::common::detector::DetectorRegion;
    use crate::modules::analysis::{AnalysisConfig, RunReport};
    use crate::modules::histogram::AnalysisHistograms;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn repeated_artifact_writes_produce_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("sf.json");
        let mut histograms = AnalysisHistograms::new();
        histograms.sampling_fraction.fill(4.01, 0.251);
        let artifact = AnalysisArtifact::new(
            Path::new("run.jsonl"),
            &AnalysisConfig::default(),
            &RunReport::default(),
            &histograms,
        );

        write_analysis_artifact(&path, &artifact).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");
        write_analysis_artifact(&path, &artifact).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert!(second.ends_with(b"}\n"));
        assert!(!second.contains(&b'\r'));
    }

    #[test]
    fn artifact_stores_only_occupied_bins() {
        let mut histograms = AnalysisHistograms::new();
        histograms.sampling_fraction.fill(4.01, 0.251);
        histograms.sampling_fraction.fill(4.01, 0.251);
        histograms.sampling_fraction.fill(12.0, 0.251);
        histograms
            .region_mut(DetectorRegion::ForwardDetector)
            .fill(1.234, 2.0);

        let report = RunReport {
            total: 3,
            processed: 1,
            ..RunReport::default()
        };
        let artifact = AnalysisArtifact::new(
            Path::new("run.jsonl"),
            &AnalysisConfig::default(),
            &report,
            &histograms,
        );

        let sf = &artifact.histograms_2d[0];
        assert_eq!(sf.name, "sampling_fraction_hist");
        assert_eq!(sf.bins, vec![(200, 125, 2)]);
        assert_eq!(sf.entries, 3);
        assert_eq!(sf.out_of_range, 1);

        let w_fd = artifact
            .histograms_1d
            .iter()
            .find(|record| record.name == "w_FD")
            .expect("w_FD should be present");
        assert_eq!(w_fd.bins, vec![(123, 1)]);
        assert_eq!(artifact.input, "run.jsonl");
        assert_eq!(artifact.report.processed, 1);
    }

    #[test]
    fn artifact_roundtrips_through_disk() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("sf.json");
        let mut histograms = AnalysisHistograms::new();
        histograms.delta_t_pip.fill(1.0, f64::NAN);
        let artifact = AnalysisArtifact::new(
            Path::new("in.jsonl"),
            &AnalysisConfig::default(),
            &RunReport::default(),
            &histograms,
        );

        write_analysis_artifact(&path, &artifact).expect("artifact should be written");
        let restored = read_analysis_artifact(&path).expect("artifact should be readable");
        assert_eq!(restored, artifact);
        assert_eq!(restored.histograms_2d[1].nan_fills, 1);
    }

    #[test]
    fn writing_into_missing_directory_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("missing/sf.json");
        let artifact = AnalysisArtifact::new(
            Path::new("in.jsonl"),
            &AnalysisConfig::default(),
            &RunReport::default(),
            &AnalysisHistograms::new(),
        );
        let error = write_analysis_artifact(&path, &artifact).expect_err("write should fail");
        assert_eq!(error.code(), "IO.ARTIFACT_WRITE");
        assert_eq!(error.exit_code(), 3);
    }
}
