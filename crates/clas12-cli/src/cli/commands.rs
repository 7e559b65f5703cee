use super::CliError;
use super::helpers::{ensure_parent_dir, validate_config};
use clas12_core::common::constants::{
    BEAM_ENERGY, MAX_PARTICLES_FOR_SECONDARIES, PROGRESS_INTERVAL, SAMPLING_FRACTION_MAX,
    SAMPLING_FRACTION_MIN,
};
use clas12_core::modules::serialization::{AnalysisArtifact, write_analysis_artifact};
use clas12_core::modules::{
    AnalysisConfig, AnalysisHistograms, JsonLinesEventFile, OpenEventSource, SelectionCuts,
    render_run_summary, render_scan_summary, run_analysis, scan_events,
};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct AnalyzeArgs {
    /// Event file (JSON Lines, one event per line)
    #[arg(value_name = "input")]
    input: PathBuf,

    /// Histogram artifact output path
    #[arg(short, long, default_value = "sf.json")]
    output: PathBuf,

    /// Beam energy in GeV
    #[arg(long, default_value_t = BEAM_ENERGY)]
    beam_energy: f64,

    /// Lower edge of the sampling-fraction window (inclusive)
    #[arg(long, default_value_t = SAMPLING_FRACTION_MIN)]
    sf_min: f64,

    /// Upper edge of the sampling-fraction window (inclusive)
    #[arg(long, default_value_t = SAMPLING_FRACTION_MAX)]
    sf_max: f64,

    /// Largest event size that still gets the pion timing pass
    #[arg(long, default_value_t = MAX_PARTICLES_FOR_SECONDARIES)]
    max_particles: usize,

    /// Events between progress log lines (0 disables)
    #[arg(long, default_value_t = PROGRESS_INTERVAL)]
    progress_every: usize,
}

impl AnalyzeArgs {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            beam_energy: self.beam_energy,
            cuts: SelectionCuts {
                sampling_fraction_min: self.sf_min,
                sampling_fraction_max: self.sf_max,
                max_particles_for_secondaries: self.max_particles,
            },
            progress_every: self.progress_every,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct ScanArgs {
    /// Event file (JSON Lines, one event per line)
    #[arg(value_name = "input")]
    input: PathBuf,
}

pub(super) fn run_analyze_command(args: AnalyzeArgs) -> Result<i32, CliError> {
    let config = args.config();
    validate_config(&config)?;

    let mut source = JsonLinesEventFile::open(&args.input)?;
    let mut histograms = AnalysisHistograms::new();
    let report = run_analysis(&mut source, &config, &mut histograms)?;

    ensure_parent_dir(&args.output)?;
    let artifact = AnalysisArtifact::new(&args.input, &config, &report, &histograms);
    write_analysis_artifact(&args.output, &artifact)?;

    println!();
    println!("{}", render_run_summary(&report));
    println!("Histograms: {}", args.output.display());
    Ok(0)
}

pub(super) fn run_scan_command(args: ScanArgs) -> Result<i32, CliError> {
    let mut source = JsonLinesEventFile::open(&args.input)?;
    let report = scan_events(&mut source)?;
    println!("{}", render_scan_summary(&report));
    Ok(0)
}
