use super::CliError;
use anyhow::Context;
use clas12_core::modules::AnalysisConfig;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests driving the dispatcher twice) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn validate_config(config: &AnalysisConfig) -> Result<(), CliError> {
    if !(config.beam_energy.is_finite() && config.beam_energy > 0.0) {
        return Err(CliError::Usage(format!(
            "--beam-energy must be a positive number, got {}",
            config.beam_energy
        )));
    }

    let cuts = &config.cuts;
    if !(cuts.sampling_fraction_min.is_finite() && cuts.sampling_fraction_max.is_finite()) {
        return Err(CliError::Usage(
            "--sf-min and --sf-max must be finite".to_string(),
        ));
    }
    if cuts.sampling_fraction_min > cuts.sampling_fraction_max {
        return Err(CliError::Usage(format!(
            "--sf-min ({}) must not exceed --sf-max ({})",
            cuts.sampling_fraction_min, cuts.sampling_fraction_max
        )));
    }
    Ok(())
}

pub(super) fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory '{}'", parent.display())
        })?;
    }
    Ok(())
}
