//! Read-throughput check: decode every event and do nothing else.

use super::analysis::rate;
use super::traits::EventSource;
use crate::domain::ReaderResult;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub total: usize,
    pub particles: usize,
    pub elapsed_seconds: f64,
}

impl ScanReport {
    pub fn rate_hz(&self) -> f64 {
        rate(self.total, self.elapsed_seconds)
    }
}

pub fn scan_events<S: EventSource>(source: &mut S) -> ReaderResult<ScanReport> {
    let start = Instant::now();
    let mut report = ScanReport::default();
    for event in source.events() {
        let event = event?;
        report.total += 1;
        report.particles += event.len();
    }
    report.elapsed_seconds = start.elapsed().as_secs_f64();
    tracing::debug!(
        total = report.total,
        particles = report.particles,
        "scan finished"
    );
    Ok(report)
}

pub fn render_scan_summary(report: &ScanReport) -> String {
    format!(
        "{} sec\n{} hz\nEvents read: {}",
        report.elapsed_seconds,
        report.rate_hz(),
        report.total
    )
}
