//! Fixed-width binned accumulators.
//!
//! Bins are lower-edge inclusive and upper-edge exclusive. Values outside the
//! axis range land in underflow/overflow; NaN fills are tallied separately and
//! never touch the bins or the entry count.

use crate::common::detector::DetectorRegion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub bins: usize,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisSlot {
    Underflow,
    Bin(usize),
    Overflow,
}

impl Axis {
    pub const fn new(bins: usize, min: f64, max: f64) -> Self {
        Self { bins, min, max }
    }

    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    pub fn bin_center(&self, index: usize) -> f64 {
        self.min + (index as f64 + 0.5) * self.width()
    }

    fn locate(&self, value: f64) -> Option<AxisSlot> {
        if value.is_nan() {
            return None;
        }
        if value < self.min {
            return Some(AxisSlot::Underflow);
        }
        // An axis without bins holds nothing in range.
        let last = match self.bins.checked_sub(1) {
            Some(last) if value < self.max => last,
            _ => return Some(AxisSlot::Overflow),
        };
        let index = ((value - self.min) / self.width()) as usize;
        // Rounding can push a value just below `max` past the last bin.
        Some(AxisSlot::Bin(index.min(last)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hist1D {
    name: String,
    title: String,
    axis: Axis,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    entries: u64,
    nan_fills: u64,
}

impl Hist1D {
    pub fn new(name: impl Into<String>, title: impl Into<String>, axis: Axis) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            counts: vec![0; axis.bins],
            axis,
            underflow: 0,
            overflow: 0,
            entries: 0,
            nan_fills: 0,
        }
    }

    pub fn fill(&mut self, value: f64) {
        match self.axis.locate(value) {
            None => self.nan_fills += 1,
            Some(slot) => {
                self.entries += 1;
                match slot {
                    AxisSlot::Underflow => self.underflow += 1,
                    AxisSlot::Overflow => self.overflow += 1,
                    AxisSlot::Bin(index) => self.counts[index] += 1,
                }
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bin_count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn nan_fills(&self) -> u64 {
        self.nan_fills
    }

    pub fn in_range(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Two-axis accumulator. A fill is out of range when either coordinate misses
/// its axis; per-axis under/overflow are not split out.
#[derive(Debug, Clone, PartialEq)]
pub struct Hist2D {
    name: String,
    title: String,
    x_axis: Axis,
    y_axis: Axis,
    counts: Vec<u64>,
    out_of_range: u64,
    entries: u64,
    nan_fills: u64,
}

impl Hist2D {
    pub fn new(name: impl Into<String>, title: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            counts: vec![0; x_axis.bins * y_axis.bins],
            x_axis,
            y_axis,
            out_of_range: 0,
            entries: 0,
            nan_fills: 0,
        }
    }

    pub fn fill(&mut self, x: f64, y: f64) {
        match (self.x_axis.locate(x), self.y_axis.locate(y)) {
            (Some(AxisSlot::Bin(ix)), Some(AxisSlot::Bin(iy))) => {
                self.entries += 1;
                self.counts[iy * self.x_axis.bins + ix] += 1;
            }
            (Some(_), Some(_)) => {
                self.entries += 1;
                self.out_of_range += 1;
            }
            _ => self.nan_fills += 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_axis(&self) -> Axis {
        self.x_axis
    }

    pub fn y_axis(&self) -> Axis {
        self.y_axis
    }

    pub fn bin_count(&self, ix: usize, iy: usize) -> u64 {
        if ix >= self.x_axis.bins || iy >= self.y_axis.bins {
            return 0;
        }
        self.counts[iy * self.x_axis.bins + ix]
    }

    /// Non-empty cells as `(ix, iy, count)`, x fastest.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        let nx = self.x_axis.bins;
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(move |(flat, count)| (flat % nx, flat / nx, *count))
    }

    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn nan_fills(&self) -> u64 {
        self.nan_fills
    }

    pub fn in_range(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionHistograms {
    pub w: Hist1D,
    pub w_vs_q2: Hist2D,
}

impl RegionHistograms {
    fn book(region: DetectorRegion) -> Self {
        let w_axis = Axis::new(500, 0.0, 5.0);
        let q2_axis = Axis::new(500, 0.0, 5.0);
        Self {
            w: Hist1D::new(format!("w_{}", region.as_str()), "w", w_axis),
            w_vs_q2: Hist2D::new(
                format!("w_vs_q2_{}", region.as_str()),
                "w_vs_q2",
                w_axis,
                q2_axis,
            ),
        }
    }

    pub fn fill(&mut self, w: f64, q2: f64) {
        self.w.fill(w);
        self.w_vs_q2.fill(w, q2);
    }

    pub fn entries(&self) -> u64 {
        self.w.entries() + self.w.nan_fills()
    }
}

/// Every accumulator the electron analysis fills, owned by the run driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisHistograms {
    pub sampling_fraction: Hist2D,
    pub delta_t_pip: Hist2D,
    regions: [RegionHistograms; 3],
}

impl AnalysisHistograms {
    pub fn new() -> Self {
        Self {
            sampling_fraction: Hist2D::new(
                "sampling_fraction_hist",
                "sampling_fraction_hist",
                Axis::new(500, 0.0, 10.0),
                Axis::new(500, 0.0, 1.0),
            ),
            delta_t_pip: Hist2D::new(
                "delta_t_pip_hist",
                "delta_t_pip_hist",
                Axis::new(500, 0.0, 10.0),
                Axis::new(500, -5.0, 5.0),
            ),
            regions: DetectorRegion::ALL.map(RegionHistograms::book),
        }
    }

    pub fn region(&self, region: DetectorRegion) -> &RegionHistograms {
        &self.regions[region.index()]
    }

    pub fn region_mut(&mut self, region: DetectorRegion) -> &mut RegionHistograms {
        &mut self.regions[region.index()]
    }

    /// 2D histograms in write order: sampling fraction, timing, then each
    /// region's `w_vs_q2`.
    pub fn hist2d_in_write_order(&self) -> Vec<&Hist2D> {
        let mut ordered = vec![&self.sampling_fraction, &self.delta_t_pip];
        ordered.extend(self.regions.iter().map(|region| &region.w_vs_q2));
        ordered
    }

    pub fn hist1d_in_write_order(&self) -> Vec<&Hist1D> {
        self.regions.iter().map(|region| &region.w).collect()
    }
}

impl Default for AnalysisHistograms {
    fn default() -> Self {
        Self::new()
    }
}
