pub mod analysis;
pub mod histogram;
pub mod reader;
pub mod scan;
pub mod selection;
pub mod serialization;

mod traits;

pub use analysis::{AnalysisConfig, RunReport, render_run_summary, run_analysis};
pub use histogram::{AnalysisHistograms, Axis, Hist1D, Hist2D, RegionHistograms};
pub use reader::{JsonLinesEventFile, MemoryEventSource};
pub use scan::{ScanReport, render_scan_summary, scan_events};
pub use selection::{AcceptedElectron, EventOutcome, EventSelector, SelectionCuts};
pub use traits::{EventSource, Events, OpenEventSource};
