//! Detector-system labels for reconstructed particles.
//!
//! CLAS12 splits its acceptance into the forward tagger (FT), the forward
//! detector (FD) and the central detector (CD). The REC::Particle `status`
//! word encodes the same split in its thousands digit.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorRegion {
    #[serde(rename = "FT")]
    ForwardTagger,
    #[serde(rename = "FD")]
    ForwardDetector,
    #[serde(rename = "CD")]
    CentralDetector,
}

impl DetectorRegion {
    pub const ALL: [Self; 3] = [
        Self::ForwardTagger,
        Self::ForwardDetector,
        Self::CentralDetector,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForwardTagger => "FT",
            Self::ForwardDetector => "FD",
            Self::CentralDetector => "CD",
        }
    }

    /// Tags are matched exactly; anything outside {FT, FD, CD} is unrecognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "FT" => Some(Self::ForwardTagger),
            "FD" => Some(Self::ForwardDetector),
            "CD" => Some(Self::CentralDetector),
            _ => None,
        }
    }

    pub fn from_status(status: i32) -> Option<Self> {
        match status.unsigned_abs() {
            1000..=1999 => Some(Self::ForwardTagger),
            2000..=3999 => Some(Self::ForwardDetector),
            4000..=4999 => Some(Self::CentralDetector),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::ForwardTagger => 0,
            Self::ForwardDetector => 1,
            Self::CentralDetector => 2,
        }
    }
}

impl Display for DetectorRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
