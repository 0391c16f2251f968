use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_INVERT, DEFAULT_K, DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_AREA_PX, DEFAULT_PERCENTILE,
};
use crate::error::{BlobscanError, Result};

/// How the detection threshold is derived from the scene statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdMode {
    /// Threshold = mean ± k * stddev.
    StdDev(f64),
    /// Threshold = nearest-rank percentile of the valid cells.
    Percentile(f64),
}

impl std::fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StdDev(k) => write!(f, "Mean ± {k}σ"),
            Self::Percentile(p) => write!(f, "Percentile ({p})"),
        }
    }
}

/// Configuration for candidate detection across one or more scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Standard-deviation multiplier, used when `percentile` is 0.
    #[serde(default = "default_k")]
    pub k: f64,
    /// Percentile in (0, 100); 0 selects the std-dev threshold instead.
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    /// Detect dark features (values at or below the threshold).
    #[serde(default = "default_invert")]
    pub invert: bool,
    /// Minimum connected component area in pixels.
    #[serde(default = "default_min_area_px")]
    pub min_area_px: usize,
    /// Maximum candidates kept across all scenes; 0 keeps everything.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_k() -> f64 {
    DEFAULT_K
}
fn default_percentile() -> f64 {
    DEFAULT_PERCENTILE
}
fn default_invert() -> bool {
    DEFAULT_INVERT
}
fn default_min_area_px() -> usize {
    DEFAULT_MIN_AREA_PX
}
fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            percentile: DEFAULT_PERCENTILE,
            invert: DEFAULT_INVERT,
            min_area_px: DEFAULT_MIN_AREA_PX,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl DetectionConfig {
    pub fn threshold_mode(&self) -> ThresholdMode {
        if self.percentile > 0.0 {
            ThresholdMode::Percentile(self.percentile)
        } else {
            ThresholdMode::StdDev(self.k)
        }
    }

    /// Reject parameter combinations that cannot produce a threshold.
    pub fn validate(&self) -> Result<()> {
        if !self.k.is_finite() {
            return Err(BlobscanError::InvalidParameter(format!(
                "k must be a finite number, got {}",
                self.k
            )));
        }
        if !self.percentile.is_finite() || self.percentile < 0.0 || self.percentile >= 100.0 {
            return Err(BlobscanError::InvalidParameter(format!(
                "percentile must be in [0, 100), got {}",
                self.percentile
            )));
        }
        Ok(())
    }
}
