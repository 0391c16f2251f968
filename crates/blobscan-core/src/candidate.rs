use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detection::{compute_threshold, extract_components, Component, DetectionConfig, Qualifier};
use crate::error::Result;
use crate::geo::GeoTransform;
use crate::grid::Grid;

/// A scored, geo-referenced detection derived from one component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub lon: f64,
    pub lat: f64,
    /// Mean cell value of the component.
    pub score: f64,
    pub area_px: usize,
}

impl Candidate {
    pub fn from_component(component: &Component, transform: &GeoTransform) -> Self {
        let (lon, lat) = transform.pixel_to_geo(component.cx, component.cy);
        Self {
            lon,
            lat,
            score: component.mean_value(),
            area_px: component.area,
        }
    }
}

/// Convert every component into a candidate, preserving order.
pub fn build_candidates(components: &[Component], transform: &GeoTransform) -> Vec<Candidate> {
    components
        .iter()
        .map(|c| Candidate::from_component(c, transform))
        .collect()
}

/// Run threshold, component extraction, and geocoding on one scene.
pub fn detect_candidates(
    grid: &Grid,
    transform: &GeoTransform,
    config: &DetectionConfig,
) -> Result<Vec<Candidate>> {
    let threshold = compute_threshold(grid, config.threshold_mode(), config.invert)?;
    let qualifier = Qualifier::for_grid(grid, threshold, config.invert);
    let components = extract_components(grid, &qualifier, config.min_area_px);
    debug!(
        threshold,
        components = components.len(),
        width = grid.width,
        height = grid.height,
        "Components extracted"
    );
    Ok(build_candidates(&components, transform))
}
