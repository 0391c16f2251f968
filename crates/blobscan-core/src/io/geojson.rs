//! GeoJSON point output for ranked candidates.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::error::Result;
use crate::ranking::SceneGroups;

/// A GeoJSON FeatureCollection of candidate points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always "FeatureCollection".
    #[serde(rename = "type")]
    pub type_: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features,
        }
    }

    /// One feature per candidate, scenes in first-seen order.
    pub fn from_groups(groups: &SceneGroups) -> Self {
        let features = groups
            .iter()
            .flat_map(|(scene_id, candidates)| scene_features(scene_id, candidates))
            .collect();
        Self::new(features)
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Always "Feature".
    #[serde(rename = "type")]
    pub type_: String,
    pub geometry: Geometry,
    pub properties: CandidateProperties,
}

impl Feature {
    pub fn from_candidate(scene_id: &str, candidate: &Candidate) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: Geometry::Point {
                coordinates: [candidate.lon, candidate.lat],
            },
            properties: CandidateProperties {
                scene_id: scene_id.to_string(),
                score: candidate.score,
                area_px: candidate.area_px,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Coordinates as `[lon, lat]`.
    Point { coordinates: [f64; 2] },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateProperties {
    pub scene_id: String,
    pub score: f64,
    pub area_px: usize,
}

/// Point features for one scene's candidates.
pub fn scene_features(scene_id: &str, candidates: &[Candidate]) -> Vec<Feature> {
    candidates
        .iter()
        .map(|c| Feature::from_candidate(scene_id, c))
        .collect()
}

/// Serialize a collection as compact JSON.
pub fn write_feature_collection<W: Write>(writer: W, fc: &FeatureCollection) -> Result<()> {
    serde_json::to_writer(writer, fc)?;
    Ok(())
}

/// Write a collection to `path`, replacing any existing file.
pub fn save_feature_collection(path: &Path, fc: &FeatureCollection) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_feature_collection(&mut writer, fc)?;
    writer.flush()?;
    Ok(())
}
