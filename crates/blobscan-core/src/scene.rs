use std::path::{Component as PathComponent, Path};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::candidate::{detect_candidates, Candidate};
use crate::consts::{PARALLEL_SCENE_THRESHOLD, SAFE_SUFFIX};
use crate::detection::DetectionConfig;
use crate::error::{BlobscanError, Result};
use crate::geo::GeoTransform;
use crate::grid::Grid;
use crate::io::aaigrid::AsciiGrid;
use crate::ranking::{group_candidates, limit_candidates, CandidateRecord, SceneGroups};

/// One scene ready for detection.
#[derive(Clone, Debug)]
pub struct Scene {
    pub id: String,
    pub grid: Grid,
    pub transform: GeoTransform,
}

impl Scene {
    pub fn new(id: impl Into<String>, grid: Grid, transform: GeoTransform) -> Self {
        Self {
            id: id.into(),
            grid,
            transform,
        }
    }

    pub fn from_ascii(id: impl Into<String>, ascii: AsciiGrid) -> Self {
        Self::new(id, ascii.grid, ascii.transform)
    }

    /// Geographic bounding box of the scene.
    pub fn extent(&self) -> [f64; 4] {
        self.transform.extent(self.grid.width, self.grid.height)
    }
}

/// Result of running detection over a batch of scenes.
#[derive(Clone, Debug)]
pub struct DetectionOutput {
    /// Ranked candidates grouped per scene, in first-seen scene order.
    pub groups: SceneGroups,
    /// Candidate count across all scenes before truncation.
    pub total_before_limit: usize,
}

/// Scene id for an input path: the name of an enclosing `.SAFE` product
/// directory when there is one, otherwise the file stem.
pub fn scene_id_from_path(path: &Path) -> String {
    for part in path.components() {
        if let PathComponent::Normal(name) = part {
            let name = name.to_string_lossy();
            if let Some(stripped) = name.strip_suffix(SAFE_SUFFIX) {
                return stripped.to_string();
            }
        }
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Detect candidates in every scene, then rank and truncate across scenes.
pub fn detect_scenes(scenes: &[Scene], config: &DetectionConfig) -> Result<DetectionOutput> {
    detect_scenes_with_progress(scenes, config, |_| {})
}

/// Like [`detect_scenes`], calling `on_progress(scenes_done)` as each scene
/// finishes. Scenes run in parallel; ranking waits for all of them.
pub fn detect_scenes_with_progress(
    scenes: &[Scene],
    config: &DetectionConfig,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Result<DetectionOutput> {
    config.validate()?;

    let done = AtomicUsize::new(0);
    let detect_one = |scene: &Scene| -> Result<Vec<Candidate>> {
        let candidates = detect_candidates(&scene.grid, &scene.transform, config).map_err(|e| {
            BlobscanError::Scene {
                scene_id: scene.id.clone(),
                source: Box::new(e),
            }
        })?;
        info!(scene = %scene.id, candidates = candidates.len(), "Scene processed");
        on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
        Ok(candidates)
    };

    let per_scene: Vec<Vec<Candidate>> = if scenes.len() >= PARALLEL_SCENE_THRESHOLD {
        scenes.par_iter().map(detect_one).collect::<Result<_>>()?
    } else {
        scenes.iter().map(detect_one).collect::<Result<_>>()?
    };

    let records: Vec<CandidateRecord> = scenes
        .iter()
        .zip(per_scene)
        .flat_map(|(scene, candidates)| {
            candidates
                .into_iter()
                .map(move |c| CandidateRecord::new(scene.id.clone(), c))
        })
        .collect();

    let total_before_limit = records.len();
    let records = limit_candidates(records, config.max_candidates);
    let scene_order: Vec<&str> = scenes.iter().map(|s| s.id.as_str()).collect();
    let groups = group_candidates(&scene_order, &records);

    info!(
        scenes = groups.scene_count(),
        total = total_before_limit,
        kept = groups.total_candidates(),
        "Detection complete"
    );

    Ok(DetectionOutput {
        groups,
        total_before_limit,
    })
}
