use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::info;

use crate::candidate::Candidate;

/// A candidate tagged with the scene it was found in.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateRecord {
    pub scene_id: String,
    pub candidate: Candidate,
}

impl CandidateRecord {
    pub fn new(scene_id: impl Into<String>, candidate: Candidate) -> Self {
        Self {
            scene_id: scene_id.into(),
            candidate,
        }
    }
}

/// Total order used for ranking: score desc, area desc, scene id asc,
/// lat asc, lon asc.
pub fn rank_order(a: &CandidateRecord, b: &CandidateRecord) -> Ordering {
    cmp_f64(b.candidate.score, a.candidate.score)
        .then_with(|| b.candidate.area_px.cmp(&a.candidate.area_px))
        .then_with(|| a.scene_id.cmp(&b.scene_id))
        .then_with(|| cmp_f64(a.candidate.lat, b.candidate.lat))
        .then_with(|| cmp_f64(a.candidate.lon, b.candidate.lon))
}

/// Numeric comparison where `0.0 == -0.0`; NaN falls back to `total_cmp`
/// so the order stays total.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Keep the best `max_candidates` records in rank order.
///
/// When `max_candidates` is 0 or there are no more records than that, the
/// input is returned untouched, in its original order.
pub fn limit_candidates(mut records: Vec<CandidateRecord>, max_candidates: usize) -> Vec<CandidateRecord> {
    if max_candidates == 0 || records.len() <= max_candidates {
        return records;
    }

    let before = records.len();
    records.sort_by(rank_order);
    records.truncate(max_candidates);
    info!(before, kept = records.len(), "Candidates truncated");
    records
}

/// Candidates grouped by scene, iterated in first-seen scene order.
///
/// Scenes with no candidates are kept as empty groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGroups {
    order: Vec<String>,
    by_scene: HashMap<String, Vec<Candidate>>,
}

impl SceneGroups {
    /// Empty groups for each scene id. Duplicate ids keep their first position.
    pub fn new<I, S>(scene_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups = Self::default();
        for id in scene_order {
            groups.ensure_scene(id.into());
        }
        groups
    }

    fn ensure_scene(&mut self, scene_id: String) -> &mut Vec<Candidate> {
        if !self.by_scene.contains_key(&scene_id) {
            self.order.push(scene_id.clone());
        }
        self.by_scene.entry(scene_id).or_default()
    }

    /// Append a candidate, registering the scene if it has not been seen.
    pub fn push(&mut self, scene_id: &str, candidate: Candidate) {
        self.ensure_scene(scene_id.to_string()).push(candidate);
    }

    pub fn scene_ids(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, scene_id: &str) -> Option<&[Candidate]> {
        self.by_scene.get(scene_id).map(Vec::as_slice)
    }

    /// `(scene_id, candidates)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Candidate])> {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.by_scene.get(id).map_or(&[][..], Vec::as_slice)))
    }

    pub fn scene_count(&self) -> usize {
        self.order.len()
    }

    pub fn total_candidates(&self) -> usize {
        self.by_scene.values().map(Vec::len).sum()
    }
}

/// Regroup ranked records per scene, keeping `scene_order` as the scene order.
/// Records keep their relative order within each scene.
pub fn group_candidates<S: AsRef<str>>(scene_order: &[S], records: &[CandidateRecord]) -> SceneGroups {
    let mut groups = SceneGroups::new(scene_order.iter().map(|s| s.as_ref().to_string()));
    for record in records {
        groups.push(&record.scene_id, record.candidate);
    }
    groups
}

/// Per-scene candidate statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSummary {
    pub scene_id: String,
    pub count: usize,
    pub mean_score: f64,
    pub max_score: f64,
    pub min_area: usize,
    pub max_area: usize,
}

impl SceneSummary {
    pub fn from_candidates(scene_id: &str, candidates: &[Candidate]) -> Self {
        let Some(first) = candidates.first() else {
            return Self {
                scene_id: scene_id.to_string(),
                count: 0,
                mean_score: 0.0,
                max_score: 0.0,
                min_area: 0,
                max_area: 0,
            };
        };

        let mut score_sum = 0.0;
        let mut max_score = first.score;
        let mut min_area = first.area_px;
        let mut max_area = first.area_px;
        for c in candidates {
            score_sum += c.score;
            max_score = max_score.max(c.score);
            min_area = min_area.min(c.area_px);
            max_area = max_area.max(c.area_px);
        }

        Self {
            scene_id: scene_id.to_string(),
            count: candidates.len(),
            mean_score: score_sum / candidates.len() as f64,
            max_score,
            min_area,
            max_area,
        }
    }
}

/// Summaries for every scene in first-seen order.
pub fn summarize(groups: &SceneGroups) -> Vec<SceneSummary> {
    groups
        .iter()
        .map(|(id, candidates)| SceneSummary::from_candidates(id, candidates))
        .collect()
}
