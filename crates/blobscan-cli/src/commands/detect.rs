use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use blobscan_core::consts::AAIGRID_EXTENSION;
use blobscan_core::detection::DetectionConfig;
use blobscan_core::geo::union_extents;
use blobscan_core::io::aaigrid::open_aaigrid;
use blobscan_core::io::geojson::{save_feature_collection, FeatureCollection};
use blobscan_core::ranking::summarize;
use blobscan_core::scene::{detect_scenes_with_progress, scene_id_from_path, Scene};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use walkdir::WalkDir;

use crate::summary::{print_detection_summary, print_scene_table};

#[derive(Args)]
pub struct DetectArgs {
    /// Input directory containing ESRI ASCII grids (.asc)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output GeoJSON path
    #[arg(short, long)]
    pub out: PathBuf,

    /// Detection config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Standard-deviation multiplier (used when percentile is 0)
    #[arg(long, allow_negative_numbers = true)]
    pub k: Option<f64>,

    /// Threshold percentile in (0, 100); 0 switches to mean ± k·σ
    #[arg(long)]
    pub percentile: Option<f64>,

    /// Detect dark features (values at or below the threshold)
    #[arg(long, conflicts_with = "no_invert")]
    pub invert: bool,

    /// Detect bright features (values at or above the threshold)
    #[arg(long)]
    pub no_invert: bool,

    /// Minimum blob area in pixels
    #[arg(long)]
    pub min_area: Option<usize>,

    /// Maximum candidates kept across all scenes (0 = unlimited)
    #[arg(long)]
    pub max_candidates: Option<usize>,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = resolve_config(args)?;

    let files = find_grid_files(&args.input)?;
    if files.is_empty() {
        bail!(
            "No .{} files found in {}",
            AAIGRID_EXTENSION,
            args.input.display()
        );
    }

    print_detection_summary(&config, &args.input, &args.out, files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    pb.set_message("Reading scenes");
    let mut scenes = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let ascii =
            open_aaigrid(path).with_context(|| format!("Failed to read {}", path.display()))?;
        scenes.push(Scene::from_ascii(scene_id_from_path(path), ascii));
        pb.set_position(i as u64 + 1);
    }

    if let Some([min_x, min_y, max_x, max_y]) = union_extents(scenes.iter().map(Scene::extent)) {
        info!(min_x, min_y, max_x, max_y, "Combined scene extent");
    }

    pb.set_position(0);
    pb.set_message("Detecting");
    let output = detect_scenes_with_progress(&scenes, &config, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("Done");

    print_scene_table(&summarize(&output.groups), output.total_before_limit);

    ensure_parent_dir(&args.out)?;
    let fc = FeatureCollection::from_groups(&output.groups);
    save_feature_collection(&args.out, &fc)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    println!(
        "\n{} candidate(s) saved to {}",
        fc.features.len(),
        args.out.display()
    );

    Ok(())
}

fn resolve_config(args: &DetectArgs) -> Result<DetectionConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid detection config")?
    } else {
        DetectionConfig::default()
    };

    if let Some(k) = args.k {
        config.k = k;
    }
    if let Some(p) = args.percentile {
        config.percentile = p;
    }
    if args.invert {
        config.invert = true;
    }
    if args.no_invert {
        config.invert = false;
    }
    if let Some(min_area) = args.min_area {
        config.min_area_px = min_area;
    }
    if let Some(max) = args.max_candidates {
        config.max_candidates = max;
    }

    config.validate()?;
    Ok(config)
}

/// Recursively collect ASCII grids under `dir`, sorted by path.
fn find_grid_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Input must be a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && is_grid_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_grid_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(AAIGRID_EXTENSION))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output dir {}", dir.display())),
        _ => Ok(()),
    }
}
