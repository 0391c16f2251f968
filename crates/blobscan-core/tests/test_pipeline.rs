mod common;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use blobscan_core::candidate::detect_candidates;
use blobscan_core::detection::DetectionConfig;
use blobscan_core::geo::GeoTransform;
use blobscan_core::grid::Grid;
use blobscan_core::io::aaigrid::open_aaigrid;
use blobscan_core::scene::{detect_scenes, scene_id_from_path, Scene};

use common::{build_asc, grid_with_cells, write_file};

fn bright_stddev(k: f64, min_area_px: usize) -> DetectionConfig {
    DetectionConfig {
        k,
        percentile: 0.0,
        invert: false,
        min_area_px,
        max_candidates: 0,
    }
}

#[test]
fn test_six_cell_scenario_in_memory() {
    let grid = Grid::new(3, 2, None, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let transform = GeoTransform([10.0, 2.0, 0.0, 20.0, 0.0, -2.0]);

    let candidates = detect_candidates(&grid, &transform, &bright_stddev(0.5, 1)).unwrap();
    assert_eq!(candidates.len(), 1);

    let c = candidates[0];
    assert_abs_diff_eq!(c.lon, 13.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c.lat, 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c.score, 5.5, epsilon = 1e-9);
    assert_eq!(c.area_px, 2);
}

#[test]
fn test_negative_k_lowers_bright_threshold() {
    // mean 3.5, std ~1.708: threshold ~2.646 keeps 3, 4, 5 and 6 as one blob.
    let grid = Grid::new(3, 2, None, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let transform = GeoTransform([10.0, 2.0, 0.0, 20.0, 0.0, -2.0]);

    let output = detect_scenes(
        &[Scene::new("neg", grid, transform)],
        &bright_stddev(-0.5, 1),
    )
    .unwrap();
    let found = output.groups.get("neg").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].area_px, 4);
    assert_abs_diff_eq!(found[0].score, 4.5, epsilon = 1e-9);
    assert_abs_diff_eq!(found[0].lon, 12.5, epsilon = 1e-9);
    assert_abs_diff_eq!(found[0].lat, 18.5, epsilon = 1e-9);
}

#[test]
fn test_six_cell_scenario_from_ascii_grid() {
    let dir = TempDir::new().unwrap();
    let text = build_asc(3, 2, 10.0, 16.0, 2.0, Some(-9999.0), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let path = write_file(dir.path(), "scene_a.asc", &text);

    let ascii = open_aaigrid(&path).unwrap();
    assert_eq!(ascii.transform, GeoTransform([10.0, 2.0, 0.0, 20.0, 0.0, -2.0]));

    let scene = Scene::from_ascii(scene_id_from_path(&path), ascii);
    assert_eq!(scene.id, "scene_a");

    let output = detect_scenes(&[scene], &bright_stddev(0.5, 1)).unwrap();
    let found = output.groups.get("scene_a").unwrap();
    assert_eq!(found.len(), 1);
    assert_abs_diff_eq!(found[0].lon, 13.0, epsilon = 1e-9);
    assert_abs_diff_eq!(found[0].lat, 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(found[0].score, 5.5, epsilon = 1e-9);
}

#[test]
fn test_dark_percentile_detection() {
    // Bright sea with two dark 2x2 targets.
    let mut cells = Vec::new();
    for (c0, r0, v) in [(2usize, 2usize, 1.0), (12, 10, 3.0)] {
        for dc in 0..2 {
            for dr in 0..2 {
                cells.push((c0 + dc, r0 + dr, v));
            }
        }
    }
    let grid = grid_with_cells(20, 20, 200.0, &cells);

    let config = DetectionConfig {
        k: 2.0,
        percentile: 98.0,
        invert: true,
        min_area_px: 2,
        max_candidates: 0,
    };
    let mut candidates = detect_candidates(&grid, &GeoTransform::IDENTITY, &config).unwrap();
    candidates.sort_by(|a, b| a.score.total_cmp(&b.score));

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].area_px, 4);
    assert_abs_diff_eq!(candidates[0].score, 1.0);
    assert_abs_diff_eq!(candidates[0].lon, 2.5);
    assert_abs_diff_eq!(candidates[0].lat, 2.5);
    assert_abs_diff_eq!(candidates[1].score, 3.0);
    assert_abs_diff_eq!(candidates[1].lon, 12.5);
    assert_abs_diff_eq!(candidates[1].lat, 10.5);
}

#[test]
fn test_nodata_never_counted() {
    let nodata = -9999.0;
    let mut data = vec![0.0; 16];
    data[5] = 10.0;
    data[6] = nodata;
    data[9] = f64::NAN;
    data[10] = 10.0;
    let grid = Grid::new(4, 4, Some(nodata), data).unwrap();

    for invert in [false, true] {
        let config = DetectionConfig {
            k: 0.0,
            percentile: 0.0,
            invert,
            min_area_px: 1,
            max_candidates: 0,
        };
        let candidates = detect_candidates(&grid, &GeoTransform::IDENTITY, &config).unwrap();
        for c in &candidates {
            assert!(c.score.is_finite());
            assert!(c.score > nodata);
        }
        let area: usize = candidates.iter().map(|c| c.area_px).sum();
        assert!(area <= 14, "invalid cells counted: area {area}");
    }
}

#[test]
fn test_all_invalid_stddev_threshold_is_zero() {
    // Degenerate statistics fold into a zero threshold: nothing qualifies
    // because every cell is invalid, and detection still succeeds.
    let grid = Grid::new(2, 2, Some(-1.0), vec![-1.0, f64::NAN, -1.0, -1.0]).unwrap();
    let candidates = detect_candidates(&grid, &GeoTransform::IDENTITY, &bright_stddev(2.0, 0)).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn test_multi_scene_ranking_and_empty_scene() {
    let strong = grid_with_cells(8, 8, 0.0, &[(1, 1, 9.0), (1, 2, 9.0), (6, 6, 7.0), (6, 5, 7.0)]);
    let weak = grid_with_cells(8, 8, 0.0, &[(3, 3, 5.0), (4, 3, 5.0)]);
    let flat = Grid::new(8, 8, None, vec![0.0; 64]).unwrap();

    let scenes = vec![
        Scene::new("weak", weak, GeoTransform::IDENTITY),
        Scene::new("flat", flat, GeoTransform::IDENTITY),
        Scene::new("strong", strong, GeoTransform::IDENTITY),
    ];
    let config = DetectionConfig {
        k: 1.0,
        percentile: 0.0,
        invert: false,
        min_area_px: 2,
        max_candidates: 2,
    };

    let output = detect_scenes(&scenes, &config).unwrap();
    // The flat scene has std 0, so its threshold equals every cell and the
    // whole scene becomes one score-0 component that ranks last.
    assert_eq!(output.total_before_limit, 4);

    let ids: Vec<&str> = output.groups.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["weak", "flat", "strong"]);

    assert!(output.groups.get("weak").unwrap().is_empty());
    assert!(output.groups.get("flat").unwrap().is_empty());

    let strong = output.groups.get("strong").unwrap();
    assert_eq!(strong.len(), 2);
    let mut scores: Vec<f64> = strong.iter().map(|c| c.score).collect();
    scores.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(scores, vec![9.0, 7.0]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let scenes: Vec<Scene> = (0..6)
        .map(|i| {
            let cells: Vec<(usize, usize, f64)> = (0..5)
                .map(|j| ((i + 3 * j) % 16, (2 * i + j) % 16, 4.0 + (j % 2) as f64))
                .collect();
            Scene::new(format!("s{i}"), grid_with_cells(16, 16, 0.0, &cells), GeoTransform::IDENTITY)
        })
        .collect();
    let config = DetectionConfig {
        k: 1.0,
        percentile: 0.0,
        invert: false,
        min_area_px: 1,
        max_candidates: 10,
    };

    let first = detect_scenes(&scenes, &config).unwrap();
    for _ in 0..5 {
        let again = detect_scenes(&scenes, &config).unwrap();
        assert_eq!(again.groups, first.groups);
    }
    assert_eq!(first.groups.total_candidates(), 10);
}
