/// Default standard-deviation multiplier for the mean ± k·σ threshold.
pub const DEFAULT_K: f64 = 2.0;

/// Default percentile for percentile thresholding. With the default inverted
/// polarity this targets the darkest 0.5% of the scene.
pub const DEFAULT_PERCENTILE: f64 = 99.5;

/// Default polarity: look for abnormally dark features.
pub const DEFAULT_INVERT: bool = true;

/// Default minimum component area in pixels.
pub const DEFAULT_MIN_AREA_PX: usize = 2;

/// Default cap on the number of candidates kept across all scenes.
pub const DEFAULT_MAX_CANDIDATES: usize = 200;

/// NoData sentinel assumed when an ASCII grid header omits `nodata_value`.
pub const AAIGRID_DEFAULT_NODATA: f64 = -9999.0;

/// Percentage of the expected cell count an ASCII grid body must provide.
/// Shorter bodies are padded with NoData; anything below this is rejected.
pub const AAIGRID_MIN_FILL_PERCENT: usize = 99;

/// File extension of ESRI ASCII grids picked up by directory scans.
pub const AAIGRID_EXTENSION: &str = "asc";

/// Directory suffix of Sentinel-1 SAFE products; used to derive scene ids.
pub const SAFE_SUFFIX: &str = ".SAFE";

/// Minimum scene count to fan detection out over Rayon.
pub const PARALLEL_SCENE_THRESHOLD: usize = 2;
