use crate::error::{BlobscanError, Result};
use crate::grid::Grid;

/// Mean and population standard deviation of the valid cells (Welford).
///
/// Returns `(0.0, 0.0)` when the grid has no valid cells.
pub fn mean_std(grid: &Grid) -> (f64, f64) {
    let mut count = 0usize;
    let mut mean = 0.0_f64;
    let mut m2 = 0.0_f64;

    for v in grid.valid_values() {
        count += 1;
        let delta = v - mean;
        mean += delta / count as f64;
        m2 += delta * (v - mean);
    }

    if count == 0 {
        return (0.0, 0.0);
    }

    (mean, (m2 / count as f64).sqrt())
}

/// Nearest-rank percentile of the valid cells. `p` must lie in (0, 100).
pub fn percentile(grid: &Grid, p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 100.0) {
        return Err(BlobscanError::InvalidParameter(format!(
            "percentile {p} outside (0, 100)"
        )));
    }

    let mut values: Vec<f64> = grid.valid_values().collect();
    if values.is_empty() {
        return Err(BlobscanError::NoValidData);
    }

    values.sort_unstable_by(f64::total_cmp);
    Ok(values[nearest_rank_index(p, values.len())])
}

/// `ceil(p/100 * n) - 1`, clamped to `[0, n-1]`.
fn nearest_rank_index(p: f64, n: usize) -> usize {
    let rank = ((p / 100.0) * n as f64).ceil() as i64 - 1;
    rank.clamp(0, n as i64 - 1) as usize
}
