use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::stats::{mean_std, percentile};

use super::config::ThresholdMode;

/// Compute the detection threshold for a grid.
///
/// With `invert` set the percentile tail is mirrored (`100 - p`) and the
/// std-dev offset is subtracted, so the threshold sits on the dark side.
pub fn compute_threshold(grid: &Grid, mode: ThresholdMode, invert: bool) -> Result<f64> {
    match mode {
        ThresholdMode::Percentile(p) => {
            let effective = if invert { 100.0 - p } else { p };
            let threshold = percentile(grid, effective)?;
            debug!(percentile = effective, threshold, "Percentile threshold");
            Ok(threshold)
        }
        ThresholdMode::StdDev(k) => {
            // All-invalid grids yield (0, 0) here and therefore a threshold of 0.
            let (mean, std) = mean_std(grid);
            let threshold = if invert { mean - k * std } else { mean + k * std };
            debug!(mean, std, k, threshold, "Std-dev threshold");
            Ok(threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlobscanError;

    fn ramp() -> Grid {
        Grid::new(10, 1, None, (1..=10).map(f64::from).collect()).unwrap()
    }

    #[test]
    fn test_stddev_bright_and_dark() {
        let grid = Grid::new(3, 2, None, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let std = (35.0_f64 / 12.0).sqrt();

        let bright = compute_threshold(&grid, ThresholdMode::StdDev(0.5), false).unwrap();
        assert!((bright - (3.5 + 0.5 * std)).abs() < 1e-12);

        let dark = compute_threshold(&grid, ThresholdMode::StdDev(0.5), true).unwrap();
        assert!((dark - (3.5 - 0.5 * std)).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_mirrors_tail_when_inverted() {
        let grid = ramp();
        assert_eq!(compute_threshold(&grid, ThresholdMode::Percentile(90.0), false).unwrap(), 9.0);
        assert_eq!(compute_threshold(&grid, ThresholdMode::Percentile(90.0), true).unwrap(), 1.0);
    }

    #[test]
    fn test_stddev_all_invalid_is_zero() {
        let grid = Grid::new(2, 1, Some(-1.0), vec![-1.0, f64::NAN]).unwrap();
        assert_eq!(compute_threshold(&grid, ThresholdMode::StdDev(3.0), false).unwrap(), 0.0);
        assert_eq!(compute_threshold(&grid, ThresholdMode::StdDev(3.0), true).unwrap(), 0.0);
    }

    #[test]
    fn test_percentile_all_invalid_errors() {
        let grid = Grid::new(2, 1, Some(-1.0), vec![-1.0, f64::NAN]).unwrap();
        let err = compute_threshold(&grid, ThresholdMode::Percentile(50.0), false).unwrap_err();
        assert!(matches!(err, BlobscanError::NoValidData));
    }
}
