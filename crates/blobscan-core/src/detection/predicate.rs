use crate::grid::Grid;

/// Per-cell qualification test used by component extraction.
///
/// Invalid cells (NaN or NoData) never qualify. Otherwise a cell qualifies
/// when it is at or beyond the threshold on the side selected by `invert`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Qualifier {
    pub threshold: f64,
    pub invert: bool,
    pub nodata: Option<f64>,
}

impl Qualifier {
    pub fn new(threshold: f64, invert: bool, nodata: Option<f64>) -> Self {
        Self {
            threshold,
            invert,
            nodata,
        }
    }

    /// Qualifier for `grid`, picking up its NoData sentinel.
    pub fn for_grid(grid: &Grid, threshold: f64, invert: bool) -> Self {
        Self::new(threshold, invert, grid.nodata)
    }

    #[inline]
    pub fn qualifies(&self, v: f64) -> bool {
        if v.is_nan() {
            return false;
        }
        if self.nodata == Some(v) {
            return false;
        }
        if self.invert {
            v <= self.threshold
        } else {
            v >= self.threshold
        }
    }
}
