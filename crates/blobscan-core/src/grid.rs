use ndarray::{Array2, ArrayView2};

use crate::error::{BlobscanError, Result};

/// A single-band raster scene.
/// Cell values are f64, row-major, `data[row * width + col]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    /// Sentinel marking cells without a measurement.
    pub nodata: Option<f64>,
    pub data: Vec<f64>,
}

impl Grid {
    /// Build a grid, rejecting a data length that does not match the dimensions.
    pub fn new(width: usize, height: usize, nodata: Option<f64>, data: Vec<f64>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            BlobscanError::InvalidGrid(format!("dimensions {width}x{height} overflow"))
        })?;
        if data.len() != expected {
            return Err(BlobscanError::InvalidGrid(format!(
                "expected {expected} cells for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            nodata,
            data,
        })
    }

    /// Build a grid from a `(height, width)` array.
    pub fn from_array(array: &Array2<f64>, nodata: Option<f64>) -> Self {
        let (height, width) = array.dim();
        Self {
            width,
            height,
            nodata,
            data: array.iter().copied().collect(),
        }
    }

    /// Number of cells implied by the dimensions. `None` on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// True when the dimensions are non-zero and the data covers every cell.
    pub fn is_well_formed(&self) -> bool {
        match self.cell_count() {
            Some(total) => total > 0 && self.data.len() >= total,
            None => false,
        }
    }

    /// A cell is invalid if it is NaN or equal to the NoData sentinel.
    pub fn is_valid(&self, v: f64) -> bool {
        if v.is_nan() {
            return false;
        }
        match self.nodata {
            Some(nodata) => v != nodata,
            None => true,
        }
    }

    /// Iterate over the valid cell values in row-major order.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied().filter(move |&v| self.is_valid(v))
    }

    pub fn valid_count(&self) -> usize {
        self.valid_values().count()
    }

    /// Borrow the cells as a `(height, width)` view. `None` for malformed grids.
    pub fn view(&self) -> Option<ArrayView2<'_, f64>> {
        if !self.is_well_formed() {
            return None;
        }
        let total = self.cell_count()?;
        ArrayView2::from_shape((self.height, self.width), &self.data[..total]).ok()
    }
}
