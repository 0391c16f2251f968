use serde::{Deserialize, Serialize};

/// GDAL-style affine geotransform `[t0, t1, t2, t3, t4, t5]`:
///
/// ```text
/// x = t0 + px * t1 + py * t2
/// y = t3 + px * t4 + py * t5
/// ```
///
/// Pixel coordinates are fractional, with `(0, 0)` at the top-left corner
/// of the top-left cell. Rotation/skew terms are honoured.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub const IDENTITY: Self = Self([0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// North-up transform from the top-left corner and cell sizes.
    pub fn north_up(origin_x: f64, origin_y: f64, cell_x: f64, cell_y: f64) -> Self {
        Self([origin_x, cell_x, 0.0, origin_y, 0.0, -cell_y])
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }

    /// Map pixel coordinates to geographic `(x, y)`, i.e. `(lon, lat)`.
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        let t = &self.0;
        (t[0] + px * t[1] + py * t[2], t[3] + px * t[4] + py * t[5])
    }

    /// Bounding box `[min_x, min_y, max_x, max_y]` of a `width` x `height` raster.
    pub fn extent(&self, width: usize, height: usize) -> [f64; 4] {
        let (w, h) = (width as f64, height as f64);
        let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];

        let mut bbox = [
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ];
        for (px, py) in corners {
            let (x, y) = self.pixel_to_geo(px, py);
            bbox[0] = bbox[0].min(x);
            bbox[1] = bbox[1].min(y);
            bbox[2] = bbox[2].max(x);
            bbox[3] = bbox[3].max(y);
        }
        bbox
    }
}

/// Union of bounding boxes. `None` for an empty input.
pub fn union_extents<I>(extents: I) -> Option<[f64; 4]>
where
    I: IntoIterator<Item = [f64; 4]>,
{
    extents.into_iter().reduce(|acc, b| {
        [
            acc[0].min(b[0]),
            acc[1].min(b[1]),
            acc[2].max(b[2]),
            acc[3].max(b[3]),
        ]
    })
}
