#![allow(dead_code)]

use std::io::Write;

use blobscan_core::grid::Grid;
use ndarray::Array2;

/// Render an ESRI ASCII grid with corner registration.
pub fn build_asc(
    width: usize,
    height: usize,
    xll: f64,
    yll: f64,
    cell_size: f64,
    nodata: Option<f64>,
    data: &[f64],
) -> String {
    assert_eq!(data.len(), width * height);
    let mut text = format!(
        "ncols {width}\nnrows {height}\nxllcorner {xll}\nyllcorner {yll}\ncellsize {cell_size}\n"
    );
    if let Some(nodata) = nodata {
        text.push_str(&format!("NODATA_value {nodata}\n"));
    }
    for row in data.chunks(width) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).expect("create file");
    f.write_all(contents.as_bytes()).expect("write file");
    path
}

/// A `width` x `height` grid filled with `background`, with `blobs` of
/// `(col, row, value)` cells stamped on top.
pub fn grid_with_cells(
    width: usize,
    height: usize,
    background: f64,
    cells: &[(usize, usize, f64)],
) -> Grid {
    let mut data = Array2::from_elem((height, width), background);
    for &(col, row, value) in cells {
        data[[row, col]] = value;
    }
    Grid::from_array(&data, None)
}
