use ndarray::{Array2, ArrayView2};

use crate::grid::Grid;

use super::predicate::Qualifier;

/// Aggregate statistics for a single connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// Number of cells in the component.
    pub area: usize,
    /// Sum of the member cell values.
    pub sum: f64,
    /// Mean column of the member cells.
    pub cx: f64,
    /// Mean row of the member cells.
    pub cy: f64,
}

impl Component {
    /// Mean cell value of the component.
    pub fn mean_value(&self) -> f64 {
        self.sum / self.area as f64
    }
}

/// Extract 4-connected components of qualifying cells using an iterative
/// flood fill.
///
/// Components smaller than `min_area_px` are dropped; their cells stay
/// visited so they are never picked up again. Output is in row-major order
/// of each component's seed cell. Grids with a zero dimension, with fewer
/// values than `width * height`, or whose dimensions overflow yield no
/// components.
pub fn extract_components(grid: &Grid, qualifier: &Qualifier, min_area_px: usize) -> Vec<Component> {
    let Some(cells) = grid.view() else {
        return Vec::new();
    };

    let (h, w) = cells.dim();
    let mut visited = Array2::<bool>::from_elem((h, w), false);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut components = Vec::new();

    for row in 0..h {
        for col in 0..w {
            if visited[[row, col]] {
                continue;
            }
            visited[[row, col]] = true;
            if !qualifier.qualifies(cells[[row, col]]) {
                continue;
            }

            let component = flood_fill(&cells, qualifier, (row, col), &mut visited, &mut stack);
            if component.area >= min_area_px {
                components.push(component);
            }
        }
    }

    components
}

/// Grow one component from `seed`, which must already be marked visited and qualify.
fn flood_fill(
    cells: &ArrayView2<'_, f64>,
    qualifier: &Qualifier,
    seed: (usize, usize),
    visited: &mut Array2<bool>,
    stack: &mut Vec<(usize, usize)>,
) -> Component {
    let (h, w) = cells.dim();
    let mut area = 0usize;
    let mut sum = 0.0_f64;
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;

    stack.clear();
    stack.push(seed);

    while let Some((row, col)) = stack.pop() {
        area += 1;
        sum += cells[[row, col]];
        sum_x += col as f64;
        sum_y += row as f64;

        if col > 0 {
            visit(cells, qualifier, (row, col - 1), visited, stack);
        }
        if col + 1 < w {
            visit(cells, qualifier, (row, col + 1), visited, stack);
        }
        if row > 0 {
            visit(cells, qualifier, (row - 1, col), visited, stack);
        }
        if row + 1 < h {
            visit(cells, qualifier, (row + 1, col), visited, stack);
        }
    }

    Component {
        area,
        sum,
        cx: sum_x / area as f64,
        cy: sum_y / area as f64,
    }
}

/// Mark a neighbour visited and queue it if it qualifies.
///
/// Non-qualifying neighbours are marked too; a cell's qualification does not
/// depend on which component reaches it first.
#[inline]
fn visit(
    cells: &ArrayView2<'_, f64>,
    qualifier: &Qualifier,
    (row, col): (usize, usize),
    visited: &mut Array2<bool>,
    stack: &mut Vec<(usize, usize)>,
) {
    if visited[[row, col]] {
        return;
    }
    visited[[row, col]] = true;
    if qualifier.qualifies(cells[[row, col]]) {
        stack.push((row, col));
    }
}
