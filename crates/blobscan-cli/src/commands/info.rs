use std::path::PathBuf;

use anyhow::{Context, Result};
use blobscan_core::io::aaigrid::open_aaigrid;
use blobscan_core::scene::scene_id_from_path;
use blobscan_core::stats::mean_std;
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Input ASCII grid (.asc)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let ascii = open_aaigrid(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let grid = &ascii.grid;

    println!("File:        {}", args.file.display());
    println!("Scene:       {}", scene_id_from_path(&args.file));
    println!("Dimensions:  {}x{}", grid.width, grid.height);
    match grid.nodata {
        Some(nodata) => println!("NoData:      {}", nodata),
        None => println!("NoData:      none"),
    }

    let valid = grid.valid_count();
    let pct = match grid.cell_count() {
        Some(total) if total > 0 => valid as f64 / total as f64 * 100.0,
        _ => 0.0,
    };
    println!("Valid cells: {} ({:.1}%)", valid, pct);

    let (mean, std) = mean_std(grid);
    println!("Mean:        {:.4}", mean);
    println!("Std dev:     {:.4}", std);

    let t = ascii.transform.coefficients();
    println!(
        "Transform:   [{}, {}, {}, {}, {}, {}]",
        t[0], t[1], t[2], t[3], t[4], t[5]
    );
    let [min_x, min_y, max_x, max_y] = ascii.transform.extent(grid.width, grid.height);
    println!(
        "Extent:      {:.6}, {:.6} .. {:.6}, {:.6}",
        min_x, min_y, max_x, max_y
    );

    Ok(())
}
