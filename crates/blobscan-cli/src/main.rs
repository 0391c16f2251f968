mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blobscan", about = "Bright/dark blob candidate detection for raster scenes")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect candidates in every grid under a directory
    Detect(commands::detect::DetectArgs),
    /// Show ASCII grid metadata and statistics
    Info(commands::info::InfoArgs),
    /// Print or save the default detection config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
