//! Cell Clustering Example
//!
//! Reads detected cells as JSON, groups them into tables and prints the
//! clusters as JSON. Optionally draws the clusters over the page image.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cluster_cells -- [OPTIONS] [CELLS]
//! ```
//!
//! # Arguments
//!
//! * `[CELLS]` - JSON array of `{"x1", "y1", "x2", "y2"}` objects (stdin when omitted)
//! * `-c, --config` - JSON clustering configuration file
//! * `--leeway` - Edge leeway in pixels, overrides `--dpi`
//! * `--dpi` - Rasterization DPI used to scale the default leeway
//! * `--strategy` - Pair enumeration strategy: exhaustive, grid or auto
//! * `--validate` - Reject malformed cells instead of ignoring them
//! * `--page` - Page image the cells were detected on
//! * `--vis` - Output path for the cluster overlay (requires `--page`)

use clap::Parser;
use oar_tables::core::init_tracing;
use oar_tables::prelude::*;
use oar_tables::utils::visualize_clusters;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Command line arguments.
#[derive(Parser)]
#[command(name = "cluster_cells")]
#[command(about = "Group detected table cells into disjoint tables")]
struct Args {
    /// JSON file with the detected cells (stdin when omitted)
    cells: Option<PathBuf>,

    /// JSON clustering configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Edge leeway in pixels
    #[arg(long)]
    leeway: Option<i32>,

    /// Rasterization DPI used to scale the default leeway
    #[arg(long)]
    dpi: Option<u32>,

    /// Pair enumeration strategy (exhaustive, grid, auto)
    #[arg(long)]
    strategy: Option<PairStrategy>,

    /// Reject malformed cells
    #[arg(long)]
    validate: bool,

    /// Page image the cells were detected on
    #[arg(long)]
    page: Option<PathBuf>,

    /// Output path for the cluster overlay
    #[arg(long)]
    vis: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClusteringConfig::from_json_file(path)?,
        None => ClusteringConfig::new(),
    };
    if let Some(dpi) = args.dpi {
        config = config.with_leeway(oar_tables::core::config::leeway_for_dpi(dpi));
    }
    if let Some(leeway) = args.leeway {
        config = config.with_leeway(leeway);
    }
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }
    if args.validate {
        config = config.with_geometry_validation(true);
    }
    let clusterer = CellClusterer::new(config)?;

    let json = match &args.cells {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let cells: Vec<Cell> = serde_json::from_str(&json)?;
    info!(
        "Clustering {} cells with leeway {}",
        cells.len(),
        clusterer.config().leeway
    );

    let start = Instant::now();
    let tables = clusterer.cluster_tables(&cells)?;
    info!("Found {} tables in {:?}", tables.len(), start.elapsed());

    println!("{}", serde_json::to_string_pretty(&tables)?);

    match (&args.page, &args.vis) {
        (Some(page), Some(output)) => {
            let prepared = PagePreparer::new().prepare(load_image(page)?, &NoRotation)?;
            visualize_clusters(&prepared.image, &tables, output)?;
        }
        (None, Some(_)) => warn!("--vis requires --page, skipping visualization"),
        _ => {}
    }

    Ok(())
}
