//! # OAR Tables
//!
//! Groups the ruled cells detected on a scanned or rendered document page into
//! disjoint table clusters.
//!
//! Two cells belong to the same table when they are *adjacent*: roughly the same
//! width or height, sharing an edge within a small pixel leeway, and not nested
//! inside one another. Clusters are the connected components of that relation.
//!
//! ## Features
//!
//! - Symmetric adjacency test with configurable leeway and size-ratio band
//! - Union-find merging, independent of input order
//! - Spatial grid pruning for pages with many cells
//! - Parallel pair evaluation and multi-page processing with rayon
//! - Page preparation with an explicit rotation flag
//!
//! ## Modules
//!
//! * [`core`] - Configuration, error handling, constants and validation
//! * [`domain`] - `Cell` and `TableCluster` value types
//! * [`document`] - Page preparation and the rotation correction interface
//! * [`pipeline`] - Cell detector interface and the page pipeline
//! * [`processors`] - Adjacency, spatial grid, union-find and clustering
//! * [`utils`] - Image loading and cluster overlays
//!
//! ## Quick Start
//!
//! ```rust
//! use oar_tables::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clusterer = CellClusterer::new(ClusteringConfig::for_dpi(200))?;
//! let cells = [
//!     Cell::new(0, 0, 100, 50),
//!     Cell::new(100, 0, 200, 50),
//!     Cell::new(500, 500, 520, 510),
//! ];
//! let tables = clusterer.cluster_tables(&cells)?;
//! assert_eq!(tables.len(), 1);
//! assert_eq!(tables[0].indices, vec![0, 1]);
//! # Ok(())
//! # }
//! ```
//!
//! ### With a cell detector
//!
//! ```rust
//! use image::{DynamicImage, GrayImage};
//! use oar_tables::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = |_page: &PreparedPage| -> Result<Vec<Cell>, TableError> {
//!     Ok(vec![Cell::new(0, 0, 100, 50), Cell::new(0, 50, 100, 100)])
//! };
//! let pipeline = TableClusterPipeline::new(detector, CellClusterer::default());
//!
//! let page = DynamicImage::ImageLuma8(GrayImage::new(200, 200));
//! let prepared = PagePreparer::new().prepare(page, &NoRotation)?;
//! let result = pipeline.process(&prepared)?;
//! assert!(!result.was_rotated);
//! assert_eq!(result.tables.len(), 1);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod document;
pub mod domain;

pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use oar_tables::prelude::*;
/// ```
///
/// Included items cover the common path from a prepared page to clusters.
/// Lower-level pieces (`DisjointSet`, `SpatialGrid`, `merge_pairs`) are
/// imported from [`crate::processors`] directly.
pub mod prelude {
    // Geometry
    pub use crate::domain::{Cell, TableCluster};

    // Clustering
    pub use crate::core::{ClusteringConfig, PairStrategy};
    pub use crate::processors::{
        AdjacencyOracle, CellClusterer, cluster_cells_in_tables, is_adjacent,
    };

    // Pages and pipeline
    pub use crate::document::{NoRotation, PagePreparer, PreparedPage, RotationCorrector};
    pub use crate::pipeline::{CellDetector, PageClusters, TableClusterPipeline};

    // Error Handling
    pub use crate::core::{TableError, TableResult};

    // Image Utility
    pub use crate::utils::load_image;
}
