//! Geometry processors for table detection.
//!
//! # Modules
//!
//! * `adjacency` - Symmetric adjacency test between two cells
//! * `clustering` - Grouping of cells into disjoint table clusters
//! * `spatial_grid` - Uniform grid used to prune candidate pairs on large pages
//! * `union_find` - Disjoint-set forest used by the merge phase

pub mod adjacency;
pub mod clustering;
pub mod spatial_grid;
pub mod union_find;

pub use adjacency::{AdjacencyOracle, coordinate_approximately_equal, is_adjacent};
pub use clustering::{CellClusterer, cluster_cells_in_tables, merge_pairs};
pub use spatial_grid::{SpatialGrid, suggested_bucket_size};
pub use union_find::DisjointSet;
