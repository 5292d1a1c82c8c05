//! Clustering of detected cells into tables.
//!
//! Clustering runs in two phases:
//!
//! 1. **Evaluation**: candidate pairs are tested with the [`AdjacencyOracle`].
//!    This is read-only over the input and runs on the rayon pool for large pages.
//! 2. **Merge**: adjacent pairs are folded into a [`DisjointSet`] on the calling
//!    thread. The result is the connected components of the adjacency graph,
//!    restricted to cells touched by at least one adjacency.
//!
//! Singletons never appear in the output: a cell with no adjacent neighbour
//! is dropped rather than returned as a one-cell table.

use crate::core::config::ConfigValidatorExt;
use crate::core::validation::validate_cells;
use crate::core::{ClusteringConfig, PairStrategy, TableError};
use crate::domain::{Cell, TableCluster};
use crate::processors::adjacency::AdjacencyOracle;
use crate::processors::spatial_grid::{SpatialGrid, suggested_bucket_size};
use crate::processors::union_find::DisjointSet;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Clusters `cells` into tables with the default configuration.
///
/// Returns one `Vec<Cell>` per table. Clusters are ordered by their first
/// cell's input position and cells keep their input order inside a cluster.
///
/// # Examples
///
/// ```
/// use oar_tables::prelude::*;
///
/// let cells = [
///     Cell::new(0, 0, 100, 50),
///     Cell::new(100, 0, 200, 50),
///     Cell::new(0, 50, 100, 100),
///     Cell::new(400, 400, 450, 420),
/// ];
/// let tables = cluster_cells_in_tables(&cells);
/// assert_eq!(tables, vec![vec![cells[0], cells[1], cells[2]]]);
/// ```
pub fn cluster_cells_in_tables(cells: &[Cell]) -> Vec<Vec<Cell>> {
    let clusterer = CellClusterer::default();
    into_cell_lists(cells, clusterer.cluster_unchecked(cells))
}

/// Groups cells into disjoint table clusters.
#[derive(Debug, Clone)]
pub struct CellClusterer {
    config: ClusteringConfig,
    oracle: AdjacencyOracle,
}

impl Default for CellClusterer {
    fn default() -> Self {
        let config = ClusteringConfig::default();
        let oracle = AdjacencyOracle::from(&config);
        Self { config, oracle }
    }
}

impl CellClusterer {
    /// Creates a clusterer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ConfigError`] when the configuration is invalid.
    pub fn new(config: ClusteringConfig) -> Result<Self, TableError> {
        let config = config.validate_and_wrap_table_error()?;
        let oracle = AdjacencyOracle::from(&config);
        Ok(Self { config, oracle })
    }

    /// The active configuration.
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// The adjacency test used by this clusterer.
    pub fn oracle(&self) -> &AdjacencyOracle {
        &self.oracle
    }

    /// Clusters `cells` and returns the member cells of each cluster.
    ///
    /// # Errors
    ///
    /// With `validate_geometry` enabled, returns [`TableError::InvalidGeometry`]
    /// before any clustering work if a cell is malformed.
    pub fn cluster(&self, cells: &[Cell]) -> Result<Vec<Vec<Cell>>, TableError> {
        let groups = self.cluster_indices(cells)?;
        Ok(into_cell_lists(cells, groups))
    }

    /// Clusters `cells` and returns input positions instead of cell values.
    pub fn cluster_indices(&self, cells: &[Cell]) -> Result<Vec<Vec<usize>>, TableError> {
        if self.config.validate_geometry {
            validate_cells(cells)?;
        }
        Ok(self.cluster_unchecked(cells))
    }

    /// Clusters `cells` keeping both the cells and their input positions.
    pub fn cluster_tables(&self, cells: &[Cell]) -> Result<Vec<TableCluster>, TableError> {
        let groups = self.cluster_indices(cells)?;
        Ok(groups
            .into_iter()
            .map(|indices| TableCluster::from_indices(cells, indices))
            .collect())
    }

    /// Every adjacent pair `(i, j)` with `i < j`, sorted.
    pub fn adjacent_pairs(&self, cells: &[Cell]) -> Vec<(usize, usize)> {
        let n = cells.len();
        if n < 2 {
            return Vec::new();
        }

        let parallel = n > self.config.parallel_threshold;
        let oracle = &self.oracle;

        let mut pairs: Vec<(usize, usize)> = match self.effective_strategy(n) {
            PairStrategy::Grid => {
                let bucket_size = self
                    .config
                    .grid_bucket_size
                    .unwrap_or_else(|| suggested_bucket_size(cells));
                let grid = SpatialGrid::build(cells, bucket_size);
                let candidates = grid.candidate_pairs();
                trace!(
                    "Grid of {} buckets ({} px, {} oversized cells) produced {} candidate pairs",
                    grid.bucket_count(),
                    grid.bucket_size(),
                    grid.oversized().len(),
                    candidates.len()
                );
                if parallel {
                    candidates
                        .into_par_iter()
                        .filter(|&(i, j)| oracle.is_adjacent(&cells[i], &cells[j]))
                        .collect()
                } else {
                    candidates
                        .into_iter()
                        .filter(|&(i, j)| oracle.is_adjacent(&cells[i], &cells[j]))
                        .collect()
                }
            }
            _ => {
                if parallel {
                    (0..n)
                        .into_par_iter()
                        .flat_map_iter(|i| {
                            ((i + 1)..n)
                                .filter(move |&j| oracle.is_adjacent(&cells[i], &cells[j]))
                                .map(move |j| (i, j))
                        })
                        .collect()
                } else {
                    (0..n)
                        .tuple_combinations::<(usize, usize)>()
                        .filter(|&(i, j)| oracle.is_adjacent(&cells[i], &cells[j]))
                        .collect()
                }
            }
        };

        pairs.sort_unstable();
        pairs
    }

    fn effective_strategy(&self, n: usize) -> PairStrategy {
        match self.config.strategy {
            PairStrategy::Auto if n > self.config.grid_threshold => PairStrategy::Grid,
            PairStrategy::Auto => PairStrategy::Exhaustive,
            other => other,
        }
    }

    fn cluster_unchecked(&self, cells: &[Cell]) -> Vec<Vec<usize>> {
        let pairs = self.adjacent_pairs(cells);
        let groups = merge_pairs(cells.len(), &pairs);
        debug!(
            "Clustered {} cells ({:?}): {} adjacent pairs, {} clusters",
            cells.len(),
            self.effective_strategy(cells.len()),
            pairs.len(),
            groups.len()
        );
        groups
    }
}

/// Folds adjacent pairs into connected components over `n` indices.
///
/// Only indices appearing in at least one pair are returned. Components are
/// ordered by their smallest index and members are ascending.
pub fn merge_pairs(n: usize, pairs: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(n);
    let mut touched = vec![false; n];

    for &(i, j) in pairs {
        if i == j {
            continue;
        }
        touched[i] = true;
        touched[j] = true;
        if sets.union(i, j) {
            trace!("Merged cells {} and {} (cluster size {})", i, j, sets.set_size(i));
        }
    }

    let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for idx in (0..n).filter(|&idx| touched[idx]) {
        let root = sets.find(idx);
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(idx);
    }

    groups
}

fn into_cell_lists(cells: &[Cell], groups: Vec<Vec<usize>>) -> Vec<Vec<Cell>> {
    groups
        .into_iter()
        .map(|indices| TableCluster::from_indices(cells, indices).into_cells())
        .collect()
}
