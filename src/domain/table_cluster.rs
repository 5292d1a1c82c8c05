//! A group of cells clustered into one table candidate.

use super::cell::Cell;
use serde::{Deserialize, Serialize};

/// The cells of one connected component, with their positions in the input.
///
/// `cells[k]` is the input cell at `indices[k]`; both are ordered by index.
/// Whether the cluster is a real table is left to downstream stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCluster {
    /// Member cells.
    pub cells: Vec<Cell>,
    /// Position of each member cell in the original input sequence.
    pub indices: Vec<usize>,
}

impl TableCluster {
    /// Resolves `indices` against the input `cells`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `cells`.
    pub fn from_indices(cells: &[Cell], indices: Vec<usize>) -> Self {
        let members = indices.iter().map(|&idx| cells[idx]).collect();
        Self {
            cells: members,
            indices,
        }
    }

    /// Number of cells in the cluster.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rectangle enclosing every member cell, or `None` for an empty cluster.
    pub fn bbox(&self) -> Option<Cell> {
        let (first, rest) = self.cells.split_first()?;
        Some(rest.iter().fold(*first, |acc, cell| acc.union(cell)))
    }

    /// Consumes the cluster, keeping only the cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
