//! Uniform grid for pruning candidate cell pairs.
//!
//! Adjacency requires the closed rectangles of two cells to intersect (the
//! disjointness rules reject everything else). Two intersecting closed
//! rectangles always share at least the bucket containing one of their common
//! points, so registering each cell in every bucket it covers and pairing up
//! bucket members yields a superset of the adjacent pairs. Results are the
//! same as testing every pair.

use crate::domain::Cell;
use std::collections::HashMap;

/// Cells covering more buckets than this are paired with every other cell
/// instead of being bucketed.
const MAX_BUCKETS_PER_CELL: i64 = 4096;

/// Cells bucketed by the grid squares their rectangles cover.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bucket_size: i64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
    cell_buckets: Vec<Vec<(i64, i64)>>,
    oversized: Vec<usize>,
}

impl SpatialGrid {
    /// Buckets `cells` on a grid of `bucket_size` x `bucket_size` pixels.
    ///
    /// Inverted cells are left out, they can never be adjacent. A
    /// non-positive `bucket_size` is clamped to 1.
    pub fn build(cells: &[Cell], bucket_size: i32) -> Self {
        let bucket_size = i64::from(bucket_size.max(1));
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let mut cell_buckets = Vec::with_capacity(cells.len());
        let mut oversized = Vec::new();

        for (idx, cell) in cells.iter().enumerate() {
            let mut covered = Vec::new();
            if !cell.is_inverted() {
                let (bx1, bx2) = (
                    i64::from(cell.x1).div_euclid(bucket_size),
                    i64::from(cell.x2).div_euclid(bucket_size),
                );
                let (by1, by2) = (
                    i64::from(cell.y1).div_euclid(bucket_size),
                    i64::from(cell.y2).div_euclid(bucket_size),
                );
                let span = (bx2 - bx1 + 1).saturating_mul(by2 - by1 + 1);
                if span > MAX_BUCKETS_PER_CELL {
                    oversized.push(idx);
                    cell_buckets.push(covered);
                    continue;
                }
                for bx in bx1..=bx2 {
                    for by in by1..=by2 {
                        buckets.entry((bx, by)).or_default().push(idx);
                        covered.push((bx, by));
                    }
                }
            }
            cell_buckets.push(covered);
        }

        Self {
            bucket_size,
            buckets,
            cell_buckets,
            oversized,
        }
    }

    /// Bucket edge length in pixels.
    pub fn bucket_size(&self) -> i64 {
        self.bucket_size
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Cells too large to bucket, paired with everything.
    pub fn oversized(&self) -> &[usize] {
        &self.oversized
    }

    /// Every `(i, j)` with `i < j` whose rectangles share a bucket, plus every
    /// pair involving an oversized cell.
    ///
    /// Sorted and free of duplicates.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.cell_buckets.len();
        // Last `i` that recorded `j` as a candidate; avoids a per-cell set.
        let mut seen_by = vec![usize::MAX; n];
        let mut pairs = Vec::new();

        for (i, covered) in self.cell_buckets.iter().enumerate() {
            for key in covered {
                let Some(members) = self.buckets.get(key) else {
                    continue;
                };
                for &j in members {
                    if j > i && seen_by[j] != i {
                        seen_by[j] = i;
                        pairs.push((i, j));
                    }
                }
            }
        }

        for &big in &self.oversized {
            for other in (0..n).filter(|&k| k != big) {
                pairs.push((big.min(other), big.max(other)));
            }
        }

        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

/// Bucket size derived from the page's cells.
///
/// The median of `max(width, height)` over well-formed cells keeps a typical
/// cell within a 2x2 block of buckets. Never below 1.
pub fn suggested_bucket_size(cells: &[Cell]) -> i32 {
    let mut extents: Vec<i64> = cells
        .iter()
        .filter(|c| !c.is_inverted())
        .map(|c| c.width().max(c.height()))
        .collect();

    if extents.is_empty() {
        return 1;
    }

    let mid = extents.len() / 2;
    let (_, median, _) = extents.select_nth_unstable(mid);
    (*median).clamp(1, i64::from(i32::MAX)) as i32
}
