//! Cell adjacency test.
//!
//! Two cells belong to the same table when they are comparable in size on at
//! least one axis and one of their edges touches an edge of the other, within a
//! small pixel leeway that absorbs rasterization noise.
//!
//! ## Rules
//!
//! Evaluated in order, the first decisive rule wins:
//!
//! 1. **Size compatibility**: the width ratio or the height ratio lies in
//!    `[min_ratio, max_ratio]`, taken in either order since the band is not
//!    closed under inversion (`100/98 > 1.02`). An axis where either cell has
//!    zero extent fails.
//! 2. **Horizontal disjointness**: one cell entirely left of the other is not adjacent.
//! 3. **Vertical disjointness**: one cell entirely above the other is not adjacent.
//! 4. **Strict containment**: a cell nested strictly inside the other on all
//!    four sides is not adjacent, whichever of the two is the outer one.
//! 5. **Edge proximity**: adjacent if `|a.x1-b.x2|`, `|a.x2-b.x1|`,
//!    `|a.y1-b.y2|` or `|a.y2-b.y1|` is within the leeway.
//!
//! Inverted cells (`x1 > x2` or `y1 > y2`) are never adjacent to anything.

use crate::core::ClusteringConfig;
use crate::core::constants::{DEFAULT_LEEWAY, DEFAULT_MAX_SIZE_RATIO, DEFAULT_MIN_SIZE_RATIO};
use crate::domain::Cell;

/// Returns `true` when two coordinates are within `leeway` pixels of each other.
#[inline]
pub fn coordinate_approximately_equal(coord_1: i32, coord_2: i32, leeway: i32) -> bool {
    (coord_1 as i64 - coord_2 as i64).abs() <= leeway as i64
}

/// Decides whether two cells are adjacent using the default tolerances.
///
/// Equivalent to `AdjacencyOracle::default().is_adjacent(a, b)`.
#[inline]
pub fn is_adjacent(a: &Cell, b: &Cell) -> bool {
    AdjacencyOracle::default().is_adjacent(a, b)
}

/// Symmetric geometric adjacency relation between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacencyOracle {
    /// Maximum edge distance in pixels.
    pub leeway: i32,
    /// Lower bound of the size ratio band.
    pub min_ratio: f64,
    /// Upper bound of the size ratio band.
    pub max_ratio: f64,
}

impl Default for AdjacencyOracle {
    fn default() -> Self {
        Self {
            leeway: DEFAULT_LEEWAY,
            min_ratio: DEFAULT_MIN_SIZE_RATIO,
            max_ratio: DEFAULT_MAX_SIZE_RATIO,
        }
    }
}

impl From<&ClusteringConfig> for AdjacencyOracle {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            leeway: config.leeway,
            min_ratio: config.min_size_ratio,
            max_ratio: config.max_size_ratio,
        }
    }
}

impl AdjacencyOracle {
    /// Creates an oracle with a custom leeway and the default ratio band.
    pub fn with_leeway(leeway: i32) -> Self {
        Self {
            leeway,
            ..Self::default()
        }
    }

    /// Decides whether `a` and `b` are structurally connected.
    ///
    /// Pure and symmetric: `is_adjacent(a, b) == is_adjacent(b, a)`.
    pub fn is_adjacent(&self, a: &Cell, b: &Cell) -> bool {
        if a.is_inverted() || b.is_inverted() {
            return false;
        }

        if !self.sizes_compatible(a, b) {
            return false;
        }

        if a.x2 < b.x1 || b.x2 < a.x1 {
            return false;
        }

        if a.y2 < b.y1 || b.y2 < a.y1 {
            return false;
        }

        if a.is_strictly_inside(b) || b.is_strictly_inside(a) {
            return false;
        }

        coordinate_approximately_equal(a.x1, b.x2, self.leeway)
            || coordinate_approximately_equal(a.x2, b.x1, self.leeway)
            || coordinate_approximately_equal(a.y1, b.y2, self.leeway)
            || coordinate_approximately_equal(a.y2, b.y1, self.leeway)
    }

    #[inline]
    fn sizes_compatible(&self, a: &Cell, b: &Cell) -> bool {
        self.axis_compatible(a.width(), b.width())
            || self.axis_compatible(a.height(), b.height())
    }

    #[inline]
    fn axis_compatible(&self, a: i64, b: i64) -> bool {
        self.ratio_in_band(a, b) || self.ratio_in_band(b, a)
    }

    // A zero extent on either side leaves the ratio undefined; the axis fails.
    #[inline]
    fn ratio_in_band(&self, numerator: i64, denominator: i64) -> bool {
        if numerator <= 0 || denominator <= 0 {
            return false;
        }
        let ratio = numerator as f64 / denominator as f64;
        self.min_ratio <= ratio && ratio <= self.max_ratio
    }
}
