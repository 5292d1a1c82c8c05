//! Axis-aligned table cell geometry.
//!
//! A [`Cell`] is the rectangle an upstream line detector reports for one table
//! cell candidate, in page pixel coordinates. Cells are plain values: the
//! clustering code only ever borrows them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular cell candidate with integer pixel coordinates.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right corner.
/// Well-formed cells satisfy `x1 <= x2` and `y1 <= y2`; a zero width or height
/// is degenerate but still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl Cell {
    /// Creates a new cell from its corner coordinates.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent, `x2 - x1`, widened so extreme coordinates cannot overflow.
    /// Negative for inverted cells.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    /// Vertical extent, `y2 - y1`.
    #[inline]
    pub const fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// Returns `true` when the corners are swapped on either axis.
    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Returns `true` when all four sides of `self` lie strictly inside `other`.
    ///
    /// Shared edges do not count as inside.
    #[inline]
    pub const fn is_strictly_inside(&self, other: &Cell) -> bool {
        self.x1 > other.x1 && self.x2 < other.x2 && self.y1 > other.y1 && self.y2 < other.y2
    }

    /// Smallest cell enclosing both `self` and `other`.
    pub fn union(&self, other: &Cell) -> Cell {
        Cell {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

impl From<[i32; 4]> for Cell {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<(i32, i32, i32, i32)> for Cell {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
