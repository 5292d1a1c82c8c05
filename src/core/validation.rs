//! Input Validation Utilities
//!
//! Cell geometry checks run before any clustering work so that a malformed
//! page fails fast, with no partial results.

use crate::core::TableError;
use crate::domain::Cell;

/// Validates that every cell is well-formed.
///
/// A cell is rejected when its corners are swapped (`x1 > x2` or `y1 > y2`)
/// or when any coordinate is negative. Zero-width and zero-height cells are
/// accepted; the adjacency test handles them without dividing by zero.
///
/// # Errors
///
/// Returns [`TableError::InvalidGeometry`] for the first offending cell.
pub fn validate_cells(cells: &[Cell]) -> Result<(), TableError> {
    for (index, cell) in cells.iter().enumerate() {
        if cell.x1 > cell.x2 {
            return Err(TableError::invalid_geometry(index, *cell, "x1 > x2"));
        }
        if cell.y1 > cell.y2 {
            return Err(TableError::invalid_geometry(index, *cell, "y1 > y2"));
        }
        if cell.x1 < 0 || cell.y1 < 0 {
            return Err(TableError::invalid_geometry(
                index,
                *cell,
                "coordinates must be non-negative",
            ));
        }
    }
    Ok(())
}

/// Validates that a float value is finite (not NaN or infinite).
#[inline]
pub fn validate_finite(value: f32, param_name: &str) -> Result<(), TableError> {
    if !value.is_finite() {
        return Err(TableError::invalid_input(format!(
            "Parameter '{}' must be finite, got: {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates that a value is within a specified range (inclusive).
#[inline]
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    param_name: &str,
) -> Result<(), TableError> {
    if value < min || value > max {
        return Err(TableError::invalid_input(format!(
            "Parameter '{}' must be in range [{}, {}], got: {}",
            param_name, min, max, value
        )));
    }
    Ok(())
}
