//! Constants used throughout the table clustering pipeline.
//!
//! This module defines the default tolerances for cell adjacency, the
//! thresholds that switch between sequential, parallel and grid-pruned pair
//! evaluation, and the page preparation parameters.

/// The default edge leeway in pixels.
///
/// Two cell edges closer than or equal to this distance are treated as
/// touching. Calibrated for pages rasterized at [`REFERENCE_DPI`].
pub const DEFAULT_LEEWAY: i32 = 2;

/// The lower bound of the width/height ratio band for size compatibility.
pub const DEFAULT_MIN_SIZE_RATIO: f64 = 0.98;

/// The upper bound of the width/height ratio band for size compatibility.
pub const DEFAULT_MAX_SIZE_RATIO: f64 = 1.02;

/// The rasterization resolution the default leeway was tuned for.
pub const REFERENCE_DPI: u32 = 200;

/// The default threshold for parallel pair evaluation.
///
/// Pages with more cells than this evaluate candidate pairs on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// The default threshold for spatial grid pruning.
///
/// Pages with more cells than this only evaluate pairs sharing a grid bucket
/// when the pair strategy is `Auto`.
pub const DEFAULT_GRID_THRESHOLD: usize = 256;

/// The default contrast multiplier applied to grayscale pages.
pub const DEFAULT_CONTRAST_ALPHA: f32 = 1.1;

/// The default brightness offset applied to grayscale pages.
pub const DEFAULT_CONTRAST_BETA: f32 = 0.0;
