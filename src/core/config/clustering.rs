//! Clustering configuration types.

use super::errors::{ConfigError, ConfigValidator};
use crate::core::TableError;
use crate::core::constants::{
    DEFAULT_GRID_THRESHOLD, DEFAULT_LEEWAY, DEFAULT_MAX_SIZE_RATIO, DEFAULT_MIN_SIZE_RATIO,
    DEFAULT_PARALLEL_THRESHOLD, REFERENCE_DPI,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How candidate cell pairs are enumerated before the adjacency test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStrategy {
    /// Test every unordered pair.
    Exhaustive,
    /// Only test pairs whose rectangles share a spatial grid bucket.
    Grid,
    /// Exhaustive for small pages, grid above `grid_threshold` cells.
    #[default]
    Auto,
}

impl FromStr for PairStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" => Ok(Self::Exhaustive),
            "grid" => Ok(Self::Grid),
            "auto" => Ok(Self::Auto),
            other => Err(ConfigError::InvalidConfig {
                message: format!(
                    "unknown pair strategy '{}', expected exhaustive, grid or auto",
                    other
                ),
            }),
        }
    }
}

/// Configuration for the cell clustering engine.
///
/// The defaults reproduce the reference adjacency rules exactly: a 2 px
/// leeway and a `[0.98, 1.02]` size ratio band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Maximum edge-to-edge distance, in pixels, for two edges to count as touching.
    #[serde(default = "ClusteringConfig::default_leeway")]
    pub leeway: i32,

    /// Lower bound of the width or height ratio band.
    #[serde(default = "ClusteringConfig::default_min_size_ratio")]
    pub min_size_ratio: f64,

    /// Upper bound of the width or height ratio band.
    #[serde(default = "ClusteringConfig::default_max_size_ratio")]
    pub max_size_ratio: f64,

    /// Reject inverted or negative cells before clustering.
    /// Default: false (malformed cells are simply never adjacent)
    #[serde(default)]
    pub validate_geometry: bool,

    /// Candidate pair enumeration strategy.
    #[serde(default)]
    pub strategy: PairStrategy,

    /// Cell count above which pairs are evaluated on the rayon pool.
    #[serde(default = "ClusteringConfig::default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Cell count above which `Auto` switches to grid pruning.
    #[serde(default = "ClusteringConfig::default_grid_threshold")]
    pub grid_threshold: usize,

    /// Grid bucket edge length in pixels.
    /// If None, derived from the median cell size of each page.
    #[serde(default)]
    pub grid_bucket_size: Option<i32>,
}

impl ClusteringConfig {
    /// Create a new ClusteringConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose leeway is scaled for pages rasterized at `dpi`.
    ///
    /// The reference leeway of 2 px corresponds to 200 DPI.
    pub fn for_dpi(dpi: u32) -> Self {
        Self::default().with_leeway(leeway_for_dpi(dpi))
    }

    /// Set the edge leeway.
    pub fn with_leeway(mut self, leeway: i32) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set the size ratio band.
    pub fn with_size_ratio_band(mut self, min: f64, max: f64) -> Self {
        self.min_size_ratio = min;
        self.max_size_ratio = max;
        self
    }

    /// Enable or disable up-front geometry validation.
    pub fn with_geometry_validation(mut self, enabled: bool) -> Self {
        self.validate_geometry = enabled;
        self
    }

    /// Set the pair enumeration strategy.
    pub fn with_strategy(mut self, strategy: PairStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the parallel evaluation threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the grid pruning threshold.
    pub fn with_grid_threshold(mut self, threshold: usize) -> Self {
        self.grid_threshold = threshold;
        self
    }

    /// Set a fixed grid bucket size.
    pub fn with_grid_bucket_size(mut self, size: Option<i32>) -> Self {
        self.grid_bucket_size = size;
        self
    }

    /// Parses and validates a configuration from a JSON string.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    fn default_leeway() -> i32 {
        DEFAULT_LEEWAY
    }

    fn default_min_size_ratio() -> f64 {
        DEFAULT_MIN_SIZE_RATIO
    }

    fn default_max_size_ratio() -> f64 {
        DEFAULT_MAX_SIZE_RATIO
    }

    fn default_parallel_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }

    fn default_grid_threshold() -> usize {
        DEFAULT_GRID_THRESHOLD
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            leeway: Self::default_leeway(),
            min_size_ratio: Self::default_min_size_ratio(),
            max_size_ratio: Self::default_max_size_ratio(),
            validate_geometry: false,
            strategy: PairStrategy::default(),
            parallel_threshold: Self::default_parallel_threshold(),
            grid_threshold: Self::default_grid_threshold(),
            grid_bucket_size: None,
        }
    }
}

impl ConfigValidator for ClusteringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_non_negative_i32(self.leeway, "leeway")?;
        self.validate_f64_range(self.min_size_ratio, f64::MIN_POSITIVE, 1.0, "min_size_ratio")?;
        self.validate_f64_range(self.max_size_ratio, 1.0, f64::MAX, "max_size_ratio")?;
        if let Some(size) = self.grid_bucket_size {
            self.validate_positive_i32(size, "grid_bucket_size")?;
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Scales the reference leeway to a page rasterized at `dpi`.
///
/// Rounds to the nearest pixel and never drops below 1 px.
pub fn leeway_for_dpi(dpi: u32) -> i32 {
    let scaled = DEFAULT_LEEWAY as f64 * dpi as f64 / REFERENCE_DPI as f64;
    (scaled.round() as i32).max(1)
}
