//! Configuration management for the table clustering pipeline.
//!
//! This module provides configuration types, validation traits, and utilities
//! for loading clustering configurations.

pub mod clustering;
pub mod errors;

pub use clustering::{ClusteringConfig, PairStrategy, leeway_for_dpi};
pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
