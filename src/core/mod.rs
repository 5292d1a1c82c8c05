//! The core module of the table clustering pipeline.
//!
//! This module contains the fundamental components shared by every stage:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - Input validation

pub mod config;
pub mod constants;
pub mod errors;
pub mod validation;

pub use config::{ClusteringConfig, ConfigError, ConfigValidator, PairStrategy};
pub use constants::*;
pub use errors::{ProcessingStage, TableError, TableResult};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
