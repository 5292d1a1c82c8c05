//! Utility functions for the table pipeline.
//!
//! Image loading helpers and the cluster overlay used for debugging.

pub mod image;
pub mod visualization;

pub use image::{dynamic_to_gray, load_image, load_images_batch, load_images_batch_with_threshold};
pub use visualization::{VisualizationConfig, draw_clusters, visualize_clusters};

pub use crate::core::init_tracing;
