//! Utility functions for loading page images.
//!
//! Pages are read from disk as `DynamicImage` so that [`PagePreparer`] can
//! decide how to convert them.
//!
//! [`PagePreparer`]: crate::document::PagePreparer

use crate::core::TableError;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Converts a DynamicImage to a GrayImage.
pub fn dynamic_to_gray(img: DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Loads a page image from a file path.
///
/// # Errors
///
/// Returns [`TableError::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage, TableError> {
    image::open(path).map_err(TableError::ImageLoad)
}

/// Loads a batch of page images, in parallel above the default threshold.
///
/// # Errors
///
/// Returns the first load error encountered.
pub fn load_images_batch<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
) -> Result<Vec<DynamicImage>, TableError> {
    load_images_batch_with_threshold(paths, None)
}

/// Loads a batch of page images with a custom parallel threshold.
///
/// Images are loaded on the rayon pool when `paths.len()` exceeds the
/// threshold, or `DEFAULT_PARALLEL_THRESHOLD` when none is given. The output
/// keeps the order of `paths`.
///
/// # Errors
///
/// Returns the first load error encountered.
pub fn load_images_batch_with_threshold<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
    parallel_threshold: Option<usize>,
) -> Result<Vec<DynamicImage>, TableError> {
    use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;

    let threshold = parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD);

    if paths.len() > threshold {
        use rayon::prelude::*;
        paths.par_iter().map(|p| load_image(p.as_ref())).collect()
    } else {
        paths.iter().map(|p| load_image(p.as_ref())).collect()
    }
}
