//! Visualization of table clusters.
//!
//! Draws every clustered cell on top of the prepared page, one colour per
//! cluster, so that clustering decisions can be checked by eye.

use crate::core::{ProcessingStage, TableError};
use crate::domain::{Cell, TableCluster};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;
use tracing::{debug, info};

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([230, 25, 75]),
    Rgb([60, 180, 75]),
    Rgb([0, 130, 200]),
    Rgb([245, 130, 48]),
    Rgb([145, 30, 180]),
    Rgb([70, 240, 240]),
];

const TABLE_BBOX_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Styling for cluster overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizationConfig {
    /// The thickness of cell outlines. Defaults to 2.
    pub bbox_thickness: i32,
    /// Also outline the bounding box of each cluster.
    pub draw_table_bbox: bool,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            bbox_thickness: 2,
            draw_table_bbox: false,
        }
    }
}

/// Draws the cells of each cluster over the page with default styling.
pub fn draw_clusters(page: &GrayImage, clusters: &[TableCluster]) -> RgbImage {
    draw_clusters_with_config(page, clusters, &VisualizationConfig::default())
}

/// Draws the cells of each cluster over the page.
///
/// Cluster `k` uses palette colour `k % 6`. Outlines falling partly outside the
/// page are clipped.
pub fn draw_clusters_with_config(
    page: &GrayImage,
    clusters: &[TableCluster],
    config: &VisualizationConfig,
) -> RgbImage {
    let mut img = image::DynamicImage::ImageLuma8(page.clone()).to_rgb8();

    for (k, cluster) in clusters.iter().enumerate() {
        let color = PALETTE[k % PALETTE.len()];
        for cell in &cluster.cells {
            draw_cell(&mut img, cell, color, config.bbox_thickness);
        }
        if config.draw_table_bbox
            && let Some(bbox) = cluster.bbox()
        {
            draw_cell(&mut img, &bbox, TABLE_BBOX_COLOR, 1);
        }
    }

    debug!("Drew {} clusters", clusters.len());
    img
}

/// Renders the overlay and writes it to `output_path`.
///
/// # Errors
///
/// Fails if the image cannot be encoded or written.
pub fn visualize_clusters(
    page: &GrayImage,
    clusters: &[TableCluster],
    output_path: &Path,
) -> Result<(), TableError> {
    let overlay = draw_clusters(page, clusters);
    overlay.save(output_path).map_err(|e| {
        TableError::processing_error(ProcessingStage::Generic, "saving cluster overlay", e)
    })?;
    info!("Visualization saved to: {}", output_path.display());
    Ok(())
}

fn draw_cell(img: &mut RgbImage, cell: &Cell, color: Rgb<u8>, thickness: i32) {
    let Some(rect) = cell_to_rect(cell) else {
        return;
    };

    for t in 0..thickness.max(1) {
        let thick_rect = Rect::at(rect.left() - t, rect.top() - t)
            .of_size(rect.width() + (2 * t) as u32, rect.height() + (2 * t) as u32);
        draw_hollow_rect_mut(img, thick_rect, color);
    }
}

/// Converts a cell to the closed pixel rectangle it covers.
fn cell_to_rect(cell: &Cell) -> Option<Rect> {
    if cell.is_inverted() {
        return None;
    }
    let width = u32::try_from(cell.width()).ok()?.max(1);
    let height = u32::try_from(cell.height()).ok()?.max(1);
    Some(Rect::at(cell.x1, cell.y1).of_size(width, height))
}
