//! The table clustering pipeline.
//!
//! Ties a prepared page, an external cell detector and the [`CellClusterer`]
//! together. The rotation flag from page preparation is carried through to the
//! result instead of being kept on any shared object, so pages can be processed
//! concurrently.

use crate::core::TableError;
use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;
use crate::document::PreparedPage;
use crate::domain::{Cell, TableCluster};
use crate::processors::CellClusterer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Finds ruled cells on a prepared page.
///
/// Line and cell detection live outside this crate; implementors return
/// cells in a stable order since output ordering follows input order.
pub trait CellDetector: Send + Sync {
    fn detect_cells(&self, page: &PreparedPage) -> Result<Vec<Cell>, TableError>;
}

impl<F> CellDetector for F
where
    F: Fn(&PreparedPage) -> Result<Vec<Cell>, TableError> + Send + Sync,
{
    fn detect_cells(&self, page: &PreparedPage) -> Result<Vec<Cell>, TableError> {
        self(page)
    }
}

/// Table clusters found on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageClusters {
    /// Whether the page was rotated during preparation.
    pub was_rotated: bool,
    /// Clusters ordered by their first cell's detector position.
    pub tables: Vec<TableCluster>,
}

impl PageClusters {
    /// Total number of clustered cells on the page.
    pub fn cell_count(&self) -> usize {
        self.tables.iter().map(TableCluster::len).sum()
    }
}

/// Runs cell detection and clustering for prepared pages.
#[derive(Debug)]
pub struct TableClusterPipeline<D> {
    detector: D,
    clusterer: CellClusterer,
    parallel_threshold: usize,
}

impl<D: CellDetector> TableClusterPipeline<D> {
    pub fn new(detector: D, clusterer: CellClusterer) -> Self {
        Self {
            detector,
            clusterer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Page count above which [`process_pages`](Self::process_pages) uses the
    /// rayon pool. Independent of the clusterer's per-page cell threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn clusterer(&self) -> &CellClusterer {
        &self.clusterer
    }

    /// Detects and clusters the cells of one page.
    ///
    /// # Errors
    ///
    /// Propagates detector failures and, when geometry validation is enabled,
    /// rejects malformed cells before clustering.
    pub fn process(&self, page: &PreparedPage) -> Result<PageClusters, TableError> {
        let cells = self.detector.detect_cells(page)?;
        debug!("Detected {} cells", cells.len());
        let result = PageClusters {
            was_rotated: page.was_rotated,
            tables: self.clusterer.cluster_tables(&cells)?,
        };
        debug!(
            "{} of {} cells clustered into {} tables",
            result.cell_count(),
            cells.len(),
            result.tables.len()
        );
        Ok(result)
    }

    /// Processes several pages, in parallel once the page count exceeds the
    /// pipeline's parallel threshold. Results keep the page order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial results are returned.
    pub fn process_pages(&self, pages: &[PreparedPage]) -> Result<Vec<PageClusters>, TableError> {
        let results: Vec<PageClusters> = if pages.len() > self.parallel_threshold {
            pages.par_iter().map(|page| self.process(page)).collect::<Result<_, _>>()?
        } else {
            pages.iter().map(|page| self.process(page)).collect::<Result<_, _>>()?
        };

        info!(
            "Processed {} pages: {} tables",
            results.len(),
            results.iter().map(|p| p.tables.len()).sum::<usize>()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClusteringConfig;
    use image::GrayImage;

    /// Reads one cell per non-zero pixel in the first row, as a fake detector.
    fn stripe_detector(page: &PreparedPage) -> Result<Vec<Cell>, TableError> {
        let width = page.image.width() as i32;
        Ok((0..width)
            .filter(|&x| page.image.get_pixel(x as u32, 0)[0] > 0)
            .map(|x| Cell::new(x * 100, 0, x * 100 + 100, 50))
            .collect())
    }

    struct FailingDetector;

    impl CellDetector for FailingDetector {
        fn detect_cells(&self, _page: &PreparedPage) -> Result<Vec<Cell>, TableError> {
            Err(TableError::cell_detection(
                "line detection",
                std::io::Error::other("empty page"),
            ))
        }
    }

    fn page(row: &[u8], was_rotated: bool) -> PreparedPage {
        let image = GrayImage::from_raw(row.len() as u32, 1, row.to_vec()).unwrap();
        PreparedPage::new(image, was_rotated)
    }

    #[test]
    fn test_process_carries_rotation_flag() {
        let pipeline = TableClusterPipeline::new(stripe_detector, CellClusterer::default());

        let result = pipeline.process(&page(&[1, 1, 1, 0, 1], true)).unwrap();
        assert!(result.was_rotated);
        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.tables[0].indices, vec![0, 1, 2]);
        assert_eq!(result.cell_count(), 3);

        let result = pipeline.process(&page(&[1, 0, 1], false)).unwrap();
        assert!(!result.was_rotated);
        assert!(result.tables.is_empty());
    }

    #[test]
    fn test_process_pages_preserves_order() {
        let pages: Vec<PreparedPage> = (0..12)
            .map(|k| {
                let mut row = vec![0u8; 12];
                row[..=k].fill(255);
                page(&row, k % 2 == 0)
            })
            .collect();

        for threshold in [0, usize::MAX] {
            let pipeline = TableClusterPipeline::new(stripe_detector, CellClusterer::default())
                .with_parallel_threshold(threshold);
            let results = pipeline.process_pages(&pages).unwrap();

            assert_eq!(results.len(), 12);
            assert!(results[0].tables.is_empty());
            for (k, result) in results.iter().enumerate().skip(1) {
                assert_eq!(result.was_rotated, k % 2 == 0);
                assert_eq!(result.tables.len(), 1);
                assert_eq!(result.cell_count(), k + 1);
            }
        }
    }

    #[test]
    fn test_page_threshold_is_independent_of_cell_threshold() {
        let clusterer =
            CellClusterer::new(ClusteringConfig::new().with_parallel_threshold(0)).unwrap();
        let pipeline = TableClusterPipeline::new(stripe_detector, clusterer);
        assert_eq!(pipeline.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(pipeline.clusterer().config().parallel_threshold, 0);

        let pipeline = pipeline.with_parallel_threshold(2);
        assert_eq!(pipeline.parallel_threshold(), 2);
        assert_eq!(pipeline.clusterer().config().parallel_threshold, 0);
    }

    #[test]
    fn test_detector_errors_propagate() {
        let pipeline = TableClusterPipeline::new(FailingDetector, CellClusterer::default());
        let err = pipeline.process_pages(&[page(&[1], false)]).unwrap_err();
        assert!(matches!(err, TableError::Processing { .. }));
    }

    #[test]
    fn test_validation_applies_to_detected_cells() {
        let detector = |_: &PreparedPage| -> Result<Vec<Cell>, TableError> {
            Ok(vec![Cell::new(10, 0, 0, 10)])
        };
        let clusterer =
            CellClusterer::new(ClusteringConfig::new().with_geometry_validation(true)).unwrap();
        let pipeline = TableClusterPipeline::new(detector, clusterer);
        assert!(matches!(
            pipeline.process(&page(&[0], false)),
            Err(TableError::InvalidGeometry { index: 0, .. })
        ));
    }
}
