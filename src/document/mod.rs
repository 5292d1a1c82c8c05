//! # Stage Definition: Page Preparation
//!
//! Turns a rasterized page into the grayscale image the cell detector reads.
//!
//! - **Inputs**: a `DynamicImage`, usually rendered at 200 DPI.
//! - **Outputs**: [`PreparedPage`] holding the contrast-adjusted grayscale image and
//!   whether rotation correction changed it.
//! - **Logging**: traces the contrast parameters and any rotation applied.
//! - **Invariants**:
//!     - `was_rotated` is only `true` when rotation detection is enabled and the
//!       corrector reported a rotation.
//!     - The rotation flag is returned with the page, never stored on the preparer.
//!
//! Rotation detection itself is an external collaborator behind
//! [`RotationCorrector`].

use crate::core::constants::{DEFAULT_CONTRAST_ALPHA, DEFAULT_CONTRAST_BETA};
use crate::core::TableError;
use crate::core::validation::{validate_finite, validate_range};
use crate::utils::image::dynamic_to_gray;
use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

/// A page image ready for cell detection.
#[derive(Debug, Clone)]
pub struct PreparedPage {
    /// Contrast-adjusted grayscale page.
    pub image: GrayImage,
    /// Whether rotation correction modified the page.
    pub was_rotated: bool,
}

impl PreparedPage {
    /// Wraps an already prepared image.
    pub fn new(image: GrayImage, was_rotated: bool) -> Self {
        Self { image, was_rotated }
    }

    /// Whether text embedded in the source PDF can be reused for this page.
    ///
    /// Native text coordinates refer to the unrotated page, so a rotated page
    /// must go through OCR instead.
    pub fn allows_native_text(&self, pdf_text_extraction: bool) -> bool {
        !self.was_rotated && pdf_text_extraction
    }
}

/// Detects and undoes page skew or rotation.
pub trait RotationCorrector: Send + Sync {
    /// Returns the corrected image and whether it was rotated.
    fn correct(&self, image: GrayImage) -> Result<(GrayImage, bool), TableError>;
}

/// Corrector that leaves every page untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRotation;

impl RotationCorrector for NoRotation {
    fn correct(&self, image: GrayImage) -> Result<(GrayImage, bool), TableError> {
        Ok((image, false))
    }
}

/// Grayscale conversion, contrast adjustment and optional rotation correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePreparer {
    /// Contrast multiplier.
    pub contrast_alpha: f32,
    /// Brightness offset.
    pub contrast_beta: f32,
    /// Run the rotation corrector.
    pub detect_rotation: bool,
}

impl Default for PagePreparer {
    fn default() -> Self {
        Self {
            contrast_alpha: DEFAULT_CONTRAST_ALPHA,
            contrast_beta: DEFAULT_CONTRAST_BETA,
            detect_rotation: false,
        }
    }
}

impl PagePreparer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable rotation detection.
    pub fn with_rotation_detection(mut self, enabled: bool) -> Self {
        self.detect_rotation = enabled;
        self
    }

    /// Set the contrast parameters.
    pub fn with_contrast(mut self, alpha: f32, beta: f32) -> Self {
        self.contrast_alpha = alpha;
        self.contrast_beta = beta;
        self
    }

    /// Prepares one page.
    ///
    /// # Errors
    ///
    /// Fails on non-finite or out-of-range contrast parameters, or when the
    /// rotation corrector fails.
    pub fn prepare(
        &self,
        page: DynamicImage,
        corrector: &dyn RotationCorrector,
    ) -> Result<PreparedPage, TableError> {
        validate_finite(self.contrast_alpha, "contrast_alpha")?;
        validate_finite(self.contrast_beta, "contrast_beta")?;
        validate_range(self.contrast_alpha, 0.0, 255.0, "contrast_alpha")?;
        validate_range(self.contrast_beta, -255.0, 255.0, "contrast_beta")?;

        let gray = dynamic_to_gray(page);
        debug!(
            "Preparing {}x{} page (alpha {}, beta {})",
            gray.width(),
            gray.height(),
            self.contrast_alpha,
            self.contrast_beta
        );
        let enhanced = adjust_contrast(&gray, self.contrast_alpha, self.contrast_beta);

        if !self.detect_rotation {
            return Ok(PreparedPage::new(enhanced, false));
        }

        let (image, was_rotated) = corrector.correct(enhanced)?;
        if was_rotated {
            debug!("Rotation correction applied");
        }
        Ok(PreparedPage::new(image, was_rotated))
    }
}

/// Scales every pixel to `|alpha * v + beta|`, rounded and saturated to `u8`.
pub fn adjust_contrast(image: &GrayImage, alpha: f32, beta: f32) -> GrayImage {
    let mut lut = [0u8; 256];
    for (v, slot) in lut.iter_mut().enumerate() {
        let scaled = (alpha * v as f32 + beta).abs().round();
        *slot = scaled.clamp(0.0, 255.0) as u8;
    }

    let mut out = image.clone();
    for Luma([p]) in out.pixels_mut() {
        *p = lut[*p as usize];
    }
    out
}
