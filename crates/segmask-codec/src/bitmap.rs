//! Rendered mask bitmaps.
//!
//! A decoded mask is materialized once, on receipt, as an RGBA overlay:
//! selected pixels carry [`MASK_COLOR`], everything else is fully
//! transparent. The bitmap is the rendering artifact consumed by the
//! display layer and by tap hit testing.

use image::{Rgba, RgbaImage};

use crate::types::{Dimensions, PixelMatrix};

/// Overlay color for selected pixels: semi-opaque blue.
pub const MASK_COLOR: Rgba<u8> = Rgba([0, 0, 255, 128]);

/// Fully transparent background pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A mask's full-resolution overlay bitmap.
///
/// Wraps a flat row-major RGBA buffer behind bounds-checked access so
/// tap coordinates can never index outside the pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBitmap(RgbaImage);

impl MaskBitmap {
    /// Wrap an existing RGBA image.
    #[must_use]
    pub const fn from_image(image: RgbaImage) -> Self {
        Self(image)
    }

    /// Wrap a flat RGBA byte buffer of exactly
    /// `dimensions.pixel_count() * 4` bytes.
    pub(crate) fn from_raw_pixels(dimensions: Dimensions, pixels: Vec<u8>) -> Self {
        // `from_raw` only fails on a length mismatch, which the callers
        // in this crate construct away; fall back to an empty bitmap of
        // the declared dimensions rather than propagate an impossible
        // error.
        let image = RgbaImage::from_raw(dimensions.width, dimensions.height, pixels)
            .unwrap_or_else(|| RgbaImage::new(dimensions.width, dimensions.height));
        Self(image)
    }

    /// Bitmap width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Bitmap height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Bitmap dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.0.width(), self.0.height())
    }

    /// Whether the pixel at `(x, y)` belongs to the mask.
    ///
    /// Any pixel that is not the fully transparent background counts
    /// as foreground. Out-of-bounds coordinates are background.
    #[must_use]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.0
            .get_pixel_checked(x, y)
            .is_some_and(|pixel| *pixel != TRANSPARENT)
    }

    /// Number of foreground (non-transparent) pixels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.0.pixels().filter(|&&pixel| pixel != TRANSPARENT).count()
    }

    /// Borrow the underlying RGBA image.
    #[must_use]
    pub const fn as_image(&self) -> &RgbaImage {
        &self.0
    }

    /// Consume the bitmap and return the underlying RGBA image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.0
    }
}

/// Extract the selection matrix of an image: a cell is selected when
/// its pixel equals `selection_color` exactly.
///
/// This is the encode-path entry point for user-drawn selections,
/// where the drawing layer paints selected pixels in one known color.
#[must_use]
pub fn selection_matrix(image: &RgbaImage, selection_color: Rgba<u8>) -> PixelMatrix {
    let dimensions = Dimensions::new(image.width(), image.height());
    let mut cells = Vec::with_capacity(dimensions.pixel_count());
    for pixel in image.pixels() {
        cells.push(*pixel == selection_color);
    }
    PixelMatrix::from_raw(dimensions, cells)
}
