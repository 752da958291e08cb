//! The mask record: one decoded region of interest over an image.

use chrono::{DateTime, Utc};

use crate::bitmap::MaskBitmap;
use crate::types::Dimensions;

/// A region-of-interest selection over an image.
///
/// Created when a segmentation payload is decoded; the overlay bitmap
/// is rendered once on receipt and never re-decoded. `active` is the
/// user-selection toggle the UI flips in response to taps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Server-assigned identity (or a receipt timestamp for masks the
    /// server did not label).
    pub id: i64,
    /// Identity of the owning image.
    pub image_id: i64,
    /// Native resolution of the mask bitmap.
    pub size: Dimensions,
    /// Whether the user currently has this mask selected.
    pub active: bool,
    /// When this mask was decoded.
    pub created_at: DateTime<Utc>,
    bitmap: MaskBitmap,
}

impl Mask {
    /// Create a mask from its decoded overlay bitmap.
    ///
    /// `size` is derived from the bitmap so the two cannot diverge.
    /// Masks start inactive.
    #[must_use]
    pub fn new(id: i64, image_id: i64, bitmap: MaskBitmap, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            image_id,
            size: bitmap.dimensions(),
            active: false,
            created_at,
            bitmap,
        }
    }

    /// The mask's full-resolution overlay bitmap.
    #[must_use]
    pub const fn bitmap(&self) -> &MaskBitmap {
        &self.bitmap
    }

    /// Flip the user-selection toggle.
    pub const fn toggle_active(&mut self) {
        self.active = !self.active;
    }
}
