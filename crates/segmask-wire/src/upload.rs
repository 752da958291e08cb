//! Multipart form-field production for uploading a mask selection.
//!
//! The upload direction is stricter than the download direction: we
//! always emit the typed JSON shapes, never the legacy textual ones.
//! Transport is out of scope; this module only produces the field
//! name/body pairs a multipart client attaches.

use image::{Rgba, RgbaImage};

use segmask_codec::bitmap::{self, MASK_COLOR};
use segmask_codec::codec;
use segmask_codec::types::PixelMatrix;

use crate::error::WireError;

/// The form fields of one mask-selection upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskUpload {
    /// Identity of the image the selection was drawn over.
    pub image_id: i64,
    /// Identity of the owning project.
    pub project_id: i64,
    /// Compressed rows as `[[[length, value], ...], repeat]` JSON.
    pub counts: String,
    /// Mask dimensions as `[width, height]` JSON.
    pub size: String,
}

impl MaskUpload {
    /// Build upload fields from a selection matrix.
    ///
    /// # Errors
    ///
    /// [`WireError::Json`] if serialization fails, which for these
    /// value types means the process is out of memory.
    pub fn from_matrix(
        image_id: i64,
        project_id: i64,
        matrix: &PixelMatrix,
    ) -> Result<Self, WireError> {
        let rows = codec::compress(matrix);
        let dimensions = matrix.dimensions();
        Ok(Self {
            image_id,
            project_id,
            counts: serde_json::to_string(&rows)?,
            size: serde_json::to_string(&[dimensions.width, dimensions.height])?,
        })
    }

    /// Build upload fields from an annotated image, treating pixels of
    /// exactly `selection_color` as selected.
    ///
    /// # Errors
    ///
    /// Same as [`MaskUpload::from_matrix`].
    pub fn from_selection(
        image_id: i64,
        project_id: i64,
        image: &RgbaImage,
        selection_color: Rgba<u8>,
    ) -> Result<Self, WireError> {
        Self::from_matrix(
            image_id,
            project_id,
            &bitmap::selection_matrix(image, selection_color),
        )
    }

    /// Build upload fields from an image annotated in the default
    /// overlay color.
    ///
    /// # Errors
    ///
    /// Same as [`MaskUpload::from_matrix`].
    pub fn from_overlay(
        image_id: i64,
        project_id: i64,
        image: &RgbaImage,
    ) -> Result<Self, WireError> {
        Self::from_selection(image_id, project_id, image, MASK_COLOR)
    }

    /// The multipart field name/body pairs, in upload order.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, String); 4] {
        [
            ("image_id", self.image_id.to_string()),
            ("project_id", self.project_id.to_string()),
            ("counts", self.counts.clone()),
            ("size", self.size.clone()),
        ]
    }
}
