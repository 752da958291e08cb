//! Two-level matrix compression.
//!
//! Level one run-length encodes each row ([`crate::rle`]); level two
//! merges consecutive pixel-identical rows into a single
//! [`CompressedRow`] carrying a repeat count. Expansion reverses both
//! levels, writing into a flat `row * width + col` buffer and applying
//! the same truncate/pad tolerance as row decoding so a malformed
//! payload degrades to a partial mask instead of failing.

use crate::bitmap::{MASK_COLOR, MaskBitmap, TRANSPARENT};
use crate::rle;
use crate::types::{CompressedRow, Dimensions, PixelMatrix};

/// Compress a pixel matrix into its run-length wire representation.
///
/// Each row is run-length encoded; whenever a row's segment list is
/// structurally equal to the previous row's, the previous entry's
/// repeat count is incremented instead of emitting a new record. The
/// repeat counts of the result always sum to `matrix.height()`.
#[must_use]
pub fn compress(matrix: &PixelMatrix) -> Vec<CompressedRow> {
    let mut compressed: Vec<CompressedRow> = Vec::new();

    for row in matrix.rows() {
        let encoded = rle::encode_row(row);
        match compressed.last_mut() {
            Some(last) if last.segments == encoded => last.repeat += 1,
            _ => compressed.push(CompressedRow::new(encoded, 1)),
        }
    }

    compressed
}

/// Expand compressed rows back into a boolean pixel matrix.
///
/// Each distinct row is decoded once and then duplicated `repeat`
/// times. Rows past `dimensions.height` are truncated; if the rows
/// underrun the height, the remaining rows stay background. The result
/// always has exactly the requested dimensions.
#[must_use]
pub fn expand(rows: &[CompressedRow], dimensions: Dimensions) -> PixelMatrix {
    let width = dimensions.width as usize;
    let height = dimensions.height as usize;
    let mut cells = vec![false; dimensions.pixel_count()];

    let mut y = 0usize;
    'rows: for row in rows {
        let decoded = rle::decode_row(&row.segments, width);
        for _ in 0..row.repeat {
            if y >= height {
                break 'rows;
            }
            cells[y * width..(y + 1) * width].copy_from_slice(&decoded);
            y += 1;
        }
    }

    PixelMatrix::from_raw(dimensions, cells)
}

/// Render compressed rows straight into an RGBA overlay bitmap.
///
/// Selected pixels get [`MASK_COLOR`], everything else stays fully
/// transparent. Row duplication copies the already-rendered RGBA row,
/// so each distinct row is rasterized exactly once regardless of its
/// repeat count. Applies the same truncate/pad tolerance as
/// [`expand`].
#[must_use]
pub fn render(rows: &[CompressedRow], dimensions: Dimensions) -> MaskBitmap {
    let width = dimensions.width as usize;
    let height = dimensions.height as usize;
    let row_bytes = width * 4;
    let mut pixels = vec![0u8; dimensions.pixel_count() * 4];

    let mut y = 0usize;
    'rows: for row in rows {
        let decoded = rle::decode_row(&row.segments, width);
        let mut row_pixels = Vec::with_capacity(row_bytes);
        for &cell in &decoded {
            row_pixels.extend_from_slice(if cell { &MASK_COLOR.0 } else { &TRANSPARENT.0 });
        }

        for _ in 0..row.repeat {
            if y >= height {
                break 'rows;
            }
            pixels[y * row_bytes..(y + 1) * row_bytes].copy_from_slice(&row_pixels);
            y += 1;
        }
    }

    MaskBitmap::from_raw_pixels(dimensions, pixels)
}
