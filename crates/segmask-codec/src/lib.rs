//! segmask-codec: mask run-length codec and tap hit testing (sans-IO).
//!
//! Compresses per-pixel boolean selection masks into the two-level
//! run-length representation the segmentation service speaks (row
//! segments, further compressed by identical-row repetition), expands
//! such representations back into pixel buffers and overlay bitmaps,
//! and resolves which mask a view-space tap lands on.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! buffers and returns structured data. Wire-format parsing and
//! payload production live in `segmask-wire`.

pub mod bitmap;
pub mod codec;
pub mod hittest;
pub mod mask;
pub mod rle;
pub mod types;

pub use bitmap::{MASK_COLOR, MaskBitmap, selection_matrix};
pub use hittest::{detect_mask_tap, hit_test};
pub use mask::Mask;
pub use types::{CompressedRow, Dimensions, EncodedRow, PixelMatrix, Segment, ViewPoint};
