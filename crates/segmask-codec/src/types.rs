//! Shared types for the segmask codec.

use serde::{Deserialize, Serialize};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions from a width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels covered by these dimensions.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if either dimension is zero.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A tap location in view (displayed-image) coordinates.
///
/// A view point is only meaningful together with the view's own
/// dimensions; [`crate::hittest`] performs the explicit rescale into
/// bitmap coordinates. Keeping the two coordinate spaces in distinct
/// types prevents indexing a full-resolution bitmap with an unscaled
/// tap position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    /// Horizontal position (pixels from the left edge of the view).
    pub x: f64,
    /// Vertical position (pixels from the top edge of the view).
    pub y: f64,
}

impl ViewPoint {
    /// Create a new view-space point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One run in a row's run-length encoding.
///
/// Serializes as the two-element array `[length, value]` with `value`
/// encoded as `0` or `1`, the canonical pair grammar of the wire
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Number of consecutive pixels sharing `value`.
    pub length: u32,
    /// Whether the run is selected (foreground).
    pub value: bool,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(length: u32, value: bool) -> Self {
        Self { length, value }
    }
}

impl Serialize for Segment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.length, u8::from(self.value)).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (length, value) = <(u32, u8)>::deserialize(deserializer)?;
        Ok(Self {
            length,
            value: value != 0,
        })
    }
}

/// An ordered sequence of segments covering one full image row.
///
/// Rows produced by [`crate::rle::encode_row`] uphold two invariants:
/// segment lengths sum to the row's pixel width, and no two adjacent
/// segments share a value (runs are maximal).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRow(Vec<Segment>);

impl EncodedRow {
    /// Create an encoded row from a vector of segments.
    #[must_use]
    pub const fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Returns `true` if the row has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments in the row.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Sum of all segment lengths — the pixel width the row encodes.
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.0.iter().map(|segment| u64::from(segment.length)).sum()
    }
}

/// A row-level RLE entry additionally compressed across repeated
/// identical rows.
///
/// Serializes as `[[[length, value], ...], repeat]` — the row's
/// segment pairs nested one level, with the repeat count as a sibling
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedRow {
    /// Run-length segments describing one row of pixels.
    pub segments: EncodedRow,
    /// How many consecutive original rows are pixel-identical to
    /// `segments`. Always at least 1 when produced by
    /// [`crate::codec::compress`].
    pub repeat: u32,
}

impl CompressedRow {
    /// Create a new compressed row.
    #[must_use]
    pub const fn new(segments: EncodedRow, repeat: u32) -> Self {
        Self { segments, repeat }
    }
}

impl Serialize for CompressedRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.segments, self.repeat).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompressedRow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (segments, repeat) = <(EncodedRow, u32)>::deserialize(deserializer)?;
        Ok(Self { segments, repeat })
    }
}

/// A dense 2D boolean selection buffer (`true` = selected).
///
/// Stored as a flat row-major `Vec<bool>` indexed `row * width + col`
/// to avoid per-row allocation on multi-megapixel images; all access
/// goes through bounds-checked methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    dimensions: Dimensions,
    cells: Vec<bool>,
}

impl PixelMatrix {
    /// Create an all-background matrix.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![false; dimensions.pixel_count()],
        }
    }

    /// Build a matrix from per-row cell vectors.
    ///
    /// Returns `None` if the rows do not all share the width of the
    /// first row.
    #[must_use]
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.len() != width {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            dimensions: Dimensions::new(u32::try_from(width).ok()?, u32::try_from(rows.len()).ok()?),
            cells,
        })
    }

    /// Wrap an already-flat cell buffer. The buffer length must equal
    /// `dimensions.pixel_count()`.
    pub(crate) fn from_raw(dimensions: Dimensions, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), dimensions.pixel_count());
        Self { dimensions, cells }
    }

    /// Matrix dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Cell at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }
        self.cells
            .get(y as usize * self.dimensions.width as usize + x as usize)
            .copied()
    }

    /// One row of cells, or `None` out of bounds.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[bool]> {
        if y >= self.dimensions.height {
            return None;
        }
        let width = self.dimensions.width as usize;
        let start = y as usize * width;
        self.cells.get(start..start + width)
    }

    /// Iterate rows top to bottom.
    ///
    /// Always yields exactly `height` rows, including for zero-width
    /// matrices (where each row is empty).
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let width = self.dimensions.width as usize;
        (0..self.dimensions.height as usize).map(move |y| {
            if width == 0 {
                &self.cells[0..0]
            } else {
                &self.cells[y * width..(y + 1) * width]
            }
        })
    }

    /// Number of selected (`true`) cells.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}
