//! Row-level run-length encoding and decoding.
//!
//! A row of booleans is encoded as maximal runs of identical values,
//! each emitted as a [`Segment`] of `(length, value)`. Decoding is
//! deliberately tolerant: segments that overrun the target width are
//! truncated at the row boundary, and segments that underrun it leave
//! the remaining tail as background. Malformed run lists therefore
//! degrade to a partially-filled row instead of failing.

use crate::types::{EncodedRow, Segment};

/// Run-length encode one boolean row.
///
/// Scans left to right, accumulating a run while the value is
/// unchanged and emitting a segment on each value change. An empty row
/// encodes to an empty segment list.
///
/// The result's segment lengths sum to `row.len()` and no two adjacent
/// segments share a value.
#[must_use]
pub fn encode_row(row: &[bool]) -> EncodedRow {
    let Some(&first) = row.first() else {
        return EncodedRow::default();
    };

    let mut segments = Vec::new();
    let mut current = first;
    let mut length: u32 = 1;

    for &cell in &row[1..] {
        if cell == current {
            length += 1;
        } else {
            segments.push(Segment::new(length, current));
            current = cell;
            length = 1;
        }
    }
    segments.push(Segment::new(length, current));

    EncodedRow::new(segments)
}

/// Expand an encoded row back into `width` boolean cells.
///
/// Segments past the row boundary are truncated at exactly `width`
/// cells; if the segments underrun `width`, the tail stays background
/// (`false`). Both are defined tolerance rules, not errors.
#[must_use]
pub fn decode_row(segments: &EncodedRow, width: usize) -> Vec<bool> {
    let mut row = vec![false; width];
    let mut x = 0usize;

    for segment in segments.segments() {
        if x >= width {
            break;
        }
        let end = x.saturating_add(segment.length as usize).min(width);
        if segment.value {
            row[x..end].fill(true);
        }
        x = end;
    }

    row
}
