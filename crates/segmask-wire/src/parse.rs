//! Shape normalization: any payload shape in, one canonical form out.
//!
//! Whatever shape `size` and `counts` arrived in, this module reduces
//! them to a `(Dimensions, Vec<CompressedRow>)` pair and decodes masks
//! from them. Shape-specific branching stops here; nothing downstream
//! ever sees which variant the service sent.

use chrono::Utc;
use tracing::warn;

use segmask_codec::codec;
use segmask_codec::types::{CompressedRow, Dimensions, EncodedRow, Segment};
use segmask_codec::Mask;

use crate::error::WireError;
use crate::payload::{MaskPayload, RawCountsEntry, WireCounts, WireSize};
use crate::textual;

/// Normalize a payload's `size` and `counts` into canonical form.
///
/// Missing `size` defaults to `(0, 0)`; missing `counts` to an empty
/// row list (a fully transparent mask). Neither is an error.
///
/// # Errors
///
/// [`WireError::MalformedPayload`] for corrupted numeric text in a
/// textual payload; [`WireError::DimensionMismatch`] for negative or
/// out-of-range declared dimensions.
pub fn parse_payload(payload: &MaskPayload) -> Result<(Dimensions, Vec<CompressedRow>), WireError> {
    let dimensions = match &payload.size {
        None => Dimensions::default(),
        Some(WireSize::Typed(values)) => size_from_values(values)?,
        Some(WireSize::Textual(text)) => {
            let (width, height) = textual::parse_size(text)?;
            checked_dimensions(width, height)?
        }
    };

    let rows = match &payload.counts {
        None => Vec::new(),
        Some(WireCounts::Typed(entries)) => normalize_entries(entries),
        Some(WireCounts::Textual(text)) => normalize_entries(&textual::parse_counts(text)?),
    };

    Ok((dimensions, rows))
}

/// Decode one payload into a [`Mask`], rendering its overlay bitmap.
///
/// A missing `id` falls back to the receipt timestamp in milliseconds,
/// which keeps unlabeled masks distinguishable and roughly ordered.
///
/// # Errors
///
/// Propagates [`parse_payload`] failures; everything else about the
/// payload is absorbed by the decode tolerance rules.
pub fn mask_from_payload(payload: &MaskPayload) -> Result<Mask, WireError> {
    let (dimensions, rows) = parse_payload(payload)?;
    let received_at = Utc::now();

    let bitmap = codec::render(&rows, dimensions);
    let mut mask = Mask::new(
        payload.id.unwrap_or_else(|| received_at.timestamp_millis()),
        payload.image_id.unwrap_or(0),
        bitmap,
        received_at,
    );
    mask.active = payload.active.unwrap_or(false);
    Ok(mask)
}

/// Parse one mask payload from its JSON text.
///
/// # Errors
///
/// [`WireError::Json`] if the envelope is not a JSON object, plus the
/// [`mask_from_payload`] failure modes.
pub fn parse_mask(json: &str) -> Result<Mask, WireError> {
    let payload: MaskPayload = serde_json::from_str(json)?;
    mask_from_payload(&payload)
}

/// Parse a JSON array of mask payloads with per-mask failure
/// isolation.
///
/// Entries that fail to decode are logged and skipped; one corrupt
/// mask never discards the rest of the batch. Order is preserved.
///
/// # Errors
///
/// [`WireError::Json`] only if the envelope itself is not a JSON
/// array.
pub fn parse_mask_list(json: &str) -> Result<Vec<Mask>, WireError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;

    let mut masks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<MaskPayload>(entry)
            .map_err(WireError::from)
            .and_then(|payload| mask_from_payload(&payload));
        match decoded {
            Ok(mask) => masks.push(mask),
            Err(error) => warn!(index, %error, "skipping undecodable mask payload"),
        }
    }
    Ok(masks)
}

/// Validate a typed `[width, height]` array. Fewer than two elements
/// defaults to `(0, 0)`, matching the textual shape's absent-size
/// behavior.
fn size_from_values(values: &[i64]) -> Result<Dimensions, WireError> {
    match values {
        [width, height, ..] => checked_dimensions(*width, *height),
        _ => Ok(Dimensions::default()),
    }
}

/// Narrow declared dimension tokens into `u32` pixel counts.
fn checked_dimensions(width: i64, height: i64) -> Result<Dimensions, WireError> {
    let mismatch = || WireError::DimensionMismatch { width, height };
    Ok(Dimensions::new(
        u32::try_from(width).map_err(|_| mismatch())?,
        u32::try_from(height).map_err(|_| mismatch())?,
    ))
}

/// Reduce raw numeric rows to canonical compressed rows.
///
/// Tolerance rules: nonpositive segment lengths contribute no pixels
/// and are dropped; nonpositive repeat counts drop the row. A segment
/// value outside `{0, 1}` marks the deprecated single-level legacy
/// shape whose counts doubled as segment-level repeat hints; such
/// payloads are decoded best-effort (nonzero value = foreground,
/// row-level repeats) and flagged with a warning, because the two
/// historical decoders disagreed on their meaning.
fn normalize_entries(entries: &[RawCountsEntry]) -> Vec<CompressedRow> {
    let mut legacy_token: Option<i64> = None;
    let mut rows = Vec::with_capacity(entries.len());

    for (pairs, repeat) in entries {
        let mut segments = Vec::with_capacity(pairs.len());
        for &(length, value) in pairs {
            if !(0..=1).contains(&value) && legacy_token.is_none() {
                legacy_token = Some(value);
            }
            let Ok(length) = u32::try_from(length) else {
                continue;
            };
            if length == 0 {
                continue;
            }
            segments.push(Segment::new(length, value != 0));
        }

        let repeat = u32::try_from((*repeat).clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
        if repeat == 0 {
            continue;
        }
        rows.push(CompressedRow::new(EncodedRow::new(segments), repeat));
    }

    if let Some(token) = legacy_token {
        warn!(
            token,
            "segment value outside 0/1: legacy single-level counts shape, decoding best-effort",
        );
    }

    rows
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(json: &str) -> MaskPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn typed_and_textual_shapes_normalize_identically() {
        let typed = payload(
            r#"{"size": [4, 3], "counts": [[[[2, 1], [2, 0]], 2], [[[4, 0]], 1]]}"#,
        );
        let textual = payload(
            r#"{"size": "(4, 3)", "counts": "[([(2,1),(2,0)], 2), ([(4,0)], 1)]"}"#,
        );

        let typed_result = parse_payload(&typed).unwrap();
        let textual_result = parse_payload(&textual).unwrap();
        assert_eq!(typed_result, textual_result);

        let (dimensions, rows) = typed_result;
        assert_eq!(dimensions, Dimensions::new(4, 3));
        assert_eq!(
            rows,
            vec![
                CompressedRow::new(
                    EncodedRow::new(vec![Segment::new(2, true), Segment::new(2, false)]),
                    2,
                ),
                CompressedRow::new(EncodedRow::new(vec![Segment::new(4, false)]), 1),
            ],
        );
    }

    #[test]
    fn missing_size_defaults_to_zero() {
        let (dimensions, rows) = parse_payload(&payload("{}")).unwrap();
        assert_eq!(dimensions, Dimensions::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn short_size_array_defaults_to_zero() {
        let (dimensions, _) = parse_payload(&payload(r#"{"size": [683]}"#)).unwrap();
        assert_eq!(dimensions, Dimensions::default());
    }

    #[test]
    fn negative_size_is_dimension_mismatch() {
        let result = parse_payload(&payload(r#"{"size": [-1, 512]}"#));
        assert!(matches!(
            result,
            Err(WireError::DimensionMismatch {
                width: -1,
                height: 512,
            }),
        ));
    }

    #[test]
    fn negative_textual_size_is_dimension_mismatch() {
        let result = parse_payload(&payload(r#"{"size": "(683, -2)"}"#));
        assert!(matches!(result, Err(WireError::DimensionMismatch { .. })));
    }

    #[test]
    fn corrupt_textual_counts_is_malformed_payload() {
        let result = parse_payload(&payload(r#"{"size": [4, 3], "counts": "[([(2,1)], oops)]"}"#));
        assert!(matches!(result, Err(WireError::MalformedPayload(_))));
    }

    #[test]
    fn nonpositive_repeats_and_lengths_are_dropped() {
        let raw = payload(r#"{"counts": [[[[0, 1], [3, 1]], 2], [[[2, 0]], 0], [[[2, 0]], -4]]}"#);
        let (_, rows) = parse_payload(&raw).unwrap();
        assert_eq!(
            rows,
            vec![CompressedRow::new(
                EncodedRow::new(vec![Segment::new(3, true)]),
                2,
            )],
        );
    }

    #[test]
    fn legacy_segment_values_decode_as_foreground() {
        // value=4 is the deprecated repeat-hint shape; decoded as
        // foreground with row-level repeat semantics.
        let raw = payload(r#"{"size": [3, 2], "counts": [[[[3, 4]], 2]]}"#);
        let (dimensions, rows) = parse_payload(&raw).unwrap();
        let matrix = codec::expand(&rows, dimensions);
        assert_eq!(matrix.selected_count(), 6);
    }

    #[test]
    fn mask_defaults_come_from_one_place() {
        let mask = mask_from_payload(&payload(r#"{"size": [2, 2]}"#)).unwrap();
        assert_eq!(mask.image_id, 0);
        assert!(!mask.active);
        // No counts: fully transparent bitmap.
        assert!(!mask.bitmap().is_foreground(0, 0));
        // Fallback id is the receipt timestamp, which is never zero.
        assert_ne!(mask.id, 0);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let mask = mask_from_payload(&payload(
            r#"{"id": 42, "image_id": 7, "active": true, "size": [1, 1], "counts": [[[[1, 1]], 1]]}"#,
        ))
        .unwrap();
        assert_eq!(mask.id, 42);
        assert_eq!(mask.image_id, 7);
        assert!(mask.active);
        assert!(mask.bitmap().is_foreground(0, 0));
    }

    #[test]
    fn batch_decode_isolates_corrupt_entries() {
        let json = r#"[
            {"id": 1, "size": [2, 2], "counts": [[[[2, 1]], 2]]},
            {"id": 2, "size": [-5, 2]},
            {"id": 3, "size": "(2, 2)", "counts": "[([(2,0)], 2)]"}
        ]"#;
        let masks = parse_mask_list(json).unwrap();
        let ids: Vec<i64> = masks.iter().map(|mask| mask.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn batch_envelope_must_be_an_array() {
        assert!(matches!(
            parse_mask_list(r#"{"id": 1}"#),
            Err(WireError::Json(_)),
        ));
    }
}
