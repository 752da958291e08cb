//! Typed view of the mask payload the segmentation service returns.
//!
//! The service has emitted this payload in several shapes over time:
//! `size` and `counts` may arrive as typed JSON arrays or as textual
//! literals of the same run-length scheme. Every field is optional on
//! the wire; defaults are applied in exactly one place
//! ([`crate::parse`]), never at call sites.

use serde::Deserialize;

/// Raw numeric counts entry: the row's `[length, value]` pairs plus a
/// repeat count, before any validation or narrowing.
pub type RawCountsEntry = (Vec<(i64, i64)>, i64);

/// One mask payload, exactly as received.
///
/// ```json
/// {
///   "id": 7,
///   "image_id": 3,
///   "active": false,
///   "size": [683, 512],
///   "counts": [[[[683, 0], [7, 1], [206, 0]], 4]]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MaskPayload {
    /// Server-assigned mask identity.
    #[serde(default)]
    pub id: Option<i64>,
    /// Identity of the owning image.
    #[serde(default)]
    pub image_id: Option<i64>,
    /// Whether the mask arrives pre-selected.
    #[serde(default)]
    pub active: Option<bool>,
    /// Declared `[width, height]`, in either wire shape.
    #[serde(default)]
    pub size: Option<WireSize>,
    /// Run-length rows, in either wire shape.
    #[serde(default)]
    pub counts: Option<WireCounts>,
}

/// The `size` field: a typed `[width, height]` array or the legacy
/// `"(width, height)"` string literal.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireSize {
    /// `[width, height]` as JSON integers.
    Typed(Vec<i64>),
    /// `"(width, height)"` as a string literal.
    Textual(String),
}

/// The `counts` field: typed nested arrays or the legacy textual
/// tuple-list encoding of the same rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireCounts {
    /// `[[[[len, val], ...], repeat], ...]` as JSON arrays.
    Typed(Vec<RawCountsEntry>),
    /// `"[([(len, val), ...], repeat), ...]"` as a string literal.
    Textual(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn typed_payload_deserializes() {
        let json = r#"{
            "id": 7,
            "image_id": 3,
            "active": true,
            "size": [4, 3],
            "counts": [[[[2, 1], [2, 0]], 2], [[[4, 0]], 1]]
        }"#;
        let payload: MaskPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.image_id, Some(3));
        assert_eq!(payload.active, Some(true));
        assert!(matches!(payload.size, Some(WireSize::Typed(ref s)) if s == &[4, 3]));
        let Some(WireCounts::Typed(entries)) = payload.counts else {
            unreachable!("expected typed counts");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (vec![(2, 1), (2, 0)], 2));
    }

    #[test]
    fn textual_payload_deserializes() {
        let json = r#"{
            "size": "(4, 3)",
            "counts": "[([(2,1),(2,0)], 2), ([(4,0)], 1)]"
        }"#;
        let payload: MaskPayload = serde_json::from_str(json).unwrap();

        assert!(matches!(payload.size, Some(WireSize::Textual(_))));
        assert!(matches!(payload.counts, Some(WireCounts::Textual(_))));
    }

    #[test]
    fn all_fields_are_optional() {
        let payload: MaskPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.id.is_none());
        assert!(payload.image_id.is_none());
        assert!(payload.active.is_none());
        assert!(payload.size.is_none());
        assert!(payload.counts.is_none());
    }
}
