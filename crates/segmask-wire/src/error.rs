//! Wire-boundary error taxonomy.
//!
//! Failures here are scoped to a single mask payload. Batch decoding
//! isolates them per entry so one corrupt mask never discards its
//! siblings; everything the tolerance rules can absorb (missing
//! fields, short rows, overlong runs) is a defined non-error outcome
//! and never surfaces as a variant of [`WireError`].

/// Errors raised while parsing or producing mask payloads.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Numeric text inside a legacy textual payload failed to parse.
    /// No safe default exists for corrupted numeric text, so this is a
    /// hard failure for the affected mask.
    #[error("malformed mask payload: {0}")]
    MalformedPayload(String),

    /// The declared mask dimensions are internally inconsistent
    /// (negative or out of range).
    #[error("inconsistent mask dimensions {width}x{height}")]
    DimensionMismatch {
        /// Declared width token.
        width: i64,
        /// Declared height token.
        height: i64,
    },

    /// The payload envelope is not valid JSON of the expected shape.
    #[error("invalid payload envelope: {0}")]
    Json(#[from] serde_json::Error),
}
