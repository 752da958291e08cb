//! Legacy textual payload grammar.
//!
//! Older service builds emitted `size` and `counts` as Python-style
//! tuple literals rather than JSON arrays:
//!
//! ```text
//! size:   "(683, 512)"
//! counts: "[([(683,0),(7,1),(206,0)], 4), ([(896,0)], 508)]"
//! ```
//!
//! The grammar is tolerant of bracket/whitespace noise: rows are
//! extracted as `([...], count)` groups by regex and the inner pair
//! list is comma-split. Malformed *numeric* tokens are a hard parse
//! failure -- there is no safe default for corrupted numbers -- while
//! structural debris between groups is skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::WireError;
use crate::payload::RawCountsEntry;

/// Matches one `([...pairs...], repeat)` row group. The repeat capture
/// is deliberately loose so a non-numeric token still reaches
/// [`parse_int`] and fails loudly instead of being dropped.
#[allow(clippy::unwrap_used)] // fixed pattern, exercised by every test below
static ROW_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*\[(?P<pairs>[^\]]*)\]\s*,\s*(?P<repeat>[^)]*)\)").unwrap());

/// Matches the `"(width, height)"` size literal.
#[allow(clippy::unwrap_used)] // fixed pattern, exercised by every test below
static SIZE_TUPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\(\s*(?P<width>[^,)]+),\s*(?P<height>[^,)]+)\)\s*$").unwrap());

/// Parse a textual `"(width, height)"` size literal into its two
/// numeric tokens.
///
/// # Errors
///
/// [`WireError::MalformedPayload`] if the literal does not match the
/// tuple shape or its tokens are not integers.
pub fn parse_size(text: &str) -> Result<(i64, i64), WireError> {
    let captures = SIZE_TUPLE.captures(text).ok_or_else(|| {
        WireError::MalformedPayload(format!("unrecognized size literal {text:?}"))
    })?;
    Ok((parse_int(&captures["width"])?, parse_int(&captures["height"])?))
}

/// Parse a textual counts literal into raw numeric rows.
///
/// Produces the same `(pairs, repeat)` entries as the typed wire
/// shape, so both shapes share one normalization path downstream.
///
/// # Errors
///
/// [`WireError::MalformedPayload`] if any numeric token inside a row
/// group fails to parse.
pub fn parse_counts(text: &str) -> Result<Vec<RawCountsEntry>, WireError> {
    let mut entries = Vec::new();
    for group in ROW_GROUP.captures_iter(text) {
        let pairs = parse_pairs(&group["pairs"])?;
        let repeat = parse_int(&group["repeat"])?;
        entries.push((pairs, repeat));
    }
    Ok(entries)
}

/// Comma-split a `(l1,v1), (l2,v2), ...` pair list.
fn parse_pairs(text: &str) -> Result<Vec<(i64, i64)>, WireError> {
    let body = text.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for token in body.split("),") {
        let token = token.trim().trim_start_matches('(').trim_end_matches(')');
        if token.is_empty() {
            continue;
        }
        let mut numbers = token.splitn(2, ',');
        let length = parse_int(numbers.next().unwrap_or_default())?;
        let value = parse_int(numbers.next().ok_or_else(|| {
            WireError::MalformedPayload(format!("segment pair {token:?} is missing its value"))
        })?)?;
        pairs.push((length, value));
    }
    Ok(pairs)
}

/// Parse one integer token, surfacing corruption as a hard failure.
fn parse_int(token: &str) -> Result<i64, WireError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| WireError::MalformedPayload(format!("invalid numeric token {token:?}")))
}
