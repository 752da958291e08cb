//! Wire boundary for segmentation mask payloads.
//!
//! Everything that touches the service's JSON lives here: tolerant
//! parsing of the several payload shapes the service has emitted over
//! time, and production of the strict typed shape for uploads. The
//! codec itself is in `segmask-codec`; this crate only translates
//! between wire text and codec types.

pub mod error;
pub mod parse;
pub mod payload;
pub mod textual;
pub mod upload;

pub use error::WireError;
pub use parse::{mask_from_payload, parse_mask, parse_mask_list, parse_payload};
pub use payload::{MaskPayload, RawCountsEntry, WireCounts, WireSize};
pub use upload::MaskUpload;
