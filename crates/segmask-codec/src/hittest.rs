//! Tap hit testing against mask bitmaps.
//!
//! Taps arrive in view coordinates (the displayed, possibly scaled
//! image); masks live at their native bitmap resolution. The rescale
//! between the two spaces happens here and nowhere else. The caller
//! guarantees the view and the bitmaps share an aspect ratio (uniform
//! scaling).

use crate::bitmap::MaskBitmap;
use crate::mask::Mask;
use crate::types::{Dimensions, ViewPoint};

/// Test whether a view-space tap lands on a mask's foreground.
///
/// The tap is rescaled from view space into bitmap space by the ratio
/// of the two resolutions and rounded to the nearest pixel. A tap that
/// rescales outside the bitmap, or a degenerate (zero-sized) view, is
/// a non-hit, never an error.
#[must_use]
pub fn hit_test(tap: ViewPoint, bitmap: &MaskBitmap, view: Dimensions) -> bool {
    to_bitmap_space(tap, bitmap.dimensions(), view)
        .is_some_and(|(x, y)| bitmap.is_foreground(x, y))
}

/// Find the first mask in `masks` containing the tap.
///
/// Masks are tested in their given order and the first hit wins, so
/// callers that keep newest masks first give recent masks priority.
/// Pure query: toggling a mask's `active` flag is the caller's
/// responsibility.
#[must_use]
pub fn detect_mask_tap<'a>(tap: ViewPoint, masks: &'a [Mask], view: Dimensions) -> Option<&'a Mask> {
    masks.iter().find(|mask| hit_test(tap, mask.bitmap(), view))
}

/// Rescale a view-space tap into bitmap pixel coordinates.
///
/// Returns `None` for degenerate views and for taps that fall outside
/// `[0, width) x [0, height)` after rounding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bitmap_space(tap: ViewPoint, bitmap: Dimensions, view: Dimensions) -> Option<(u32, u32)> {
    if view.is_degenerate() {
        return None;
    }

    let x = (tap.x * f64::from(bitmap.width) / f64::from(view.width)).round();
    let y = (tap.y * f64::from(bitmap.height) / f64::from(view.height)).round();

    if x < 0.0 || y < 0.0 || x >= f64::from(bitmap.width) || y >= f64::from(bitmap.height) {
        return None;
    }

    Some((x as u32, y as u32))
}
