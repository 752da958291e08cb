//! End-to-end codec properties: compress/expand round trips, repeat
//! count bookkeeping, and hit testing against rendered bitmaps.

#![allow(clippy::unwrap_used)]

use segmask_codec::codec::{compress, expand, render};
use segmask_codec::types::{CompressedRow, Dimensions, EncodedRow, PixelMatrix, Segment, ViewPoint};
use segmask_codec::{detect_mask_tap, hit_test};

fn matrix_from_pattern(pattern: &[&str]) -> PixelMatrix {
    let rows: Vec<Vec<bool>> = pattern
        .iter()
        .map(|line| line.chars().map(|c| c == '#').collect())
        .collect();
    PixelMatrix::from_rows(&rows).unwrap()
}

#[test]
fn round_trip_is_pixel_exact() {
    let patterns: &[&[&str]] = &[
        &["##..", "##..", "...."],
        &["####", "####", "####"],
        &["....", "....", "...."],
        &["#.#.", ".#.#", "#.#.", ".#.#"],
        &["#", "#", ".", "#"],
    ];

    for pattern in patterns {
        let matrix = matrix_from_pattern(pattern);
        let rows = compress(&matrix);
        assert_eq!(
            expand(&rows, matrix.dimensions()),
            matrix,
            "pattern {pattern:?}",
        );
    }
}

#[test]
fn known_matrix_compresses_to_known_structure() {
    // Rows 0 and 1 are identical and merge; row 2 stands alone.
    let matrix = matrix_from_pattern(&["##..", "##..", "...."]);
    let rows = compress(&matrix);

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
    assert_eq!(expand(&rows, matrix.dimensions()), matrix);
}

#[test]
fn repeat_counts_always_sum_to_height() {
    let patterns: &[&[&str]] = &[
        &["##..", "##..", "...."],
        &["#", "#", "#", "#", "#"],
        &[".", "#", ".", "#"],
    ];
    for pattern in patterns {
        let matrix = matrix_from_pattern(pattern);
        let total: u32 = compress(&matrix).iter().map(|row| row.repeat).sum();
        assert_eq!(total, matrix.height(), "pattern {pattern:?}");
    }
}

#[test]
fn wire_json_round_trip() {
    let matrix = matrix_from_pattern(&["##..", "##..", "...."]);
    let rows = compress(&matrix);

    let json = serde_json::to_string(&rows).unwrap();
    assert_eq!(json, "[[[[2,1],[2,0]],2],[[[4,0]],1]]");

    let parsed: Vec<CompressedRow> = serde_json::from_str(&json).unwrap();
    assert_eq!(expand(&parsed, matrix.dimensions()), matrix);
}

#[test]
fn rendered_bitmap_is_hit_testable() {
    let matrix = matrix_from_pattern(&["##..", "##..", "...."]);
    let bitmap = render(&compress(&matrix), matrix.dimensions());

    // View shown at 2x the bitmap resolution.
    let view = Dimensions::new(8, 6);
    assert!(hit_test(ViewPoint::new(2.0, 2.0), &bitmap, view));
    assert!(!hit_test(ViewPoint::new(6.0, 2.0), &bitmap, view));
    assert!(!hit_test(ViewPoint::new(2.0, 5.0), &bitmap, view));
}

#[test]
fn detect_tap_prefers_earlier_masks() {
    use chrono::Utc;
    use segmask_codec::Mask;

    let small = matrix_from_pattern(&["#...", "....", "....", "...."]);
    let large = matrix_from_pattern(&["####", "####", "####", "####"]);
    let view = Dimensions::new(4, 4);

    let masks = vec![
        Mask::new(10, 1, render(&compress(&small), small.dimensions()), Utc::now()),
        Mask::new(20, 1, render(&compress(&large), large.dimensions()), Utc::now()),
    ];

    // Both cover (0, 0); the first in order wins.
    let hit = detect_mask_tap(ViewPoint::new(0.0, 0.0), &masks, view).unwrap();
    assert_eq!(hit.id, 10);

    // Only the second covers (3, 3).
    let hit = detect_mask_tap(ViewPoint::new(3.0, 3.0), &masks, view).unwrap();
    assert_eq!(hit.id, 20);
}
