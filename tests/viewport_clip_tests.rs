use chart2d_core::core::{Boundary, ClippedSegment, ScaledPoint, ViewportClipper, interpolate_visible};

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<ClippedSegment> {
    Some(ClippedSegment {
        start: ScaledPoint::new(x1, y1),
        end: ScaledPoint::new(x2, y2),
    })
}

#[test]
fn first_point_produces_no_segment() {
    let outcome = ViewportClipper.clip(None, ScaledPoint::new(0.5, 0.5));
    assert_eq!(outcome.segment, None);
    assert!(outcome.current_visible);
    assert_eq!(outcome.carry, ScaledPoint::new(0.5, 0.5));
}

#[test]
fn visible_pair_is_kept_unchanged() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(0.1, 0.2)),
        ScaledPoint::new(0.9, 0.8),
    );
    assert_eq!(outcome.segment, segment(0.1, 0.2, 0.9, 0.8));
}

#[test]
fn line_entering_from_the_left_starts_on_the_edge() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(-0.5, 0.5)),
        ScaledPoint::new(0.5, 0.5),
    );
    assert_eq!(outcome.segment, segment(0.0, 0.5, 0.5, 0.5));
    assert!(outcome.current_visible);
}

#[test]
fn line_leaving_to_the_right_ends_on_the_edge() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(0.5, 0.5)),
        ScaledPoint::new(1.5, 0.5),
    );
    assert_eq!(outcome.segment, segment(0.5, 0.5, 1.0, 0.5));
    assert!(!outcome.current_visible);
    // The unclipped point is carried so the next segment keeps its slope.
    assert_eq!(outcome.carry, ScaledPoint::new(1.5, 0.5));
}

#[test]
fn diagonal_traversal_is_clipped_on_both_ends() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(-2.0, -2.0)),
        ScaledPoint::new(2.0, 2.0),
    );
    assert_eq!(outcome.segment, segment(0.0, 0.0, 1.0, 1.0));
    assert!(!outcome.current_visible);
}

#[test]
fn traversal_bounds_are_distinct_edges() {
    let (start, start_bound) =
        interpolate_visible(ScaledPoint::new(-2.0, -2.0), ScaledPoint::new(2.0, 2.0));
    let (end, end_bound) =
        interpolate_visible(ScaledPoint::new(2.0, 2.0), ScaledPoint::new(-2.0, -2.0));
    assert_eq!((start, start_bound), (ScaledPoint::new(0.0, 0.0), Some(Boundary::Left)));
    assert_eq!((end, end_bound), (ScaledPoint::new(1.0, 1.0), Some(Boundary::Right)));
}

#[test]
fn line_missing_the_viewport_produces_nothing() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(-1.0, 2.0)),
        ScaledPoint::new(2.0, 3.0),
    );
    assert_eq!(outcome.segment, None);
}

#[test]
fn horizontal_traversal_spans_full_width() {
    let outcome = ViewportClipper.clip(
        Some(ScaledPoint::new(-1.0, 0.25)),
        ScaledPoint::new(3.0, 0.25),
    );
    assert_eq!(outcome.segment, segment(0.0, 0.25, 1.0, 0.25));
}
