use chart2d_core::core::{ScaledPoint, ViewportClipper};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn coordinate() -> impl Strategy<Value = f64> {
    -3.0f64..4.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn clipped_segments_stay_inside_the_unit_square(
        x1 in coordinate(),
        y1 in coordinate(),
        x2 in coordinate(),
        y2 in coordinate()
    ) {
        let previous = ScaledPoint::new(x1, y1);
        let current = ScaledPoint::new(x2, y2);
        let outcome = ViewportClipper.clip(Some(previous), current);

        prop_assert_eq!(outcome.carry, current);
        prop_assert_eq!(outcome.current_visible, current.is_visible());
        if previous.is_visible() || current.is_visible() {
            prop_assert!(outcome.segment.is_some());
        }
        if let Some(segment) = outcome.segment {
            for point in [segment.start, segment.end] {
                prop_assert!((-EPS..=1.0 + EPS).contains(&point.x));
                prop_assert!((-EPS..=1.0 + EPS).contains(&point.y));
            }
        }
    }

    #[test]
    fn visible_endpoints_are_kept_exactly(
        x1 in 0.0f64..=1.0,
        y1 in 0.0f64..=1.0,
        x2 in coordinate(),
        y2 in coordinate()
    ) {
        let previous = ScaledPoint::new(x1, y1);
        let outcome = ViewportClipper.clip(Some(previous), ScaledPoint::new(x2, y2));
        let segment = outcome.segment.expect("visible start always draws");
        prop_assert_eq!(segment.start, previous);
    }
}
