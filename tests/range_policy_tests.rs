use chart2d_core::core::{
    DEGENERATE_RANGE_WIDENING, FixedViewport, ForcedPoint, HighestValues, MinimumViewport,
    Range, RangePolicy, RangePolicyConfig, UnboundedRange,
};

#[test]
fn unbounded_range_shows_all_data() {
    assert_eq!(
        UnboundedRange.apply(Range::new(-3.0, 7.5)),
        Range::new(-3.0, 7.5)
    );
}

#[test]
fn single_value_data_is_widened() {
    let range = UnboundedRange.apply(Range::new(4.0, 4.0));
    assert_eq!(range, Range::new(4.0, 4.0 + DEGENERATE_RANGE_WIDENING));
}

#[test]
fn empty_data_still_yields_a_drawable_range() {
    let range = UnboundedRange.apply(Range::empty());
    assert_eq!(range, Range::new(0.0, DEGENERATE_RANGE_WIDENING));
}

#[test]
fn fixed_viewport_ignores_data() {
    let policy = FixedViewport {
        range: Range::new(10.0, 20.0),
    };
    assert_eq!(policy.apply(Range::new(-500.0, 500.0)), Range::new(10.0, 20.0));
}

#[test]
fn minimum_viewport_only_grows() {
    let policy = MinimumViewport {
        range: Range::new(0.0, 100.0),
    };
    assert_eq!(policy.apply(Range::new(20.0, 30.0)), Range::new(0.0, 100.0));
    assert_eq!(policy.apply(Range::new(20.0, 130.0)), Range::new(0.0, 130.0));
}

#[test]
fn forced_point_keeps_zero_in_view() {
    let policy = ForcedPoint { point: 0.0 };
    assert_eq!(policy.apply(Range::new(5.0, 9.0)), Range::new(0.0, 9.0));
    assert_eq!(policy.apply(Range::new(-9.0, -5.0)), Range::new(-9.0, 0.0));
}

#[test]
fn highest_values_trails_the_maximum() {
    let policy = HighestValues { count: 50.0 };
    assert_eq!(policy.apply(Range::new(0.0, 1000.0)), Range::new(950.0, 1000.0));
}

#[test]
fn config_variants_match_their_policies() {
    let data = Range::new(2.0, 8.0);
    let cases: [(RangePolicyConfig, Range); 5] = [
        (RangePolicyConfig::Unbounded, Range::new(2.0, 8.0)),
        (
            RangePolicyConfig::FixedViewport { min: 0.0, max: 1.0 },
            Range::new(0.0, 1.0),
        ),
        (
            RangePolicyConfig::MinimumViewport { min: 0.0, max: 5.0 },
            Range::new(0.0, 8.0),
        ),
        (
            RangePolicyConfig::ForcedPoint { point: -1.0 },
            Range::new(-1.0, 8.0),
        ),
        (
            RangePolicyConfig::HighestValues { count: 3.0 },
            Range::new(5.0, 8.0),
        ),
    ];

    for (config, expected) in cases {
        assert_eq!(config.apply(data), expected, "{config:?}");
    }
}

#[test]
fn config_json_uses_kind_tag() {
    let config: RangePolicyConfig =
        serde_json::from_str(r#"{"kind":"highest_values","count":25.0}"#).expect("parse policy");
    assert_eq!(config, RangePolicyConfig::HighestValues { count: 25.0 });
}
