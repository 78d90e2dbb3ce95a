use chart2d_core::core::{
    AxisDimension, AxisScaler, LabelFormatter, NumberLabelFormatter, Range, RangePolicy,
    RangePolicyConfig,
};
use proptest::prelude::*;

fn bound() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0e12f64..1.0e12,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn policy() -> impl Strategy<Value = RangePolicyConfig> {
    prop_oneof![
        Just(RangePolicyConfig::Unbounded),
        (bound(), bound()).prop_map(|(min, max)| RangePolicyConfig::FixedViewport { min, max }),
        (bound(), bound()).prop_map(|(min, max)| RangePolicyConfig::MinimumViewport { min, max }),
        bound().prop_map(|point| RangePolicyConfig::ForcedPoint { point }),
        bound().prop_map(|count| RangePolicyConfig::HighestValues { count }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn policies_always_return_positive_finite_ranges(
        policy in policy(),
        min in bound(),
        max in bound()
    ) {
        let range = policy.apply(Range::new(min, max));
        prop_assert!(range.min.is_finite());
        prop_assert!(range.max.is_finite());
        prop_assert!(range.extent() > 0.0);
    }

    #[test]
    fn number_labels_are_stable_under_reparse(
        value in -1.0e6f64..1.0e6,
        digits in 0u8..7
    ) {
        let formatter = NumberLabelFormatter::new(digits).expect("valid digits");
        let text = formatter.format(value);
        let parsed = formatter.parse(&text).expect("own label parses");
        prop_assert_eq!(formatter.format(parsed), text);
    }

    #[test]
    fn tick_labels_are_ordered_and_inside_the_axis(
        min in -1.0e4f64..1.0e4,
        extent in 0.1f64..1.0e5,
        pixels in 100.0f64..2_000.0,
        digits in 0u8..4,
        start_major_tick in any::<bool>()
    ) {
        let scaler = AxisScaler::new(AxisDimension::X)
            .with_formatter(Box::new(NumberLabelFormatter::new(digits).expect("valid digits")))
            .with_start_major_tick(start_major_tick);
        let ticks = scaler.compute_ticks(Range::new(min, min + extent), pixels);

        prop_assert!(ticks.iterations <= chart2d_core::core::MAX_TICK_ITERATIONS);
        let formatter = scaler.formatter();
        for label in &ticks.labels {
            prop_assert!((0.0..=1.0).contains(&label.normalized_position));
            prop_assert_eq!(formatter.parse(&label.text).expect("label parses"), label.value);
            prop_assert_eq!(&formatter.format(label.value), &label.text);
        }
        for pair in ticks.labels.windows(2) {
            prop_assert!(pair[0].normalized_position <= pair[1].normalized_position);
        }
    }
}
