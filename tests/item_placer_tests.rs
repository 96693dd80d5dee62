use approx::assert_relative_eq;
use cartesian_chart::axis::{AlignedItemPlacer, ItemPlacer, SegmentedItemPlacer};
use cartesian_chart::core::{ChartRanges, MutableChartRanges};

fn ranges(min_x: f64, max_x: f64, x_step: f64) -> ChartRanges {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(min_x, max_x, 0.0, 1.0, None);
    ranges.try_update_x_step(x_step);
    ranges.to_immutable()
}

fn assert_values(actual: &[f64], expected: &[f64]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "got {actual:?}, expected {expected:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = 1e-9);
    }
}

#[test]
fn aligned_spacing_two_covers_even_values() {
    let placer = AlignedItemPlacer::new(2, 0);
    let ranges = ranges(0.0, 10.0, 1.0);

    let values = placer.label_values(&ranges, (0.0, 10.0));
    assert_values(&values, &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn aligned_offset_shifts_the_grid() {
    let placer = AlignedItemPlacer::new(3, 1);
    let ranges = ranges(0.0, 10.0, 1.0);

    let values = placer.label_values(&ranges, (0.0, 10.0));
    assert_values(&values, &[1.0, 4.0, 7.0, 10.0]);
}

#[test]
fn aligned_extends_one_value_past_each_visible_edge() {
    let placer = AlignedItemPlacer::new(2, 0);
    let ranges = ranges(0.0, 20.0, 1.0);

    // Visible window [7, 13]: in-window values {8, 10, 12} plus one on each side.
    let values = placer.label_values(&ranges, (7.0, 13.0));
    assert_values(&values, &[6.0, 8.0, 10.0, 12.0, 14.0]);
}

#[test]
fn aligned_never_emits_before_min_or_after_max() {
    let placer = AlignedItemPlacer::new(2, 0);
    let ranges = ranges(0.0, 10.0, 1.0);

    let values = placer.label_values(&ranges, (-5.0, 25.0));
    assert_values(&values, &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn aligned_empty_visible_window_yields_nothing() {
    let placer = AlignedItemPlacer::new(1, 0);
    let ranges = ranges(0.0, 10.0, 1.0);

    assert!(placer.label_values(&ranges, (5.0, 4.0)).is_empty());
}

#[test]
fn aligned_window_scrolled_past_data_yields_nothing() {
    let placer = AlignedItemPlacer::new(2, 0);
    let ranges = ranges(0.0, 10.0, 1.0);

    assert!(placer.label_values(&ranges, (18.0, 24.0)).is_empty());
}

#[test]
fn aligned_reuses_label_values_for_lines() {
    let placer = AlignedItemPlacer::new(1, 0);
    let ranges = ranges(0.0, 4.0, 1.0);

    assert!(placer.line_values(&ranges, (0.0, 4.0)).is_none());
}

#[test]
fn aligned_first_and_last_label_values_respect_offset() {
    let placer = AlignedItemPlacer::new(3, 1);
    let ranges = ranges(0.0, 10.0, 1.0);

    assert_relative_eq!(placer.first_label_value(&ranges).unwrap(), 1.0);
    assert_relative_eq!(placer.last_label_value(&ranges).unwrap(), 10.0);
}

#[test]
fn aligned_without_extreme_padding_reserves_nothing() {
    let placer = AlignedItemPlacer::new(1, 0).with_extreme_label_padding(false);
    let ranges = ranges(0.0, 10.0, 1.0);

    assert!(placer.first_label_value(&ranges).is_none());
    assert!(placer.last_label_value(&ranges).is_none());
    assert!(placer.width_measurement_label_values(&ranges).is_empty());
}

#[test]
fn aligned_insets_cover_shifted_ticks_and_half_label() {
    let shifting = AlignedItemPlacer::new(1, 0);
    assert_relative_eq!(shifting.start_axis_inset(4.0, 0.0), 4.0);
    assert_relative_eq!(shifting.start_axis_inset(4.0, 30.0), 15.0);

    let centered = AlignedItemPlacer::new(1, 0)
        .with_shift_extreme_lines(false)
        .with_extreme_label_padding(false);
    assert_relative_eq!(centered.start_axis_inset(4.0, 30.0), 2.0);
}

#[test]
fn segmented_labels_every_major_value() {
    let placer = SegmentedItemPlacer::default();
    let ranges = ranges(0.0, 3.0, 1.0);

    let values = placer.label_values(&ranges, (0.0, 3.0));
    assert_values(&values, &[0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn segmented_ticks_partition_entries_into_segments() {
    let placer = SegmentedItemPlacer::default();
    let ranges = ranges(0.0, 3.0, 1.0);

    let values = placer
        .line_values(&ranges, (-0.5, 3.5))
        .expect("segmented placer provides line values");
    assert_values(&values, &[-0.5, 0.5, 1.5, 2.5, 3.5]);
}

#[test]
fn segmented_restricts_lines_to_visible_window() {
    let placer = SegmentedItemPlacer::default();
    let ranges = ranges(0.0, 10.0, 1.0);

    let values = placer
        .line_values(&ranges, (3.0, 5.0))
        .expect("segmented placer provides line values");
    assert_values(&values, &[2.5, 3.5, 4.5, 5.5]);
}

#[test]
fn segmented_window_scrolled_past_data_yields_nothing() {
    let placer = SegmentedItemPlacer::default();
    let ranges = ranges(0.0, 4.0, 1.0);

    assert!(placer.label_values(&ranges, (20.0, 26.0)).is_empty());
    let lines = placer
        .line_values(&ranges, (20.0, 26.0))
        .expect("segmented placer provides line values");
    assert!(lines.is_empty());
}

#[test]
fn segmented_inset_is_tick_driven() {
    assert_relative_eq!(SegmentedItemPlacer::new(true).start_axis_inset(6.0, 100.0), 6.0);
    assert_relative_eq!(SegmentedItemPlacer::new(false).end_axis_inset(6.0, 100.0), 3.0);
}
