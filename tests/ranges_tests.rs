use approx::assert_relative_eq;
use cartesian_chart::core::{MutableChartRanges, VerticalAxisKey};

#[test]
fn folding_is_order_independent() {
    let mut forward = MutableChartRanges::new();
    forward.try_update(0.0, 10.0, -1.0, 4.0, None);
    forward.try_update(-3.0, 6.0, -5.0, 2.0, None);
    forward.try_update_x_step(2.0);
    forward.try_update_x_step(0.5);

    let mut reverse = MutableChartRanges::new();
    reverse.try_update_x_step(0.5);
    reverse.try_update_x_step(2.0);
    reverse.try_update(-3.0, 6.0, -5.0, 2.0, None);
    reverse.try_update(0.0, 10.0, -1.0, 4.0, None);

    assert_eq!(forward.to_immutable(), reverse.to_immutable());
}

#[test]
fn finest_x_step_wins() {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(0.0, 10.0, 0.0, 1.0, None);
    ranges.try_update_x_step(2.0);
    ranges.try_update_x_step(0.25);
    ranges.try_update_x_step(1.0);

    assert_relative_eq!(ranges.to_immutable().x_step, 0.25);
}

#[test]
fn keyed_y_ranges_stay_separate() {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(0.0, 5.0, -10.0, 10.0, Some(VerticalAxisKey::Start));
    ranges.try_update(0.0, 5.0, 0.0, 100.0, Some(VerticalAxisKey::End));

    let frozen = ranges.to_immutable();
    let start = frozen.y_range(Some(VerticalAxisKey::Start));
    let end = frozen.y_range(Some(VerticalAxisKey::End));
    assert_relative_eq!(start.min_y, -10.0);
    assert_relative_eq!(start.max_y, 10.0);
    assert_relative_eq!(end.min_y, 0.0);
    assert_relative_eq!(end.max_y, 100.0);
}

#[test]
fn missing_key_falls_back_to_global() {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(0.0, 5.0, -1.0, 7.0, None);

    let frozen = ranges.to_immutable();
    let fallback = frozen.y_range(Some(VerticalAxisKey::End));
    assert_relative_eq!(fallback.min_y, -1.0);
    assert_relative_eq!(fallback.max_y, 7.0);
}

#[test]
fn empty_accumulator_freezes_to_defined_snapshot() {
    let ranges = MutableChartRanges::new();
    let frozen = ranges.to_immutable();

    assert_relative_eq!(frozen.min_x, 0.0);
    assert_relative_eq!(frozen.max_x, 0.0);
    assert_relative_eq!(frozen.x_step, 1.0);
    assert_relative_eq!(frozen.y_range(None).length(), 0.0);
}

#[test]
fn reset_discards_prior_contributions() {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(0.0, 100.0, -50.0, 50.0, None);
    ranges.reset();
    ranges.try_update(2.0, 4.0, 0.0, 1.0, None);

    let frozen = ranges.to_immutable();
    assert_relative_eq!(frozen.min_x, 2.0);
    assert_relative_eq!(frozen.max_x, 4.0);
}

#[test]
fn nonpositive_x_step_is_ignored() {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(0.0, 1.0, 0.0, 1.0, None);
    ranges.try_update_x_step(0.0);
    ranges.try_update_x_step(-3.0);
    ranges.try_update_x_step(f64::NAN);

    assert_relative_eq!(ranges.to_immutable().x_step, 1.0);
}
