use approx::assert_relative_eq;
use cartesian_chart::axis::{AlignedItemPlacer, HorizontalAxis, SegmentedItemPlacer};
use cartesian_chart::core::{
    AxisPosition, Bounds, ChartRanges, DimensionDemands, LayoutDirection, MutableChartRanges,
    MutableHorizontalDimensions, PanZoom,
};
use cartesian_chart::layer::DrawContext;
use cartesian_chart::render::{HeuristicTextMeasurer, RenderFrame};

fn ranges(min_x: f64, max_x: f64) -> ChartRanges {
    let mut ranges = MutableChartRanges::new();
    ranges.try_update(min_x, max_x, 0.0, 10.0, None);
    ranges.try_update_x_step(1.0);
    ranges.to_immutable()
}

fn dims(x_spacing: f64, start_padding: f64, end_padding: f64) -> MutableHorizontalDimensions {
    let mut dims = MutableHorizontalDimensions::new();
    dims.ensure_values_at_least(
        DimensionDemands::default()
            .x_spacing(x_spacing)
            .scalable_start_padding(start_padding)
            .scalable_end_padding(end_padding),
    );
    dims
}

fn draw_axis(
    axis: &HorizontalAxis,
    ranges: &ChartRanges,
    dims: &MutableHorizontalDimensions,
    layer_bounds: Bounds,
    axis_bounds: Bounds,
    direction: LayoutDirection,
) -> RenderFrame {
    let text = HeuristicTextMeasurer::default();
    let mut frame = RenderFrame::new(Bounds::new(0.0, 0.0, 400.0, 200.0));
    {
        let mut ctx = DrawContext {
            ranges,
            dims: dims.scaled(1.0),
            layer_bounds,
            direction,
            pan_zoom: PanZoom::default(),
            text: &text,
            frame: &mut frame,
        };
        axis.draw(&mut ctx, axis_bounds).expect("axis draw");
    }
    frame.validate().expect("valid frame");
    frame
}

#[test]
fn labels_land_on_the_shared_position_formula() {
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_guideline(None)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 4.0);
    let dims = dims(40.0, 20.0, 20.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 200.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 200.0, 120.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    // base x = start padding; each label sits one x_spacing further.
    assert_eq!(frame.texts.len(), 5);
    for (index, text) in frame.texts.iter().enumerate() {
        assert_relative_eq!(text.x, 20.0 + 40.0 * index as f64, epsilon = 1e-9);
        assert_eq!(text.text, format!("{index}"));
    }
}

#[test]
fn bottom_axis_labels_sit_below_the_tick_band() {
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_guideline(None)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 2.0);
    let dims = dims(40.0, 20.0, 20.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 200.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 200.0, 130.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    // Line thickness 1 plus tick length 4.
    for text in &frame.texts {
        assert_relative_eq!(text.y, 105.0, epsilon = 1e-9);
    }
}

#[test]
fn extreme_ticks_shift_outward_by_half_thickness() {
    // Zero padding makes the data range and the full x range coincide, so the
    // first and last placed values are full-range bounds.
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_guideline(None)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 4.0);
    let dims = dims(40.0, 0.0, 0.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 160.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 160.0, 120.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    // 5 ticks + 1 axis line; ticks at the bounds are shifted by half the
    // tick thickness (0.5px for the default 1px tick).
    let ticks: Vec<f64> = frame
        .lines
        .iter()
        .filter(|line| line.x1 == line.x2)
        .map(|line| line.x1)
        .collect();
    assert_eq!(ticks.len(), 5);
    assert_relative_eq!(ticks[0], -0.5, epsilon = 1e-9);
    assert_relative_eq!(ticks[1], 40.0, epsilon = 1e-9);
    assert_relative_eq!(ticks[4], 160.5, epsilon = 1e-9);
}

#[test]
fn rtl_mirrors_tick_positions_and_corrections() {
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_guideline(None)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 4.0);
    let dims = dims(40.0, 0.0, 0.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 160.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 160.0, 120.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Rtl,
    );

    let ticks: Vec<f64> = frame
        .lines
        .iter()
        .filter(|line| line.x1 == line.x2)
        .map(|line| line.x1)
        .collect();
    // x = 0 is the logical start: at the right edge, shifted outward (right).
    assert_relative_eq!(ticks[0], 160.5, epsilon = 1e-9);
    assert_relative_eq!(ticks[1], 120.0, epsilon = 1e-9);
    assert_relative_eq!(ticks[4], -0.5, epsilon = 1e-9);
}

#[test]
fn guidelines_span_the_layer_and_skip_range_bounds() {
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 4.0);
    let dims = dims(40.0, 0.0, 0.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 160.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 160.0, 120.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    let guidelines: Vec<&_> = frame
        .lines
        .iter()
        .filter(|line| line.x1 == line.x2 && line.y1 == 0.0 && line.y2 == 100.0)
        .collect();
    // Values 0 and 4 are full-range bounds, so only 1, 2, 3 get guidelines.
    assert_eq!(guidelines.len(), 3);
    assert_relative_eq!(guidelines[0].x1, 40.0, epsilon = 1e-9);
    assert_relative_eq!(guidelines[2].x1, 120.0, epsilon = 1e-9);
}

#[test]
fn segmented_ticks_fall_between_labels() {
    let axis = HorizontalAxis::new(AxisPosition::Bottom)
        .with_guideline(None)
        .with_placer(Box::new(SegmentedItemPlacer::new(false)));
    let ranges = ranges(0.0, 3.0);
    // Half-step padding on each side keeps the outer segment ticks inside.
    let dims = dims(40.0, 20.0, 20.0);
    let layer_bounds = Bounds::new(0.0, 0.0, 160.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 100.0, 160.0, 120.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    let ticks: Vec<f64> = frame
        .lines
        .iter()
        .filter(|line| line.x1 == line.x2)
        .map(|line| line.x1)
        .collect();
    // Labels at 20, 60, 100, 140; segment ticks halfway between, plus one
    // half-step beyond each end.
    assert_eq!(ticks.len(), 5);
    for (tick, expected) in ticks.iter().zip([0.0, 40.0, 80.0, 120.0, 160.0]) {
        assert_relative_eq!(*tick, expected, epsilon = 1e-9);
    }
    assert_eq!(frame.texts.len(), 4);
    assert_relative_eq!(frame.texts[0].x, 20.0, epsilon = 1e-9);
}

#[test]
fn top_axis_draws_labels_above_the_tick_band() {
    let axis = HorizontalAxis::new(AxisPosition::Top)
        .with_guideline(None)
        .with_placer(Box::new(AlignedItemPlacer::new(1, 0)));
    let ranges = ranges(0.0, 2.0);
    let dims = dims(40.0, 20.0, 20.0);
    let layer_bounds = Bounds::new(0.0, 30.0, 200.0, 100.0);
    let axis_bounds = Bounds::new(0.0, 0.0, 200.0, 30.0);

    let frame = draw_axis(
        &axis,
        &ranges,
        &dims,
        layer_bounds,
        axis_bounds,
        LayoutDirection::Ltr,
    );

    // Tick band occupies the bottom 5px of the axis bounds; labels end at its
    // top edge.
    let label_height = 12.0 * 1.2;
    for text in &frame.texts {
        assert_relative_eq!(text.y, 25.0 - label_height, epsilon = 1e-9);
    }
}
