use approx::assert_relative_eq;
use cartesian_chart::core::{
    Bounds, CandleEntry, CandlestickModel, Change, LayoutDirection, MutableChartRanges,
    MutableHorizontalDimensions, PanZoom,
};
use cartesian_chart::layer::{CandleProvider, CandleStyle, CandlestickLayer, DrawContext, LineStyle};
use cartesian_chart::marker::MarkerTarget;
use cartesian_chart::render::{Color, HeuristicTextMeasurer, RenderFrame};
use ordered_float::OrderedFloat;

fn candle(color: Color) -> CandleStyle {
    CandleStyle::from_body(LineStyle::new(6.0, color))
}

fn provider() -> CandleProvider {
    CandleProvider::absolute(
        candle(Color::rgb(0.0, 0.8, 0.0)),
        candle(Color::rgb(0.5, 0.5, 0.5)),
        candle(Color::rgb(0.8, 0.0, 0.0)),
    )
}

fn draw(
    layer: &mut CandlestickLayer,
    model: &CandlestickModel,
    bounds: Bounds,
    pan_zoom: PanZoom,
) -> RenderFrame {
    let mut ranges = MutableChartRanges::new();
    layer.update_ranges(&mut ranges, model);
    let frozen = ranges.to_immutable();

    let mut dims = MutableHorizontalDimensions::new();
    layer.update_horizontal_dimensions(&mut dims, model);

    let text = HeuristicTextMeasurer::default();
    let mut frame = RenderFrame::new(bounds);
    {
        let mut ctx = DrawContext {
            ranges: &frozen,
            dims: dims.scaled(pan_zoom.zoom),
            layer_bounds: bounds,
            direction: LayoutDirection::Ltr,
            pan_zoom,
            text: &text,
            frame: &mut frame,
        };
        layer.draw(&mut ctx, model).expect("draw pass");
    }
    frame.validate().expect("valid frame");
    frame
}

#[test]
fn candle_geometry_maps_ohlc_to_canvas() {
    let mut layer = CandlestickLayer::new(provider()).with_min_body_height(0.0);
    // Y range [0, 10] over a 100px layer: 1 unit = 10px.
    let model =
        CandlestickModel::from_ohlc(&[(0.0, 2.0, 8.0, 0.0, 10.0)]).expect("valid model");
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);

    let frame = draw(&mut layer, &model, bounds, PanZoom::default());

    assert_eq!(frame.rects.len(), 1);
    assert_relative_eq!(frame.rects[0].top, 20.0, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[0].bottom, 80.0, epsilon = 1e-9);

    // Top wick from the high down to the body, bottom wick from the body down
    // to the low.
    assert_eq!(frame.lines.len(), 2);
    assert_relative_eq!(frame.lines[0].y1, 0.0, epsilon = 1e-9);
    assert_relative_eq!(frame.lines[0].y2, 20.0, epsilon = 1e-9);
    assert_relative_eq!(frame.lines[1].y1, 80.0, epsilon = 1e-9);
    assert_relative_eq!(frame.lines[1].y2, 100.0, epsilon = 1e-9);
}

#[test]
fn min_body_height_expands_about_the_midpoint() {
    let mut layer = CandlestickLayer::new(provider()).with_min_body_height(4.0);
    let model = CandlestickModel::from_ohlc(&[(0.0, 5.0, 5.0, 0.0, 10.0)]).expect("valid model");
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);

    let frame = draw(&mut layer, &model, bounds, PanZoom::default());

    let body = frame.rects[0];
    assert_relative_eq!(body.height(), 4.0, epsilon = 1e-9);
    let midpoint = (body.top + body.bottom) / 2.0;
    assert_relative_eq!(midpoint, 50.0, epsilon = 1e-9);
}

#[test]
fn absolute_provider_selects_by_price_direction() {
    let bullish = candle(Color::rgb(0.0, 1.0, 0.0));
    let neutral = candle(Color::rgb(0.5, 0.5, 0.5));
    let bearish = candle(Color::rgb(1.0, 0.0, 0.0));
    let provider = CandleProvider::absolute(bullish, neutral, bearish);

    let up = CandleEntry::new(0.0, 1.0, 2.0, 0.5, 2.5, None);
    let flat = CandleEntry::new(1.0, 2.0, 2.0, 1.5, 2.5, None);
    let down = CandleEntry::new(2.0, 2.0, 1.0, 0.5, 2.5, None);

    assert_eq!(provider.candle(&up), bullish);
    assert_eq!(provider.candle(&flat), neutral);
    assert_eq!(provider.candle(&down), bearish);
}

#[test]
fn absolute_relative_provider_crosses_both_changes() {
    let mut candles = [[candle(Color::rgb(0.5, 0.5, 0.5)); 3]; 3];
    let marked = candle(Color::rgb(0.0, 0.0, 1.0));
    // Absolutely bearish, relatively bullish.
    candles[2][0] = marked;
    let provider = CandleProvider::absolute_relative(candles);

    // Close below open (bearish) but above the previous close (bullish).
    let entry = CandleEntry::new(1.0, 5.0, 4.0, 3.0, 6.0, Some(2.0));
    assert_eq!(entry.absolute_change, Change::Bearish);
    assert_eq!(entry.relative_change, Change::Bullish);
    assert_eq!(provider.candle(&entry), marked);
}

#[test]
fn wick_thickness_scales_only_when_enabled() {
    let model = CandlestickModel::from_ohlc(&[(0.0, 2.0, 8.0, 0.0, 10.0)]).expect("valid model");
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);
    let zoomed = PanZoom::new(0.0, 2.0);

    let mut unscaled = CandlestickLayer::new(provider()).with_min_body_height(0.0);
    let frame = draw(&mut unscaled, &model, bounds, zoomed);
    assert_relative_eq!(frame.lines[0].stroke_width, 1.0, epsilon = 1e-9);
    // The body always scales with zoom.
    assert_relative_eq!(frame.rects[0].width(), 12.0, epsilon = 1e-9);

    let mut scaled = CandlestickLayer::new(provider())
        .with_min_body_height(0.0)
        .with_scaled_wicks(true);
    let frame = draw(&mut scaled, &model, bounds, zoomed);
    assert_relative_eq!(frame.lines[0].stroke_width, 2.0, epsilon = 1e-9);
}

#[test]
fn marker_target_swaps_open_close_by_direction() {
    let mut layer = CandlestickLayer::new(provider()).with_min_body_height(0.0);
    let model = CandlestickModel::from_ohlc(&[
        (0.0, 2.0, 8.0, 0.0, 10.0),
        (1.0, 8.0, 2.0, 0.0, 10.0),
    ])
    .expect("valid model");
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);

    draw(&mut layer, &model, bounds, PanZoom::default());

    let targets = layer.marker_targets();
    let MarkerTarget::Candle(bullish) = &targets.get(&OrderedFloat(0.0)).expect("x=0")[0] else {
        panic!("expected candle target");
    };
    // Bullish: the open is the lower price, so its canvas y is the larger one.
    assert_relative_eq!(bullish.opening_canvas_y, 80.0, epsilon = 1e-9);
    assert_relative_eq!(bullish.closing_canvas_y, 20.0, epsilon = 1e-9);
    assert_relative_eq!(bullish.high_canvas_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bullish.low_canvas_y, 100.0, epsilon = 1e-9);

    let MarkerTarget::Candle(bearish) = &targets.get(&OrderedFloat(1.0)).expect("x=1")[0] else {
        panic!("expected candle target");
    };
    assert_relative_eq!(bearish.opening_canvas_y, 20.0, epsilon = 1e-9);
    assert_relative_eq!(bearish.closing_canvas_y, 80.0, epsilon = 1e-9);
}

#[test]
fn candles_center_within_their_slot() {
    let mut layer = CandlestickLayer::new(provider()).with_min_body_height(0.0);
    let model = CandlestickModel::from_ohlc(&[
        (0.0, 2.0, 8.0, 0.0, 10.0),
        (1.0, 2.0, 8.0, 0.0, 10.0),
    ])
    .expect("valid model");
    let bounds = Bounds::new(0.0, 0.0, 300.0, 100.0);

    let frame = draw(&mut layer, &model, bounds, PanZoom::default());

    // Max candle width 6, spacing 4: x spacing 10, start padding 3.
    assert_relative_eq!(frame.rects[0].left, 0.0, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[0].right, 6.0, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[1].left, 10.0, epsilon = 1e-9);
    assert_relative_eq!(frame.rects[1].right, 16.0, epsilon = 1e-9);
}
