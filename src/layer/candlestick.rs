use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::anim::{CandleDrawingModel, CandleInfo, Transition};
use crate::core::{
    CandleEntry, CandlestickModel, Change, ChartRanges, DimensionDemands, MutableChartRanges,
    MutableHorizontalDimensions, VerticalAxisKey,
};
use crate::error::ChartResult;
use crate::layer::context::DrawContext;
use crate::layer::style::{LayerPadding, LineStyle};
use crate::marker::{CandleMarkerTarget, MarkerTarget, MarkerTargets};
use crate::render::{LinePrimitive, RectPrimitive};

/// Visual style of one candle: the body rectangle plus both wick lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleStyle {
    pub body: LineStyle,
    pub top_wick: LineStyle,
    pub bottom_wick: LineStyle,
}

impl CandleStyle {
    pub const DEFAULT_WICK_THICKNESS: f64 = 1.0;

    #[must_use]
    pub const fn new(body: LineStyle, top_wick: LineStyle, bottom_wick: LineStyle) -> Self {
        Self {
            body,
            top_wick,
            bottom_wick,
        }
    }

    /// Derives both wicks from the body: same color, default thickness, no
    /// corner radius.
    #[must_use]
    pub const fn from_body(body: LineStyle) -> Self {
        let wick = LineStyle::new(Self::DEFAULT_WICK_THICKNESS, body.color);
        Self {
            body,
            top_wick: wick,
            bottom_wick: wick,
        }
    }

    /// Overall width the candle occupies; drives layout spacing.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.body
            .thickness
            .max(self.top_wick.thickness)
            .max(self.bottom_wick.thickness)
    }
}

fn change_index(change: Change) -> usize {
    match change {
        Change::Bullish => 0,
        Change::Neutral => 1,
        Change::Bearish => 2,
    }
}

/// Selects a candle style per entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandleProvider {
    /// Three styles keyed by the entry's absolute change (close vs. open).
    Absolute { candles: [CandleStyle; 3] },
    /// Nine styles keyed by the absolute change crossed with the relative
    /// change (close vs. previous close); `candles[absolute][relative]`.
    AbsoluteRelative { candles: [[CandleStyle; 3]; 3] },
}

impl CandleProvider {
    #[must_use]
    pub const fn absolute(bullish: CandleStyle, neutral: CandleStyle, bearish: CandleStyle) -> Self {
        Self::Absolute {
            candles: [bullish, neutral, bearish],
        }
    }

    #[must_use]
    pub const fn absolute_relative(candles: [[CandleStyle; 3]; 3]) -> Self {
        Self::AbsoluteRelative { candles }
    }

    #[must_use]
    pub fn candle(&self, entry: &CandleEntry) -> CandleStyle {
        match self {
            Self::Absolute { candles } => candles[change_index(entry.absolute_change)],
            Self::AbsoluteRelative { candles } => {
                candles[change_index(entry.absolute_change)][change_index(entry.relative_change)]
            }
        }
    }

    /// Widest candle any entry can produce.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        match self {
            Self::Absolute { candles } => candles
                .iter()
                .map(CandleStyle::width)
                .fold(0.0f64, f64::max),
            Self::AbsoluteRelative { candles } => candles
                .iter()
                .flatten()
                .map(CandleStyle::width)
                .fold(0.0f64, f64::max),
        }
    }
}

/// Displays data as candlesticks, one per x value.
pub struct CandlestickLayer {
    provider: CandleProvider,
    /// Minimum on-canvas body height in pixels; shorter bodies are expanded
    /// symmetrically about their midpoint.
    min_candle_body_height: f64,
    /// Spacing between neighboring candles, unscaled pixels.
    candle_spacing: f64,
    /// Whether wick thickness scales with zoom like body thickness does.
    scale_candle_wicks: bool,
    layer_padding: LayerPadding,
    vertical_axis: Option<VerticalAxisKey>,
    transition: Transition<CandleDrawingModel>,
    marker_targets: MarkerTargets,
}

impl CandlestickLayer {
    pub const DEFAULT_MIN_BODY_HEIGHT: f64 = 4.0;
    pub const DEFAULT_CANDLE_SPACING: f64 = 4.0;

    #[must_use]
    pub fn new(provider: CandleProvider) -> Self {
        Self {
            provider,
            min_candle_body_height: Self::DEFAULT_MIN_BODY_HEIGHT,
            candle_spacing: Self::DEFAULT_CANDLE_SPACING,
            scale_candle_wicks: false,
            layer_padding: LayerPadding::default(),
            vertical_axis: None,
            transition: Transition::new(),
            marker_targets: MarkerTargets::default(),
        }
    }

    #[must_use]
    pub fn with_min_body_height(mut self, height: f64) -> Self {
        self.min_candle_body_height = height;
        self
    }

    #[must_use]
    pub fn with_candle_spacing(mut self, spacing: f64) -> Self {
        self.candle_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_scaled_wicks(mut self, scale: bool) -> Self {
        self.scale_candle_wicks = scale;
        self
    }

    #[must_use]
    pub fn with_layer_padding(mut self, padding: LayerPadding) -> Self {
        self.layer_padding = padding;
        self
    }

    #[must_use]
    pub fn with_vertical_axis(mut self, axis: VerticalAxisKey) -> Self {
        self.vertical_axis = Some(axis);
        self
    }

    /// Hit regions recorded by the most recent draw pass.
    #[must_use]
    pub fn marker_targets(&self) -> &MarkerTargets {
        &self.marker_targets
    }

    pub fn update_ranges(&self, ranges: &mut MutableChartRanges, model: &CandlestickModel) {
        ranges.try_update(
            model.min_x,
            model.max_x,
            model.min_y,
            model.max_y,
            self.vertical_axis,
        );
        ranges.try_update_x_step(model.x_step);
    }

    pub fn update_horizontal_dimensions(
        &self,
        dims: &mut MutableHorizontalDimensions,
        _model: &CandlestickModel,
    ) {
        let candle_width = self.provider.max_width();
        dims.ensure_values_at_least(
            DimensionDemands::default()
                .x_spacing(candle_width + self.candle_spacing)
                .scalable_start_padding(candle_width / 2.0 + self.layer_padding.scalable_start)
                .scalable_end_padding(candle_width / 2.0 + self.layer_padding.scalable_end)
                .unscalable_start_padding(self.layer_padding.unscalable_start)
                .unscalable_end_padding(self.layer_padding.unscalable_end),
        );
    }

    /// Stages an animated transition toward `model` (or a fade-out on `None`).
    pub fn prepare_transition(&mut self, model: Option<&CandlestickModel>, ranges: &ChartRanges) {
        self.transition
            .stage(model.map(|model| self.to_drawing_model(model, ranges)));
    }

    /// Advances the staged transition to `fraction`.
    pub fn transform(&mut self, fraction: f64) {
        self.transition.frame(fraction);
    }

    /// Cancels an in-flight transition at a frame boundary.
    pub fn cancel_transition(&mut self, jump_to_end: bool) {
        self.transition.cancel(jump_to_end);
    }

    fn to_drawing_model(
        &self,
        model: &CandlestickModel,
        ranges: &ChartRanges,
    ) -> CandleDrawingModel {
        let y_range = ranges.y_range(self.vertical_axis);
        let y_length = y_range.length();
        let normalize = |value: f64| {
            if y_length > 0.0 {
                (value - y_range.min_y) / y_length
            } else {
                0.0
            }
        };
        let entries = model
            .series
            .iter()
            .map(|entry| {
                (
                    OrderedFloat(entry.x),
                    CandleInfo::new(
                        normalize(entry.open.max(entry.close)),
                        normalize(entry.open.min(entry.close)),
                        normalize(entry.high),
                        normalize(entry.low),
                    ),
                )
            })
            .collect::<IndexMap<_, _>>();
        CandleDrawingModel::new(entries)
    }

    fn drawing_start(&self, ctx: &DrawContext<'_>) -> f64 {
        let half_width = self.provider.max_width() / 2.0;
        ctx.layer_bounds.start(ctx.direction)
            + (ctx.dims.start_padding - half_width * ctx.zoom()) * ctx.direction_multiplier()
            - ctx.scroll()
    }

    /// Draws one pass. Range and dimension accumulation must already have
    /// happened; culling here never affects layout math.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>, model: &CandlestickModel) -> ChartResult<()> {
        self.marker_targets.clear();

        let y_range = ctx.ranges.y_range(self.vertical_axis);
        let y_length = y_range.length();
        if y_length <= 0.0 {
            return Ok(());
        }
        let layer_bottom = ctx.layer_bounds.bottom;
        let layer_height = ctx.layer_bounds.height();

        let drawing_model = self.transition.live().cloned();
        let opacity = drawing_model.as_ref().map_or(1.0, |model| model.opacity);

        debug!(
            entries = model.series.len(),
            opacity, "candlestick layer draw pass"
        );

        let drawing_start = self.drawing_start(ctx);
        let half_max_width = self.provider.max_width() / 2.0;
        let wick_zoom = if self.scale_candle_wicks {
            ctx.zoom()
        } else {
            1.0
        };

        for entry in model
            .series
            .iter()
            .filter(|entry| entry.x >= ctx.ranges.min_x && entry.x <= ctx.ranges.max_x)
        {
            let candle = self.provider.candle(entry);
            let info = drawing_model.as_ref().and_then(|model| model.info(entry.x));
            let info = info.unwrap_or_else(|| {
                let normalize = |value: f64| (value - y_range.min_y) / y_length;
                CandleInfo::new(
                    normalize(entry.open.max(entry.close)),
                    normalize(entry.open.min(entry.close)),
                    normalize(entry.high),
                    normalize(entry.low),
                )
            });
            let alpha = info.alpha * opacity;

            let x_spacing_multiplier = (entry.x - ctx.ranges.min_x) / ctx.ranges.x_step;
            let center_x = drawing_start
                + (ctx.dims.x_spacing * x_spacing_multiplier + half_max_width * ctx.zoom())
                    * ctx.direction_multiplier();

            let mut body_top = layer_bottom - info.body_top_y * layer_height;
            let mut body_bottom = layer_bottom - info.body_bottom_y * layer_height;
            if body_bottom - body_top < self.min_candle_body_height {
                let midpoint = (body_bottom + body_top) / 2.0;
                body_bottom = midpoint + self.min_candle_body_height / 2.0;
                body_top = body_bottom - self.min_candle_body_height;
            }
            let top_wick = layer_bottom - info.top_wick_y * layer_height;
            let bottom_wick = layer_bottom - info.bottom_wick_y * layer_height;

            let body_thickness = candle.body.thickness * ctx.zoom();
            let (left, right) = (
                center_x - body_thickness / 2.0,
                center_x + body_thickness / 2.0,
            );

            let extent_top = top_wick.min(body_top);
            let extent_bottom = bottom_wick.max(body_bottom);
            if !ctx
                .layer_bounds
                .intersects_rect(left, extent_top, right, extent_bottom)
            {
                continue;
            }

            self.record_marker_target(ctx, entry, candle, center_x, body_top, body_bottom);

            ctx.frame.push_line(LinePrimitive::new(
                center_x,
                top_wick,
                center_x,
                body_top,
                candle.top_wick.thickness * wick_zoom,
                candle.top_wick.color.faded(alpha),
            ));
            ctx.frame.push_line(LinePrimitive::new(
                center_x,
                body_bottom,
                center_x,
                bottom_wick,
                candle.bottom_wick.thickness * wick_zoom,
                candle.bottom_wick.color.faded(alpha),
            ));
            ctx.frame.push_rect(RectPrimitive::new(
                left,
                body_top,
                right,
                body_bottom,
                candle.body.corner_radius,
                candle.body.color.faded(alpha),
            ));
        }

        Ok(())
    }

    fn record_marker_target(
        &mut self,
        ctx: &DrawContext<'_>,
        entry: &CandleEntry,
        candle: CandleStyle,
        canvas_x: f64,
        body_top: f64,
        body_bottom: f64,
    ) {
        if canvas_x <= ctx.layer_bounds.left - 1.0 || canvas_x >= ctx.layer_bounds.right + 1.0 {
            return;
        }
        // The body's lower canvas edge holds whichever of open/close is the
        // smaller value.
        let (opening_canvas_y, closing_canvas_y) = match entry.absolute_change {
            Change::Bullish => (body_bottom, body_top),
            Change::Neutral | Change::Bearish => (body_top, body_bottom),
        };
        let y_range = ctx.ranges.y_range(self.vertical_axis);
        let y_length = y_range.length();
        let canvas_y = |value: f64| {
            ctx.layer_bounds.bottom - (value - y_range.min_y) / y_length * ctx.layer_bounds.height()
        };
        self.marker_targets
            .entry(OrderedFloat(entry.x))
            .or_default()
            .push(MarkerTarget::Candle(CandleMarkerTarget {
                x: entry.x,
                canvas_x,
                entry: *entry,
                opening_canvas_y: ctx.layer_bounds.clamp_y(opening_canvas_y),
                closing_canvas_y: ctx.layer_bounds.clamp_y(closing_canvas_y),
                low_canvas_y: ctx.layer_bounds.clamp_y(canvas_y(entry.low)),
                high_canvas_y: ctx.layer_bounds.clamp_y(canvas_y(entry.high)),
                body_color: candle.body.color,
                wick_color: candle.top_wick.color,
            }));
    }
}
