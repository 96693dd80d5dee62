use tracing::debug;

use crate::axis::item_placer::{AlignedItemPlacer, ItemPlacer};
use crate::core::{AxisPosition, Bounds, ChartRanges, MutableHorizontalDimensions};
use crate::error::ChartResult;
use crate::layer::{
    DecimalFormatter, DrawContext, LineStyle, MeasureContext, TextStyle, ValueFormatter,
};
use crate::render::{Color, LinePrimitive, TextHAlign, TextMeasurer, TextPrimitive};

/// Horizontal axis drawn above or below the plotted area.
///
/// Label x positions come from the same range snapshot and horizontal
/// dimensions the layers use, so axis items align pixel-exactly with layer
/// geometry.
pub struct HorizontalAxis {
    position: AxisPosition,
    line: Option<LineStyle>,
    label: Option<TextStyle>,
    tick: Option<LineStyle>,
    tick_length: f64,
    guideline: Option<LineStyle>,
    placer: Box<dyn ItemPlacer>,
    formatter: Box<dyn ValueFormatter>,
}

impl HorizontalAxis {
    pub const DEFAULT_TICK_LENGTH: f64 = 4.0;

    #[must_use]
    pub fn new(position: AxisPosition) -> Self {
        let stroke = LineStyle::new(1.0, Color::rgb(0.0, 0.0, 0.0));
        Self {
            position,
            line: Some(stroke),
            label: Some(TextStyle::default()),
            tick: Some(stroke),
            tick_length: Self::DEFAULT_TICK_LENGTH,
            guideline: Some(LineStyle::new(1.0, Color::rgb(0.85, 0.85, 0.85))),
            placer: Box::new(AlignedItemPlacer::default()),
            formatter: Box::new(DecimalFormatter::default()),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: Option<LineStyle>) -> Self {
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: Option<TextStyle>) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Option<LineStyle>, length: f64) -> Self {
        self.tick = tick;
        self.tick_length = length;
        self
    }

    #[must_use]
    pub fn with_guideline(mut self, guideline: Option<LineStyle>) -> Self {
        self.guideline = guideline;
        self
    }

    #[must_use]
    pub fn with_placer(mut self, placer: Box<dyn ItemPlacer>) -> Self {
        self.placer = placer;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn ValueFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    fn line_thickness(&self) -> f64 {
        self.line.map_or(0.0, |line| line.thickness)
    }

    fn tick_thickness(&self) -> f64 {
        self.tick.map_or(0.0, |tick| tick.thickness)
    }

    fn tick_length(&self) -> f64 {
        if self.tick.is_some() {
            self.tick_length
        } else {
            0.0
        }
    }

    fn max_label_width(&self, ranges: &ChartRanges, text: &dyn TextMeasurer) -> f64 {
        let Some(style) = &self.label else {
            return 0.0;
        };
        self.placer
            .width_measurement_label_values(ranges)
            .into_iter()
            .map(|value| {
                text.width(
                    &self.formatter.format(value),
                    style.font,
                    style.rotation_degrees,
                )
            })
            .fold(0.0f64, f64::max)
    }

    fn max_label_height(&self, ranges: &ChartRanges, text: &dyn TextMeasurer, max_width: f64) -> f64 {
        let Some(style) = &self.label else {
            return 0.0;
        };
        self.placer
            .height_measurement_label_values(ranges)
            .into_iter()
            .map(|value| {
                text.height(
                    &self.formatter.format(value),
                    style.font,
                    max_width,
                    style.rotation_degrees,
                )
            })
            .fold(0.0f64, f64::max)
    }

    /// Vertical space the axis needs outside the plotted area.
    #[must_use]
    pub fn height(&self, ctx: &MeasureContext<'_>) -> f64 {
        let max_width = self.max_label_width(ctx.ranges, ctx.text);
        let label_height = self.max_label_height(ctx.ranges, ctx.text, max_width);
        let line_thickness = match self.position {
            AxisPosition::Bottom => self.line_thickness(),
            AxisPosition::Top => 0.0,
        };
        label_height + self.tick_length() + line_thickness
    }

    /// Horizontal margin the axis needs past the start of the plotted area.
    #[must_use]
    pub fn start_inset(&self, ctx: &MeasureContext<'_>) -> f64 {
        let max_width = self.max_label_width(ctx.ranges, ctx.text);
        self.placer.start_axis_inset(self.tick_thickness(), max_width)
    }

    /// Horizontal margin the axis needs past the end of the plotted area.
    #[must_use]
    pub fn end_inset(&self, ctx: &MeasureContext<'_>) -> f64 {
        let max_width = self.max_label_width(ctx.ranges, ctx.text);
        self.placer.end_axis_inset(self.tick_thickness(), max_width)
    }

    /// Reserves unscalable padding so the first and last labels fit within
    /// the chart without clipping.
    pub fn update_horizontal_dimensions(
        &self,
        ctx: &MeasureContext<'_>,
        dims: &mut MutableHorizontalDimensions,
    ) {
        let Some(style) = &self.label else {
            return;
        };
        if let Some(first) = self.placer.first_label_value(ctx.ranges) {
            let text = self.formatter.format(first);
            let mut padding = ctx.text.width(&text, style.font, style.rotation_degrees) / 2.0;
            if !ctx.zoom_enabled {
                padding -= (first - ctx.ranges.min_x) / ctx.ranges.x_step * ctx.dims.x_spacing;
            }
            dims.ensure_values_at_least(
                crate::core::DimensionDemands::default().unscalable_start_padding(padding.max(0.0)),
            );
        }
        if let Some(last) = self.placer.last_label_value(ctx.ranges) {
            let text = self.formatter.format(last);
            let mut padding = ctx.text.width(&text, style.font, style.rotation_degrees) / 2.0;
            if !ctx.zoom_enabled {
                padding -= (ctx.ranges.max_x - last) / ctx.ranges.x_step * ctx.dims.x_spacing;
            }
            dims.ensure_values_at_least(
                crate::core::DimensionDemands::default().unscalable_end_padding(padding.max(0.0)),
            );
        }
    }

    fn lines_correction_x(&self, ctx: &DrawContext<'_>, x: f64, full: (f64, f64)) -> f64 {
        let logical = if !self.placer.shift_extreme_lines() {
            0.0
        } else if x == full.0 {
            -self.tick_thickness() / 2.0
        } else if x == full.1 {
            self.tick_thickness() / 2.0
        } else {
            0.0
        };
        logical * ctx.direction_multiplier()
    }

    /// Draws the axis into `bounds`, a band directly above or below the
    /// plotted area spanning its full width.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, bounds: Bounds) -> ChartResult<()> {
        bounds.validate()?;

        let line_thickness = self.line_thickness();
        let tick_length = self.tick_length();
        let (tick_top, tick_bottom) = match self.position {
            AxisPosition::Top => (
                bounds.bottom - line_thickness - tick_length,
                bounds.bottom,
            ),
            AxisPosition::Bottom => (bounds.top, bounds.top + line_thickness + tick_length),
        };

        let full = ctx.full_x_range();
        let visible = ctx.visible_x_range(bounds);
        // Copied scalars; the closure must not borrow `ctx`, which the frame
        // pushes below need mutably.
        let min_x = ctx.ranges.min_x;
        let x_step = ctx.ranges.x_step;
        let x_spacing = ctx.dims.x_spacing;
        let direction_multiplier = ctx.direction_multiplier();
        let base_canvas_x = bounds.start(ctx.direction) - ctx.scroll()
            + ctx.dims.start_padding * direction_multiplier;
        let canvas_x =
            move |x: f64| base_canvas_x + (x - min_x) / x_step * x_spacing * direction_multiplier;

        let label_values = self.placer.label_values(ctx.ranges, visible);
        let line_values = self.placer.line_values(ctx.ranges, visible);

        debug!(
            position = ?self.position,
            labels = label_values.len(),
            "horizontal axis draw pass"
        );

        if let Some(style) = &self.label {
            let text_y = match self.position {
                AxisPosition::Top => tick_top,
                AxisPosition::Bottom => tick_bottom,
            };
            for (index, &x) in label_values.iter().enumerate() {
                let center = canvas_x(x);
                // Virtual neighbors mirror the value across the range bound,
                // giving edge labels the same slot width rule as inner ones.
                let previous = label_values
                    .get(index.wrapping_sub(1))
                    .copied()
                    .unwrap_or(2.0 * full.0 - x);
                let next = label_values
                    .get(index + 1)
                    .copied()
                    .unwrap_or(2.0 * full.1 - x);
                let max_width =
                    ((x - previous).min(next - x) / ctx.ranges.x_step * ctx.dims.x_spacing).ceil();
                // A zero-width slot drops the label but keeps the tick.
                if max_width > 0.0 {
                    let text = self.formatter.format(x);
                    let top = match self.position {
                        AxisPosition::Top => {
                            text_y
                                - ctx
                                    .text
                                    .height(&text, style.font, max_width, style.rotation_degrees)
                        }
                        AxisPosition::Bottom => text_y,
                    };
                    ctx.frame.push_text(
                        TextPrimitive::new(
                            text,
                            center,
                            top,
                            style.font.size_px,
                            style.color,
                            TextHAlign::Center,
                        )
                        .with_rotation(style.rotation_degrees)
                        .with_max_width(max_width),
                    );
                }

                if line_values.is_none() {
                    if let Some(tick) = self.tick {
                        let tick_x = center + self.lines_correction_x(ctx, x, full);
                        ctx.frame.push_line(LinePrimitive::new(
                            tick_x,
                            tick_top,
                            tick_x,
                            tick_bottom,
                            tick.thickness,
                            tick.color,
                        ));
                    }
                }
            }
        }

        if let (Some(values), Some(tick)) = (&line_values, self.tick) {
            for &x in values {
                let tick_x = canvas_x(x) + self.lines_correction_x(ctx, x, full);
                ctx.frame.push_line(LinePrimitive::new(
                    tick_x,
                    tick_top,
                    tick_x,
                    tick_bottom,
                    tick.thickness,
                    tick.color,
                ));
            }
        }

        if let Some(line) = self.line {
            let extension = if self.placer.shift_extreme_lines() {
                self.tick_thickness()
            } else {
                self.tick_thickness() / 2.0
            };
            let center_y = match self.position {
                AxisPosition::Top => bounds.bottom - line.thickness / 2.0,
                AxisPosition::Bottom => bounds.top + line.thickness / 2.0,
            };
            ctx.frame.push_line(LinePrimitive::new(
                ctx.layer_bounds.left - extension,
                center_y,
                ctx.layer_bounds.right + extension,
                center_y,
                line.thickness,
                line.color,
            ));
        }

        self.draw_guidelines(ctx, full, &label_values, line_values.as_deref());

        Ok(())
    }

    /// Guidelines span the plotted area, not the axis band, and a value equal
    /// to a full-range bound is suppressed (a vertical axis line sits there).
    fn draw_guidelines(
        &self,
        ctx: &mut DrawContext<'_>,
        full: (f64, f64),
        label_values: &[f64],
        line_values: Option<&[f64]>,
    ) {
        let Some(guideline) = self.guideline else {
            return;
        };
        let base_canvas_x = ctx.layer_bounds.start(ctx.direction) - ctx.scroll()
            + ctx.dims.start_padding * ctx.direction_multiplier();
        // Ticks get the extreme-line correction; label-driven guidelines do
        // not, since their bound values are suppressed anyway.
        let positions: Vec<f64> = match line_values {
            Some(values) => values
                .iter()
                .filter(|x| **x != full.0 && **x != full.1)
                .map(|&x| {
                    base_canvas_x
                        + (x - ctx.ranges.min_x) / ctx.ranges.x_step
                            * ctx.dims.x_spacing
                            * ctx.direction_multiplier()
                        + self.lines_correction_x(ctx, x, full)
                })
                .collect(),
            None => label_values
                .iter()
                .filter(|x| **x != full.0 && **x != full.1)
                .map(|&x| {
                    base_canvas_x
                        + (x - ctx.ranges.min_x) / ctx.ranges.x_step
                            * ctx.dims.x_spacing
                            * ctx.direction_multiplier()
                })
                .collect(),
        };
        for x in positions {
            if !ctx.layer_bounds.contains_x(x) {
                continue;
            }
            ctx.frame.push_line(LinePrimitive::new(
                x,
                ctx.layer_bounds.top,
                x,
                ctx.layer_bounds.bottom,
                guideline.thickness,
                guideline.color,
            ));
        }
    }
}
