use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::smallvec;
use tracing::debug;

use crate::anim::{ColumnDrawingModel, ColumnInfo, Transition};
use crate::core::{
    ChartRanges, ColumnEntry, ColumnModel, DimensionDemands, MutableChartRanges,
    MutableHorizontalDimensions, VerticalAxisKey,
};
use crate::error::ChartResult;
use crate::layer::context::DrawContext;
use crate::layer::style::{LayerPadding, LineStyle, TextStyle, ValueFormatter, VerticalPosition};
use crate::marker::{ColumnMarkerTarget, ColumnTarget, MarkerTarget, MarkerTargets};
use crate::render::{RectPrimitive, TextHAlign, TextPrimitive};

/// How columns sharing an x value across series are combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeMode {
    /// Each series gets its own column, offset by the preceding series'
    /// thickness plus `column_spacing`.
    Grouped { column_spacing: f64 },
    /// Columns stack atop (positive y) or below (negative y) a shared zero
    /// line, folded in series order.
    Stacked,
}

impl MergeMode {
    fn y_bounds(self, model: &ColumnModel) -> (f64, f64) {
        match self {
            Self::Grouped { .. } => (model.min_y, model.max_y),
            Self::Stacked => (model.min_aggregate_y, model.max_aggregate_y),
        }
    }
}

/// Provides per-series column styles.
pub trait ColumnProvider {
    fn column(&self, entry: &ColumnEntry, series_index: usize) -> LineStyle;

    /// Widest column the series can produce; drives layout spacing.
    fn widest_series_column(&self, series_index: usize) -> LineStyle;
}

/// One style per series, associated by index; the list repeats when there are
/// more series than styles.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumnProvider {
    columns: Vec<LineStyle>,
}

impl SeriesColumnProvider {
    pub fn new(columns: Vec<LineStyle>) -> ChartResult<Self> {
        if columns.is_empty() {
            return Err(crate::error::ChartError::InvalidData(
                "column provider requires at least one style".to_owned(),
            ));
        }
        Ok(Self { columns })
    }
}

impl ColumnProvider for SeriesColumnProvider {
    fn column(&self, _entry: &ColumnEntry, series_index: usize) -> LineStyle {
        self.columns[series_index % self.columns.len()]
    }

    fn widest_series_column(&self, series_index: usize) -> LineStyle {
        self.columns[series_index % self.columns.len()]
    }
}

/// Data-label configuration for a column layer.
pub struct DataLabelConfig {
    pub style: TextStyle,
    pub vertical_position: VerticalPosition,
    pub formatter: Box<dyn ValueFormatter>,
    /// Gap between the column edge and the label box.
    pub margin: f64,
}

/// Per-x running stack state, rebuilt from scratch every draw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StackInfo {
    pub top_y: f64,
    pub bottom_y: f64,
    pub top_height: f64,
    pub bottom_height: f64,
    pub center_x: f64,
}

impl StackInfo {
    pub fn update(&mut self, y: f64, height: f64) {
        if y >= 0.0 {
            self.top_y += y;
            self.top_height += height;
        } else {
            self.bottom_y += y;
            self.bottom_height += height;
        }
    }
}

/// Displays data as vertical bars, one collection per x value.
pub struct ColumnLayer {
    provider: Box<dyn ColumnProvider>,
    merge_mode: MergeMode,
    /// Spacing between neighboring column collections, unscaled pixels.
    column_collection_spacing: f64,
    data_label: Option<DataLabelConfig>,
    layer_padding: LayerPadding,
    vertical_axis: Option<VerticalAxisKey>,
    transition: Transition<ColumnDrawingModel>,
    marker_targets: MarkerTargets,
}

impl ColumnLayer {
    pub const DEFAULT_COLLECTION_SPACING: f64 = 32.0;

    #[must_use]
    pub fn new(provider: Box<dyn ColumnProvider>, merge_mode: MergeMode) -> Self {
        Self {
            provider,
            merge_mode,
            column_collection_spacing: Self::DEFAULT_COLLECTION_SPACING,
            data_label: None,
            layer_padding: LayerPadding::default(),
            vertical_axis: None,
            transition: Transition::new(),
            marker_targets: MarkerTargets::default(),
        }
    }

    #[must_use]
    pub fn with_collection_spacing(mut self, spacing: f64) -> Self {
        self.column_collection_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_data_label(mut self, config: DataLabelConfig) -> Self {
        self.data_label = Some(config);
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

    #[must_use]
    pub fn merge_mode(&self) -> MergeMode {
        self.merge_mode
    }

    /// Hit regions recorded by the most recent draw pass.
    #[must_use]
    pub fn marker_targets(&self) -> &MarkerTargets {
        &self.marker_targets
    }

    pub fn update_ranges(&self, ranges: &mut MutableChartRanges, model: &ColumnModel) {
        let (min_y, max_y) = self.merge_mode.y_bounds(model);
        // Columns anchor at the zero line, so the y range always contains it.
        ranges.try_update(
            model.min_x,
            model.max_x,
            min_y.min(0.0),
            max_y.max(0.0),
            self.vertical_axis,
        );
        ranges.try_update_x_step(model.x_step);
    }

    pub fn update_horizontal_dimensions(
        &self,
        dims: &mut MutableHorizontalDimensions,
        model: &ColumnModel,
    ) {
        let collection_width = self.column_collection_width(model.series.len().max(1));
        dims.ensure_values_at_least(
            DimensionDemands::default()
                .x_spacing(collection_width + self.column_collection_spacing)
                .scalable_start_padding(collection_width / 2.0 + self.layer_padding.scalable_start)
                .scalable_end_padding(collection_width / 2.0 + self.layer_padding.scalable_end)
                .unscalable_start_padding(self.layer_padding.unscalable_start)
                .unscalable_end_padding(self.layer_padding.unscalable_end),
        );
    }

    /// Stages an animated transition toward `model` (or a fade-out on `None`).
    pub fn prepare_transition(&mut self, model: Option<&ColumnModel>, ranges: &ChartRanges) {
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

    fn to_drawing_model(&self, model: &ColumnModel, ranges: &ChartRanges) -> ColumnDrawingModel {
        let y_length = ranges.y_range(self.vertical_axis).length();
        let series = model
            .series
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        let height = if y_length > 0.0 {
                            entry.y.abs() / y_length
                        } else {
                            0.0
                        };
                        (OrderedFloat(entry.x), ColumnInfo::new(height))
                    })
                    .collect::<IndexMap<_, _>>()
            })
            .collect();
        ColumnDrawingModel::new(series)
    }

    fn cumulated_thickness(&self, count: usize) -> f64 {
        (0..count)
            .map(|series_index| self.provider.widest_series_column(series_index).thickness)
            .sum()
    }

    fn column_collection_width(&self, series_count: usize) -> f64 {
        match self.merge_mode {
            MergeMode::Stacked => (0..series_count)
                .map(|series_index| self.provider.widest_series_column(series_index).thickness)
                .fold(0.0f64, f64::max),
            MergeMode::Grouped { column_spacing } => {
                self.cumulated_thickness(series_count)
                    + column_spacing * (series_count.saturating_sub(1)) as f64
            }
        }
    }

    fn drawing_start(&self, ctx: &DrawContext<'_>, series_index: usize, series_count: usize) -> f64 {
        let merge_component = match self.merge_mode {
            MergeMode::Grouped { column_spacing } => {
                self.cumulated_thickness(series_index) + column_spacing * series_index as f64
            }
            MergeMode::Stacked => 0.0,
        };
        let collection_width = self.column_collection_width(series_count);
        ctx.layer_bounds.start(ctx.direction)
            + (ctx.dims.start_padding + (merge_component - collection_width / 2.0) * ctx.zoom())
                * ctx.direction_multiplier()
            - ctx.scroll()
    }

    /// Draws one pass. Range and dimension accumulation must already have
    /// happened; culling here never affects layout math.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>, model: &ColumnModel) -> ChartResult<()> {
        self.marker_targets.clear();

        let y_range = ctx.ranges.y_range(self.vertical_axis);
        let y_length = y_range.length();
        if y_length <= 0.0 {
            return Ok(());
        }
        let layer_height = ctx.layer_bounds.height();
        let zero_line = ctx.layer_bounds.bottom + y_range.min_y / y_length * layer_height;

        let drawing_model = self.transition.live().cloned();
        let opacity = drawing_model.as_ref().map_or(1.0, |model| model.opacity);

        debug!(
            series = model.series.len(),
            merge_mode = ?self.merge_mode,
            opacity,
            "column layer draw pass"
        );

        let mut stack: IndexMap<OrderedFloat<f64>, StackInfo> = IndexMap::new();

        for (series_index, entries) in model.series.iter().enumerate() {
            let drawing_start = self.drawing_start(ctx, series_index, model.series.len());
            let widest = self.provider.widest_series_column(series_index);

            for entry in entries
                .iter()
                .filter(|entry| entry.x >= ctx.ranges.min_x && entry.x <= ctx.ranges.max_x)
            {
                let info = drawing_model
                    .as_ref()
                    .and_then(|model| model.info(series_index, entry.x));
                let height_fraction = info.map_or(entry.y.abs() / y_length, |info| info.height);
                let alpha = info.map_or(1.0, |info| info.alpha) * opacity;
                let height = height_fraction * layer_height;

                let x_spacing_multiplier = (entry.x - ctx.ranges.min_x) / ctx.ranges.x_step;
                let column = self.provider.column(entry, series_index);
                let center_x = drawing_start
                    + (ctx.dims.x_spacing * x_spacing_multiplier
                        + widest.thickness / 2.0 * ctx.zoom())
                        * ctx.direction_multiplier();

                let (top, bottom) = match self.merge_mode {
                    MergeMode::Stacked => {
                        let stack_info = stack.entry(OrderedFloat(entry.x)).or_default();
                        let bottom = if entry.y >= 0.0 {
                            zero_line - stack_info.top_height
                        } else {
                            zero_line + stack_info.bottom_height + height
                        };
                        let top = (bottom - height).min(bottom);
                        stack_info.update(entry.y, height);
                        stack_info.center_x = center_x;
                        (top, bottom)
                    }
                    MergeMode::Grouped { .. } => {
                        let bottom = zero_line + if entry.y < 0.0 { height } else { 0.0 };
                        (bottom - height, bottom)
                    }
                };

                let significant_y = if entry.y < 0.0 { bottom } else { top };
                let thickness = column.thickness * ctx.zoom();
                let (left, right) = (center_x - thickness / 2.0, center_x + thickness / 2.0);

                if ctx.layer_bounds.intersects_rect(left, top, right, bottom) {
                    self.record_marker_target(ctx, entry, center_x, significant_y, column);
                    ctx.frame.push_rect(RectPrimitive::new(
                        left,
                        top,
                        right,
                        bottom,
                        column.corner_radius,
                        column.color.faded(alpha),
                    ));
                }

                if let MergeMode::Grouped { .. } = self.merge_mode {
                    self.draw_data_label(
                        ctx,
                        model.series.len(),
                        column.thickness,
                        entry.y,
                        center_x,
                        significant_y,
                        alpha,
                        series_index == 0 && entry.x == ctx.ranges.min_x,
                        series_index == model.series.len() - 1 && entry.x == ctx.ranges.max_x,
                    );
                }
            }
        }

        // Stacked labels read the final accumulator state, after every series
        // for the x value has been folded.
        if self.merge_mode == MergeMode::Stacked && self.data_label.is_some() {
            let column_thickness = self.column_collection_width(model.series.len().max(1));
            for (x, stack_info) in &stack {
                let is_first = x.into_inner() == ctx.ranges.min_x;
                let is_last = x.into_inner() == ctx.ranges.max_x;
                if stack_info.top_y > 0.0 {
                    self.draw_data_label(
                        ctx,
                        model.series.len(),
                        column_thickness,
                        stack_info.top_y,
                        stack_info.center_x,
                        zero_line - stack_info.top_height,
                        opacity,
                        is_first,
                        is_last,
                    );
                }
                if stack_info.bottom_y < 0.0 {
                    self.draw_data_label(
                        ctx,
                        model.series.len(),
                        column_thickness,
                        stack_info.bottom_y,
                        stack_info.center_x,
                        zero_line + stack_info.bottom_height,
                        opacity,
                        is_first,
                        is_last,
                    );
                }
            }
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_data_label(
        &self,
        ctx: &mut DrawContext<'_>,
        series_count: usize,
        column_thickness: f64,
        value: f64,
        x: f64,
        y: f64,
        alpha: f64,
        is_first: bool,
        is_last: bool,
    ) {
        let Some(config) = &self.data_label else {
            return;
        };

        let mut max_width = match self.merge_mode {
            MergeMode::Stacked => ctx.dims.x_spacing,
            MergeMode::Grouped { .. } if series_count == 1 => ctx.dims.x_spacing,
            MergeMode::Grouped { column_spacing } => {
                (column_thickness + column_spacing.min(self.column_collection_spacing) / 2.0)
                    * ctx.zoom()
            }
        };
        if is_first {
            max_width = max_width.min(ctx.dims.start_padding * 2.0);
        }
        if is_last {
            max_width = max_width.min(ctx.dims.end_padding * 2.0);
        }
        if max_width <= 0.0 {
            return;
        }

        let text = config.formatter.format(value);
        let label_width = ctx
            .text
            .width(&text, config.style.font, config.style.rotation_degrees)
            .min(max_width);

        // Labels never render outside the plotted area.
        if x - label_width / 2.0 > ctx.layer_bounds.right
            || x + label_width / 2.0 < ctx.layer_bounds.left
        {
            return;
        }

        let position = if value < 0.0 {
            config.vertical_position.flipped()
        } else {
            config.vertical_position
        };
        let label_height = ctx.text.height(
            &text,
            config.style.font,
            max_width,
            config.style.rotation_degrees,
        );
        let position = position.in_bounds(
            y,
            ctx.layer_bounds.top,
            ctx.layer_bounds.bottom,
            label_height,
        );
        let text_top = match position {
            VerticalPosition::Top => y - label_height - config.margin,
            VerticalPosition::Bottom => y + config.margin,
        };

        ctx.frame.push_text(
            TextPrimitive::new(
                text,
                x,
                text_top,
                config.style.font.size_px,
                config.style.color.faded(alpha),
                TextHAlign::Center,
            )
            .with_rotation(config.style.rotation_degrees)
            .with_max_width(max_width),
        );
    }

    fn record_marker_target(
        &mut self,
        ctx: &DrawContext<'_>,
        entry: &ColumnEntry,
        canvas_x: f64,
        canvas_y: f64,
        column: LineStyle,
    ) {
        if canvas_x <= ctx.layer_bounds.left - 1.0 || canvas_x >= ctx.layer_bounds.right + 1.0 {
            return;
        }
        let target_column = ColumnTarget {
            entry: *entry,
            canvas_y: ctx.layer_bounds.clamp_y(canvas_y),
            color: column.color,
        };
        let key = OrderedFloat(entry.x);
        match self.merge_mode {
            MergeMode::Grouped { .. } => {
                self.marker_targets.entry(key).or_default().push(
                    MarkerTarget::Column(ColumnMarkerTarget {
                        x: entry.x,
                        canvas_x,
                        columns: smallvec![target_column],
                    }),
                );
            }
            MergeMode::Stacked => {
                let targets = self.marker_targets.entry(key).or_default();
                if targets.is_empty() {
                    targets.push(MarkerTarget::Column(ColumnMarkerTarget {
                        x: entry.x,
                        canvas_x,
                        columns: smallvec![],
                    }));
                }
                if let Some(MarkerTarget::Column(target)) = targets.first_mut() {
                    target.columns.push(target_column);
                }
            }
        }
    }
}
