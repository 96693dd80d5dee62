use tracing::debug;

use crate::axis::HorizontalAxis;
use crate::core::{
    AxisPosition, Bounds, CandlestickModel, ChartRanges, ColumnModel, LayoutDirection,
    MutableChartRanges, MutableHorizontalDimensions, PanZoom,
};
use crate::error::{ChartError, ChartResult};
use crate::layer::{CandlestickLayer, ColumnLayer, DrawContext, MeasureContext};
use crate::marker::MarkerTargets;
use crate::render::{RenderFrame, TextMeasurer};

/// One chart layer, tagged by series type.
pub enum ChartLayer {
    Column(ColumnLayer),
    Candlestick(CandlestickLayer),
}

/// Data snapshot paired positionally with a [`ChartLayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerModel {
    Column(ColumnModel),
    Candlestick(CandlestickModel),
}

fn mismatch(index: usize) -> ChartError {
    ChartError::InvalidData(format!(
        "model at index {index} does not match the layer's series type"
    ))
}

impl ChartLayer {
    fn update_ranges(
        &self,
        index: usize,
        ranges: &mut MutableChartRanges,
        model: &LayerModel,
    ) -> ChartResult<()> {
        match (self, model) {
            (Self::Column(layer), LayerModel::Column(model)) => {
                layer.update_ranges(ranges, model);
                Ok(())
            }
            (Self::Candlestick(layer), LayerModel::Candlestick(model)) => {
                layer.update_ranges(ranges, model);
                Ok(())
            }
            _ => Err(mismatch(index)),
        }
    }

    fn update_horizontal_dimensions(
        &self,
        index: usize,
        dims: &mut MutableHorizontalDimensions,
        model: &LayerModel,
    ) -> ChartResult<()> {
        match (self, model) {
            (Self::Column(layer), LayerModel::Column(model)) => {
                layer.update_horizontal_dimensions(dims, model);
                Ok(())
            }
            (Self::Candlestick(layer), LayerModel::Candlestick(model)) => {
                layer.update_horizontal_dimensions(dims, model);
                Ok(())
            }
            _ => Err(mismatch(index)),
        }
    }

    fn prepare_transition(
        &mut self,
        index: usize,
        model: Option<&LayerModel>,
        ranges: &ChartRanges,
    ) -> ChartResult<()> {
        match (self, model) {
            (Self::Column(layer), Some(LayerModel::Column(model))) => {
                layer.prepare_transition(Some(model), ranges);
                Ok(())
            }
            (Self::Column(layer), None) => {
                layer.prepare_transition(None, ranges);
                Ok(())
            }
            (Self::Candlestick(layer), Some(LayerModel::Candlestick(model))) => {
                layer.prepare_transition(Some(model), ranges);
                Ok(())
            }
            (Self::Candlestick(layer), None) => {
                layer.prepare_transition(None, ranges);
                Ok(())
            }
            _ => Err(mismatch(index)),
        }
    }

    /// Advances this layer's staged transition to `fraction`.
    pub fn transform(&mut self, fraction: f64) {
        match self {
            Self::Column(layer) => layer.transform(fraction),
            Self::Candlestick(layer) => layer.transform(fraction),
        }
    }

    /// Cancels this layer's in-flight transition.
    pub fn cancel_transition(&mut self, jump_to_end: bool) {
        match self {
            Self::Column(layer) => layer.cancel_transition(jump_to_end),
            Self::Candlestick(layer) => layer.cancel_transition(jump_to_end),
        }
    }

    fn draw(
        &mut self,
        index: usize,
        ctx: &mut DrawContext<'_>,
        model: &LayerModel,
    ) -> ChartResult<()> {
        match (self, model) {
            (Self::Column(layer), LayerModel::Column(model)) => layer.draw(ctx, model),
            (Self::Candlestick(layer), LayerModel::Candlestick(model)) => layer.draw(ctx, model),
            _ => Err(mismatch(index)),
        }
    }

    /// Hit regions recorded by this layer's most recent draw pass.
    #[must_use]
    pub fn marker_targets(&self) -> &MarkerTargets {
        match self {
            Self::Column(layer) => layer.marker_targets(),
            Self::Candlestick(layer) => layer.marker_targets(),
        }
    }
}

/// Composition root: layers plus horizontal axes sharing one range snapshot
/// and one horizontal-dimension accumulator per pass.
///
/// Single-threaded by design; one measure or draw pass runs at a time, and
/// both accumulators are reset at the start of every measure.
pub struct CartesianChart {
    layers: Vec<ChartLayer>,
    axes: Vec<HorizontalAxis>,
    ranges: MutableChartRanges,
    dims: MutableHorizontalDimensions,
    snapshot: ChartRanges,
    direction: LayoutDirection,
    zoom_enabled: bool,
}

impl Default for CartesianChart {
    fn default() -> Self {
        Self::new()
    }
}

impl CartesianChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            axes: Vec::new(),
            ranges: MutableChartRanges::new(),
            dims: MutableHorizontalDimensions::new(),
            snapshot: ChartRanges::empty(),
            direction: LayoutDirection::Ltr,
            zoom_enabled: true,
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: ChartLayer) -> Self {
        self.layers.push(layer);
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: HorizontalAxis) -> Self {
        self.axes.push(axis);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    #[must_use]
    pub fn layers(&self) -> &[ChartLayer] {
        &self.layers
    }

    #[must_use]
    pub fn layers_mut(&mut self) -> &mut [ChartLayer] {
        &mut self.layers
    }

    /// Range snapshot frozen by the most recent measure pass.
    #[must_use]
    pub fn ranges(&self) -> &ChartRanges {
        &self.snapshot
    }

    fn check_model_count(&self, count: usize) -> ChartResult<()> {
        if count != self.layers.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} layer models, got {count}",
                self.layers.len()
            )));
        }
        Ok(())
    }

    /// Measure pass: resets both accumulators, folds every layer's range and
    /// dimension contributions plus the axes' padding reservations, and
    /// freezes the range snapshot.
    pub fn measure(
        &mut self,
        models: &[LayerModel],
        text: &dyn TextMeasurer,
    ) -> ChartResult<&ChartRanges> {
        self.check_model_count(models.len())?;

        self.ranges.reset();
        for (index, (layer, model)) in self.layers.iter().zip(models).enumerate() {
            layer.update_ranges(index, &mut self.ranges, model)?;
        }
        self.snapshot = self.ranges.to_immutable();

        self.dims.clear();
        for (index, (layer, model)) in self.layers.iter().zip(models).enumerate() {
            layer.update_horizontal_dimensions(index, &mut self.dims, model)?;
        }
        for axis in &self.axes {
            let ctx = MeasureContext {
                ranges: &self.snapshot,
                dims: self.dims.scaled(1.0),
                text,
                zoom_enabled: self.zoom_enabled,
            };
            axis.update_horizontal_dimensions(&ctx, &mut self.dims);
        }

        debug!(
            min_x = self.snapshot.min_x,
            max_x = self.snapshot.max_x,
            x_step = self.snapshot.x_step,
            "measure pass complete"
        );
        Ok(&self.snapshot)
    }

    /// Stages a transition toward `models` on every layer. `None` at an index
    /// fades that layer out. Requires a preceding [`Self::measure`] with the
    /// new data so the snapshot normalization matches.
    pub fn prepare_transition(&mut self, models: &[Option<LayerModel>]) -> ChartResult<()> {
        self.check_model_count(models.len())?;
        let snapshot = self.snapshot.clone();
        for (index, (layer, model)) in self.layers.iter_mut().zip(models).enumerate() {
            layer.prepare_transition(index, model.as_ref(), &snapshot)?;
        }
        Ok(())
    }

    /// Advances every layer's staged transition to `fraction`.
    pub fn transform(&mut self, fraction: f64) {
        for layer in &mut self.layers {
            layer.transform(fraction);
        }
    }

    /// Cancels every in-flight transition at a frame boundary.
    pub fn cancel_transitions(&mut self, jump_to_end: bool) {
        for layer in &mut self.layers {
            layer.cancel_transition(jump_to_end);
        }
    }

    /// Draw pass: measures, computes the layer and axis bounds within
    /// `canvas_bounds`, draws layers in declared order then axes, and returns
    /// the validated frame.
    pub fn draw(
        &mut self,
        canvas_bounds: Bounds,
        models: &[LayerModel],
        pan_zoom: PanZoom,
        text: &dyn TextMeasurer,
    ) -> ChartResult<RenderFrame> {
        canvas_bounds.validate()?;
        self.measure(models, text)?;

        let ranges = self.snapshot.clone();
        let dims = self.dims.scaled(pan_zoom.zoom);

        let measure_ctx = MeasureContext {
            ranges: &ranges,
            dims,
            text,
            zoom_enabled: self.zoom_enabled,
        };
        let mut top_height = 0.0f64;
        let mut bottom_height = 0.0f64;
        let mut start_inset = 0.0f64;
        let mut end_inset = 0.0f64;
        for axis in &self.axes {
            match axis.position() {
                AxisPosition::Top => top_height += axis.height(&measure_ctx),
                AxisPosition::Bottom => bottom_height += axis.height(&measure_ctx),
            }
            start_inset = start_inset.max(axis.start_inset(&measure_ctx));
            end_inset = end_inset.max(axis.end_inset(&measure_ctx));
        }
        let (left_inset, right_inset) = match self.direction {
            LayoutDirection::Ltr => (start_inset, end_inset),
            LayoutDirection::Rtl => (end_inset, start_inset),
        };
        let layer_bounds = Bounds::new(
            canvas_bounds.left + left_inset,
            canvas_bounds.top + top_height,
            canvas_bounds.right - right_inset,
            canvas_bounds.bottom - bottom_height,
        );
        layer_bounds.validate()?;

        let mut frame = RenderFrame::new(canvas_bounds);
        {
            let mut ctx = DrawContext {
                ranges: &ranges,
                dims,
                layer_bounds,
                direction: self.direction,
                pan_zoom,
                text,
                frame: &mut frame,
            };

            for (index, (layer, model)) in self.layers.iter_mut().zip(models).enumerate() {
                layer.draw(index, &mut ctx, model)?;
            }

            let mut top_offset = canvas_bounds.top;
            let mut bottom_offset = canvas_bounds.bottom;
            for axis in &self.axes {
                let height = axis.height(&measure_ctx);
                let bounds = match axis.position() {
                    AxisPosition::Top => {
                        let bounds = Bounds::new(
                            layer_bounds.left,
                            top_offset,
                            layer_bounds.right,
                            top_offset + height,
                        );
                        top_offset += height;
                        bounds
                    }
                    AxisPosition::Bottom => {
                        let bounds = Bounds::new(
                            layer_bounds.left,
                            bottom_offset - height,
                            layer_bounds.right,
                            bottom_offset,
                        );
                        bottom_offset -= height;
                        bounds
                    }
                };
                axis.draw(&mut ctx, bounds)?;
            }
        }

        frame.validate()?;
        debug!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "draw pass complete"
        );
        Ok(frame)
    }
}
