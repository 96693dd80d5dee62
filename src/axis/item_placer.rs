use crate::core::ChartRanges;

/// Selects the x values a horizontal axis labels, ticks, and guides.
///
/// Label and line selection are pure functions of the range snapshot and the
/// visible window, so axes and layers computed from the same snapshot agree
/// pixel-exactly.
pub trait ItemPlacer {
    /// Whether lines whose x values are bounds of the full x range are
    /// shifted outward by half the tick thickness, flush against the axis
    /// line instead of centered on the data point.
    fn shift_extreme_lines(&self) -> bool;

    /// X value of the first label the axis should reserve start padding for,
    /// if any.
    fn first_label_value(&self, _ranges: &ChartRanges) -> Option<f64> {
        None
    }

    /// X value of the last label the axis should reserve end padding for, if
    /// any.
    fn last_label_value(&self, _ranges: &ChartRanges) -> Option<f64> {
        None
    }

    /// X values receiving labels, restricted to `visible` with slack on each
    /// side so partially visible labels are predrawn during scroll.
    fn label_values(&self, ranges: &ChartRanges, visible: (f64, f64)) -> Vec<f64>;

    /// X values receiving ticks and guidelines; `None` means the label values
    /// are reused.
    fn line_values(&self, _ranges: &ChartRanges, _visible: (f64, f64)) -> Option<Vec<f64>> {
        None
    }

    /// X values whose labels are measured for width during the measure phase.
    fn width_measurement_label_values(&self, ranges: &ChartRanges) -> Vec<f64>;

    /// X values whose labels are measured for height during the measure phase.
    fn height_measurement_label_values(&self, ranges: &ChartRanges) -> Vec<f64> {
        vec![
            ranges.min_x,
            (ranges.min_x + ranges.max_x) / 2.0,
            ranges.max_x,
        ]
    }

    /// Horizontal margin the axis needs past the start of the plotted area.
    fn start_axis_inset(&self, tick_thickness: f64, max_label_width: f64) -> f64;

    /// Horizontal margin the axis needs past the end of the plotted area.
    fn end_axis_inset(&self, tick_thickness: f64, max_label_width: f64) -> f64;
}

/// Places items at `min_x + (k * spacing + offset) * x_step` for integer
/// k >= 0, with labels, ticks, and guidelines sharing the value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedItemPlacer {
    spacing: usize,
    offset: usize,
    shift_extreme_lines: bool,
    /// Whether the chart reserves layer padding for the first and last
    /// labels so they stay fully visible.
    add_extreme_label_padding: bool,
}

impl Default for AlignedItemPlacer {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl AlignedItemPlacer {
    #[must_use]
    pub fn new(spacing: usize, offset: usize) -> Self {
        Self {
            spacing: spacing.max(1),
            offset,
            shift_extreme_lines: true,
            add_extreme_label_padding: true,
        }
    }

    #[must_use]
    pub fn with_shift_extreme_lines(mut self, shift: bool) -> Self {
        self.shift_extreme_lines = shift;
        self
    }

    #[must_use]
    pub fn with_extreme_label_padding(mut self, add: bool) -> Self {
        self.add_extreme_label_padding = add;
        self
    }

    fn first_value(&self, ranges: &ChartRanges) -> f64 {
        ranges.min_x + self.offset as f64 * ranges.x_step
    }

    fn value_step(&self, ranges: &ChartRanges) -> f64 {
        ranges.x_step * self.spacing as f64
    }

    /// Index of the last placed value not exceeding `max_x`, or `None` when
    /// even the first placed value lies past the data range.
    fn last_index(&self, ranges: &ChartRanges) -> Option<i64> {
        let first = self.first_value(ranges);
        if first > ranges.max_x || ranges.x_step <= 0.0 {
            return None;
        }
        Some(((ranges.max_x - first) / self.value_step(ranges)).floor() as i64)
    }
}

impl ItemPlacer for AlignedItemPlacer {
    fn shift_extreme_lines(&self) -> bool {
        self.shift_extreme_lines
    }

    fn first_label_value(&self, ranges: &ChartRanges) -> Option<f64> {
        if !self.add_extreme_label_padding {
            return None;
        }
        self.last_index(ranges).map(|_| self.first_value(ranges))
    }

    fn last_label_value(&self, ranges: &ChartRanges) -> Option<f64> {
        let last = self.last_index(ranges)?;
        if !self.add_extreme_label_padding {
            return None;
        }
        Some(self.first_value(ranges) + last as f64 * self.value_step(ranges))
    }

    fn label_values(&self, ranges: &ChartRanges, visible: (f64, f64)) -> Vec<f64> {
        let Some(max_index) = self.last_index(ranges) else {
            return Vec::new();
        };
        if visible.1 < visible.0 {
            return Vec::new();
        }
        let first = self.first_value(ranges);
        let step = self.value_step(ranges);
        // One extra value on each side prevents label pop-in during scroll.
        let start = (((visible.0 - first) / step).ceil() as i64 - 1).max(0);
        // Scrolled entirely past the data range: nothing to place.
        if start > max_index {
            return Vec::new();
        }
        let end = (((visible.1 - first) / step).floor() as i64 + 1).clamp(start, max_index);
        (start..=end)
            .map(|index| first + index as f64 * step)
            .collect()
    }

    fn width_measurement_label_values(&self, ranges: &ChartRanges) -> Vec<f64> {
        // Width measurement exists to size the extreme-label padding; without
        // that padding no width demand is made.
        if !self.add_extreme_label_padding {
            return Vec::new();
        }
        let Some(max_index) = self.last_index(ranges) else {
            return Vec::new();
        };
        let first = self.first_value(ranges);
        let step = self.value_step(ranges);
        (0..=max_index)
            .map(|index| first + index as f64 * step)
            .collect()
    }

    fn start_axis_inset(&self, tick_thickness: f64, max_label_width: f64) -> f64 {
        let tick_space = if self.shift_extreme_lines {
            tick_thickness
        } else {
            tick_thickness / 2.0
        };
        if self.add_extreme_label_padding {
            tick_space.max(max_label_width / 2.0)
        } else {
            tick_space
        }
    }

    fn end_axis_inset(&self, tick_thickness: f64, max_label_width: f64) -> f64 {
        self.start_axis_inset(tick_thickness, max_label_width)
    }
}

/// Labels every major x value (`min_x + k * x_step`) and places ticks between
/// consecutive majors plus one half-step beyond each end, partitioning the
/// axis into per-entry segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentedItemPlacer {
    shift_extreme_lines: bool,
}

impl Default for SegmentedItemPlacer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SegmentedItemPlacer {
    #[must_use]
    pub fn new(shift_extreme_lines: bool) -> Self {
        Self {
            shift_extreme_lines,
        }
    }

    fn major_count(ranges: &ChartRanges) -> Option<i64> {
        if ranges.x_step <= 0.0 || ranges.max_x < ranges.min_x {
            return None;
        }
        Some(((ranges.max_x - ranges.min_x) / ranges.x_step).floor() as i64)
    }
}

impl ItemPlacer for SegmentedItemPlacer {
    fn shift_extreme_lines(&self) -> bool {
        self.shift_extreme_lines
    }

    fn label_values(&self, ranges: &ChartRanges, visible: (f64, f64)) -> Vec<f64> {
        let Some(max_index) = Self::major_count(ranges) else {
            return Vec::new();
        };
        if visible.1 < visible.0 {
            return Vec::new();
        }
        let slack = ranges.x_step / 2.0;
        let start = (((visible.0 - slack - ranges.min_x) / ranges.x_step).ceil() as i64).max(0);
        if start > max_index {
            return Vec::new();
        }
        let end = (((visible.1 + slack - ranges.min_x) / ranges.x_step).floor() as i64)
            .clamp(start, max_index);
        (start..=end)
            .map(|index| ranges.min_x + index as f64 * ranges.x_step)
            .collect()
    }

    fn line_values(&self, ranges: &ChartRanges, visible: (f64, f64)) -> Option<Vec<f64>> {
        let max_index = Self::major_count(ranges)?;
        if visible.1 < visible.0 {
            return Some(Vec::new());
        }
        let first = ranges.min_x - ranges.x_step / 2.0;
        let slack = ranges.x_step / 2.0;
        let start = (((visible.0 - slack - first) / ranges.x_step).ceil() as i64).max(0);
        if start > max_index + 1 {
            return Some(Vec::new());
        }
        let end = (((visible.1 + slack - first) / ranges.x_step).floor() as i64)
            .clamp(start, max_index + 1);
        Some(
            (start..=end)
                .map(|index| first + index as f64 * ranges.x_step)
                .collect(),
        )
    }

    fn width_measurement_label_values(&self, ranges: &ChartRanges) -> Vec<f64> {
        let Some(max_index) = Self::major_count(ranges) else {
            return Vec::new();
        };
        (0..=max_index)
            .map(|index| ranges.min_x + index as f64 * ranges.x_step)
            .collect()
    }

    fn start_axis_inset(&self, tick_thickness: f64, _max_label_width: f64) -> f64 {
        if self.shift_extreme_lines {
            tick_thickness
        } else {
            tick_thickness / 2.0
        }
    }

    fn end_axis_inset(&self, tick_thickness: f64, max_label_width: f64) -> f64 {
        self.start_axis_inset(tick_thickness, max_label_width)
    }
}
