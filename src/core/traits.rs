use crate::charts::PointerEvent;
use crate::core::types::{BarDataPoint, ChartSegment};

/// Callbacks a page-level controller receives from chart views.
///
/// Every method has a no-op default so callers only implement what they
/// react to. Views never decide navigation or filtering themselves; they hand
/// the originating segment or data point and the raw pointer event up here.
pub trait ChartEventHandler {
    /// Left click on a pie segment
    fn on_segment_click(&mut self, _segment: &ChartSegment) {}

    /// Left click on a bar group (stacked) or a single bar (grouped)
    fn on_bar_click(&mut self, _data_point: &BarDataPoint) {}

    /// Middle click on a pie segment
    fn on_segment_middle_click(&mut self, _segment: &ChartSegment, _event: &PointerEvent) {}

    /// Middle click on a bar; `series_key` is set in grouped mode
    fn on_bar_middle_click(
        &mut self,
        _data_point: &BarDataPoint,
        _event: &PointerEvent,
        _series_key: Option<&str>,
    ) {
    }

    /// Right click anywhere inside the chart area
    fn on_chart_area_right_click(&mut self, _event: &PointerEvent) {}

    /// Hover changed; `None` when the pointer left every segment
    fn on_hover(&mut self, _label: Option<&str>) {}

    /// Hover stayed on the same target for the debounce delay
    fn on_hover_settled(&mut self, _label: Option<&str>) {}
}

/// Handler that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl ChartEventHandler for NoopHandler {}
