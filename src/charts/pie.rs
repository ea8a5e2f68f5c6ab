use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use super::hover::{HoverDebouncer, DEFAULT_HOVER_DELAY};
use super::layout::{ContainerOrigin, ContainerWidth};
use super::tooltip::Tooltip;
use super::{Cursor, PointerButton, PointerEvent};
use crate::core::traits::ChartEventHandler;
use crate::core::types::ChartSegment;
use crate::geometry::{pie_geometry, PieGeometry, PieLayout, PieSlice};

/// Visual state of one pie segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    Idle,
    Hovered,
    Active,
    HoveredActive,
}

impl SegmentState {
    fn from_flags(hovered: bool, active: bool) -> Self {
        match (hovered, active) {
            (false, false) => SegmentState::Idle,
            (true, false) => SegmentState::Hovered,
            (false, true) => SegmentState::Active,
            (true, true) => SegmentState::HoveredActive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SegmentState::Active | SegmentState::HoveredActive)
    }
}

/// What the renderer draws for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentVisual {
    pub segment: ChartSegment,
    pub slice: PieSlice,
    pub state: SegmentState,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieOptions {
    /// Largest diameter; the pie shrinks to fit narrower containers
    pub size: f64,
    pub stroke_width: f64,
    pub dim_opacity: f64,
    pub hover_delay: Duration,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            size: 240.0,
            stroke_width: 0.0,
            dim_opacity: 0.35,
            hover_delay: DEFAULT_HOVER_DELAY,
        }
    }
}

/// Pie (or doughnut) chart with hover, tooltip and click dispatch
#[derive(Debug, Clone)]
pub struct PieChartView {
    segments: Vec<ChartSegment>,
    options: PieOptions,
    layout: PieLayout,
    geometry: PieGeometry,
    container: ContainerWidth,
    origin: ContainerOrigin,
    active_label: Option<String>,
    hovered: Option<usize>,
    tooltip: Tooltip,
    debouncer: HoverDebouncer,
}

impl PieChartView {
    pub fn new(segments: Vec<ChartSegment>, options: PieOptions) -> Self {
        let layout = PieLayout::centered(options.size, options.stroke_width);
        let mut view = Self {
            segments,
            options,
            layout,
            geometry: PieGeometry::Empty,
            container: ContainerWidth::new(),
            origin: ContainerOrigin::default(),
            active_label: None,
            hovered: None,
            tooltip: Tooltip::default(),
            debouncer: HoverDebouncer::new(options.hover_delay),
        };
        view.recompute();
        view
    }

    /// Replace the displayed segments, e.g. after a filter change
    pub fn set_segments(&mut self, segments: Vec<ChartSegment>) {
        self.segments = segments;
        self.hovered = None;
        self.tooltip.hide();
        self.recompute();
    }

    /// Label of the segment the controller considers selected
    pub fn set_active_label(&mut self, label: Option<String>) {
        self.active_label = label;
    }

    pub fn set_origin(&mut self, origin: ContainerOrigin) {
        self.origin = origin;
    }

    /// Feed a container width measurement; geometry is rebuilt only on change
    pub fn resize(&mut self, width: f64) -> bool {
        if !self.container.observe(width) {
            return false;
        }
        let size = self.container.width().min(self.options.size);
        self.layout = PieLayout::centered(size, self.options.stroke_width);
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let values: Vec<f64> = self.segments.iter().map(|s| s.value as f64).collect();
        self.geometry = pie_geometry(&values, &self.layout);
        debug!(
            "Pie recomputed: {} segments, {} slices",
            self.segments.len(),
            self.geometry.slices().len()
        );
    }

    pub fn segments(&self) -> &[ChartSegment] {
        &self.segments
    }

    pub fn geometry(&self) -> &PieGeometry {
        &self.geometry
    }

    pub fn layout(&self) -> &PieLayout {
        &self.layout
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Sum of the displayed segments
    pub fn total(&self) -> u64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Empty charts show a placeholder and ignore pointer input
    pub fn is_interactive(&self) -> bool {
        self.total() > 0
    }

    pub fn cursor(&self) -> Cursor {
        if self.is_interactive() && self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    pub fn segment_state(&self, index: usize) -> SegmentState {
        let hovered = self.hovered == Some(index);
        let active = match (&self.active_label, self.segments.get(index)) {
            (Some(label), Some(segment)) => segment.label == *label,
            _ => false,
        };
        SegmentState::from_flags(hovered, active)
    }

    /// Per-slice render state. Hovering a segment that is not active dims
    /// its siblings.
    pub fn visuals(&self) -> Vec<SegmentVisual> {
        let dims_siblings = self
            .hovered
            .is_some_and(|index| !self.segment_state(index).is_active());

        self.geometry
            .slices()
            .iter()
            .filter_map(|slice| {
                let segment = self.segments.get(slice.index)?;
                let state = self.segment_state(slice.index);
                let opacity = if dims_siblings && self.hovered != Some(slice.index) {
                    self.options.dim_opacity
                } else {
                    1.0
                };
                Some(SegmentVisual {
                    segment: segment.clone(),
                    slice: slice.clone(),
                    state,
                    opacity,
                })
            })
            .collect()
    }

    /// Segment under a container-relative point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        let dx = x - self.layout.cx;
        let dy = y - self.layout.cy;
        let distance = dx.hypot(dy);
        if distance > self.layout.radius {
            return None;
        }
        if let Some(hole) = self.layout.hole() {
            if distance < hole.r {
                return None;
            }
        }

        let mut angle = dy.atan2(dx).to_degrees();
        if angle < -90.0 {
            angle += 360.0;
        }
        self.geometry
            .slices()
            .iter()
            .find(|s| angle >= s.start_angle && angle < s.end_angle)
            .map(|s| s.index)
    }

    pub fn pointer_enter<H: ChartEventHandler + ?Sized>(
        &mut self,
        index: usize,
        event: &PointerEvent,
        now: Instant,
        handler: &mut H,
    ) {
        if !self.is_interactive() || self.hovered == Some(index) {
            return;
        }
        let Some(segment) = self.segments.get(index) else {
            return;
        };
        let label = segment.label.clone();
        let value = segment.value as f64;
        let total = self.total() as f64;

        self.hovered = Some(index);
        self.tooltip.show(label.clone(), value, total, event, self.origin);
        handler.on_hover(Some(&label));
        self.debouncer.hover(Some(label), now);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        self.tooltip.follow(event, self.origin);
    }

    pub fn pointer_leave<H: ChartEventHandler + ?Sized>(&mut self, now: Instant, handler: &mut H) {
        self.tooltip.hide();
        if self.hovered.take().is_some() {
            handler.on_hover(None);
            self.debouncer.hover(None, now);
        }
    }

    /// Route a movement inside the container to enter/leave transitions
    pub fn handle_move<H: ChartEventHandler + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        handler: &mut H,
    ) {
        let (x, y) = event.relative_to(self.origin);
        match self.hit_test(x, y) {
            Some(index) if self.hovered == Some(index) => self.pointer_move(event),
            Some(index) => {
                self.pointer_leave(now, handler);
                self.pointer_enter(index, event, now, handler);
            }
            None => self.pointer_leave(now, handler),
        }
    }

    /// Button press over `index` (or empty chart area when `None`)
    pub fn pointer_down<H: ChartEventHandler + ?Sized>(
        &mut self,
        index: Option<usize>,
        event: &PointerEvent,
        handler: &mut H,
    ) {
        if !self.is_interactive() {
            return;
        }
        let segment = index.and_then(|i| self.segments.get(i));
        match (event.button, segment) {
            (PointerButton::Left, Some(segment)) => handler.on_segment_click(segment),
            (PointerButton::Middle, Some(segment)) => handler.on_segment_middle_click(segment, event),
            (PointerButton::Right, _) => handler.on_chart_area_right_click(event),
            _ => {}
        }
    }

    /// Hit-test a button press and dispatch it
    pub fn handle_click<H: ChartEventHandler + ?Sized>(&mut self, event: &PointerEvent, handler: &mut H) {
        let (x, y) = event.relative_to(self.origin);
        let index = self.hit_test(x, y);
        self.pointer_down(index, event, handler);
    }

    /// Deliver the debounced hover once it has settled
    pub fn poll_hover<H: ChartEventHandler + ?Sized>(&mut self, now: Instant, handler: &mut H) {
        if let Some(label) = self.debouncer.poll(now) {
            handler.on_hover_settled(label.as_deref());
        }
    }

    /// Teardown: pending hover effects never fire
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.tooltip.hide();
        self.hovered = None;
    }
}
