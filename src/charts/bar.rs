use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use super::hover::{HoverDebouncer, DEFAULT_HOVER_DELAY};
use super::layout::{ContainerOrigin, ContainerWidth, Margin};
use super::tooltip::Tooltip;
use super::{Cursor, PointerButton, PointerEvent};
use crate::core::traits::ChartEventHandler;
use crate::core::types::{BarDataPoint, BarSeriesConfig};
use crate::geometry::{bar_geometry, BarGeometry, BarLayout, BarMode, HitArea};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarOptions {
    /// Total chart height; fixed regardless of container width
    pub height: f64,
    pub mode: BarMode,
    pub bar_gap: f64,
    pub margin: Margin,
    pub hover_delay: Duration,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            height: 300.0,
            mode: BarMode::Grouped,
            bar_gap: 2.0,
            margin: Margin::default(),
            hover_delay: DEFAULT_HOVER_DELAY,
        }
    }
}

/// A hovered or clicked bar target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarTarget {
    pub group: usize,
    /// Set in grouped mode
    pub series: Option<usize>,
}

/// Grouped or stacked bar chart with hit-area based interaction
#[derive(Debug, Clone)]
pub struct BarChartView {
    data: Vec<BarDataPoint>,
    series: Vec<BarSeriesConfig>,
    options: BarOptions,
    geometry: BarGeometry,
    container: ContainerWidth,
    origin: ContainerOrigin,
    hovered: Option<BarTarget>,
    tooltip: Tooltip,
    debouncer: HoverDebouncer,
}

impl BarChartView {
    pub fn new(data: Vec<BarDataPoint>, series: Vec<BarSeriesConfig>, options: BarOptions) -> Self {
        let mut view = Self {
            data,
            series,
            options,
            geometry: bar_geometry(&[], &[], &BarLayout::new(0.0, 0.0, options.mode)),
            container: ContainerWidth::new(),
            origin: ContainerOrigin::default(),
            hovered: None,
            tooltip: Tooltip::default(),
            debouncer: HoverDebouncer::new(options.hover_delay),
        };
        view.recompute();
        view
    }

    pub fn set_data(&mut self, data: Vec<BarDataPoint>, series: Vec<BarSeriesConfig>) {
        self.data = data;
        self.series = series;
        self.hovered = None;
        self.tooltip.hide();
        self.recompute();
    }

    pub fn set_mode(&mut self, mode: BarMode) {
        if self.options.mode != mode {
            self.options.mode = mode;
            self.hovered = None;
            self.recompute();
        }
    }

    pub fn set_origin(&mut self, origin: ContainerOrigin) {
        self.origin = origin;
    }

    /// Feed a container width measurement; geometry is rebuilt only on change
    pub fn resize(&mut self, width: f64) -> bool {
        if !self.container.observe(width) {
            return false;
        }
        self.recompute();
        true
    }

    /// Plot area size inside the margins
    pub fn plot_size(&self) -> (f64, f64) {
        let margin = &self.options.margin;
        (
            (self.container.width() - margin.horizontal()).max(0.0),
            (self.options.height - margin.vertical()).max(0.0),
        )
    }

    fn recompute(&mut self) {
        let (width, height) = self.plot_size();
        let layout = BarLayout {
            bar_gap: self.options.bar_gap,
            ..BarLayout::new(width, height, self.options.mode)
        };
        self.geometry = bar_geometry(&self.data, &self.series, &layout);
        debug!(
            "Bar chart recomputed at {}x{}: {} rects, axis max {}",
            width,
            height,
            self.geometry.rects.len(),
            self.geometry.axis_max
        );
    }

    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    pub fn data(&self) -> &[BarDataPoint] {
        &self.data
    }

    pub fn series(&self) -> &[BarSeriesConfig] {
        &self.series
    }

    pub fn options(&self) -> &BarOptions {
        &self.options
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<BarTarget> {
        self.hovered
    }

    /// Sum over every group and series
    pub fn total(&self) -> f64 {
        self.data.iter().map(|p| p.total(&self.series)).sum()
    }

    /// All-zero charts ignore pointer input, like an empty pie
    pub fn is_interactive(&self) -> bool {
        self.total() > 0.0
    }

    /// Hit area under a container-relative point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&HitArea> {
        let margin = &self.options.margin;
        let (px, py) = (x - margin.left, y - margin.top);
        self.geometry.hit_areas.iter().find(|area| area.contains(px, py))
    }

    fn target_at(&self, event: &PointerEvent) -> Option<(BarTarget, bool)> {
        let (x, y) = event.relative_to(self.origin);
        self.hit_test(x, y).map(|area| {
            (
                BarTarget {
                    group: area.group,
                    series: area.series,
                },
                area.clickable,
            )
        })
    }

    /// Pointer only over targets with a non-zero value
    pub fn cursor_at(&self, event: &PointerEvent) -> Cursor {
        match self.target_at(event) {
            Some((_, true)) => Cursor::Pointer,
            _ => Cursor::Default,
        }
    }

    fn target_value(&self, target: BarTarget) -> f64 {
        let Some(point) = self.data.get(target.group) else {
            return 0.0;
        };
        match target.series.and_then(|i| self.series.get(i)) {
            Some(series) => point.value(&series.data_key),
            None => point.total(&self.series),
        }
    }

    fn target_label(&self, target: BarTarget) -> String {
        let group = self
            .data
            .get(target.group)
            .map(|p| p.label.as_str())
            .unwrap_or_default();
        match target.series.and_then(|i| self.series.get(i)) {
            Some(series) => format!("{group} / {}", series.label),
            None => group.to_string(),
        }
    }

    pub fn handle_move<H: ChartEventHandler + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        handler: &mut H,
    ) {
        let target = if self.is_interactive() {
            self.target_at(event).map(|(target, _)| target)
        } else {
            None
        };
        if target == self.hovered {
            self.tooltip.follow(event, self.origin);
            return;
        }

        self.hovered = target;
        match target {
            Some(target) => {
                let label = self.target_label(target);
                let value = self.target_value(target);
                let total = self.total();
                self.tooltip.show(label.clone(), value, total, event, self.origin);
                handler.on_hover(Some(&label));
                self.debouncer.hover(Some(label), now);
            }
            None => {
                self.tooltip.hide();
                handler.on_hover(None);
                self.debouncer.hover(None, now);
            }
        }
    }

    pub fn pointer_leave<H: ChartEventHandler + ?Sized>(&mut self, now: Instant, handler: &mut H) {
        self.tooltip.hide();
        if self.hovered.take().is_some() {
            handler.on_hover(None);
            self.debouncer.hover(None, now);
        }
    }

    /// Left click selects, middle click opens, right click is the chart's
    /// context action. Zero-value targets swallow left and middle clicks and
    /// an all-zero chart swallows every click.
    pub fn handle_click<H: ChartEventHandler + ?Sized>(&mut self, event: &PointerEvent, handler: &mut H) {
        if !self.is_interactive() {
            return;
        }
        if event.button == PointerButton::Right {
            handler.on_chart_area_right_click(event);
            return;
        }

        let Some((target, true)) = self.target_at(event) else {
            return;
        };
        let Some(point) = self.data.get(target.group) else {
            return;
        };
        let series_key = target
            .series
            .and_then(|i| self.series.get(i))
            .map(|s| s.data_key.as_str());

        match event.button {
            PointerButton::Left => handler.on_bar_click(point),
            PointerButton::Middle => handler.on_bar_middle_click(point, event, series_key),
            PointerButton::Right => {}
        }
    }

    pub fn poll_hover<H: ChartEventHandler + ?Sized>(&mut self, now: Instant, handler: &mut H) {
        if let Some(label) = self.debouncer.poll(now) {
            handler.on_hover_settled(label.as_deref());
        }
    }

    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.tooltip.hide();
        self.hovered = None;
    }
}
