use std::time::{Duration, Instant};

use feedback_analytics::charts::{BarOptions, ContainerOrigin, PieOptions};
use feedback_analytics::core::{BarDataPoint, NoopHandler};
use feedback_analytics::{
    BarChartView, BarMode, ChartEventHandler, ChartSegment, CrossFilterController,
    FilterDimension, PieChartView, PointerButton, PointerEvent, Selection,
};
use pretty_assertions::assert_eq;

use super::common::dashboard_scenario;

#[derive(Default)]
struct Recorder {
    hovers: Vec<Option<String>>,
    settled: Vec<Option<String>>,
    bar_clicks: Vec<String>,
    middle_keys: Vec<Option<String>>,
    right_clicks: usize,
}

impl ChartEventHandler for Recorder {
    fn on_bar_click(&mut self, data_point: &BarDataPoint) {
        self.bar_clicks.push(data_point.label.clone());
    }

    fn on_bar_middle_click(
        &mut self,
        _data_point: &BarDataPoint,
        _event: &PointerEvent,
        series_key: Option<&str>,
    ) {
        self.middle_keys.push(series_key.map(str::to_string));
    }

    fn on_chart_area_right_click(&mut self, _event: &PointerEvent) {
        self.right_clicks += 1;
    }

    fn on_hover(&mut self, label: Option<&str>) {
        self.hovers.push(label.map(str::to_string));
    }

    fn on_hover_settled(&mut self, label: Option<&str>) {
        self.settled.push(label.map(str::to_string));
    }
}

fn status_pie(controller: &CrossFilterController) -> PieChartView {
    let records = dashboard_scenario();
    let snapshot = controller.snapshot(Some(&records));
    let panel = snapshot.panel(FilterDimension::Status).unwrap();
    let mut view = PieChartView::new(panel.breakdown.pie_segments(), PieOptions::default());
    view.set_active_label(panel.active_label.clone());
    view
}

// Default pie is 240px wide: centre (120, 120). OPEN covers the right-hand
// side from 12 o'clock, CLOSED the left-hand side.
const RIGHT_OF_CENTRE: (f64, f64) = (200.0, 120.0);
const LEFT_OF_CENTRE: (f64, f64) = (40.0, 120.0);

#[test]
fn clicking_a_pie_segment_drives_the_cross_filter() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    let mut view = status_pie(&controller);

    let click = PointerEvent::at(LEFT_OF_CENTRE.0, LEFT_OF_CENTRE.1);
    view.handle_click(&click, &mut controller.handler(FilterDimension::Status));

    assert_eq!(controller.active_label(FilterDimension::Status), Some("Затворен"));
    assert_eq!(controller.snapshot(Some(&records)).filtered_count, 4);

    // The redrawn chart marks the selected slice active
    let view = status_pie(&controller);
    let closed = view
        .segments()
        .iter()
        .position(|s| s.id.as_deref() == Some("CLOSED"))
        .unwrap();
    assert!(view.segment_state(closed).is_active());
}

#[test]
fn clicking_the_active_segment_again_clears_the_filter() {
    let mut controller = CrossFilterController::default();
    let mut view = status_pie(&controller);
    let click = PointerEvent::at(RIGHT_OF_CENTRE.0, RIGHT_OF_CENTRE.1);

    view.handle_click(&click, &mut controller.handler(FilterDimension::Status));
    assert!(controller.is_any_active());
    view.handle_click(&click, &mut controller.handler(FilterDimension::Status));
    assert_eq!(controller.selection(FilterDimension::Status), Selection::All);
}

#[test]
fn right_click_inside_a_chart_drills_out_of_its_dimension() {
    let mut controller = CrossFilterController::default();
    let mut view = status_pie(&controller);

    view.handle_click(
        &PointerEvent::at(RIGHT_OF_CENTRE.0, RIGHT_OF_CENTRE.1),
        &mut controller.handler(FilterDimension::Status),
    );
    assert!(controller.is_any_active());

    let right = PointerEvent::new(RIGHT_OF_CENTRE.0, RIGHT_OF_CENTRE.1, PointerButton::Right);
    view.handle_click(&right, &mut controller.handler(FilterDimension::Status));
    assert!(!controller.is_any_active());
}

#[test]
fn hover_shows_tooltip_and_settles_after_the_delay() {
    let controller = CrossFilterController::default();
    let mut view = status_pie(&controller);
    view.set_origin(ContainerOrigin::new(10.0, 20.0));
    let mut recorder = Recorder::default();
    let start = Instant::now();

    let over_open = PointerEvent::at(RIGHT_OF_CENTRE.0 + 10.0, RIGHT_OF_CENTRE.1 + 20.0);
    view.handle_move(&over_open, start, &mut recorder);

    let tooltip = view.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.text(), "Отворен: 6 (60.0%)");
    assert_eq!((tooltip.x, tooltip.y), RIGHT_OF_CENTRE);
    assert_eq!(recorder.hovers, vec![Some("Отворен".to_string())]);

    view.poll_hover(start + Duration::from_millis(50), &mut recorder);
    assert!(recorder.settled.is_empty());
    view.poll_hover(start + Duration::from_millis(250), &mut recorder);
    assert_eq!(recorder.settled, vec![Some("Отворен".to_string())]);

    // Hovering a non-active slice dims the others
    let visuals = view.visuals();
    assert!(visuals.iter().any(|v| v.opacity < 1.0));
}

#[test]
fn unmount_cancels_pending_hover() {
    let controller = CrossFilterController::default();
    let mut view = status_pie(&controller);
    let mut recorder = Recorder::default();
    let start = Instant::now();

    view.handle_move(
        &PointerEvent::at(LEFT_OF_CENTRE.0, LEFT_OF_CENTRE.1),
        start,
        &mut recorder,
    );
    view.unmount();
    view.poll_hover(start + Duration::from_secs(1), &mut recorder);

    assert!(recorder.settled.is_empty());
    assert!(!view.tooltip().visible);
}

#[test]
fn empty_pie_ignores_pointer_input() {
    let mut view = PieChartView::new(
        vec![ChartSegment::new("Отворен", 0, "#3b82f6")],
        PieOptions::default(),
    );
    let mut recorder = Recorder::default();

    view.handle_move(&PointerEvent::at(120.0, 60.0), Instant::now(), &mut recorder);
    view.handle_click(
        &PointerEvent::new(120.0, 60.0, PointerButton::Right),
        &mut recorder,
    );

    assert!(view.geometry().is_placeholder());
    assert!(recorder.hovers.is_empty());
    assert_eq!(recorder.right_clicks, 0);
}

#[test]
fn resize_shrinks_the_pie_to_the_container() {
    let controller = CrossFilterController::default();
    let mut view = status_pie(&controller);

    assert!(view.resize(180.0));
    assert_eq!(view.layout().radius, 90.0);
    assert!(!view.resize(180.0));

    assert!(view.resize(800.0));
    assert_eq!(view.layout().radius, 120.0);
}

fn monthly_view(mode: BarMode) -> BarChartView {
    let records = dashboard_scenario();
    let snapshot = CrossFilterController::default().snapshot(Some(&records));
    let options = BarOptions {
        mode,
        ..BarOptions::default()
    };
    let mut view = BarChartView::new(snapshot.monthly.data, snapshot.monthly.series, options);
    view.resize(600.0);
    view
}

/// Client coordinates at the centre of the first clickable hit area
fn first_clickable(view: &BarChartView, button: PointerButton) -> PointerEvent {
    let margin = view.options().margin;
    let area = view
        .geometry()
        .hit_areas
        .iter()
        .find(|a| a.clickable)
        .unwrap();
    PointerEvent::new(
        area.x + area.width / 2.0 + margin.left,
        area.y + area.height / 2.0 + margin.top,
        button,
    )
}

#[test]
fn stacked_bar_click_reports_the_whole_group() {
    let mut view = monthly_view(BarMode::Stacked);
    let mut recorder = Recorder::default();

    let click = first_clickable(&view, PointerButton::Left);
    view.handle_click(&click, &mut recorder);
    assert_eq!(recorder.bar_clicks, vec!["2024-03".to_string()]);

    let middle = first_clickable(&view, PointerButton::Middle);
    view.handle_click(&middle, &mut recorder);
    assert_eq!(recorder.middle_keys, vec![None]);
}

#[test]
fn grouped_bar_middle_click_carries_the_series_key() {
    let mut view = monthly_view(BarMode::Grouped);
    let mut recorder = Recorder::default();

    let middle = first_clickable(&view, PointerButton::Middle);
    view.handle_click(&middle, &mut recorder);
    assert_eq!(recorder.middle_keys, vec![Some("OPEN".to_string())]);
}

#[test]
fn bar_tooltip_reports_share_of_the_displayed_total() {
    let mut view = monthly_view(BarMode::Grouped);
    let mut recorder = Recorder::default();

    let over = first_clickable(&view, PointerButton::Left);
    view.handle_move(&over, Instant::now(), &mut recorder);

    let tooltip = view.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.label, "2024-03 / Отворен");
    assert_eq!(tooltip.percentage, 60.0);
}

#[test]
fn right_click_anywhere_on_a_filled_bar_chart_reaches_the_handler() {
    let mut view = monthly_view(BarMode::Stacked);
    let mut recorder = Recorder::default();

    view.handle_click(&PointerEvent::new(1.0, 1.0, PointerButton::Right), &mut recorder);
    assert_eq!(recorder.right_clicks, 1);
    assert!(recorder.bar_clicks.is_empty());
}

#[test]
fn empty_bar_chart_ignores_pointer_input_like_an_empty_pie() {
    let controller = CrossFilterController::default();
    let records = dashboard_scenario();
    let snapshot = controller.snapshot(Some(&records));
    let zeroed = snapshot
        .monthly
        .data
        .iter()
        .map(|point| BarDataPoint::new(point.label.clone()))
        .collect();
    let mut view = BarChartView::new(zeroed, snapshot.monthly.series, BarOptions::default());
    view.resize(600.0);
    let mut recorder = Recorder::default();

    view.handle_move(&PointerEvent::at(100.0, 100.0), Instant::now(), &mut recorder);
    view.handle_click(&PointerEvent::new(100.0, 100.0, PointerButton::Right), &mut recorder);

    assert!(!view.is_interactive());
    assert!(recorder.hovers.is_empty());
    assert_eq!(recorder.right_clicks, 0);
}

#[test]
fn views_accept_a_handler_that_ignores_everything() {
    let controller = CrossFilterController::default();
    let mut pie = status_pie(&controller);
    let mut bar = monthly_view(BarMode::Grouped);
    let now = Instant::now();

    pie.handle_move(&PointerEvent::at(LEFT_OF_CENTRE.0, LEFT_OF_CENTRE.1), now, &mut NoopHandler);
    pie.handle_click(&PointerEvent::at(LEFT_OF_CENTRE.0, LEFT_OF_CENTRE.1), &mut NoopHandler);
    assert!(pie.tooltip().visible);

    let over = first_clickable(&bar, PointerButton::Left);
    bar.handle_move(&over, now, &mut NoopHandler);
    bar.handle_click(&over, &mut NoopHandler);
    bar.pointer_leave(now, &mut NoopHandler);
    assert!(!bar.tooltip().visible);
    assert_eq!(bar.hovered(), None);
}
