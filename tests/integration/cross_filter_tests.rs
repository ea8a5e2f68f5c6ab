use feedback_analytics::core::FilterError;
use feedback_analytics::{
    CasePriority, CaseStatus, CaseType, CrossFilterController, FilterDimension, FilterValue,
    ResolutionBucket, Selection,
};
use pretty_assertions::assert_eq;

use super::common::{dashboard_scenario, CaseBuilder};

fn values(controller: &CrossFilterController, dimension: FilterDimension) -> Vec<(String, u64)> {
    let records = dashboard_scenario();
    let snapshot = controller.snapshot(Some(&records));
    snapshot
        .panel(dimension)
        .unwrap()
        .breakdown
        .pie_segments()
        .into_iter()
        .map(|s| (s.id.unwrap_or_default(), s.value))
        .collect()
}

#[test]
fn status_filter_narrows_every_other_chart() {
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed))
        .unwrap();

    assert_eq!(
        values(&controller, FilterDimension::Type),
        vec![("SUGGESTION".to_string(), 4)]
    );
    // The chart owning the filter still shows every status
    assert_eq!(
        values(&controller, FilterDimension::Status),
        vec![("OPEN".to_string(), 6), ("CLOSED".to_string(), 4)]
    );
}

#[test]
fn snapshot_reports_filtered_totals_and_tags() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Type, FilterValue::Type(CaseType::Problem))
        .unwrap();
    let snapshot = controller.snapshot(Some(&records));

    assert_eq!(snapshot.total_count, 10);
    assert_eq!(snapshot.filtered_count, 6);
    assert!(snapshot.any_active);
    assert_eq!(snapshot.summary.total, 6);
    assert_eq!(snapshot.categories.value_of("c-it"), 6);
    assert_eq!(snapshot.categories.value_of("c-hr"), 0);

    let tags: Vec<_> = snapshot.tags.iter().map(|t| t.text()).collect();
    assert_eq!(tags, vec!["Тип: Проблем".to_string()]);

    let panel = snapshot.panel(FilterDimension::Type).unwrap();
    assert_eq!(panel.active_id.as_deref(), Some("PROBLEM"));
    assert_eq!(panel.active_label.as_deref(), Some("Проблем"));
}

#[test]
fn filters_on_different_dimensions_combine() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Open))
        .unwrap();
    controller
        .set_filter(FilterDimension::Priority, FilterValue::Priority(CasePriority::High))
        .unwrap();

    let snapshot = controller.snapshot(Some(&records));
    assert_eq!(snapshot.filtered_count, 3);

    // Priority chart ignores its own filter but honors the status filter
    let priority = &snapshot.panel(FilterDimension::Priority).unwrap().breakdown;
    assert_eq!(priority.value_of("HIGH"), 3);
    assert_eq!(priority.value_of("MEDIUM"), 3);
    assert_eq!(priority.value_of("LOW"), 0);
}

#[test]
fn selecting_the_active_value_again_resets_the_dimension() {
    let mut controller = CrossFilterController::default();
    let value = FilterValue::Resolution(ResolutionBucket::Under5Days);

    let first = controller
        .set_filter(FilterDimension::Resolution, value.clone())
        .unwrap();
    assert_eq!(first, Selection::Only(value.clone()));

    let second = controller
        .set_filter(FilterDimension::Resolution, value)
        .unwrap();
    assert_eq!(second, Selection::All);
    assert!(!controller.is_any_active());
    assert_eq!(controller.active_label(FilterDimension::Resolution), None);
}

#[test]
fn selecting_another_value_replaces_the_selection() {
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Open))
        .unwrap();
    let selection = controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed))
        .unwrap();

    assert_eq!(selection, Selection::Only(FilterValue::Status(CaseStatus::Closed)));
    assert_eq!(controller.active_label(FilterDimension::Status), Some("Затворен"));
}

#[test]
fn clear_all_restores_the_unfiltered_dashboard() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    let unfiltered = controller.snapshot(Some(&records));

    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed))
        .unwrap();
    controller
        .set_filter(FilterDimension::Creator, FilterValue::Creator("u2".to_string()))
        .unwrap();
    assert_eq!(controller.snapshot(Some(&records)).filtered_count, 4);

    controller.clear_all();
    let restored = controller.snapshot(Some(&records));
    assert_eq!(restored.filtered_count, 10);
    assert!(restored.tags.is_empty());
    assert_eq!(restored.panels, unfiltered.panels);
}

#[test]
fn clearing_one_dimension_keeps_the_others() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Open))
        .unwrap();
    controller
        .set_filter(FilterDimension::Priority, FilterValue::Priority(CasePriority::Medium))
        .unwrap();

    controller.clear(FilterDimension::Priority);
    assert_eq!(controller.selection(FilterDimension::Priority), Selection::All);
    assert_eq!(controller.snapshot(Some(&records)).filtered_count, 6);
}

#[test]
fn mismatched_value_is_rejected_without_state_change() {
    let mut controller = CrossFilterController::default();
    let err = controller
        .set_filter(FilterDimension::Status, FilterValue::Type(CaseType::Problem))
        .unwrap_err();

    assert!(matches!(err, FilterError::DimensionMismatch { .. }));
    assert!(!controller.is_any_active());
}

#[test]
fn stale_selection_yields_an_empty_filtered_set() {
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Creator, FilterValue::Creator("gone".to_string()))
        .unwrap();

    let records = dashboard_scenario();
    let snapshot = controller.snapshot(Some(&records));
    assert_eq!(snapshot.filtered_count, 0);
    // The creator chart itself is unaffected by its own stale selection
    assert_eq!(
        snapshot.panel(FilterDimension::Creator).unwrap().breakdown.total,
        10
    );
    assert_eq!(
        snapshot.panel(FilterDimension::Status).unwrap().breakdown.segment_sum(),
        0
    );
}

#[test]
fn missing_data_gives_all_zero_output() {
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Open))
        .unwrap();

    let snapshot = controller.snapshot(None);
    assert_eq!(snapshot.total_count, 0);
    assert_eq!(snapshot.filtered_count, 0);
    assert_eq!(snapshot.summary.total, 0);
    for panel in &snapshot.panels {
        assert_eq!(panel.breakdown.segment_sum(), 0);
        assert!(panel.breakdown.pie_segments().is_empty());
    }
    assert!(snapshot.monthly.data.is_empty());
}

#[test]
fn creator_filter_uses_creator_id() {
    let records = vec![
        CaseBuilder::new("a").creator("u7", "Петър").build(),
        CaseBuilder::new("b").creator("u8", "Петър").build(),
    ];
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Creator, FilterValue::Creator("u8".to_string()))
        .unwrap();

    let snapshot = controller.snapshot(Some(&records));
    assert_eq!(snapshot.filtered_count, 1);
    let panel = snapshot.panel(FilterDimension::Creator).unwrap();
    assert_eq!(panel.active_label.as_deref(), Some("Петър"));
}

#[test]
fn resolution_filter_narrows_the_other_charts() {
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(
            FilterDimension::Resolution,
            FilterValue::Resolution(ResolutionBucket::Under5Days),
        )
        .unwrap();

    assert_eq!(
        values(&controller, FilterDimension::Status),
        vec![("CLOSED".to_string(), 4)]
    );

    let records = dashboard_scenario();
    let snapshot = controller.snapshot(Some(&records));
    assert_eq!(snapshot.filtered_count, 4);
    assert_eq!(
        snapshot.panel(FilterDimension::Resolution).unwrap().breakdown.total,
        10
    );
}

#[test]
fn stale_selection_is_marked_on_its_tag() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Creator, FilterValue::Creator("gone".to_string()))
        .unwrap();

    let tags = controller.snapshot(Some(&records)).tags;
    assert_eq!(tags.len(), 1);
    assert!(tags[0].stale);
    assert_eq!(tags[0].text(), "Подател: gone (0)");

    controller.clear(FilterDimension::Creator);
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed))
        .unwrap();
    let tags = controller.snapshot(Some(&records)).tags;
    assert!(!tags[0].stale);
    assert_eq!(tags[0].text(), "Статус: Затворен");
}
