use feedback_analytics::render::svg::NO_DATA_TEXT;
use feedback_analytics::render::DashboardReport;
use feedback_analytics::{
    AnalyticsConfig, CaseStatus, CrossFilterController, DashboardExporter, FilterDimension,
    FilterValue, Palette,
};
use tempfile::TempDir;

use super::common::dashboard_scenario;

fn exporter() -> DashboardExporter {
    DashboardExporter::new(&AnalyticsConfig::default(), Palette::default())
}

#[test]
fn html_dashboard_contains_every_chart_and_the_filter_tags() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed))
        .unwrap();
    let snapshot = controller.snapshot(Some(&records));

    let html = exporter().to_html(&snapshot);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Показани 4 от 10 сигнала"));
    assert!(html.contains("Статус: Затворен"));
    assert_eq!(html.matches("<svg").count(), 6);
    assert!(html.contains("По месеци"));
    // The status chart marks the selected slice
    assert!(html.contains(r#"class="segment active""#));
    assert!(html.contains("Човешки ресурси: 4"));
}

#[test]
fn html_dashboard_marks_stale_filter_tags() {
    let records = dashboard_scenario();
    let mut controller = CrossFilterController::default();
    controller
        .set_filter(FilterDimension::Creator, FilterValue::Creator("gone".to_string()))
        .unwrap();
    let html = exporter().to_html(&controller.snapshot(Some(&records)));

    assert!(html.contains(r#"<span class="tag stale">Подател: gone (0)</span>"#));
    assert!(html.contains("Показани 0 от 10 сигнала"));
}

#[test]
fn html_dashboard_without_filters() {
    let records = dashboard_scenario();
    let snapshot = CrossFilterController::default().snapshot(Some(&records));
    let html = exporter().with_title("Отчет <Q1>").to_html(&snapshot);

    assert!(html.contains("Без филтри"));
    assert!(html.contains("<title>Отчет &lt;Q1&gt;</title>"));
}

#[test]
fn empty_dashboard_shows_no_data_placeholders() {
    let snapshot = CrossFilterController::default().snapshot(None);
    let html = exporter().to_html(&snapshot);

    assert!(html.contains("Показани 0 от 0 сигнала"));
    assert!(html.matches(NO_DATA_TEXT).count() >= 6);
}

#[test]
fn json_report_round_trips_the_snapshot() {
    let records = dashboard_scenario();
    let snapshot = CrossFilterController::default().snapshot(Some(&records));

    let json = exporter().to_json(&snapshot).unwrap();
    let report: DashboardReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report.title, "Гласът на служителите");
    assert_eq!(report.snapshot, snapshot);
}

#[tokio::test]
async fn write_reports_unwritable_paths() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("missing").join("dashboard.html");

    let err = DashboardExporter::write(&target, "<html/>").await.unwrap_err();
    assert!(err.to_string().contains("dashboard.html"));

    let ok = dir.path().join("dashboard.html");
    DashboardExporter::write(&ok, "<html/>").await.unwrap();
    assert_eq!(std::fs::read_to_string(ok).unwrap(), "<html/>");
}
