use feedback_analytics::aggregation::{resolve_case, ResolutionOutcome, UNCATEGORIZED_ID};
use feedback_analytics::{
    AggregationEngine, CaseFeed, CaseStatus, CaseType, Dimension, ResolutionBucket,
};
use pretty_assertions::assert_eq;

use super::common::{dashboard_scenario, scenario_feed_json, CaseBuilder};

fn ids_and_values(segments: &[feedback_analytics::ChartSegment]) -> Vec<(String, u64)> {
    segments
        .iter()
        .map(|s| (s.id.clone().unwrap_or_default(), s.value))
        .collect()
}

#[test]
fn scenario_breakdowns_match_counts() {
    let records = dashboard_scenario();
    let engine = AggregationEngine::default();

    let status = engine.breakdown_records(&records, Dimension::Status);
    assert_eq!(
        ids_and_values(&status.pie_segments()),
        vec![("OPEN".to_string(), 6), ("CLOSED".to_string(), 4)]
    );
    assert_eq!(status.total, 10);

    let types = engine.breakdown_records(&records, Dimension::Type);
    assert_eq!(
        ids_and_values(&types.pie_segments()),
        vec![("PROBLEM".to_string(), 6), ("SUGGESTION".to_string(), 4)]
    );

    let resolution = engine.breakdown_records(&records, Dimension::Resolution);
    assert_eq!(
        ids_and_values(&resolution.pie_segments()),
        vec![("UNDER_5_DAYS".to_string(), 4)]
    );
}

#[test]
fn fixed_dimensions_keep_zero_categories_in_definition_order() {
    let records = dashboard_scenario();
    let engine = AggregationEngine::default();

    let status = engine.breakdown_records(&records, Dimension::Status);
    let ids: Vec<_> = status.segments.iter().filter_map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec!["OPEN", "IN_PROGRESS", "AWAITING_FINANCE", "CLOSED"]);
    assert_eq!(status.value_of("IN_PROGRESS"), 0);
    assert_eq!(status.label_of("CLOSED"), Some("Затворен"));
}

#[test]
fn scenario_resolution_statistics() {
    let records = dashboard_scenario();
    let engine = AggregationEngine::default();
    let analyzed = engine.analyze(&records);
    let all: Vec<_> = analyzed.iter().collect();

    let stats = engine.resolution_stats(&all);
    assert_eq!(stats.resolved, 4);
    assert_eq!(stats.unresolved, 6);
    assert_eq!(stats.count(ResolutionBucket::Under5Days), 4);
    assert!((stats.average_days - 2.0).abs() < 1e-9);
}

#[test]
fn raw_feed_normalizes_to_the_same_breakdowns() {
    let records = CaseFeed::from_json(&scenario_feed_json()).unwrap().normalize();
    assert_eq!(records.len(), 10);

    let engine = AggregationEngine::default();
    let resolution = engine.breakdown_records(&records, Dimension::Resolution);
    assert_eq!(resolution.value_of("UNDER_5_DAYS"), 4);

    let creators = engine.breakdown_records(&records, Dimension::Creator);
    assert_eq!(creators.value_of("u1"), 6);
    assert_eq!(creators.label_of("u2"), Some("Мария Георгиева"));
}

#[test]
fn invalid_records_are_skipped_without_aborting_the_batch() {
    let json = r#"[
        {"_id": "ok", "date": "1709542800000", "type": "PROBLEM", "priority": "LOW", "status": "OPEN"},
        {"_id": "bad-status", "date": "2024-03-04", "type": "PROBLEM", "priority": "LOW", "status": "REOPENED"},
        {"_id": "no-type", "date": "2024-03-04", "priority": "LOW", "status": "OPEN"},
        {"_id": "bad-date", "date": "not a date", "type": "SUGGESTION", "priority": "HIGH", "status": "OPEN"}
    ]"#;
    let records = CaseFeed::from_json(json).unwrap().normalize();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "bad-date"]);
    assert!(records[0].created_at.is_some());
    assert!(records[1].created_at.is_none());
}

#[test]
fn undated_cases_still_count_in_categorical_charts() {
    let records = vec![
        CaseBuilder::new("a").created(None).build(),
        CaseBuilder::new("b").build(),
    ];
    let engine = AggregationEngine::default();

    assert_eq!(engine.breakdown_records(&records, Dimension::Status).value_of("OPEN"), 2);

    let analyzed = engine.analyze(&records);
    let all: Vec<_> = analyzed.iter().collect();
    let monthly = engine.period_series(&all, Dimension::Status);
    assert_eq!(monthly.skipped, 1);
    assert_eq!(monthly.data.len(), 1);
    assert_eq!(monthly.data[0].label, "2024-03");
    assert_eq!(monthly.data[0].value("OPEN"), 1.0);
}

#[test]
fn latest_approved_answer_decides_resolution_time() {
    let record = CaseBuilder::new("multi")
        .status(CaseStatus::AwaitingFinance)
        .approved_after_hours(12)
        .approved_after_hours(24 * 7)
        .pending_answer()
        .build();

    match resolve_case(&record) {
        ResolutionOutcome::Resolved { days, bucket } => {
            assert!((days - 7.0).abs() < 1e-9);
            assert_eq!(bucket, ResolutionBucket::Under10Days);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn answer_before_creation_is_excluded_from_statistics() {
    let record = CaseBuilder::new("anomaly")
        .status(CaseStatus::Closed)
        .approved_after_hours(-5)
        .build();
    assert!(matches!(
        resolve_case(&record),
        ResolutionOutcome::NegativeElapsed { .. }
    ));

    let engine = AggregationEngine::default();
    let records = vec![record];
    let analyzed = engine.analyze(&records);
    let all: Vec<_> = analyzed.iter().collect();
    let stats = engine.resolution_stats(&all);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.negative_elapsed, 1);
    assert_eq!(stats.unresolved, 1);
    assert_eq!(stats.average_days, 0.0);
}

#[test]
fn open_cases_with_approved_answers_are_not_resolved() {
    let record = CaseBuilder::new("open").approved_after_hours(2).build();
    assert_eq!(resolve_case(&record), ResolutionOutcome::NotApplicable);
}

#[test]
fn categories_fall_back_to_uncategorized() {
    let records = vec![
        CaseBuilder::new("a").category("c1", "Сграда").category("c1", "Сграда").build(),
        CaseBuilder::new("b").build(),
        CaseBuilder::new("c")
            .case_type(CaseType::Suggestion)
            .category("c1", "Сграда")
            .category("c2", "Транспорт")
            .build(),
    ];
    let engine = AggregationEngine::default();
    let categories = engine.breakdown_records(&records, Dimension::Category);

    assert_eq!(categories.value_of("c1"), 2);
    assert_eq!(categories.value_of("c2"), 1);
    assert_eq!(categories.value_of(UNCATEGORIZED_ID), 1);
    assert_eq!(categories.total, 3);
}

#[test]
fn summary_description_uses_palette_labels() {
    let records = dashboard_scenario();
    let engine = AggregationEngine::default();
    let analyzed = engine.analyze(&records);
    let all: Vec<_> = analyzed.iter().collect();

    let summary = feedback_analytics::CaseSummary::compute(&engine, &all);
    assert_eq!(summary.total, 10);
    assert_eq!(summary.status[&CaseStatus::Closed], 4);

    let text = summary.describe(engine.palette());
    assert!(text.contains("Общо сигнали: 10"));
    assert!(text.contains("Отворен: 6"));
    assert!(text.contains("Затворен: 4"));
}
