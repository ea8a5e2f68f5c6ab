use std::path::PathBuf;

use clap::Parser;
use feedback_analytics::cli::args::{
    BarModeArg, ChartKind, DashboardArgs, FilterArgs, RenderArgs, SummaryArgs, SummaryFormat,
};
use feedback_analytics::cli::commands::utils::{build_controller, load_cases};
use feedback_analytics::cli::commands::{
    Command, ConfigCommand, DashboardCommand, RenderCommand, SummaryCommand,
};
use feedback_analytics::cli::{Cli, Commands};
use feedback_analytics::config::{ConfigAction, ConfigValidator};
use feedback_analytics::AnalyticsConfig;
use tempfile::TempDir;

use super::common::{dashboard_scenario, scenario_feed_json, write_file};

/// Temp dir holding a case feed and an initialized config file
async fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "cases.json", &scenario_feed_json());
    let config = dir.path().join("config").join("config.toml");
    ConfigCommand::new(
        ConfigAction::Init {
            path: Some(config.clone()),
            force: false,
        },
        None,
    )
    .execute()
    .await
    .unwrap();
    (dir, input, config)
}

fn closed_only() -> FilterArgs {
    FilterArgs {
        status: Some("closed".to_string()),
        ..FilterArgs::default()
    }
}

#[test]
fn cli_parses_filters_and_global_flags() {
    let cli = Cli::try_parse_from([
        "feedback-analytics",
        "render",
        "--input",
        "cases.json",
        "--chart",
        "monthly",
        "--mode",
        "stacked",
        "--type",
        "SUGGESTION",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.chart, ChartKind::Monthly);
            assert_eq!(args.mode, BarModeArg::Stacked);
            assert_eq!(args.filters.case_type.as_deref(), Some("SUGGESTION"));
        }
        _ => panic!("expected render command"),
    }
}

#[tokio::test]
async fn config_init_writes_a_valid_file_and_refuses_to_overwrite() {
    let (_dir, _input, config) = workspace().await;

    let content = tokio::fs::read_to_string(&config).await.unwrap();
    let report = ConfigValidator::new().validate_toml(&content, &config);
    assert!(!report.has_errors(), "{}", report.summary());

    let again = ConfigCommand::new(
        ConfigAction::Init {
            path: Some(config.clone()),
            force: false,
        },
        None,
    )
    .execute()
    .await;
    assert!(again.is_err());

    ConfigCommand::new(ConfigAction::Validate, Some(config))
        .execute()
        .await
        .unwrap();
}

#[tokio::test]
async fn config_validate_fails_for_a_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let result = ConfigCommand::new(ConfigAction::Validate, Some(dir.path().join("nope.toml")))
        .execute()
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn summary_json_reports_filtered_counts() {
    let (_dir, input, config_path) = workspace().await;
    let config = AnalyticsConfig::load_from(&config_path).await.unwrap();
    let records = load_cases(&input).await.unwrap();
    let controller = build_controller(&config, &closed_only()).unwrap();
    let snapshot = controller.snapshot(Some(&records));

    let command = SummaryCommand::new(
        SummaryArgs {
            input,
            format: SummaryFormat::Json,
            filters: closed_only(),
        },
        Some(config_path),
    );
    let output = command.format(&snapshot, controller.engine().palette()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total_count"], 10);
    assert_eq!(value["filtered_count"], 4);
    assert_eq!(value["filters"][0]["label"], "Затворен");
    assert_eq!(value["summary"]["resolution"]["resolved"], 4);
}

#[tokio::test]
async fn summary_markdown_lists_filters_and_categories() {
    let (_dir, input, config_path) = workspace().await;
    let config = AnalyticsConfig::load_from(&config_path).await.unwrap();
    let records = load_cases(&input).await.unwrap();
    let controller = build_controller(&config, &FilterArgs::default()).unwrap();
    let snapshot = controller.snapshot(Some(&records));

    let command = SummaryCommand::new(
        SummaryArgs {
            input,
            format: SummaryFormat::Markdown,
            filters: FilterArgs::default(),
        },
        None,
    );
    let output = command.format(&snapshot, controller.engine().palette()).unwrap();

    assert!(output.contains("Показани 10 от 10 сигнала"));
    assert!(!output.contains("## Филтри"));
    assert!(output.contains("| ИТ | 6 |"));
}

#[test]
fn unknown_filter_value_is_rejected() {
    let filters = FilterArgs {
        priority: Some("URGENT".to_string()),
        ..FilterArgs::default()
    };
    assert!(build_controller(&AnalyticsConfig::default(), &filters).is_err());
}

#[test]
fn creator_filter_tag_shows_the_creator_name() {
    let filters = FilterArgs {
        creator: Some("u2".to_string()),
        ..FilterArgs::default()
    };
    let controller = build_controller(&AnalyticsConfig::default(), &filters).unwrap();
    let snapshot = controller.snapshot(Some(&dashboard_scenario()));

    let tags: Vec<_> = snapshot.tags.iter().map(|t| t.text()).collect();
    assert_eq!(tags, vec!["Подател: Мария Георгиева".to_string()]);
    assert_eq!(snapshot.filtered_count, 4);
}

#[tokio::test]
async fn render_draws_the_requested_chart() {
    let (_dir, input, config_path) = workspace().await;
    let config = AnalyticsConfig::load_from(&config_path).await.unwrap();
    let records = load_cases(&input).await.unwrap();
    let controller = build_controller(&config, &closed_only()).unwrap();
    let snapshot = controller.snapshot(Some(&records));

    let render = |chart| {
        RenderCommand::new(
            RenderArgs {
                input: input.clone(),
                chart,
                mode: BarModeArg::Grouped,
                width: Some(400.0),
                output: None,
                filters: closed_only(),
            },
            None,
        )
        .render(&config, &controller, &snapshot)
        .unwrap()
    };

    let status = render(ChartKind::Status);
    assert!(status.contains(r#"data-id="CLOSED""#));
    assert!(status.contains(r#"class="segment active""#));

    let monthly = render(ChartKind::Monthly);
    assert!(monthly.contains("По месеци"));
    assert!(monthly.contains(r#"class="hit-area""#));

    let categories = render(ChartKind::Category);
    assert!(categories.contains("Човешки ресурси"));
}

#[tokio::test]
async fn dashboard_command_writes_html_and_json() {
    let (dir, input, config) = workspace().await;
    let html = dir.path().join("dashboard.html");
    let json = dir.path().join("dashboard.json");

    DashboardCommand::new(
        DashboardArgs {
            input: input.clone(),
            output: html.clone(),
            json: false,
            filters: closed_only(),
        },
        Some(config.clone()),
    )
    .execute()
    .await
    .unwrap();
    let content = std::fs::read_to_string(&html).unwrap();
    assert!(content.contains("Показани 4 от 10 сигнала"));

    DashboardCommand::new(
        DashboardArgs {
            input,
            output: json.clone(),
            json: true,
            filters: FilterArgs::default(),
        },
        Some(config),
    )
    .execute()
    .await
    .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["snapshot"]["filtered_count"], 10);
}

#[tokio::test]
async fn missing_input_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_cases(&dir.path().join("absent.json")).await.is_err());
}
