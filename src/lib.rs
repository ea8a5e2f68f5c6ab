//! # feedback-analytics
//!
//! Analytics, charting and cross-filter core of the "Гласът на служителите"
//! (Voice of the Employees) feedback dashboard.
//!
//! Case records submitted by employees are normalized once, aggregated into
//! chart segments and resolution-time statistics, laid out as pie and bar
//! geometry, and narrowed by a cross-filter controller in which every chart is
//! computed against all active filters except its own.
//!
//! ## Quick Start
//!
//! ```rust
//! use feedback_analytics::{CaseFeed, CrossFilterController, FilterDimension, FilterValue, CaseStatus};
//!
//! let feed = CaseFeed::from_json(r#"[
//!     {"_id": "1", "date": "2024-03-01", "type": "PROBLEM", "priority": "HIGH", "status": "OPEN"},
//!     {"_id": "2", "date": "2024-03-02", "type": "SUGGESTION", "priority": "LOW", "status": "CLOSED"}
//! ]"#).unwrap();
//! let records = feed.normalize();
//!
//! let mut controller = CrossFilterController::default();
//! controller.set_filter(FilterDimension::Status, FilterValue::Status(CaseStatus::Closed)).unwrap();
//!
//! let snapshot = controller.snapshot(Some(&records));
//! assert_eq!(snapshot.filtered_count, 1);
//! // the status chart ignores its own filter
//! assert_eq!(snapshot.panel(FilterDimension::Status).unwrap().breakdown.total, 2);
//! ```
//!
//! ## Module Overview
//!
//! - [`core`] - Record types, palette, timestamps and errors
//! - [`geometry`] - Pure pie and bar geometry
//! - [`aggregation`] - Breakdowns, resolution statistics and period series
//! - [`filter`] - Cross-filter state and controller
//! - [`charts`] - Interactive chart views (hover, tooltip, clicks, resize)
//! - [`render`] - SVG, HTML and JSON output
//! - [`config`] - TOML configuration and validation
//! - [`cli`] - Command-line interface

/// Aggregation of case records into chart data
pub mod aggregation;
/// Interactive chart view state
pub mod charts;
/// Command-line interface and argument parsing
pub mod cli;
/// Configuration management and validation
pub mod config;
/// Core types, palette and errors
pub mod core;
/// Cross-filter controller
pub mod filter;
/// Chart geometry
pub mod geometry;
/// SVG and dashboard rendering
pub mod render;

pub use aggregation::{AggregationEngine, Breakdown, CaseSummary, Dimension, PeriodSeries, ResolutionStats};
pub use charts::{BarChartView, PieChartView, PointerButton, PointerEvent};
pub use config::AnalyticsConfig;
pub use core::{
    AnalyticsError, AnalyticsResult, CaseFeed, CasePriority, CaseRecord, CaseStatus, CaseType,
    ChartEventHandler, ChartSegment, Palette, ResolutionBucket,
};
pub use filter::{CrossFilterController, DashboardSnapshot, FilterDimension, FilterValue, Selection};
pub use geometry::{bar_geometry, pie_geometry, BarMode};
pub use render::{DashboardExporter, SvgRenderer};
