//! Dashboard export to JSON and self-contained HTML

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

use super::svg::{escape_xml, SvgRenderer};
use crate::charts::{BarChartView, BarOptions, PieChartView, PieOptions};
use crate::config::AnalyticsConfig;
use crate::core::errors::RenderError;
use crate::core::palette::Palette;
use crate::filter::{ChartPanel, DashboardSnapshot};
use crate::geometry::BarMode;

/// Serialized dashboard with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub snapshot: DashboardSnapshot,
}

pub struct DashboardExporter {
    renderer: SvgRenderer,
    palette: Palette,
    pie: PieOptions,
    bar: BarOptions,
    width: f64,
    title: String,
}

impl DashboardExporter {
    pub fn new(config: &AnalyticsConfig, palette: Palette) -> Self {
        Self {
            renderer: SvgRenderer::new(config.charts.background_color.clone()),
            palette,
            pie: config.pie_options(),
            bar: config.bar_options(BarMode::Stacked),
            width: config.charts.default_width,
            title: "Гласът на служителите".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_bar_mode(mut self, mode: BarMode) -> Self {
        self.bar.mode = mode;
        self
    }

    /// Pie view of one panel, sized to the configured width
    pub fn pie_view(&self, panel: &ChartPanel) -> PieChartView {
        let mut view = PieChartView::new(panel.breakdown.pie_segments(), self.pie);
        view.set_active_label(panel.active_label.clone());
        view.resize(self.width);
        view
    }

    pub fn monthly_view(&self, snapshot: &DashboardSnapshot) -> BarChartView {
        let mut view = BarChartView::new(
            snapshot.monthly.data.clone(),
            snapshot.monthly.series.clone(),
            self.bar,
        );
        view.resize(self.width);
        view
    }

    pub fn to_json(&self, snapshot: &DashboardSnapshot) -> Result<String, RenderError> {
        let report = DashboardReport {
            title: self.title.clone(),
            generated_at: Utc::now(),
            snapshot: snapshot.clone(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    pub fn to_html(&self, snapshot: &DashboardSnapshot) -> String {
        let mut charts = String::new();
        for panel in &snapshot.panels {
            let svg = self.renderer.pie(&panel.title, &self.pie_view(panel));
            charts.push_str(&format!("        <div class=\"chart-container\">\n{svg}        </div>\n"));
        }
        let monthly = self.renderer.bar("По месеци", &self.monthly_view(snapshot));
        charts.push_str(&format!(
            "        <div class=\"chart-container wide\">\n{monthly}        </div>\n"
        ));

        let tags = if snapshot.tags.is_empty() {
            "<span class=\"tag muted\">Без филтри</span>".to_string()
        } else {
            snapshot
                .tags
                .iter()
                .map(|tag| {
                    let class = if tag.stale { "tag stale" } else { "tag" };
                    format!("<span class=\"{class}\">{}</span>", escape_xml(&tag.text()))
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        let categories = snapshot
            .categories
            .pie_segments()
            .iter()
            .map(|s| format!("<li>{}: {}</li>", escape_xml(&s.label), s.value))
            .collect::<Vec<_>>()
            .join("\n            ");

        let title = escape_xml(&self.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="bg">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }}
        .header, .chart-container, .summary {{
            background-color: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }}
        .charts {{
            display: flex;
            flex-wrap: wrap;
            gap: 20px;
        }}
        .wide {{
            flex-basis: 100%;
        }}
        .tag {{
            display: inline-block;
            padding: 2px 8px;
            border-radius: 12px;
            background-color: #e0e7ff;
            font-size: 0.9em;
        }}
        .stale {{
            background-color: #fee2e2;
        }}
        .muted {{
            background-color: #f3f4f6;
            color: #6b7280;
        }}
        .metadata {{
            font-size: 0.9em;
            color: #999;
            text-align: right;
        }}
    </style>
</head>
<body>
    <div class="header">
        <h1>{title}</h1>
        <div class="description">Показани {filtered} от {total} сигнала</div>
        <div class="filters">{tags}</div>
    </div>

    <div class="charts">
{charts}    </div>

    <div class="summary">
        <pre>{summary}</pre>
        <ul>
            {categories}
        </ul>
    </div>

    <div class="metadata">
        Generated at: {generated}
    </div>
</body>
</html>
"#,
            filtered = snapshot.filtered_count,
            total = snapshot.total_count,
            summary = escape_xml(&snapshot.summary.describe(&self.palette)),
            generated = Utc::now().to_rfc3339(),
        )
    }

    pub async fn write(path: &Path, contents: &str) -> Result<(), RenderError> {
        fs::write(path, contents)
            .await
            .map_err(|source| RenderError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
