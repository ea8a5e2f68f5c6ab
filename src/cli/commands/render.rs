use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::utils::{build_controller, emit, load_cases, load_config};
use crate::aggregation::Dimension;
use crate::charts::{BarChartView, PieChartView};
use crate::cli::args::{ChartKind, RenderArgs};
use crate::cli::commands::Command;
use crate::config::AnalyticsConfig;
use crate::filter::{CrossFilterController, DashboardSnapshot};
use crate::render::SvgRenderer;

pub struct RenderCommand {
    args: RenderArgs,
    config_path: Option<PathBuf>,
}

impl RenderCommand {
    pub fn new(args: RenderArgs, config_path: Option<PathBuf>) -> Self {
        Self { args, config_path }
    }

    /// SVG for the requested chart over an already computed snapshot
    pub fn render(
        &self,
        config: &AnalyticsConfig,
        controller: &CrossFilterController,
        snapshot: &DashboardSnapshot,
    ) -> Result<String> {
        let width = self.args.width.unwrap_or(config.charts.default_width);
        let renderer = SvgRenderer::new(config.charts.background_color.clone());
        debug!("Rendering {:?} chart at width {}", self.args.chart, width);

        let svg = match self.args.chart {
            ChartKind::Monthly => {
                let mut view = BarChartView::new(
                    snapshot.monthly.data.clone(),
                    snapshot.monthly.series.clone(),
                    config.bar_options(self.args.mode.into()),
                );
                view.resize(width);
                renderer.bar("По месеци", &view)
            }
            ChartKind::Category => {
                let mut view =
                    PieChartView::new(snapshot.categories.pie_segments(), config.pie_options());
                view.resize(width);
                renderer.pie(Dimension::Category.title(), &view)
            }
            kind => {
                let dimension = kind
                    .filter_dimension()
                    .context("Chart kind has no filter dimension")?;
                let panel = snapshot
                    .panel(dimension)
                    .with_context(|| format!("No {dimension:?} panel in dashboard"))?;
                let mut view = PieChartView::new(panel.breakdown.pie_segments(), config.pie_options());
                view.set_active_label(controller.active_label(dimension).map(str::to_string));
                view.resize(width);
                renderer.pie(&panel.title, &view)
            }
        };
        Ok(svg)
    }
}

#[async_trait]
impl Command for RenderCommand {
    async fn execute(&self) -> Result<()> {
        let config = load_config(self.config_path.as_deref()).await?;
        let records = load_cases(&self.args.input).await?;
        let controller = build_controller(&config, &self.args.filters)?;
        let snapshot = controller.snapshot(Some(&records));

        let svg = self.render(&config, &controller, &snapshot)?;
        emit(self.args.output.as_deref(), &svg).await
    }
}
