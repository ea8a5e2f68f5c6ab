use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::utils::{build_controller, load_cases, load_config};
use crate::cli::args::DashboardArgs;
use crate::cli::commands::Command;
use crate::render::DashboardExporter;

pub struct DashboardCommand {
    args: DashboardArgs,
    config_path: Option<PathBuf>,
}

impl DashboardCommand {
    pub fn new(args: DashboardArgs, config_path: Option<PathBuf>) -> Self {
        Self { args, config_path }
    }
}

#[async_trait]
impl Command for DashboardCommand {
    async fn execute(&self) -> Result<()> {
        let config = load_config(self.config_path.as_deref()).await?;
        let records = load_cases(&self.args.input).await?;
        let controller = build_controller(&config, &self.args.filters)?;
        let snapshot = controller.snapshot(Some(&records));

        let exporter = DashboardExporter::new(&config, controller.engine().palette().clone());
        let content = if self.args.json {
            exporter.to_json(&snapshot).context("Failed to serialize dashboard")?
        } else {
            exporter.to_html(&snapshot)
        };

        DashboardExporter::write(&self.args.output, &content).await?;
        info!(
            "Dashboard with {} of {} cases written to {}",
            snapshot.filtered_count,
            snapshot.total_count,
            self.args.output.display()
        );
        Ok(())
    }
}
