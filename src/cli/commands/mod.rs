use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use crate::aggregation::AggregationEngine;
use crate::cli::args::FilterArgs;
use crate::config::{AnalyticsConfig, ConfigValidator};
use crate::core::errors::DataError;
use crate::core::types::{CaseFeed, CaseRecord};
use crate::filter::CrossFilterController;

pub mod config;
pub mod dashboard;
pub mod render;
pub mod summary;

pub use config::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use render::RenderCommand;
pub use summary::SummaryCommand;

/// Trait for CLI command implementations
#[async_trait]
pub trait Command {
    /// Execute the command with the given arguments
    async fn execute(&self) -> Result<()>;
}

/// Common utilities for command implementations
pub mod utils {
    use super::*;

    /// Load configuration and refuse values the validator rejects
    pub async fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
        let (config, source) = AnalyticsConfig::load(path)
            .await
            .context("Failed to load configuration")?;
        if let Some(source) = &source {
            info!("Using configuration from {}", source.display());
        }

        let report = ConfigValidator::new().validate(&config);
        for warning in &report.warnings {
            warn!("{warning}");
        }
        if report.has_errors() {
            anyhow::bail!(
                "Configuration validation failed with {} errors:\n{}",
                report.errors.len(),
                report.summary()
            );
        }
        Ok(config)
    }

    /// Read and normalize a case feed; rejected records are logged and skipped
    pub async fn load_cases(path: &Path) -> Result<Vec<CaseRecord>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let feed = CaseFeed::from_json(&content)
            .with_context(|| format!("Invalid case feed in {}", path.display()))?;
        let records = feed.normalize();
        info!("Loaded {} cases from {}", records.len(), path.display());
        Ok(records)
    }

    /// Controller with the configured palette and the requested filters applied
    pub fn build_controller(
        config: &AnalyticsConfig,
        filters: &FilterArgs,
    ) -> Result<CrossFilterController> {
        let palette = config.palette().context("Invalid palette configuration")?;
        let mut controller = CrossFilterController::new(AggregationEngine::new(palette));
        filters
            .apply(&mut controller)
            .context("Invalid filter arguments")?;
        Ok(controller)
    }

    /// Write to `output` or print to stdout
    pub async fn emit(output: Option<&Path>, content: &str) -> Result<()> {
        match output {
            Some(path) => {
                fs::write(path, content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Written to {}", path.display());
            }
            None => print!("{content}"),
        }
        Ok(())
    }
}
