use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::cli::commands::Command;
use crate::config::{default_config_path, AnalyticsConfig, ConfigAction, ConfigValidator};

pub struct ConfigCommand {
    action: ConfigAction,
    config_path: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, config_path: Option<PathBuf>) -> Self {
        Self {
            action,
            config_path,
        }
    }

    fn target_path(&self, explicit: Option<&PathBuf>) -> Result<PathBuf> {
        explicit
            .or(self.config_path.as_ref())
            .cloned()
            .or_else(default_config_path)
            .context("Unable to determine config directory for the current platform")
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        match &self.action {
            ConfigAction::Init { path, force } => {
                let config_path = self.target_path(path.as_ref())?;
                if !force && fs::try_exists(&config_path).await.unwrap_or(false) {
                    anyhow::bail!(
                        "{} already exists; pass --force to overwrite it",
                        config_path.display()
                    );
                }
                AnalyticsConfig::default().save(&config_path).await?;
                println!("Configuration initialized at {}", config_path.display());
            }

            ConfigAction::Show => {
                let (config, source) = AnalyticsConfig::load(self.config_path.as_deref()).await?;
                match source {
                    Some(path) => println!("# {}", path.display()),
                    None => println!("# built-in defaults (use 'config init' to create a file)"),
                }
                print!("{}", config.to_toml()?);
            }

            ConfigAction::Validate => {
                let validator = ConfigValidator::new();
                let explicit = self.config_path.clone();
                let existing = match explicit.or_else(default_config_path) {
                    Some(path) if fs::try_exists(&path).await.unwrap_or(false) => Some(path),
                    _ => None,
                };

                let report = match existing {
                    Some(path) => {
                        let content = fs::read_to_string(&path)
                            .await
                            .with_context(|| format!("Failed to read {}", path.display()))?;
                        validator.validate_toml(&content, &path)
                    }
                    None => {
                        if let Some(path) = &self.config_path {
                            anyhow::bail!("Configuration file not found: {}", path.display());
                        }
                        validator.validate(&AnalyticsConfig::default())
                    }
                };

                print!("{}", report.summary());
                if report.has_errors() {
                    anyhow::bail!(
                        "Configuration validation failed with {} errors",
                        report.errors.len()
                    );
                }
            }
        }

        Ok(())
    }
}
