//! Dashboard configuration loaded from TOML

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use super::paths::default_config_path;
use crate::charts::{BarOptions, Margin, PieOptions};
use crate::core::errors::ConfigError;
use crate::core::palette::{Palette, DEFAULT_PALETTE};
use crate::geometry::BarMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub pie_size: f64,
    /// Ring thickness; 0 draws a full pie
    pub pie_stroke_width: f64,
    pub bar_height: f64,
    pub bar_gap: f64,
    pub margin: Margin,
    pub background_color: String,
    /// Opacity of sibling segments while one is hovered
    pub dim_opacity: f64,
    /// Container width assumed when rendering outside a live page
    pub default_width: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            pie_size: 240.0,
            pie_stroke_width: 0.0,
            bar_height: 300.0,
            bar_gap: 2.0,
            margin: Margin::default(),
            background_color: "#ffffff".to_string(),
            dim_opacity: 0.35,
            default_width: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub hover_debounce_ms: u64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hover_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub charts: ChartSettings,
    pub interaction: InteractionSettings,
    /// Color overrides keyed by wire name, e.g. `OPEN = "#2196f3"`
    pub palette: BTreeMap<String, String>,
}

impl AnalyticsConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&content, path)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the active configuration: an explicit path must exist, the
    /// default location is used when present, otherwise built-in defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path).await?, Some(path.to_path_buf())));
        }

        if let Some(path) = default_config_path() {
            if fs::try_exists(&path).await.unwrap_or(false) {
                return Ok((Self::load_from(&path).await?, Some(path)));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok((Self::default(), None))
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).await.map_err(write_err)?;
        info!("Configuration written to {}", path.display());
        Ok(())
    }

    /// Default palette with this configuration's overrides applied
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        DEFAULT_PALETTE.clone().with_overrides(&self.palette)
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.interaction.hover_debounce_ms)
    }

    pub fn pie_options(&self) -> PieOptions {
        PieOptions {
            size: self.charts.pie_size,
            stroke_width: self.charts.pie_stroke_width,
            dim_opacity: self.charts.dim_opacity,
            hover_delay: self.hover_delay(),
        }
    }

    pub fn bar_options(&self, mode: BarMode) -> BarOptions {
        BarOptions {
            height: self.charts.bar_height,
            mode,
            bar_gap: self.charts.bar_gap,
            margin: self.charts.margin,
            hover_delay: self.hover_delay(),
        }
    }
}
