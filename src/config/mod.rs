pub mod paths;
pub mod settings;
pub mod validation;

pub use paths::{config_dir, default_config_path, CONFIG_DIR_ENV, CONFIG_FILE_NAME};
pub use settings::{AnalyticsConfig, ChartSettings, InteractionSettings};
pub use validation::{ConfigValidationError, ConfigValidator, ValidationReport};

use clap::Subcommand;
use std::path::PathBuf;

/// Configuration actions
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Target file (defaults to the platform config directory)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the active configuration
    Show,
    /// Validate the active configuration and report every problem
    Validate,
}
