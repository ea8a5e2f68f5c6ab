//! Platform-aware configuration paths

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "FEEDBACK_ANALYTICS_CONFIG_DIR";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory: the environment override if set, otherwise the
/// platform config directory
pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(env::var(CONFIG_DIR_ENV).ok())
}

fn resolve_config_dir(override_dir: Option<String>) -> Option<PathBuf> {
    if let Some(custom_dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Some(PathBuf::from(custom_dir));
    }

    dirs::config_dir().map(|p| p.join("feedback-analytics"))
}

/// Where `config init` writes and where loading looks by default
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
