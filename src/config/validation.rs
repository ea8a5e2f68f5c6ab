//! Configuration validation

use std::fmt::Write;
use std::path::Path;

use super::settings::AnalyticsConfig;
use crate::core::errors::ConfigError;
use crate::core::palette::{is_hex_color, is_palette_key};

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration format: {reason}")]
    InvalidFormat { reason: String },

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown palette key '{key}'")]
    UnknownPaletteKey { key: String },

    #[error("Field '{field}' is not a #rgb or #rrggbb color: '{value}'")]
    InvalidColor { field: String, value: String },
}

/// Checks a whole configuration and reports every problem at once
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &AnalyticsConfig) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.validate_charts(config, &mut report);
        self.validate_interaction(config, &mut report);
        self.validate_palette(config, &mut report);
        if !report.has_errors() {
            report.add_success("Configuration values are within range".to_string());
        }
        report
    }

    /// Parse and validate raw TOML
    pub fn validate_toml(&self, content: &str, path: &Path) -> ValidationReport {
        match AnalyticsConfig::from_toml_str(content, path) {
            Ok(config) => {
                let mut report = self.validate(&config);
                report.add_success(format!("Configuration file is valid TOML: {}", path.display()));
                report
            }
            Err(ConfigError::Parse { source, .. }) => {
                let mut report = ValidationReport::new();
                report.add_error(ConfigValidationError::InvalidFormat {
                    reason: source.to_string(),
                });
                report
            }
            Err(other) => {
                let mut report = ValidationReport::new();
                report.add_error(ConfigValidationError::InvalidFormat {
                    reason: other.to_string(),
                });
                report
            }
        }
    }

    fn validate_charts(&self, config: &AnalyticsConfig, report: &mut ValidationReport) {
        let charts = &config.charts;
        let positive = [
            ("charts.pie_size", charts.pie_size),
            ("charts.bar_height", charts.bar_height),
            ("charts.default_width", charts.default_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                report.add_error(ConfigValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be greater than 0, got {value}"),
                });
            }
        }

        let non_negative = [
            ("charts.pie_stroke_width", charts.pie_stroke_width),
            ("charts.bar_gap", charts.bar_gap),
            ("charts.margin.top", charts.margin.top),
            ("charts.margin.right", charts.margin.right),
            ("charts.margin.bottom", charts.margin.bottom),
            ("charts.margin.left", charts.margin.left),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                report.add_error(ConfigValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if charts.pie_stroke_width * 2.0 >= charts.pie_size && charts.pie_stroke_width > 0.0 {
            report.add_warning(
                "charts.pie_stroke_width leaves no doughnut hole; a full pie is drawn".to_string(),
            );
        }

        if charts.margin.vertical() >= charts.bar_height {
            report.add_error(ConfigValidationError::InvalidValue {
                field: "charts.margin".to_string(),
                reason: "top and bottom margins leave no plot height".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&charts.dim_opacity) {
            report.add_error(ConfigValidationError::InvalidValue {
                field: "charts.dim_opacity".to_string(),
                reason: format!("must be between 0 and 1, got {}", charts.dim_opacity),
            });
        }

        if !is_hex_color(&charts.background_color) {
            report.add_error(ConfigValidationError::InvalidColor {
                field: "charts.background_color".to_string(),
                value: charts.background_color.clone(),
            });
        }
    }

    fn validate_interaction(&self, config: &AnalyticsConfig, report: &mut ValidationReport) {
        let delay = config.interaction.hover_debounce_ms;
        if delay == 0 {
            report.add_warning("interaction.hover_debounce_ms is 0; hover effects fire on every move".to_string());
        } else if delay > 2000 {
            report.add_warning(format!(
                "interaction.hover_debounce_ms is {delay}; hover effects will feel sluggish"
            ));
        }
    }

    fn validate_palette(&self, config: &AnalyticsConfig, report: &mut ValidationReport) {
        for (key, color) in &config.palette {
            if !is_palette_key(key) {
                report.add_error(ConfigValidationError::UnknownPaletteKey { key: key.clone() });
            }
            if !is_hex_color(color) {
                report.add_error(ConfigValidationError::InvalidColor {
                    field: format!("palette.{key}"),
                    value: color.clone(),
                });
            }
        }
    }
}

/// Validation report containing all findings
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<String>,
    pub successes: Vec<String>,
}

impl ValidationReport {
    fn new() -> Self {
        Self::default()
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    fn add_success(&mut self, success: String) {
        self.successes.push(success);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Configuration Validation Report");
        let _ = writeln!(out, "==============================");

        if !self.successes.is_empty() {
            let _ = writeln!(out, "\nSuccesses:");
            for success in &self.successes {
                let _ = writeln!(out, "   {success}");
            }
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for warning in &self.warnings {
                let _ = writeln!(out, "   {warning}");
            }
        }

        if !self.errors.is_empty() {
            let _ = writeln!(out, "\nErrors:");
            for error in &self.errors {
                let _ = writeln!(out, "   {error}");
            }
        }

        let _ = writeln!(
            out,
            "\nSummary: {} errors, {} warnings",
            self.errors.len(),
            self.warnings.len()
        );
        out
    }
}
