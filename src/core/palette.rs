//! Label and color lookup tables for every categorical dimension
//!
//! One immutable table per enum, indexed by definition order. Components get
//! labels and colors from here instead of keeping their own copies.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::ConfigError;
use super::types::{CasePriority, CaseStatus, CaseType, ResolutionBucket};

/// Display label and color for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub label: String,
    pub color: String,
}

impl Swatch {
    fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Neutral color for placeholders and empty charts
pub const NEUTRAL_COLOR: &str = "#e0e0e0";

const ROTATING_COLORS: [&str; 10] = [
    "#3b82f6", "#f97316", "#10b981", "#a855f7", "#ef4444", "#14b8a6", "#eab308", "#ec4899",
    "#6366f1", "#84cc16",
];

/// Shared default palette
pub static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(Palette::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    status: [Swatch; 4],
    case_type: [Swatch; 2],
    priority: [Swatch; 3],
    resolution: [Swatch; 4],
    rotating: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            status: [
                Swatch::new("Отворен", "#3b82f6"),
                Swatch::new("В процес", "#f59e0b"),
                Swatch::new("Чака финансиране", "#8b5cf6"),
                Swatch::new("Затворен", "#10b981"),
            ],
            case_type: [
                Swatch::new("Проблем", "#ef4444"),
                Swatch::new("Предложение", "#22c55e"),
            ],
            priority: [
                Swatch::new("Нисък", "#22c55e"),
                Swatch::new("Среден", "#eab308"),
                Swatch::new("Висок", "#ef4444"),
            ],
            resolution: [
                Swatch::new("До 1 ден", "#10b981"),
                Swatch::new("До 5 дни", "#84cc16"),
                Swatch::new("До 10 дни", "#f59e0b"),
                Swatch::new("Над 10 дни", "#ef4444"),
            ],
            rotating: ROTATING_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    pub fn status(&self, status: CaseStatus) -> &Swatch {
        &self.status[status.ordinal()]
    }

    pub fn case_type(&self, case_type: CaseType) -> &Swatch {
        &self.case_type[case_type.ordinal()]
    }

    pub fn priority(&self, priority: CasePriority) -> &Swatch {
        &self.priority[priority.ordinal()]
    }

    pub fn resolution(&self, bucket: ResolutionBucket) -> &Swatch {
        &self.resolution[bucket.ordinal()]
    }

    /// Color for the n-th open-ended category (creators, categories)
    pub fn rotating(&self, index: usize) -> &str {
        if self.rotating.is_empty() {
            return NEUTRAL_COLOR;
        }
        &self.rotating[index % self.rotating.len()]
    }

    /// Apply color overrides keyed by wire name (`OPEN`, `HIGH`, `UNDER_5_DAYS`, ...)
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        for (key, color) in overrides {
            let slot = if let Ok(s) = key.parse::<CaseStatus>() {
                &mut self.status[s.ordinal()]
            } else if let Ok(t) = key.parse::<CaseType>() {
                &mut self.case_type[t.ordinal()]
            } else if let Ok(p) = key.parse::<CasePriority>() {
                &mut self.priority[p.ordinal()]
            } else if let Ok(b) = key.parse::<ResolutionBucket>() {
                &mut self.resolution[b.ordinal()]
            } else {
                return Err(ConfigError::InvalidValue {
                    field: format!("palette.{key}"),
                    reason: "not a known status, type, priority or resolution bucket".to_string(),
                });
            };

            if !is_hex_color(color) {
                return Err(ConfigError::InvalidValue {
                    field: format!("palette.{key}"),
                    reason: format!("'{color}' is not a #rgb or #rrggbb color"),
                });
            }
            slot.color = color.clone();
        }
        Ok(self)
    }
}

/// True for wire names a palette override can target
pub fn is_palette_key(key: &str) -> bool {
    key.parse::<CaseStatus>().is_ok()
        || key.parse::<CaseType>().is_ok()
        || key.parse::<CasePriority>().is_ok()
        || key.parse::<ResolutionBucket>().is_ok()
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
