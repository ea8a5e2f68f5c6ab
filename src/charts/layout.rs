use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-left corner of a chart container in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerOrigin {
    pub left: f64,
    pub top: f64,
}

impl ContainerOrigin {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Space around a bar chart's plot area for axes and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

impl Margin {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Tracks the live rendered width of a chart container.
///
/// Fed from a resize observer; reports a change only when the measured width
/// actually differs so views recompute geometry once per real resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerWidth {
    width: Option<f64>,
}

impl ContainerWidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.width.unwrap_or(0.0)
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_some()
    }

    /// Record a measurement; true when it changed the width
    pub fn observe(&mut self, measured: f64) -> bool {
        let measured = if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            0.0
        };
        if self.width == Some(measured) {
            return false;
        }
        debug!("Container width {:?} -> {}", self.width, measured);
        self.width = Some(measured);
        true
    }
}
