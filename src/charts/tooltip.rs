use serde::{Deserialize, Serialize};

use super::layout::ContainerOrigin;
use super::PointerEvent;

/// Floating label shown while a chart target is hovered
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tooltip {
    pub visible: bool,
    /// Position relative to the chart container, not the viewport
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub value: f64,
    /// Share of the displayed total, rounded to one decimal
    pub percentage: f64,
}

impl Tooltip {
    pub fn show(
        &mut self,
        label: impl Into<String>,
        value: f64,
        displayed_total: f64,
        event: &PointerEvent,
        origin: ContainerOrigin,
    ) {
        self.visible = true;
        self.label = label.into();
        self.value = value;
        self.percentage = percentage(value, displayed_total);
        self.follow(event, origin);
    }

    /// Track the pointer while visible
    pub fn follow(&mut self, event: &PointerEvent, origin: ContainerOrigin) {
        if !self.visible {
            return;
        }
        let (x, y) = event.relative_to(origin);
        self.x = x;
        self.y = y;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn text(&self) -> String {
        format!("{}: {} ({:.1}%)", self.label, self.value, self.percentage)
    }
}

/// Percentage of `total` rounded to one decimal; 0 when the total is empty
pub fn percentage(value: f64, total: f64) -> f64 {
    if !(total.is_finite() && total > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value / total * 1000.0).round() / 10.0
}
