//! Interactive chart views
//!
//! Views keep per-instance hover, tooltip and debounce state and turn raw
//! pointer events into [`ChartEventHandler`](crate::core::ChartEventHandler)
//! callbacks. Geometry comes from [`crate::geometry`]; rendering is left to
//! [`crate::render`], which only reads the visual state computed here.

pub mod bar;
pub mod hover;
pub mod layout;
pub mod pie;
pub mod tooltip;

use serde::{Deserialize, Serialize};

pub use bar::{BarChartView, BarOptions, BarTarget};
pub use hover::{HoverDebouncer, DEFAULT_HOVER_DELAY};
pub use layout::{ContainerOrigin, ContainerWidth, Margin};
pub use pie::{PieChartView, PieOptions, SegmentState, SegmentVisual};
pub use tooltip::Tooltip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Raw pointer event in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64, button: PointerButton) -> Self {
        Self {
            client_x,
            client_y,
            button,
        }
    }

    /// Plain pointer movement
    pub fn at(client_x: f64, client_y: f64) -> Self {
        Self::new(client_x, client_y, PointerButton::Left)
    }

    /// Position relative to a container's top-left corner
    pub fn relative_to(&self, origin: ContainerOrigin) -> (f64, f64) {
        (self.client_x - origin.left, self.client_y - origin.top)
    }
}

/// Cursor shown over a chart target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}
