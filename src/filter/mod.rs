//! Cross-filter controller
//!
//! Each dimension holds at most one selected value. The list view uses the
//! AND of every active filter; each chart is computed against every filter
//! except its own so it stays selectable.

pub mod controller;
pub mod state;

pub use controller::{ChartPanel, CrossFilterController, DashboardSnapshot, DimensionHandler, FilterTag};
pub use state::{ActiveFilterState, FilterDimension, FilterValue, Selection};
