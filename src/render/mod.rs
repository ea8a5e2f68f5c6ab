//! Chart and dashboard output

pub mod export;
pub mod svg;

pub use export::{DashboardExporter, DashboardReport};
pub use svg::{escape_xml, SvgRenderer, NO_DATA_TEXT};
