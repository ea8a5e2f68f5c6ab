//! Aggregation engine
//!
//! Turns normalized case records into chart-ready segments, resolution-time
//! statistics, summary counts and monthly bar series. Bad records never abort
//! a batch: anything missing a date only drops out of time-based numbers.

pub mod engine;
pub mod periods;
pub mod resolution;
pub mod summary;

pub use engine::{AggregationEngine, AnalyzedCase, Breakdown, Dimension, UNCATEGORIZED_ID};
pub use periods::PeriodSeries;
pub use resolution::{resolve_case, ResolutionOutcome, ResolutionStats};
pub use summary::CaseSummary;
