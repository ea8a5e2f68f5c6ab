// Integration test modules
pub mod aggregation_tests;
pub mod chart_interaction_tests;
pub mod cli_tests;
pub mod cross_filter_tests;
pub mod render_tests;

// Shared fixtures
#[path = "../common/mod.rs"]
pub mod common;
