//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{Command, ConfigCommand, DashboardCommand, RenderCommand, SummaryCommand};

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("feedback_analytics={log_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let command: Box<dyn Command + Send + Sync> = match cli.command {
        Commands::Summary(args) => Box::new(SummaryCommand::new(args, config_path)),
        Commands::Render(args) => Box::new(RenderCommand::new(args, config_path)),
        Commands::Dashboard(args) => Box::new(DashboardCommand::new(args, config_path)),
        Commands::Config { action } => Box::new(ConfigCommand::new(action, config_path)),
    };

    command.execute().await
}
