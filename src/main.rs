use anyhow::Result;
use feedback_analytics::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run_cli().await
}
