use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

use super::utils::{build_controller, emit, load_cases, load_config};
use crate::aggregation::{Breakdown, CaseSummary};
use crate::cli::args::{SummaryArgs, SummaryFormat};
use crate::cli::commands::Command;
use crate::core::palette::Palette;
use crate::filter::{DashboardSnapshot, FilterTag};

pub struct SummaryCommand {
    args: SummaryArgs,
    config_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    total_count: u64,
    filtered_count: u64,
    filters: &'a [FilterTag],
    summary: &'a CaseSummary,
    categories: &'a Breakdown,
}

impl SummaryCommand {
    pub fn new(args: SummaryArgs, config_path: Option<PathBuf>) -> Self {
        Self { args, config_path }
    }

    pub fn format(&self, snapshot: &DashboardSnapshot, palette: &Palette) -> Result<String> {
        match self.args.format {
            SummaryFormat::Json => {
                let output = SummaryOutput {
                    total_count: snapshot.total_count,
                    filtered_count: snapshot.filtered_count,
                    filters: &snapshot.tags,
                    summary: &snapshot.summary,
                    categories: &snapshot.categories,
                };
                Ok(serde_json::to_string_pretty(&output)? + "\n")
            }
            SummaryFormat::Markdown => Ok(markdown(snapshot, palette)),
        }
    }
}

fn markdown(snapshot: &DashboardSnapshot, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Гласът на служителите\n");
    let _ = writeln!(
        out,
        "Показани {} от {} сигнала\n",
        snapshot.filtered_count, snapshot.total_count
    );

    if !snapshot.tags.is_empty() {
        let _ = writeln!(out, "## Филтри\n");
        for tag in &snapshot.tags {
            let _ = writeln!(out, "- {}", tag.text());
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Обобщение\n");
    let _ = writeln!(out, "```");
    out.push_str(&snapshot.summary.describe(palette));
    let _ = writeln!(out, "```\n");

    let categories = snapshot.categories.pie_segments();
    if !categories.is_empty() {
        let _ = writeln!(out, "## Категории\n");
        let _ = writeln!(out, "| Категория | Брой |");
        let _ = writeln!(out, "|-----------|------|");
        for segment in categories {
            let _ = writeln!(out, "| {} | {} |", segment.label, segment.value);
        }
    }
    out
}

#[async_trait]
impl Command for SummaryCommand {
    async fn execute(&self) -> Result<()> {
        let config = load_config(self.config_path.as_deref()).await?;
        let records = load_cases(&self.args.input).await?;
        let controller = build_controller(&config, &self.args.filters)?;

        let snapshot = controller.snapshot(Some(&records));
        let content = self.format(&snapshot, controller.engine().palette())?;
        emit(None, &content).await
    }
}
