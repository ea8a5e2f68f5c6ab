use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigAction;
use crate::core::errors::FilterError;
use crate::filter::{CrossFilterController, FilterDimension, FilterValue};
use crate::geometry::BarMode;

/// Analytics and charts for the "Гласът на служителите" feedback dashboard.
///
/// Reads a JSON export of case records (an array, or an object with a
/// `cases` array) and produces summaries, SVG charts or a full dashboard,
/// optionally narrowed by cross-filters.
///
/// # Examples
///
/// ```bash
/// # Summary of all closed cases
/// feedback-analytics summary --input cases.json --status CLOSED
///
/// # Stacked monthly chart as SVG
/// feedback-analytics render --input cases.json --chart monthly --mode stacked --output monthly.svg
///
/// # Self-contained HTML dashboard
/// feedback-analytics dashboard --input cases.json --output dashboard.html
/// ```
#[derive(Parser)]
#[command(name = "feedback-analytics")]
#[command(about = "Analytics and charts for employee feedback cases")]
#[command(version)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print case counts and resolution statistics
    Summary(SummaryArgs),

    /// Render one chart as SVG
    Render(RenderArgs),

    /// Build a full dashboard as HTML or JSON
    Dashboard(DashboardArgs),

    /// Manage configuration
    Config {
        /// Configuration action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Cross-filter selections, one optional value per dimension
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Status wire name (OPEN, IN_PROGRESS, AWAITING_FINANCE, CLOSED)
    #[arg(long)]
    pub status: Option<String>,

    /// Case type (PROBLEM, SUGGESTION)
    #[arg(long = "type")]
    pub case_type: Option<String>,

    /// Priority (LOW, MEDIUM, HIGH)
    #[arg(long)]
    pub priority: Option<String>,

    /// Resolution bucket (UNDER_1_DAY, UNDER_5_DAYS, UNDER_10_DAYS, OVER_10_DAYS)
    #[arg(long)]
    pub resolution: Option<String>,

    /// Creator id
    #[arg(long)]
    pub creator: Option<String>,
}

impl FilterArgs {
    fn selections(&self) -> [(FilterDimension, Option<&String>); 5] {
        [
            (FilterDimension::Status, self.status.as_ref()),
            (FilterDimension::Type, self.case_type.as_ref()),
            (FilterDimension::Priority, self.priority.as_ref()),
            (FilterDimension::Resolution, self.resolution.as_ref()),
            (FilterDimension::Creator, self.creator.as_ref()),
        ]
    }

    /// Select every given value on the controller
    pub fn apply(&self, controller: &mut CrossFilterController) -> Result<(), FilterError> {
        for (dimension, raw) in self.selections() {
            if let Some(raw) = raw {
                let value = FilterValue::parse(dimension, raw)?;
                controller.set_filter(dimension, value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    /// Case records JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: SummaryFormat,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Case records JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Chart to render
    #[arg(long, value_enum)]
    pub chart: ChartKind,

    /// Bar layout for the monthly chart
    #[arg(long, value_enum, default_value = "grouped")]
    pub mode: BarModeArg,

    /// Container width in pixels (defaults to the configured width)
    #[arg(long)]
    pub width: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    /// Case records JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write the dashboard data as JSON instead of HTML
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Output formats for the summary command
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Json,
    Markdown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Status,
    Type,
    Priority,
    Resolution,
    Creator,
    Category,
    Monthly,
}

impl ChartKind {
    /// Cross-filter dimension behind a pie chart
    pub fn filter_dimension(&self) -> Option<FilterDimension> {
        match self {
            ChartKind::Status => Some(FilterDimension::Status),
            ChartKind::Type => Some(FilterDimension::Type),
            ChartKind::Priority => Some(FilterDimension::Priority),
            ChartKind::Resolution => Some(FilterDimension::Resolution),
            ChartKind::Creator => Some(FilterDimension::Creator),
            ChartKind::Category | ChartKind::Monthly => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BarModeArg {
    Grouped,
    Stacked,
}

impl From<BarModeArg> for BarMode {
    fn from(mode: BarModeArg) -> Self {
        match mode {
            BarModeArg::Grouped => BarMode::Grouped,
            BarModeArg::Stacked => BarMode::Stacked,
        }
    }
}
