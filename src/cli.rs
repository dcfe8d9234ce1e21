use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Browse and filter an electric fleet roster: vehicles and charging stations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config profile
    #[arg(short, long, global = true, env = "FLEET_ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Roster file (JSON or JSON5); overrides the config profile
    #[arg(short, long, global = true)]
    pub roster: Option<PathBuf>,

    /// Filter expression, e.g. 'semi status:charging'
    #[arg(short, long, global = true)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to color the output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Also write the output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print diagnostics to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostics and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List fleet vehicles matching the filter
    Vehicles {
        /// Case-insensitive text matched against id, model, type and location
        #[arg(long)]
        query: Option<String>,

        /// Vehicle status (active, idle, charging, maintenance) or "all"
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List charging stations matching the filter
    Stations {
        /// Case-insensitive text matched against id, location and current vehicle
        #[arg(long)]
        query: Option<String>,

        /// Station status (available, "in use", maintenance) or "all"
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List planned charging sessions
    Schedule {
        /// Case-insensitive text matched against the vehicle and station ids
        #[arg(long)]
        query: Option<String>,
    },
    /// List predicted maintenance alerts matching the filter
    Alerts {
        /// Case-insensitive text matched against id, vehicle and issue
        #[arg(long)]
        query: Option<String>,

        /// Alert severity (low, medium, high) or "all"
        #[arg(short, long)]
        severity: Option<String>,
    },
    /// Status distribution and health metrics of the whole roster
    Summary,
    /// Show one vehicle or station in detail
    Show {
        /// Exact vehicle or station id
        id: String,
    },
    /// Print the built-in demo roster as JSON
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
