use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stockpair_common::ChartMode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, default_value = "INFO", ignore_case = true)]
    pub trace: TraceLevel,

    /// Price dataset (CSV); overrides STOCKPAIR_DATA
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the comparison dashboard.
    Serve {
        /// Interface to bind; overrides STOCKPAIR_HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; overrides STOCKPAIR_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// List the symbols and years of the dataset.
    Inspect,

    /// Print the chart of one selection as JSON; unset values take the page defaults.
    Figure {
        #[arg(long)]
        symbol_a: Option<String>,

        #[arg(long)]
        symbol_b: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        /// "open-close" or "volume"
        #[arg(long)]
        mode: Option<ChartMode>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<TraceLevel> for Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::WARN => Level::WARN,
            TraceLevel::ERROR => Level::ERROR,
        }
    }
}
