// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stepdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stepdag",
    version,
    about = "Order and time steps connected by \"must be finished before\" constraints.",
    long_about = None
)]
pub struct CliArgs {
    /// File of `Step X must be finished before step Y can begin.` records.
    ///
    /// Overrides `[input].path` from the config file.
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Stepdag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which result to compute.
    #[arg(long, value_enum, default_value_t = Part::All)]
    pub part: Part,

    /// Number of workers. Overrides config and preset.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Ticks added to every step's duration. Overrides config and preset.
    #[arg(long, value_name = "TICKS")]
    pub base_duration: Option<u64>,

    /// Use the calibration preset (2 workers, no base duration).
    #[arg(long)]
    pub calibration: bool,

    /// Print the per-second worker table.
    #[arg(long)]
    pub timeline: bool,

    /// Print the duration-weighted critical path.
    #[arg(long)]
    pub critical_path: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STEPDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the DAG, but don't schedule anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Result selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Part {
    /// Sequential completion order.
    Order,
    /// Worker-pool elapsed time.
    Time,
    /// Both.
    All,
}

impl Part {
    pub fn wants_order(self) -> bool {
        matches!(self, Part::Order | Part::All)
    }

    pub fn wants_time(self) -> bool {
        matches!(self, Part::Time | Part::All)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
