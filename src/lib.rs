// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod input;
pub mod logging;
pub mod report;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, Part};
use crate::config::{ConfigFile, SchedulerSettings, load_or_default};
use crate::dag::{GraphBuilder, SequentialScheduler, TaskGraph, WorkerPool, critical_path};
use crate::errors::StepdagError;
use crate::input::load_constraints;
use crate::report::Report;
use crate::types::Preset;

/// What to compute for a graph, beyond the scheduler settings.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub part: Part,
    pub timeline: bool,
    pub critical_path: bool,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - constraint parsing
/// - DAG build
/// - sequential and/or worker-pool scheduling
/// - report output on stdout
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let settings = resolve_settings(&args, &cfg);
    let input = resolve_input(&args, &cfg)?;

    info!(input = %input.display(), ?settings, "loading constraints");
    let constraints = load_constraints(&input)?;
    let graph = GraphBuilder::from_constraints(constraints).build()?;

    if args.dry_run {
        print!("{}", report::render_graph(&graph));
        debug!("dry-run complete (no scheduling)");
        return Ok(());
    }

    let options = ReportOptions {
        part: args.part,
        timeline: args.timeline,
        critical_path: args.critical_path,
    };

    let report = build_report(&graph, settings, options)?;
    print!("{}", report::render(&report));
    Ok(())
}

/// Run the requested schedulers over `graph`.
pub fn build_report(
    graph: &TaskGraph,
    settings: SchedulerSettings,
    options: ReportOptions,
) -> errors::Result<Report> {
    let order = if options.part.wants_order() {
        Some(SequentialScheduler::new(graph).run()?.as_string())
    } else {
        None
    };

    let pool = if options.part.wants_time() {
        let mut pool = WorkerPool::new(graph, settings.workers, settings.duration_model())?;
        if options.timeline {
            pool = pool.record_timeline();
        }
        Some(pool.run()?)
    } else {
        None
    };

    let critical_path = options
        .critical_path
        .then(|| critical_path(graph, &settings.duration_model()));

    Ok(Report {
        settings,
        order,
        pool,
        critical_path,
    })
}

/// Effective scheduler settings: CLI flag, then config field, then preset.
pub fn resolve_settings(args: &CliArgs, cfg: &ConfigFile) -> SchedulerSettings {
    let mut section = cfg.scheduler.clone();
    if args.calibration {
        section.preset = Preset::Calibration;
    }
    let from_config = section.settings();

    SchedulerSettings {
        workers: args.workers.unwrap_or(from_config.workers),
        base_duration: args.base_duration.unwrap_or(from_config.base_duration),
    }
}

/// Constraint file to read: `--input`, then `[input].path`.
pub fn resolve_input(args: &CliArgs, cfg: &ConfigFile) -> errors::Result<PathBuf> {
    args.input
        .clone()
        .or_else(|| cfg.input.path.clone())
        .ok_or_else(|| {
            StepdagError::ConfigError(
                "no input file: pass --input or set [input].path".to_string(),
            )
        })
}
