// src/report.rs

//! Plain-text rendering of scheduling results.
//!
//! Everything here returns `String`s; printing is left to the caller.

use std::fmt::Write;

use crate::config::SchedulerSettings;
use crate::dag::{CriticalPath, PoolOutcome, TaskGraph, Timeline};

/// Everything computed for one input.
#[derive(Debug, Clone)]
pub struct Report {
    pub settings: SchedulerSettings,
    /// Sequential completion order, if requested.
    pub order: Option<String>,
    /// Worker-pool result, if requested.
    pub pool: Option<PoolOutcome>,
    pub critical_path: Option<CriticalPath>,
}

pub fn render(report: &Report) -> String {
    let mut out = String::new();

    if let Some(order) = &report.order {
        let _ = writeln!(out, "order: {order}");
    }

    if let Some(pool) = &report.pool {
        let _ = writeln!(
            out,
            "elapsed: {} ({} workers, base duration {})",
            pool.elapsed, report.settings.workers, report.settings.base_duration
        );
    }

    if let Some(cp) = &report.critical_path {
        let steps: String = cp.steps.iter().map(|id| id.as_char()).collect();
        let _ = writeln!(out, "critical path: {steps} ({})", cp.length);
    }

    if let Some(timeline) = report.pool.as_ref().and_then(|p| p.timeline.as_ref()) {
        out.push('\n');
        out.push_str(&render_timeline(timeline));
    }

    out
}

/// Per-second worker table, one row per second.
///
/// ```text
/// Second   Worker 1   Worker 2   Done
///      0          C          .
///      3          A          F   C
/// ```
pub fn render_timeline(timeline: &Timeline) -> String {
    let mut out = String::new();

    let mut header = format!("{:>6}", "Second");
    for i in 0..timeline.workers {
        let _ = write!(header, "{:>11}", format!("Worker {}", i + 1));
    }
    header.push_str("   Done");
    out.push_str(&header);
    out.push('\n');

    for row in &timeline.rows {
        let mut line = format!("{:>6}", row.second);
        for slot in &row.workers {
            let c = slot.map(|id| id.as_char()).unwrap_or('.');
            let _ = write!(line, "{c:>11}");
        }
        let _ = write!(line, "   {}", row.done);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Dry-run listing: every step with its direct prerequisites.
pub fn render_graph(graph: &TaskGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "stepdag dry-run");
    let _ = writeln!(out);
    let _ = writeln!(out, "steps ({}):", graph.len());

    for h in graph.handles() {
        let id = graph.id_of(h);
        let pre = graph.prerequisites_of(h);
        if pre.is_empty() {
            let _ = writeln!(out, "  - {id}");
        } else {
            let names: Vec<String> = pre.iter().map(|&p| graph.id_of(p).to_string()).collect();
            let _ = writeln!(out, "  - {id} after {}", names.join(", "));
        }
    }

    let roots: String = graph.roots().iter().map(|id| id.as_char()).collect();
    let _ = writeln!(out);
    let _ = writeln!(out, "roots: {roots}");
    out
}
