// src/dag/frontier.rs

//! The ready frontier: steps whose prerequisites are all retired and which
//! have not been started.
//!
//! Outstanding-prerequisite counts are kept up to date by
//! [`Progress::retire`], so computing the frontier is a single pass over
//! per-step states and never walks edges. The step counts involved are
//! tiny, so the frontier is recomputed from scratch after each change.

use crate::dag::graph::TaskHandle;
use crate::dag::progress::Progress;
use crate::types::TaskId;

/// Ready steps not listed in `excluded`, ascending.
pub fn ready_handles(progress: &Progress<'_>, excluded: &[TaskHandle]) -> Vec<TaskHandle> {
    // Handles are issued in id order, so this is already sorted.
    progress
        .graph()
        .handles()
        .filter(|h| progress.state(*h).is_ready() && !excluded.contains(h))
        .collect()
}

/// Ready step ids not listed in `excluded`, ascending.
pub fn ready(progress: &Progress<'_>, excluded: &[TaskId]) -> Vec<TaskId> {
    let graph = progress.graph();
    ready_handles(progress, &[])
        .into_iter()
        .map(|h| graph.id_of(h))
        .filter(|id| !excluded.contains(id))
        .collect()
}
