// src/dag/sequential.rs

//! Single-worker scheduler: always completes the alphabetically first
//! ready step next.

use tracing::{debug, info};

use crate::dag::frontier::ready_handles;
use crate::dag::graph::TaskGraph;
use crate::dag::progress::Progress;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Result of a sequential run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOrder {
    pub steps: Vec<TaskId>,
}

impl CompletionOrder {
    /// The order as a string of step letters, e.g. `"CABDFE"`.
    pub fn as_string(&self) -> String {
        self.steps.iter().map(|id| id.as_char()).collect()
    }
}

#[derive(Debug)]
pub struct SequentialScheduler<'g> {
    progress: Progress<'g>,
    order: Vec<TaskId>,
}

impl<'g> SequentialScheduler<'g> {
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self {
            progress: Progress::new(graph),
            order: Vec::with_capacity(graph.len()),
        }
    }

    pub fn progress(&self) -> &Progress<'g> {
        &self.progress
    }

    /// Steps completed so far, in completion order.
    pub fn completed(&self) -> &[TaskId] {
        &self.order
    }

    /// Complete one step.
    ///
    /// Returns `Ok(None)` once every step is done, and `Stalled` if steps
    /// remain but none is ready.
    pub fn next_step(&mut self) -> Result<Option<TaskId>> {
        let Some(&next) = ready_handles(&self.progress, &[]).first() else {
            if self.progress.is_drained() {
                return Ok(None);
            }
            return Err(StepdagError::Stalled {
                remaining: self.progress.remaining(),
            });
        };

        self.progress.retire(next);
        let id = self.progress.graph().id_of(next);
        self.order.push(id);
        debug!(step = %id, position = self.order.len(), "sequential: completed step");
        Ok(Some(id))
    }

    /// Run until every step is complete.
    pub fn run(mut self) -> Result<CompletionOrder> {
        info!(
            steps = self.progress.remaining(),
            "sequential: starting run"
        );
        while self.next_step()?.is_some() {}

        let order = CompletionOrder { steps: self.order };
        info!(order = %order.as_string(), "sequential: run finished");
        Ok(order)
    }
}

/// Convenience wrapper: the completion order of `graph` as a string.
pub fn completion_order(graph: &TaskGraph) -> Result<String> {
    Ok(SequentialScheduler::new(graph).run()?.as_string())
}
