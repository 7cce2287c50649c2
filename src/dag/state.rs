// src/dag/state.rs

//! Per-run state of a single step.

/// Where a step is in its lifecycle for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// At least one prerequisite has not been retired yet.
    Pending,
    /// All prerequisites retired; waiting for a worker.
    Ready,
    /// Held by a worker slot with `remaining` ticks left.
    Running { remaining: u64 },
    /// Retired. Dependents no longer wait on it.
    Done,
}

impl TaskState {
    pub fn is_ready(self) -> bool {
        matches!(self, TaskState::Ready)
    }

    pub fn is_done(self) -> bool {
        matches!(self, TaskState::Done)
    }
}
