// src/dag/progress.rs

//! Per-run state transitions for steps in a [`TaskGraph`].

use tracing::debug;

use crate::dag::graph::{TaskGraph, TaskHandle};
use crate::dag::state::TaskState;
use crate::types::TaskId;

/// Mutable view of one run over an immutable [`TaskGraph`].
///
/// Retiring a step is the equivalent of deleting it from the graph: it
/// stops counting as an outstanding prerequisite of every dependent, and
/// dependents whose count reaches zero become [`TaskState::Ready`].
#[derive(Debug, Clone)]
pub struct Progress<'g> {
    graph: &'g TaskGraph,
    states: Vec<TaskState>,
    /// Prerequisites not yet retired, per step.
    outstanding: Vec<usize>,
    /// Steps not yet `Done`.
    remaining: usize,
}

impl<'g> Progress<'g> {
    pub fn new(graph: &'g TaskGraph) -> Self {
        let outstanding: Vec<usize> = graph
            .handles()
            .map(|h| graph.prerequisites_of(h).len())
            .collect();

        let states = outstanding
            .iter()
            .map(|&n| {
                if n == 0 {
                    TaskState::Ready
                } else {
                    TaskState::Pending
                }
            })
            .collect();

        Self {
            graph,
            states,
            outstanding,
            remaining: graph.len(),
        }
    }

    pub fn graph(&self) -> &'g TaskGraph {
        self.graph
    }

    pub fn state(&self, handle: TaskHandle) -> TaskState {
        self.states[handle.index()]
    }

    /// State by step id, or `None` if the step is not in the graph.
    pub fn state_of(&self, id: TaskId) -> Option<TaskState> {
        self.graph.handle_of(id).map(|h| self.state(h))
    }

    /// Number of prerequisites of `handle` that have not been retired.
    pub fn outstanding_prerequisites(&self, handle: TaskHandle) -> usize {
        self.outstanding[handle.index()]
    }

    /// Steps not yet retired.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    /// Hand a ready step to a worker for `duration` ticks.
    pub fn start(&mut self, handle: TaskHandle, duration: u64) {
        debug_assert!(self.state(handle).is_ready());
        self.states[handle.index()] = TaskState::Running {
            remaining: duration,
        };
    }

    /// Advance a running step by one tick and return the ticks left.
    ///
    /// A step started with a zero duration still finishes on its first
    /// decrement.
    pub fn decrement(&mut self, handle: TaskHandle) -> u64 {
        match &mut self.states[handle.index()] {
            TaskState::Running { remaining } => {
                *remaining = remaining.saturating_sub(1);
                *remaining
            }
            other => {
                debug_assert!(false, "decrement on non-running step: {other:?}");
                0
            }
        }
    }

    /// Mark a step `Done` and release its dependents.
    ///
    /// Returns the dependents that became ready as a result, ascending.
    pub fn retire(&mut self, handle: TaskHandle) -> Vec<TaskHandle> {
        if self.state(handle).is_done() {
            return Vec::new();
        }

        self.states[handle.index()] = TaskState::Done;
        self.remaining -= 1;

        let graph = self.graph;
        let mut newly_ready = Vec::new();
        for &dep in graph.dependents_of(handle) {
            let count = &mut self.outstanding[dep.index()];
            *count -= 1;
            if *count == 0 && self.states[dep.index()] == TaskState::Pending {
                self.states[dep.index()] = TaskState::Ready;
                newly_ready.push(dep);
            }
        }

        debug!(
            step = %graph.id_of(handle),
            newly_ready = newly_ready.len(),
            remaining = self.remaining,
            "retired step"
        );

        newly_ready
    }
}
