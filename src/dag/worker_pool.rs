// src/dag/worker_pool.rs

//! Discrete-time simulation of a fixed pool of workers.
//!
//! Every tick does, in order:
//! 1. decrement every busy slot by one;
//! 2. free slots whose step reached zero;
//! 3. retire those steps in one batch (possibly readying dependents);
//! 4. fill free slots, in slot order, with the alphabetically first ready
//!    steps;
//! 5. advance the clock.
//!
//! An initial assignment runs at time 0 before the first tick. A step
//! assigned at tick `T` with duration `d` therefore completes on tick
//! `T + d`, and is never decremented in the tick that assigned it.

use tracing::{debug, info};

use crate::dag::duration::{DurationModel, effective_duration};
use crate::dag::frontier::ready_handles;
use crate::dag::graph::{TaskGraph, TaskHandle};
use crate::dag::progress::Progress;
use crate::dag::sequential::CompletionOrder;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// One simulated worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerSlot {
    #[default]
    Idle,
    Busy(TaskHandle),
}

impl WorkerSlot {
    pub fn task(self) -> Option<TaskHandle> {
        match self {
            WorkerSlot::Idle => None,
            WorkerSlot::Busy(h) => Some(h),
        }
    }
}

/// What changed during a single [`WorkerPool::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Clock value after the tick.
    pub elapsed: u64,
    /// Steps retired this tick, ascending.
    pub completed: Vec<TaskId>,
    /// Steps handed to a worker this tick, in slot order.
    pub started: Vec<TaskId>,
    /// Occupancy of every slot after assignment.
    pub slots: Vec<Option<TaskId>>,
    /// Whether the simulation is now finished.
    pub finished: bool,
}

/// Occupancy of every worker during one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub second: u64,
    pub workers: Vec<Option<TaskId>>,
    /// Steps completed before this second began.
    pub done: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    pub workers: usize,
    pub rows: Vec<TimelineRow>,
}

/// Final result of a pool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOutcome {
    /// Total ticks until every step completed.
    pub elapsed: u64,
    /// Steps in the order they completed.
    pub order: CompletionOrder,
    /// Present when recording was enabled via [`WorkerPool::record_timeline`].
    pub timeline: Option<Timeline>,
}

#[derive(Debug)]
pub struct WorkerPool<'g, D> {
    progress: Progress<'g>,
    slots: Vec<WorkerSlot>,
    duration: D,
    elapsed: u64,
    completed: Vec<TaskId>,
    timeline: Option<Timeline>,
    started: bool,
}

impl<'g, D: DurationModel> WorkerPool<'g, D> {
    pub fn new(graph: &'g TaskGraph, workers: usize, duration: D) -> Result<Self> {
        if workers == 0 {
            return Err(StepdagError::ConfigError(
                "worker pool needs at least one worker (got 0)".to_string(),
            ));
        }

        Ok(Self {
            progress: Progress::new(graph),
            slots: vec![WorkerSlot::Idle; workers],
            duration,
            elapsed: 0,
            completed: Vec::with_capacity(graph.len()),
            timeline: None,
            started: false,
        })
    }

    /// Record per-second worker occupancy while running.
    pub fn record_timeline(mut self) -> Self {
        self.timeline = Some(Timeline {
            workers: self.slots.len(),
            rows: Vec::new(),
        });
        self
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn progress(&self) -> &Progress<'g> {
        &self.progress
    }

    pub fn slots(&self) -> &[WorkerSlot] {
        &self.slots
    }

    /// `true` once every step is retired and every slot is idle.
    pub fn is_finished(&self) -> bool {
        self.progress.is_drained() && self.slots.iter().all(|s| *s == WorkerSlot::Idle)
    }

    /// Run the time-0 assignment. Idempotent; [`WorkerPool::tick`] calls it
    /// on first use.
    pub fn begin(&mut self) -> Result<Vec<TaskId>> {
        if self.started {
            return Ok(Vec::new());
        }
        self.started = true;

        info!(
            steps = self.progress.remaining(),
            workers = self.slots.len(),
            "worker pool: starting simulation"
        );

        let started = self.assign();
        self.check_not_stalled()?;
        self.record_row();
        Ok(started)
    }

    /// Advance the simulation by exactly one tick.
    pub fn tick(&mut self) -> Result<TickReport> {
        self.begin()?;

        // Decrement + complete.
        let mut finished: Vec<TaskHandle> = Vec::new();
        for slot in self.slots.iter_mut() {
            if let WorkerSlot::Busy(h) = *slot {
                if self.progress.decrement(h) == 0 {
                    finished.push(h);
                    *slot = WorkerSlot::Idle;
                }
            }
        }

        // Retire as one batch.
        finished.sort();
        for &h in &finished {
            self.progress.retire(h);
        }
        let graph = self.progress.graph();
        let completed: Vec<TaskId> = finished.iter().map(|&h| graph.id_of(h)).collect();
        self.completed.extend(completed.iter().copied());

        let started = self.assign();

        self.elapsed += 1;

        if !completed.is_empty() || !started.is_empty() {
            debug!(
                elapsed = self.elapsed,
                completed = %ids_to_string(&completed),
                started = %ids_to_string(&started),
                "worker pool: tick"
            );
        }

        self.check_not_stalled()?;
        self.record_row();

        Ok(TickReport {
            elapsed: self.elapsed,
            completed,
            started,
            slots: self.slot_ids(),
            finished: self.is_finished(),
        })
    }

    /// Tick until every step is complete.
    pub fn run(mut self) -> Result<PoolOutcome> {
        self.begin()?;
        while !self.is_finished() {
            self.tick()?;
        }

        info!(
            elapsed = self.elapsed,
            order = %ids_to_string(&self.completed),
            "worker pool: simulation finished"
        );

        Ok(PoolOutcome {
            elapsed: self.elapsed,
            order: CompletionOrder {
                steps: self.completed,
            },
            timeline: self.timeline,
        })
    }

    /// Fill idle slots, in slot order, with the first ready steps.
    fn assign(&mut self) -> Vec<TaskId> {
        // Running steps are not `Ready`, so they are already excluded.
        let mut ready = ready_handles(&self.progress, &[]).into_iter();
        let mut started = Vec::new();

        for slot in self.slots.iter_mut() {
            if *slot != WorkerSlot::Idle {
                continue;
            }
            let Some(h) = ready.next() else {
                break;
            };

            debug_assert_eq!(self.progress.outstanding_prerequisites(h), 0);

            let id = self.progress.graph().id_of(h);
            let ticks = effective_duration(&self.duration, id);
            self.progress.start(h, ticks);
            *slot = WorkerSlot::Busy(h);
            started.push(id);
        }

        started
    }

    /// Idle workers, nothing ready and steps left means a cycle slipped in.
    fn check_not_stalled(&self) -> Result<()> {
        let all_idle = self.slots.iter().all(|s| *s == WorkerSlot::Idle);
        if all_idle && !self.progress.is_drained() {
            return Err(StepdagError::Stalled {
                remaining: self.progress.remaining(),
            });
        }
        Ok(())
    }

    fn slot_ids(&self) -> Vec<Option<TaskId>> {
        let graph = self.progress.graph();
        self.slots
            .iter()
            .map(|s| s.task().map(|h| graph.id_of(h)))
            .collect()
    }

    fn record_row(&mut self) {
        let workers = self.slot_ids();
        let done = ids_to_string(&self.completed);
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.rows.push(TimelineRow {
                second: self.elapsed,
                workers,
                done,
            });
        }
    }
}

fn ids_to_string(ids: &[TaskId]) -> String {
    ids.iter().map(|id| id.as_char()).collect()
}

/// Convenience wrapper: total ticks for `workers` workers under `duration`.
pub fn elapsed_time<D: DurationModel>(graph: &TaskGraph, workers: usize, duration: D) -> Result<u64> {
    Ok(WorkerPool::new(graph, workers, duration)?.run()?.elapsed)
}
