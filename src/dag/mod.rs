// src/dag/mod.rs

//! DAG representation and scheduling.
//!
//! - [`graph`] builds and holds the immutable step DAG.
//! - [`state`] and [`progress`] track per-run step state.
//! - [`frontier`] computes which steps are ready to start.
//! - [`sequential`] completes steps one at a time, alphabetically.
//! - [`worker_pool`] simulates several workers ticking in lockstep.
//! - [`duration`] and [`critical_path`] deal with step timings.

pub mod critical_path;
pub mod duration;
pub mod frontier;
pub mod graph;
pub mod progress;
pub mod sequential;
pub mod state;
pub mod worker_pool;

pub use critical_path::{CriticalPath, critical_path};
pub use duration::{DurationModel, OrdinalDuration};
pub use graph::{Constraint, GraphBuilder, TaskGraph, TaskHandle};
pub use progress::Progress;
pub use sequential::{CompletionOrder, SequentialScheduler, completion_order};
pub use state::TaskState;
pub use worker_pool::{
    PoolOutcome, TickReport, Timeline, TimelineRow, WorkerPool, WorkerSlot, elapsed_time,
};
