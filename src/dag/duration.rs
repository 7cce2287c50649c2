// src/dag/duration.rs

//! How long a step occupies a worker.

use crate::types::TaskId;

/// Maps a step to the number of ticks it keeps a worker busy.
///
/// Implemented by [`OrdinalDuration`] and by any `Fn(TaskId) -> u64`, so
/// tests can plug in arbitrary timings. A duration of `0` is treated as a
/// single tick by the schedulers.
pub trait DurationModel {
    fn duration(&self, id: TaskId) -> u64;
}

/// `base_duration + ordinal(id)`: with a base of 60, `A` takes 61 ticks and
/// `Z` takes 86.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalDuration {
    pub base_duration: u64,
}

impl OrdinalDuration {
    pub fn new(base_duration: u64) -> Self {
        Self { base_duration }
    }
}

impl DurationModel for OrdinalDuration {
    fn duration(&self, id: TaskId) -> u64 {
        self.base_duration + id.ordinal()
    }
}

impl<F> DurationModel for F
where
    F: Fn(TaskId) -> u64,
{
    fn duration(&self, id: TaskId) -> u64 {
        self(id)
    }
}

/// Effective ticks for `id` under `model`.
pub(crate) fn effective_duration<D: DurationModel + ?Sized>(model: &D, id: TaskId) -> u64 {
    model.duration(id).max(1)
}
