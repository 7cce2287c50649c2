// src/dag/critical_path.rs

//! Duration-weighted longest path through the DAG.
//!
//! No schedule, however many workers it has, can finish before the
//! critical path does.

use crate::dag::duration::{DurationModel, effective_duration};
use crate::dag::graph::{TaskGraph, TaskHandle};
use crate::types::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    /// Sum of step durations along `steps`.
    pub length: u64,
    /// Steps on the path, source first.
    pub steps: Vec<TaskId>,
}

/// Longest source-to-sink path of `graph` under `duration`.
///
/// When several prerequisites finish at the same latest time, the
/// alphabetically first one is taken, so the reported path is stable.
pub fn critical_path<D: DurationModel + ?Sized>(graph: &TaskGraph, duration: &D) -> CriticalPath {
    let mut finish = vec![0u64; graph.len()];
    let mut via: Vec<Option<TaskHandle>> = vec![None; graph.len()];

    for &h in graph.topological_order() {
        let mut start = 0;
        for &pre in graph.prerequisites_of(h) {
            if via[h.index()].is_none() || finish[pre.index()] > start {
                start = finish[pre.index()];
                via[h.index()] = Some(pre);
            }
        }
        finish[h.index()] = start + effective_duration(duration, graph.id_of(h));
    }

    let Some(end) = graph
        .handles()
        .max_by(|a, b| finish[a.index()].cmp(&finish[b.index()]).then(b.cmp(a)))
    else {
        return CriticalPath {
            length: 0,
            steps: Vec::new(),
        };
    };

    let mut steps = vec![graph.id_of(end)];
    let mut cursor = end;
    while let Some(prev) = via[cursor.index()] {
        steps.push(graph.id_of(prev));
        cursor = prev;
    }
    steps.reverse();

    CriticalPath {
        length: finish[end.index()],
        steps,
    }
}
