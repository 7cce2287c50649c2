use std::collections::BTreeSet;

use proptest::prelude::*;
use stepdag::dag::frontier::ready;
use stepdag::dag::{
    GraphBuilder, SequentialScheduler, TaskGraph, WorkerPool, critical_path, elapsed_time,
    Constraint,
};
use stepdag::types::TaskId;

fn letter(index: usize) -> TaskId {
    TaskId::new((b'A' + index as u8) as char).unwrap()
}

// Strategy to generate a random acyclic step graph plus per-step durations.
// Acyclicity comes from only keeping edges that go forward in a random
// ranking of the letters, so topological order and letter order differ.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = (TaskGraph, Vec<u64>)> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let ranking = Just((0..num_tasks).collect::<Vec<usize>>()).prop_shuffle();
        let raw_edges = proptest::collection::vec((0..num_tasks, 0..num_tasks), 0..(num_tasks * 2));
        let durations = proptest::collection::vec(1..20u64, num_tasks);

        (ranking, raw_edges, durations).prop_map(move |(ranking, raw_edges, durations)| {
            let mut builder = GraphBuilder::new();
            for i in 0..num_tasks {
                builder.add_task(letter(i));
            }
            for (a, b) in raw_edges {
                if a < b {
                    builder.add_constraint(Constraint::new(
                        letter(ranking[a]),
                        letter(ranking[b]),
                    ));
                }
            }
            let graph = builder.build().unwrap();
            (graph, durations)
        })
    })
}

proptest! {
    #[test]
    fn sequential_order_is_the_greedy_alphabetical_topological_order(
        (graph, _durations) in dag_strategy(12)
    ) {
        let order = SequentialScheduler::new(&graph).run().unwrap().steps;
        prop_assert_eq!(order.len(), graph.len());

        // Replay: each pick must be the smallest step whose prerequisites
        // are all already picked.
        let mut done: BTreeSet<TaskId> = BTreeSet::new();
        for &step in &order {
            let smallest_ready = graph
                .tasks()
                .filter(|t| !done.contains(t))
                .find(|&t| {
                    let h = graph.handle_of(t).unwrap();
                    graph
                        .prerequisites_of(h)
                        .iter()
                        .all(|&p| done.contains(&graph.id_of(p)))
                });
            prop_assert_eq!(Some(step), smallest_ready);
            done.insert(step);
        }
    }

    #[test]
    fn elapsed_time_stays_between_critical_path_and_total_work(
        (graph, durations) in dag_strategy(10),
        workers in 1..6usize,
    ) {
        let model = |t: TaskId| -> u64 { durations[t.ordinal() as usize - 1] };
        let total: u64 = durations.iter().sum();
        let cp = critical_path(&graph, &model).length;

        let single = elapsed_time(&graph, 1, model).unwrap();
        prop_assert_eq!(single, total);

        let elapsed = elapsed_time(&graph, workers, model).unwrap();
        prop_assert!(elapsed >= cp, "elapsed {} below critical path {}", elapsed, cp);
        prop_assert!(elapsed <= total);
        prop_assert!(elapsed * workers as u64 >= total);

        // With a worker per step everything starts as early as possible.
        prop_assert_eq!(elapsed_time(&graph, graph.len(), model).unwrap(), cp);
    }

    #[test]
    fn every_tick_respects_readiness_and_alphabetical_priority(
        (graph, durations) in dag_strategy(10),
        workers in 1..4usize,
    ) {
        let model = |t: TaskId| -> u64 { durations[t.ordinal() as usize - 1] };
        let mut pool = WorkerPool::new(&graph, workers, model).unwrap();

        let mut started = pool.begin().unwrap();
        let max_ticks = durations.iter().sum::<u64>() + 1;
        let mut ticks = 0;

        loop {
            let progress = pool.progress();

            for &step in &started {
                let h = graph.handle_of(step).unwrap();
                for &pre in graph.prerequisites_of(h) {
                    prop_assert!(progress.state(pre).is_done(), "{} started before a prerequisite", step);
                }
            }

            let waiting = ready(progress, &[]);
            if let Some(&first_waiting) = waiting.first() {
                prop_assert!(pool.slots().iter().all(|s| s.task().is_some()));
                for &step in &started {
                    prop_assert!(step < first_waiting);
                }
            }

            if pool.is_finished() {
                break;
            }
            ticks += 1;
            prop_assert!(ticks <= max_ticks, "simulation did not terminate");
            started = pool.tick().unwrap().started;
        }
    }

    #[test]
    fn runs_are_deterministic(
        (graph, durations) in dag_strategy(8),
        workers in 1..4usize,
    ) {
        let model = |t: TaskId| -> u64 { durations[t.ordinal() as usize - 1] };

        let a = WorkerPool::new(&graph, workers, model).unwrap().record_timeline().run().unwrap();
        let b = WorkerPool::new(&graph, workers, model).unwrap().record_timeline().run().unwrap();
        prop_assert_eq!(a, b);

        let first = SequentialScheduler::new(&graph).run().unwrap();
        let second = SequentialScheduler::new(&graph).run().unwrap();
        prop_assert_eq!(first, second);
    }
}
