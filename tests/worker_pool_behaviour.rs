use std::error::Error;

use stepdag::dag::frontier::ready;
use stepdag::dag::{
    OrdinalDuration, SequentialScheduler, TaskState, WorkerPool, WorkerSlot, critical_path,
    elapsed_time,
};
use stepdag::errors::StepdagError;
use stepdag::types::TaskId;
use stepdag_test_utils::builders::{GraphFixture, id};
use stepdag_test_utils::fixtures::{SAMPLE_EDGES, sample_graph};
use stepdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn ids(s: &str) -> Vec<TaskId> {
    s.chars().map(id).collect()
}

#[test]
fn manual_ticks_follow_the_worked_example() -> TestResult {
    init_tracing();
    let graph = sample_graph()?;
    let mut pool = WorkerPool::new(&graph, 2, OrdinalDuration::new(0))?;

    assert_eq!(pool.begin()?, ids("C"));
    assert_eq!(pool.elapsed(), 0);
    // Second call is a no-op.
    assert!(pool.begin()?.is_empty());

    // C takes 3 ticks.
    for expected in 1..=2 {
        let r = pool.tick()?;
        assert_eq!(r.elapsed, expected);
        assert!(r.completed.is_empty());
        assert!(r.started.is_empty());
    }

    let r = pool.tick()?;
    assert_eq!(r.elapsed, 3);
    assert_eq!(r.completed, ids("C"));
    assert_eq!(pool.elapsed(), 3);
    assert_eq!(r.started, ids("AF"));
    assert_eq!(r.slots, vec![Some(id('A')), Some(id('F'))]);

    // A (1 tick) is done at once; B takes the freed first slot, D waits.
    let r = pool.tick()?;
    assert_eq!(r.completed, ids("A"));
    assert_eq!(r.started, ids("B"));
    assert_eq!(r.slots, vec![Some(id('B')), Some(id('F'))]);
    assert_eq!(ready(pool.progress(), &[]), ids("D"));

    pool.tick()?;
    let r = pool.tick()?;
    assert_eq!(r.elapsed, 6);
    assert_eq!(r.completed, ids("B"));
    assert_eq!(r.started, ids("D"));

    let mut last = r;
    while !last.finished {
        last = pool.tick()?;
    }
    assert_eq!(last.elapsed, 15);
    assert_eq!(pool.elapsed(), 15);
    assert_eq!(last.completed, ids("E"));
    assert!(pool.slots().iter().all(|s| *s == WorkerSlot::Idle));
    assert!(pool.is_finished());
    Ok(())
}

#[test]
fn task_assigned_at_t_with_duration_d_completes_at_t_plus_d() -> TestResult {
    // A -> B; A takes 1 tick, B takes 2.
    let graph = GraphFixture::new().edge('A', 'B').build();
    let mut pool = WorkerPool::new(&graph, 1, OrdinalDuration::new(0))?;

    pool.begin()?;
    let r = pool.tick()?;
    assert_eq!((r.elapsed, r.completed.clone(), r.started.clone()), (1, ids("A"), ids("B")));

    // B was assigned on tick 1, so it is not decremented until tick 2.
    let b = graph.require(id('B'))?;
    assert_eq!(pool.progress().state(b), TaskState::Running { remaining: 2 });

    let r = pool.tick()?;
    assert_eq!(r.elapsed, 2);
    assert!(r.completed.is_empty());

    let r = pool.tick()?;
    assert_eq!(r.elapsed, 3);
    assert_eq!(r.completed, ids("B"));
    assert!(r.finished);
    Ok(())
}

#[test]
fn single_worker_takes_the_sum_of_durations() -> TestResult {
    let graph = sample_graph()?;
    let model = OrdinalDuration::new(0);

    let sum: u64 = SequentialScheduler::new(&graph)
        .run()?
        .steps
        .iter()
        .map(|t| t.ordinal())
        .sum();
    assert_eq!(sum, 21);

    let outcome = WorkerPool::new(&graph, 1, model)?.run()?;
    assert_eq!(outcome.elapsed, sum);
    assert_eq!(outcome.order.as_string(), "CABDFE");
    Ok(())
}

#[test]
fn free_slots_go_to_alphabetically_first_candidates() -> TestResult {
    let graph = GraphFixture::new()
        .task('D')
        .task('B')
        .task('C')
        .task('A')
        .build();
    let mut pool = WorkerPool::new(&graph, 2, OrdinalDuration::new(0))?;

    assert_eq!(pool.begin()?, ids("AB"));
    assert_eq!(ready(pool.progress(), &[]), ids("CD"));

    // A (1 tick) frees slot 1 for C.
    let r = pool.tick()?;
    assert_eq!(r.completed, ids("A"));
    assert_eq!(r.started, ids("C"));
    assert_eq!(r.slots, vec![Some(id('C')), Some(id('B'))]);
    Ok(())
}

#[test]
fn more_workers_never_slow_down_the_sample() -> TestResult {
    let graph = sample_graph()?;

    for base in [0, 60] {
        let mut previous = u64::MAX;
        for workers in 1..=6 {
            let elapsed = elapsed_time(&graph, workers, OrdinalDuration::new(base))?;
            assert!(
                elapsed <= previous,
                "base {base}: {workers} workers took {elapsed}, fewer took {previous}"
            );
            previous = elapsed;
        }
    }

    assert_eq!(elapsed_time(&graph, 3, OrdinalDuration::new(0))?, 14);
    assert_eq!(elapsed_time(&graph, 2, OrdinalDuration::new(60))?, 258);
    Ok(())
}

#[test]
fn greedy_assignment_can_get_slower_with_an_extra_worker() -> TestResult {
    // Alphabetical list scheduling is not monotone in the worker count.
    let graph = GraphFixture::new()
        .edges(&[
            ('B', 'A'),
            ('B', 'F'),
            ('C', 'B'),
            ('C', 'F'),
            ('D', 'I'),
            ('E', 'A'),
            ('E', 'H'),
            ('F', 'D'),
        ])
        .task('G')
        .task('J')
        .build();
    let model = OrdinalDuration::new(60);

    assert_eq!(elapsed_time(&graph, 2, model)?, 331);
    assert_eq!(elapsed_time(&graph, 3, model)?, 332);
    assert_eq!(elapsed_time(&graph, 4, model)?, 324);
    Ok(())
}

#[test]
fn enough_workers_reach_the_critical_path() -> TestResult {
    let graph = sample_graph()?;
    let model = OrdinalDuration::new(0);

    let cp = critical_path(&graph, &model);
    assert_eq!(cp.length, 14);
    assert_eq!(cp.steps, ids("CFE"));
    assert_eq!(elapsed_time(&graph, graph.len(), model)?, cp.length);
    Ok(())
}

#[test]
fn custom_duration_functions_are_accepted() -> TestResult {
    let graph = GraphFixture::new().edges(SAMPLE_EDGES).build();

    // Every step takes 10 ticks: C, then A|F, then B|D, then E.
    let elapsed = elapsed_time(&graph, 2, |_: TaskId| 10_u64)?;
    assert_eq!(elapsed, 40);
    Ok(())
}

#[test]
fn zero_duration_counts_as_one_tick() -> TestResult {
    let graph = GraphFixture::new().edge('A', 'B').edge('B', 'C').build();

    assert_eq!(elapsed_time(&graph, 1, |_: TaskId| 0_u64)?, 3);
    Ok(())
}

#[test]
fn empty_graph_takes_no_time() -> TestResult {
    let graph = GraphFixture::new().build();
    let outcome = WorkerPool::new(&graph, 5, OrdinalDuration::new(60))?.run()?;
    assert_eq!(outcome.elapsed, 0);
    assert!(outcome.order.steps.is_empty());
    Ok(())
}

#[test]
fn zero_workers_is_a_config_error() {
    let graph = GraphFixture::new().task('A').build();

    match WorkerPool::new(&graph, 0, OrdinalDuration::new(0)) {
        Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("at least one worker")),
        other => panic!("Expected ConfigError, got: {:?}", other.map(|_| ())),
    }
}
