use anyhow::Result;
use stepdag::dag::{GraphBuilder, TaskGraph};
use stepdag::input::parse_constraints;

/// The seven-record worked example.
pub const SAMPLE_RECORDS: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

/// Edges of [`SAMPLE_RECORDS`] as letter pairs.
pub const SAMPLE_EDGES: &[(char, char)] = &[
    ('C', 'A'),
    ('C', 'F'),
    ('A', 'B'),
    ('A', 'D'),
    ('B', 'E'),
    ('D', 'E'),
    ('F', 'E'),
];

/// Parse records and build the graph in one go.
pub fn graph_from_records(records: &str) -> Result<TaskGraph> {
    let constraints = parse_constraints(records)?;
    Ok(GraphBuilder::from_constraints(constraints).build()?)
}

/// The worked example graph.
pub fn sample_graph() -> Result<TaskGraph> {
    graph_from_records(SAMPLE_RECORDS)
}
