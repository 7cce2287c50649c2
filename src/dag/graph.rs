// src/dag/graph.rs

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

/// Stable index of a task inside a [`TaskGraph`].
///
/// Handles are assigned in ascending [`TaskId`] order, so comparing handles
/// gives the same answer as comparing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(usize);

impl TaskHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single "must finish before" constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    pub prerequisite: TaskId,
    pub dependent: TaskId,
}

impl Constraint {
    pub fn new(prerequisite: TaskId, dependent: TaskId) -> Self {
        Self {
            prerequisite,
            dependent,
        }
    }
}

/// Internal node structure: stores immediate prerequisites and dependents.
#[derive(Debug, Clone)]
struct TaskNode {
    id: TaskId,
    /// Tasks that must finish before this one can start.
    prerequisites: Vec<TaskHandle>,
    /// Tasks that list this one as a prerequisite.
    dependents: Vec<TaskHandle>,
}

/// Collects constraints and produces a validated [`TaskGraph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    tasks: BTreeSet<TaskId>,
    edges: BTreeSet<Constraint>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with an ordered sequence of constraints.
    pub fn from_constraints<I>(constraints: I) -> Self
    where
        I: IntoIterator<Item = Constraint>,
    {
        let mut builder = Self::new();
        for c in constraints {
            builder.add_constraint(c);
        }
        builder
    }

    /// Record `prerequisite -> dependent`. Re-adding an existing edge is a
    /// no-op.
    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.tasks.insert(constraint.prerequisite);
        self.tasks.insert(constraint.dependent);
        if !self.edges.insert(constraint) {
            warn!(
                prerequisite = %constraint.prerequisite,
                dependent = %constraint.dependent,
                "duplicate constraint ignored"
            );
        }
        self
    }

    /// Declare a task that may have no constraints at all.
    pub fn add_task(&mut self, id: TaskId) -> &mut Self {
        self.tasks.insert(id);
        self
    }

    /// Validate acyclicity and freeze the graph.
    pub fn build(&self) -> Result<TaskGraph> {
        let mut nodes: Vec<TaskNode> = self
            .tasks
            .iter()
            .map(|&id| TaskNode {
                id,
                prerequisites: Vec::new(),
                dependents: Vec::new(),
            })
            .collect();

        let index: HashMap<TaskId, TaskHandle> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, TaskHandle(i)))
            .collect();

        // Edge direction: prerequisite -> dependent.
        let mut check: DiGraphMap<usize, ()> = DiGraphMap::new();
        for i in 0..nodes.len() {
            check.add_node(i);
        }

        // `edges` is a BTreeSet, so adjacency lists come out sorted.
        for edge in &self.edges {
            let pre = index[&edge.prerequisite];
            let dep = index[&edge.dependent];
            if pre == dep {
                return Err(StepdagError::DagCycle(format!(
                    "step '{}' cannot depend on itself",
                    edge.prerequisite
                )));
            }
            nodes[pre.0].dependents.push(dep);
            nodes[dep.0].prerequisites.push(pre);
            check.add_edge(pre.0, dep.0, ());
        }

        let topo = match toposort(&check, None) {
            Ok(order) => order.into_iter().map(TaskHandle).collect(),
            Err(cycle) => {
                return Err(StepdagError::DagCycle(format!(
                    "cycle detected in step DAG involving step '{}'",
                    nodes[cycle.node_id()].id
                )));
            }
        };

        debug!(
            tasks = nodes.len(),
            edges = self.edges.len(),
            "built step DAG"
        );

        Ok(TaskGraph { nodes, index, topo })
    }
}

/// Immutable DAG of steps, stored as an arena indexed by [`TaskHandle`].
///
/// Per-run mutation (which steps are done, which are running) lives in
/// [`crate::dag::Progress`]; the graph itself never changes after build.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    index: HashMap<TaskId, TaskHandle>,
    /// A topological order of all handles.
    topo: Vec<TaskHandle>,
}

impl TaskGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn handle_of(&self, id: TaskId) -> Option<TaskHandle> {
        self.index.get(&id).copied()
    }

    /// Like [`TaskGraph::handle_of`], but unknown ids are an error.
    pub fn require(&self, id: TaskId) -> Result<TaskHandle> {
        self.handle_of(id)
            .ok_or_else(|| StepdagError::TaskNotFound(id.to_string()))
    }

    pub fn id_of(&self, handle: TaskHandle) -> TaskId {
        self.nodes[handle.0].id
    }

    pub fn handles(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        (0..self.nodes.len()).map(TaskHandle)
    }

    /// All step ids, ascending.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Immediate prerequisites, ascending.
    pub fn prerequisites_of(&self, handle: TaskHandle) -> &[TaskHandle] {
        &self.nodes[handle.0].prerequisites
    }

    /// Immediate dependents, ascending.
    pub fn dependents_of(&self, handle: TaskHandle) -> &[TaskHandle] {
        &self.nodes[handle.0].dependents
    }

    /// Steps without prerequisites, ascending.
    pub fn roots(&self) -> Vec<TaskId> {
        self.nodes
            .iter()
            .filter(|n| n.prerequisites.is_empty())
            .map(|n| n.id)
            .collect()
    }

    pub fn topological_order(&self) -> &[TaskHandle] {
        &self.topo
    }
}
