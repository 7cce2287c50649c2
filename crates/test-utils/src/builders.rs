#![allow(dead_code)]

use stepdag::config::{ConfigFile, InputSection, RawConfigFile, SchedulerSection};
use stepdag::dag::{Constraint, GraphBuilder, TaskGraph};
use stepdag::types::{Preset, TaskId};

/// Builder for `TaskGraph` from letter pairs, to simplify test setup.
pub struct GraphFixture {
    builder: GraphBuilder,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self {
            builder: GraphBuilder::new(),
        }
    }

    /// Add `before -> after`.
    pub fn edge(mut self, before: char, after: char) -> Self {
        self.builder.add_constraint(Constraint::new(id(before), id(after)));
        self
    }

    pub fn edges(mut self, pairs: &[(char, char)]) -> Self {
        for &(before, after) in pairs {
            self = self.edge(before, after);
        }
        self
    }

    /// Add a step with no constraints.
    pub fn task(mut self, step: char) -> Self {
        self.builder.add_task(id(step));
        self
    }

    pub fn build(self) -> TaskGraph {
        self.builder
            .build()
            .expect("Failed to build valid graph from fixture")
    }
}

impl Default for GraphFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                scheduler: SchedulerSection::default(),
                input: InputSection::default(),
            },
        }
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.config.scheduler.preset = preset;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.scheduler.workers = Some(workers);
        self
    }

    pub fn base_duration(mut self, base: u64) -> Self {
        self.config.scheduler.base_duration = Some(base);
        self
    }

    pub fn input(mut self, path: &str) -> Self {
        self.config.input.path = Some(path.into());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a `TaskId` in tests.
pub fn id(step: char) -> TaskId {
    TaskId::new(step).expect("test step must be an uppercase letter")
}
