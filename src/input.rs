// src/input.rs

//! Parsing of step constraint records.
//!
//! Each non-blank line must read
//! `Step X must be finished before step Y can begin.`

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use regex::Regex;
use tracing::debug;

use crate::dag::Constraint;
use crate::errors::{Result, StepdagError};
use crate::types::TaskId;

const RECORD_PATTERN: &str =
    r"^Step (\S) must be finished before step (\S) can begin\.$";

/// Line-oriented parser for constraint records.
#[derive(Debug, Clone)]
pub struct ConstraintParser {
    record: Regex,
}

impl ConstraintParser {
    pub fn new() -> Result<Self> {
        let record = Regex::new(RECORD_PATTERN)
            .map_err(|e| StepdagError::Other(anyhow!("invalid record pattern: {e}")))?;
        Ok(Self { record })
    }

    /// Parse a single record. `line` is the 1-based line number used in
    /// error messages.
    pub fn parse_line(&self, line: usize, text: &str) -> Result<Constraint> {
        let text = text.trim();
        let caps = self.record.captures(text).ok_or_else(|| StepdagError::Parse {
            line,
            message: format!("expected `Step X must be finished before step Y can begin.`, got {text:?}"),
        })?;

        let prerequisite = symbol(line, &caps[1])?;
        let dependent = symbol(line, &caps[2])?;
        Ok(Constraint::new(prerequisite, dependent))
    }

    /// Parse every non-blank line of `input`, keeping input order.
    pub fn parse(&self, input: &str) -> Result<Vec<Constraint>> {
        let mut constraints = Vec::new();
        for (i, text) in input.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            constraints.push(self.parse_line(i + 1, text)?);
        }
        debug!(count = constraints.len(), "parsed constraint records");
        Ok(constraints)
    }
}

fn symbol(line: usize, s: &str) -> Result<TaskId> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => TaskId::new(c).map_err(|e| StepdagError::Parse {
            line,
            message: e.to_string(),
        }),
        _ => Err(StepdagError::Parse {
            line,
            message: format!("expected a single-letter step, got {s:?}"),
        }),
    }
}

/// Parse constraint records from a string.
pub fn parse_constraints(input: &str) -> Result<Vec<Constraint>> {
    ConstraintParser::new()?.parse(input)
}

/// Read and parse a constraint file.
pub fn load_constraints(path: impl AsRef<Path>) -> Result<Vec<Constraint>> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_constraints(&contents)
}
