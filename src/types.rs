// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{Result, StepdagError};

/// Identifier of a single step: one uppercase ASCII letter.
///
/// Ordering is the natural letter ordering, which is also the tie-break
/// used by every scheduler in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(char);

impl TaskId {
    pub fn new(symbol: char) -> Result<Self> {
        if symbol.is_ascii_uppercase() {
            Ok(Self(symbol))
        } else {
            Err(StepdagError::InvalidSymbol(symbol))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// 1-based position in the alphabet: `A = 1`, ..., `Z = 26`.
    pub fn ordinal(self) -> u64 {
        u64::from(self.0 as u8 - b'A') + 1
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for TaskId {
    type Error = StepdagError;

    fn try_from(symbol: char) -> Result<Self> {
        Self::new(symbol)
    }
}

/// Named pair of scheduler settings.
///
/// - `Production`: 5 workers, 60 ticks added to every step.
/// - `Calibration`: 2 workers, no base duration. Reproduces the worked
///   example where `A` takes 1 tick and `Z` takes 26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Production,
    Calibration,
}

impl Preset {
    pub fn workers(self) -> usize {
        match self {
            Preset::Production => 5,
            Preset::Calibration => 2,
        }
    }

    pub fn base_duration(self) -> u64 {
        match self {
            Preset::Production => 60,
            Preset::Calibration => 0,
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Production
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Preset::Production),
            "calibration" => Ok(Preset::Calibration),
            other => Err(format!(
                "invalid preset: {other} (expected \"production\" or \"calibration\")"
            )),
        }
    }
}
