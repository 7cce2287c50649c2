// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::dag::OrdinalDuration;
use crate::types::Preset;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [scheduler]
/// preset = "calibration"
/// workers = 3
/// base_duration = 10
///
/// [input]
/// path = "input/steps.txt"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub input: InputSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub scheduler: SchedulerSection,
    pub input: InputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(scheduler: SchedulerSection, input: InputSection) -> Self {
        Self { scheduler, input }
    }
}

/// `[scheduler]` section.
///
/// Explicit `workers` / `base_duration` values win over the preset.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchedulerSection {
    /// `"production"` (default) or `"calibration"`.
    #[serde(default)]
    pub preset: Preset,

    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default)]
    pub base_duration: Option<u64>,
}

impl SchedulerSection {
    /// Settings from this section alone: explicit fields, then the preset.
    pub fn settings(&self) -> SchedulerSettings {
        let from_preset = SchedulerSettings::from_preset(self.preset);
        SchedulerSettings {
            workers: self.workers.unwrap_or(from_preset.workers),
            base_duration: self.base_duration.unwrap_or(from_preset.base_duration),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InputSection {
    /// File containing `Step X must be finished before step Y can begin.`
    /// records.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Fully resolved worker-pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub workers: usize,
    pub base_duration: u64,
}

impl SchedulerSettings {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            workers: preset.workers(),
            base_duration: preset.base_duration(),
        }
    }

    pub fn duration_model(&self) -> OrdinalDuration {
        OrdinalDuration::new(self.base_duration)
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}
