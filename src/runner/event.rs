use super::RunnerError;
use crate::config::StepEnv;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// The subset of the triggering event the step reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    inputs: Option<Map<String, Value>>,
}

impl EventPayload {
    /// Reads the event file named by `GITHUB_EVENT_PATH`. An unset variable
    /// or a missing file yields an empty payload.
    pub fn load(env: &StepEnv) -> Result<Self, RunnerError> {
        match env.var(EVENT_PATH_VAR) {
            Some(path) => Self::from_path(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, RunnerError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| RunnerError::ReadEvent {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RunnerError::ParseEvent {
            path: path.display().to_string(),
            source,
        })
    }

    /// Trimmed string value of a dispatch input.
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs
            .as_ref()?
            .get(name)?
            .as_str()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
