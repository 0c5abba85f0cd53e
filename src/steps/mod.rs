//! Normalization of the `steps` input.
//!
//! Three encodings are accepted and yield the same ordered list:
//!
//! * a JSON array: `[{"id":"a","displayName":"Step A"}]`
//! * comma-joined JSON objects without brackets: `{"id":"a"},{"id":"b"}`
//! * a YAML-like list of `id` / `displayName` pairs
//!
//! Entries that cannot be read as a step are dropped and reported back to
//! the caller. Only a broken top-level JSON document fails the whole input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod json;
pub mod yaml;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    pub id: String,
    pub display_name: String,
}

impl StepDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StepsError {
    #[error("invalid steps input: {0}")]
    InvalidSteps(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepsEncoding {
    Empty,
    JsonArray,
    JsonFragments,
    YamlList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSteps {
    pub steps: Vec<StepDescriptor>,
    /// One human-readable reason per dropped entry.
    pub dropped: Vec<String>,
}

pub fn detect_encoding(raw: &str) -> StepsEncoding {
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() {
        StepsEncoding::Empty
    } else if trimmed.starts_with('[') {
        StepsEncoding::JsonArray
    } else if trimmed.starts_with('{') {
        StepsEncoding::JsonFragments
    } else {
        StepsEncoding::YamlList
    }
}

pub fn parse_steps(raw: &str) -> Result<NormalizedSteps, StepsError> {
    let mut normalized = NormalizedSteps::default();
    let entries = match detect_encoding(raw) {
        StepsEncoding::Empty => return Ok(normalized),
        StepsEncoding::JsonArray => json::parse_array(raw)?,
        StepsEncoding::JsonFragments => json::parse_fragments(raw)?,
        StepsEncoding::YamlList => {
            let list = yaml::parse_list(raw);
            normalized.dropped.extend(list.dropped);
            list.entries
        }
    };

    for (index, entry) in entries.iter().enumerate() {
        match step_from_value(entry) {
            Ok(step) => normalized.steps.push(step),
            Err(reason) => normalized
                .dropped
                .push(format!("entry {}: {reason}", index + 1)),
        }
    }
    Ok(normalized)
}

pub fn normalize_steps(raw: &str) -> Result<Vec<StepDescriptor>, StepsError> {
    parse_steps(raw).map(|normalized| normalized.steps)
}

pub(crate) fn step_from_value(value: &Value) -> Result<StepDescriptor, String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => {
            Ok(StepDescriptor::new(text.trim(), text.trim()))
        }
        Value::Object(fields) => step_from_fields(fields),
        other => Err(format!("expected a step object, got `{other}`")),
    }
}

fn step_from_fields(fields: &Map<String, Value>) -> Result<StepDescriptor, String> {
    let id = fields
        .get("id")
        .and_then(scalar_text)
        .ok_or_else(|| "step has no `id`".to_string())?;
    let display_name = ["displayName", "display_name", "name"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(scalar_text))
        .unwrap_or_else(|| id.clone());
    Ok(StepDescriptor { id, display_name })
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    Some(text).filter(|text| !text.is_empty())
}
