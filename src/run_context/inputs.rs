use crate::meshstack::RunInput;
use crate::runner::{RunnerError, StepOutputs};
use crate::shared::logging::{log_event, mask_value, LogLevel};
use std::collections::BTreeMap;

/// Flattens run inputs into `key -> value`. A repeated key keeps its last value.
pub fn extract_inputs(inputs: &[RunInput]) -> BTreeMap<String, String> {
    inputs
        .iter()
        .map(|input| (input.key.clone(), input.value_text()))
        .collect()
}

/// Writes every run input as a step output, masking sensitive values first.
/// Keys that cannot name an output are skipped with a warning.
pub fn publish_inputs(
    inputs: &[RunInput],
    outputs: &StepOutputs,
) -> Result<BTreeMap<String, String>, RunnerError> {
    for input in inputs.iter().filter(|input| input.is_sensitive) {
        mask_value(&input.value_text());
    }
    let mut values = extract_inputs(inputs);
    values.retain(|key, _| {
        let usable = is_output_name(key);
        if !usable {
            log_event(
                LogLevel::Warning,
                "inputs",
                &format!("skipping run input with unusable key {key:?}"),
            );
        }
        usable
    });
    for (key, value) in &values {
        outputs.set(key, value)?;
    }
    Ok(values)
}

fn is_output_name(key: &str) -> bool {
    !key.trim().is_empty() && !key.contains(['\n', '\r'])
}
