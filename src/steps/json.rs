use super::StepsError;
use serde_json::Value;

pub fn parse_array(raw: &str) -> Result<Vec<Value>, StepsError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(StepsError::InvalidSteps(format!(
            "expected a JSON array of steps, got `{other}`"
        ))),
        Err(err) => Err(StepsError::InvalidSteps(format!("malformed JSON: {err}"))),
    }
}

/// `{..},{..}` without the surrounding brackets.
pub fn parse_fragments(raw: &str) -> Result<Vec<Value>, StepsError> {
    let trimmed = raw.trim().trim_end_matches(',');
    parse_array(&format!("[{trimmed}]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_array_document_is_rejected() {
        let err = parse_array(r#"{"id":"a"}"#).expect_err("object");
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn trailing_comma_between_fragments_is_tolerated() {
        let entries = parse_fragments("{\"id\":\"a\"},\n{\"id\":\"b\"},\n").expect("fragments");
        assert_eq!(entries.len(), 2);
    }
}
