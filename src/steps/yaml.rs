use serde_json::{Map, Value};

#[derive(Debug, Default)]
pub struct YamlList {
    pub entries: Vec<Value>,
    pub dropped: Vec<String>,
}

/// Reads a YAML-like list of steps.
///
/// Valid YAML sequences go through `serde_yaml`. Text that is not valid
/// YAML (unbalanced quotes, tabs, stray colons) is read line by line.
pub fn parse_list(raw: &str) -> YamlList {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => YamlList {
            entries,
            dropped: Vec::new(),
        },
        _ => scan_lines(raw),
    }
}

fn scan_lines(raw: &str) -> YamlList {
    let mut list = YamlList::default();
    let mut current: Option<Value> = None;

    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (starts_entry, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };
        if starts_entry {
            list.entries.extend(current.take());
            if rest.is_empty() {
                current = Some(Value::Object(Map::new()));
                continue;
            }
        }

        match rest.split_once(':') {
            Some((key, value)) => {
                let entry = current.get_or_insert_with(|| Value::Object(Map::new()));
                match entry {
                    Value::Object(fields) => {
                        fields.insert(key.trim().to_string(), Value::String(unquote(value)));
                    }
                    _ => list
                        .dropped
                        .push(format!("line {}: `{trimmed}` follows a plain entry", index + 1)),
                }
            }
            None if starts_entry => current = Some(Value::String(unquote(rest))),
            None => list
                .dropped
                .push(format!("line {}: `{trimmed}` is not a `key: value` pair", index + 1)),
        }
    }
    list.entries.extend(current);
    list
}

fn unquote(raw: &str) -> String {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            let inner = &value[1..value.len() - 1];
            return if quote == '"' {
                inner.replace("\\\"", "\"")
            } else {
                inner.replace("''", "'")
            };
        }
    }
    value.to_string()
}
