use super::RunnerError;
use crate::config::StepEnv;
use crate::shared::logging::workflow_command;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";
const DELIMITER_PREFIX: &str = "ghadelimiter_";

/// Destination for step outputs: the runner's output file when one is
/// configured, otherwise `::set-output` commands on stdout.
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    file: Option<PathBuf>,
}

impl StepOutputs {
    pub fn from_env(env: &StepEnv) -> Self {
        Self {
            file: env.var(OUTPUT_FILE_VAR).map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), RunnerError> {
        if name.trim().is_empty() {
            return Err(RunnerError::InvalidOutput {
                name: name.to_string(),
                reason: "output name must be non-empty".to_string(),
            });
        }
        let Some(path) = &self.file else {
            println!();
            println!("{}", workflow_command("set-output", &[("name", name)], value));
            return Ok(());
        };

        let entry = render_file_output(name, value, &random_delimiter())?;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(entry.as_bytes()))
            .map_err(|source| RunnerError::WriteOutput {
                name: name.to_string(),
                path: path.display().to_string(),
                source,
            })
    }
}

/// One heredoc-style entry of the runner's output file.
pub fn render_file_output(name: &str, value: &str, delimiter: &str) -> Result<String, RunnerError> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(RunnerError::InvalidOutput {
            name: name.to_string(),
            reason: format!("value contains the delimiter `{delimiter}`"),
        });
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

fn random_delimiter() -> String {
    let mut bytes = [0u8; 16];
    if getrandom::getrandom(&mut bytes).is_err() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        bytes = (nanos ^ u128::from(std::process::id())).to_le_bytes();
    }
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{DELIMITER_PREFIX}{hex}")
}

/// Parses an output file back into `(name, value)` pairs in write order.
pub fn parse_output_file(raw: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut lines = raw.lines();
    while let Some(line) = lines.next() {
        if let Some((name, delimiter)) = line.split_once("<<") {
            let mut value_lines = Vec::new();
            for value_line in lines.by_ref() {
                if value_line == delimiter {
                    break;
                }
                value_lines.push(value_line);
            }
            entries.push((name.to_string(), value_lines.join("\n")));
        } else if let Some((name, value)) = line.split_once('=') {
            entries.push((name.to_string(), value.to_string()));
        }
    }
    entries
}
