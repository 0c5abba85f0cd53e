use std::collections::BTreeMap;

pub mod inputs;
pub mod paths;

pub use inputs::{ClientCredentials, StepInputs};
pub use paths::{temp_dir, token_file_path, TOKEN_FILE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("input `{0}` is required")]
    MissingInput(String),
    #[error("input `{name}` is invalid: {reason}")]
    InvalidInput { name: String, reason: String },
}

/// Snapshot of the variables a step runs with.
///
/// Commands receive this explicitly instead of reading the process
/// environment, so tests can drive them from plain key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct StepEnv {
    vars: BTreeMap<String, String>,
}

impl StepEnv {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Trimmed value of `key`; blank values count as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn input(&self, name: &str) -> Option<&str> {
        self.var(&input_env_key(name))
    }
}

/// Variable name the runner uses for step input `name`.
pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_ascii_uppercase())
}
