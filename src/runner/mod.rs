use crate::shared::ErrorKind;

pub mod context;
pub mod event;
pub mod outputs;

pub use context::RunnerContext;
pub use event::EventPayload;
pub use outputs::StepOutputs;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("environment variable `{0}` is required")]
    MissingEnv(String),
    #[error("environment variable `{key}` has invalid value `{value}`: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },
    #[error("failed to read event payload {path}: {source}")]
    ReadEvent {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse event payload {path}: {source}")]
    ParseEvent {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write step output `{name}` to {path}: {source}")]
    WriteOutput {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("step output `{name}` cannot be written: {reason}")]
    InvalidOutput { name: String, reason: String },
}

impl RunnerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunnerError::MissingEnv(_)
            | RunnerError::InvalidEnv { .. }
            | RunnerError::InvalidOutput { .. } => ErrorKind::Configuration,
            RunnerError::ParseEvent { .. } => ErrorKind::MalformedPayload,
            RunnerError::ReadEvent { .. } | RunnerError::WriteOutput { .. } => ErrorKind::Io,
        }
    }
}
