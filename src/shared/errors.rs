use crate::config::ConfigError;
use crate::credential::CredentialError;
use crate::meshstack::ApiError;
use crate::run_context::RunContextError;
use crate::runner::RunnerError;
use crate::steps::StepsError;

/// Coarse classification used for reporting a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialMissing,
    InvalidCredential,
    MalformedPayload,
    NetworkError,
    UpstreamError,
    InvalidSteps,
    Configuration,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::CredentialMissing => "credential_missing",
            ErrorKind::InvalidCredential => "invalid_credential",
            ErrorKind::MalformedPayload => "malformed_payload",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::InvalidSteps => "invalid_steps",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    RunContext(#[from] RunContextError),
    #[error(transparent)]
    Steps(#[from] StepsError),
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Usage(_) | ActionError::Config(_) => ErrorKind::Configuration,
            ActionError::Runner(err) => err.kind(),
            ActionError::Credential(err) => err.kind(),
            ActionError::Api(err) => err.kind(),
            ActionError::RunContext(err) => err.kind(),
            ActionError::Steps(_) => ErrorKind::InvalidSteps,
        }
    }
}
