use crate::shared::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod store;

pub use store::{CredentialStore, DeleteOutcome};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("token file does not exist at {path}")]
    Missing { path: String },
    #[error("invalid token file {path}: {reason}")]
    Invalid { path: String, reason: String },
    #[error("failed to read token file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write token file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete token file {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode token file {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CredentialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::Missing { .. } => ErrorKind::CredentialMissing,
            CredentialError::Invalid { .. } | CredentialError::Encode { .. } => {
                ErrorKind::InvalidCredential
            }
            CredentialError::Read { .. }
            | CredentialError::Write { .. }
            | CredentialError::Delete { .. } => ErrorKind::Io,
        }
    }
}

/// Contents of the cached token file. Fields other than the known ones are
/// kept so a rewrite does not drop context added by other tooling.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_run_uuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialRecord {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_run_uuid(mut self, bb_run_uuid: Option<String>) -> Self {
        self.bb_run_uuid = bb_run_uuid;
        self
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("bb_run_uuid", &self.bb_run_uuid)
            .field("extra", &self.extra)
            .finish()
    }
}
