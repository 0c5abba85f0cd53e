//! Client for the meshStack building block run API.

use crate::shared::ErrorKind;

pub mod client;
pub mod http;
pub mod run;

pub use client::{run_url, MeshApiClient, RUN_MEDIA_TYPE};
pub use run::{BuildingBlockRun, Link, RunInput};

/// Failures of the HTTP layer, independent of the client library in use.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("{url} responded with status {status}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },
    #[error("unexpected response from {url}: {reason}")]
    UnexpectedBody { url: String, reason: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::NetworkError,
            ApiError::Upstream { .. } => ErrorKind::UpstreamError,
            ApiError::UnexpectedBody { .. } => ErrorKind::MalformedPayload,
        }
    }
}
