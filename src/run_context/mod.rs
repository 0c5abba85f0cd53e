use crate::config::inputs::{INPUT_BB_RUN_UUID, INPUT_BUILDING_BLOCK_RUN};
use crate::config::{ConfigError, StepInputs};
use crate::credential::CredentialRecord;
use crate::meshstack::{run_url, ApiError, BuildingBlockRun, MeshApiClient};
use crate::runner::EventPayload;
use crate::shared::ErrorKind;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use uuid::Uuid;

pub mod inputs;

pub use inputs::{extract_inputs, publish_inputs};

#[derive(Debug, thiserror::Error)]
pub enum RunContextError {
    #[error("malformed buildingBlockRun payload: {0}")]
    MalformedPayload(String),
    #[error(
        "no building block run available: provide the `buildingBlockRunUrl` input, the `base_url` and `bb_run_uuid` inputs, a `buildingBlockRun` event payload, or run `login` for the run first"
    )]
    NoSource,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("token file holds an invalid bbRunUuid: {0}")]
    CachedRunUuid(String),
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

impl RunContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunContextError::MalformedPayload(_) | RunContextError::NoSource => {
                ErrorKind::MalformedPayload
            }
            RunContextError::Config(_) => ErrorKind::Configuration,
            RunContextError::CachedRunUuid(_) => ErrorKind::InvalidCredential,
            RunContextError::Fetch(err) => err.kind(),
        }
    }
}

/// Where the building block run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSource {
    /// Base64 encoded run JSON handed over by the dispatching workflow.
    Payload(String),
    /// Run resource to fetch with the bearer token.
    Url(String),
}

impl RunSource {
    /// Picks the source from step inputs, the event and the cached login
    /// record. A run URL input wins over a uuid, which wins over an event
    /// payload; the base URL and run uuid cached by `login` come last.
    pub fn resolve(
        inputs: &StepInputs,
        event: &EventPayload,
        cached: Option<&CredentialRecord>,
    ) -> Result<Option<Self>, RunContextError> {
        if let Some(url) = &inputs.building_block_run_url {
            return Ok(Some(RunSource::Url(url.clone())));
        }
        if let (Some(base_url), Some(raw_uuid)) = (&inputs.base_url, &inputs.bb_run_uuid) {
            let uuid = Uuid::parse_str(raw_uuid).map_err(|e| ConfigError::InvalidInput {
                name: INPUT_BB_RUN_UUID.to_string(),
                reason: format!("`{raw_uuid}` is not a valid uuid: {e}"),
            })?;
            return Ok(Some(RunSource::Url(run_url(base_url, &uuid))));
        }
        let payload = event
            .input(INPUT_BUILDING_BLOCK_RUN)
            .map(str::to_string)
            .or_else(|| inputs.building_block_run.clone());
        if let Some(payload) = payload {
            return Ok(Some(RunSource::Payload(payload)));
        }
        let Some((base_url, raw_uuid)) = cached.and_then(|record| {
            Some((record.base_url.as_deref()?, record.bb_run_uuid.as_deref()?))
        }) else {
            return Ok(None);
        };
        let uuid = Uuid::parse_str(raw_uuid)
            .map_err(|e| RunContextError::CachedRunUuid(format!("`{raw_uuid}`: {e}")))?;
        Ok(Some(RunSource::Url(run_url(
            base_url.trim_end_matches('/'),
            &uuid,
        ))))
    }

    pub fn mode(&self) -> &'static str {
        match self {
            RunSource::Payload(_) => "payload",
            RunSource::Url(_) => "url",
        }
    }
}

pub fn decode_run_payload(encoded: &str) -> Result<BuildingBlockRun, RunContextError> {
    let compact: String = encoded.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(RunContextError::MalformedPayload(
            "payload is empty".to_string(),
        ));
    }
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| RunContextError::MalformedPayload(format!("invalid base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| RunContextError::MalformedPayload(format!("invalid utf-8: {e}")))?;
    serde_json::from_str(&text)
        .map_err(|e| RunContextError::MalformedPayload(format!("invalid run json: {e}")))
}

pub fn encode_run_payload<T: Serialize>(run: &T) -> Result<String, RunContextError> {
    let json = serde_json::to_vec(run)
        .map_err(|e| RunContextError::MalformedPayload(format!("failed to encode run: {e}")))?;
    Ok(STANDARD.encode(json))
}

/// Produces the run for `source`. Fetching uses `token`; a payload is
/// decoded locally. Nothing is retried.
pub fn load_run(
    source: &RunSource,
    client: &MeshApiClient,
    token: &str,
) -> Result<BuildingBlockRun, RunContextError> {
    match source {
        RunSource::Payload(encoded) => decode_run_payload(encoded),
        RunSource::Url(url) => Ok(client.fetch_run(url, token)?),
    }
}
