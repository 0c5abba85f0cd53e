use crate::config::inputs::INPUT_BASE_URL;
use crate::config::{ClientCredentials, ConfigError, StepInputs};
use crate::credential::{CredentialError, CredentialRecord, CredentialStore};
use crate::meshstack::{BuildingBlockRun, MeshApiClient};
use crate::run_context::{decode_run_payload, load_run, RunContextError, RunSource};
use crate::shared::logging::{log_event, mask_value, LogLevel};
use crate::shared::ActionError;

pub(crate) const OUTPUT_RESPONSE: &str = "response";
pub(crate) const OUTPUT_TOKEN_FILE: &str = "token_file";

/// Decodes a payload source up front; it may carry the default login host.
pub(crate) fn decode_payload_source(
    source: Option<&RunSource>,
) -> Result<Option<BuildingBlockRun>, RunContextError> {
    match source {
        Some(RunSource::Payload(encoded)) => decode_run_payload(encoded).map(Some),
        _ => Ok(None),
    }
}

pub(crate) fn resolve_run(
    source: &RunSource,
    decoded: Option<BuildingBlockRun>,
    client: &MeshApiClient,
    token: &str,
) -> Result<BuildingBlockRun, ActionError> {
    if let Some(run) = decoded {
        return Ok(run);
    }
    let run = load_run(source, client, token)?;
    log_event(
        LogLevel::Debug,
        "run",
        &format!("loaded building block run {} via {}", run.uuid(), source.mode()),
    );
    Ok(run)
}

pub(crate) fn login_base_url(
    inputs: &StepInputs,
    default_base_url: Option<&str>,
) -> Result<String, ConfigError> {
    inputs
        .base_url
        .clone()
        .or_else(|| default_base_url.map(str::to_string))
        .ok_or_else(|| ConfigError::MissingInput(INPUT_BASE_URL.to_string()))
}

pub(crate) fn login_and_cache(
    client: &MeshApiClient,
    store: &CredentialStore,
    base_url: &str,
    credentials: &ClientCredentials,
    bb_run_uuid: Option<String>,
) -> Result<String, ActionError> {
    log_event(
        LogLevel::Info,
        "login",
        &format!(
            "logging in to {base_url} as client {}",
            credentials.client_id
        ),
    );
    let token = client.login(base_url, credentials)?;
    mask_value(&token);
    let record = CredentialRecord::new(token.clone())
        .with_base_url(Some(base_url.to_string()))
        .with_run_uuid(bb_run_uuid);
    store.save(&record)?;
    log_event(
        LogLevel::Info,
        "login",
        &format!("token written to {}", store.path().display()),
    );
    Ok(token)
}

/// Token for API calls: the `token` input, else the cached token file,
/// else a fresh login when client credentials are available.
pub(crate) fn acquire_token(
    inputs: &StepInputs,
    store: &CredentialStore,
    client: &MeshApiClient,
    default_base_url: Option<&str>,
    bb_run_uuid: Option<String>,
) -> Result<String, ActionError> {
    if let Some(token) = &inputs.token {
        mask_value(token);
        log_event(LogLevel::Debug, "credential", "using token from step input");
        return Ok(token.clone());
    }

    match store.load() {
        Ok(record) => {
            log_event(
                LogLevel::Debug,
                "credential",
                &format!("loaded token from {}", store.path().display()),
            );
            Ok(record.token)
        }
        Err(missing @ CredentialError::Missing { .. }) => {
            let Some(credentials) = inputs.client_credentials() else {
                return Err(missing.into());
            };
            let base_url = login_base_url(inputs, default_base_url)?;
            login_and_cache(client, store, &base_url, &credentials, bb_run_uuid)
        }
        Err(err) => Err(err.into()),
    }
}
