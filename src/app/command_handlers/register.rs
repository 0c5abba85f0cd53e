use crate::app::command_support::{
    acquire_token, decode_payload_source, resolve_run, OUTPUT_RESPONSE, OUTPUT_TOKEN_FILE,
};
use crate::config::{StepEnv, StepInputs};
use crate::credential::CredentialStore;
use crate::meshstack::{ApiError, BuildingBlockRun, MeshApiClient};
use crate::report::{build_status_report, status_source_url};
use crate::run_context::{publish_inputs, RunContextError, RunSource};
use crate::runner::{EventPayload, RunnerContext, StepOutputs};
use crate::shared::logging::{log_debug_detail, log_event, LogLevel};
use crate::shared::ActionError;
use crate::steps::parse_steps;
use serde_json::json;

pub fn cmd_register(env: &StepEnv) -> Result<String, ActionError> {
    let inputs = StepInputs::from_env(env);
    let context = RunnerContext::from_env(env)?;
    let event = EventPayload::load(env)?;
    let store = CredentialStore::in_temp_dir(env);
    // An unreadable cache only matters once a token is needed.
    let cached = store.load().ok();
    let source =
        RunSource::resolve(&inputs, &event, cached.as_ref())?.ok_or(RunContextError::NoSource)?;
    log_event(
        LogLevel::Debug,
        "register",
        &format!("building block run source: {}", source.mode()),
    );
    let decoded = decode_payload_source(Some(&source))?;

    let client = MeshApiClient::new();
    let outputs = StepOutputs::from_env(env);
    let token = acquire_token(
        &inputs,
        &store,
        &client,
        decoded.as_ref().and_then(BuildingBlockRun::base_url),
        decoded.as_ref().map(|run| run.uuid().to_string()),
    )?;

    let run = resolve_run(&source, decoded, &client, &token)?;
    let values = publish_inputs(run.inputs(), &outputs)?;

    let normalized = parse_steps(inputs.steps.as_deref().unwrap_or_default())?;
    for reason in &normalized.dropped {
        log_event(
            LogLevel::Warning,
            "steps",
            &format!("ignoring unreadable step {reason}"),
        );
    }
    let step_count = normalized.steps.len();
    let request = build_status_report(&context, normalized.steps);
    let url = status_source_url(&run);
    if let Ok(detail) = serde_json::to_value(&request) {
        log_debug_detail("register.request", &json!({ "url": url, "body": detail }));
    }

    let response = client
        .register_source(&run, &token, &request)
        .inspect_err(|err| {
            if let ApiError::Upstream { status, body, .. } = err {
                log_debug_detail(
                    "register.failed",
                    &json!({ "url": url, "status": status, "body": body }),
                );
            }
        })?;
    outputs.set(OUTPUT_RESPONSE, &response)?;
    if store.path().is_file() {
        outputs.set(OUTPUT_TOKEN_FILE, &store.path().display().to_string())?;
    }
    log_event(
        LogLevel::Notice,
        "register",
        &format!(
            "registered run {} with building block run {}",
            context.run_id,
            run.uuid()
        ),
    );

    Ok([
        "register_source=ok".to_string(),
        format!("bb_run_uuid={}", run.uuid()),
        format!("status_url={url}"),
        format!("external_run_url={}", context.external_run_url()),
        format!("steps={step_count}"),
        format!("inputs={}", values.len()),
    ]
    .join("\n"))
}
