use crate::app::command_support::{
    decode_payload_source, login_and_cache, login_base_url, resolve_run, OUTPUT_TOKEN_FILE,
};
use crate::config::{StepEnv, StepInputs};
use crate::credential::CredentialStore;
use crate::meshstack::{BuildingBlockRun, MeshApiClient};
use crate::run_context::{publish_inputs, RunSource};
use crate::runner::{EventPayload, StepOutputs};
use crate::shared::ActionError;

pub fn cmd_login(env: &StepEnv) -> Result<String, ActionError> {
    let inputs = StepInputs::from_env(env);
    let credentials = inputs.require_client_credentials()?;
    let event = EventPayload::load(env)?;
    let source = RunSource::resolve(&inputs, &event, None)?;
    let decoded = decode_payload_source(source.as_ref())?;

    let base_url = login_base_url(&inputs, decoded.as_ref().and_then(BuildingBlockRun::base_url))?;
    let bb_run_uuid = decoded
        .as_ref()
        .map(|run| run.uuid().to_string())
        .or_else(|| inputs.bb_run_uuid.clone());

    let client = MeshApiClient::new();
    let store = CredentialStore::in_temp_dir(env);
    let outputs = StepOutputs::from_env(env);
    let token = login_and_cache(&client, &store, &base_url, &credentials, bb_run_uuid)?;
    outputs.set(OUTPUT_TOKEN_FILE, &store.path().display().to_string())?;

    let mut lines = vec![
        "login=ok".to_string(),
        format!("base_url={base_url}"),
        format!("token_file={}", store.path().display()),
    ];
    if let Some(source) = source {
        let run = resolve_run(&source, decoded, &client, &token)?;
        let values = publish_inputs(run.inputs(), &outputs)?;
        lines.push(format!("bb_run_uuid={}", run.uuid()));
        lines.push(format!("inputs={}", values.len()));
    }
    Ok(lines.join("\n"))
}
