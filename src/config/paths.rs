use super::StepEnv;
use std::path::PathBuf;

pub const TOKEN_FILE_NAME: &str = "meshstack_token.json";
pub const RUNNER_TEMP_VAR: &str = "RUNNER_TEMP";

pub fn temp_dir(env: &StepEnv) -> PathBuf {
    env.var(RUNNER_TEMP_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

pub fn token_file_path(env: &StepEnv) -> PathBuf {
    temp_dir(env).join(TOKEN_FILE_NAME)
}
