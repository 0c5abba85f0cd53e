use super::RunnerError;
use crate::config::StepEnv;

pub const RUN_ID_VAR: &str = "GITHUB_RUN_ID";
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
pub const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Identity of the workflow run the step executes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerContext {
    pub run_id: u64,
    pub owner: String,
    pub repo: String,
    pub server_url: String,
}

impl RunnerContext {
    pub fn from_env(env: &StepEnv) -> Result<Self, RunnerError> {
        let raw_run_id = env
            .var(RUN_ID_VAR)
            .ok_or_else(|| RunnerError::MissingEnv(RUN_ID_VAR.to_string()))?;
        let run_id = raw_run_id
            .parse::<u64>()
            .map_err(|e| RunnerError::InvalidEnv {
                key: RUN_ID_VAR.to_string(),
                value: raw_run_id.to_string(),
                reason: e.to_string(),
            })?;

        let repository = env
            .var(REPOSITORY_VAR)
            .ok_or_else(|| RunnerError::MissingEnv(REPOSITORY_VAR.to_string()))?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| RunnerError::InvalidEnv {
                key: REPOSITORY_VAR.to_string(),
                value: repository.to_string(),
                reason: "expected `owner/repo`".to_string(),
            })?;

        let server_url = env
            .var(SERVER_URL_VAR)
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            run_id,
            owner: owner.to_string(),
            repo: repo.to_string(),
            server_url,
        })
    }

    pub fn external_run_url(&self) -> String {
        format!(
            "{}/{}/{}/actions/runs/{}",
            self.server_url, self.owner, self.repo, self.run_id
        )
    }
}
