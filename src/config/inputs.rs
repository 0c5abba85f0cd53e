use super::{ConfigError, StepEnv};

pub const INPUT_BASE_URL: &str = "base_url";
pub const INPUT_BB_RUN_UUID: &str = "bb_run_uuid";
pub const INPUT_STEPS: &str = "steps";
pub const INPUT_TOKEN: &str = "token";
pub const INPUT_CLIENT_ID: &str = "client_id";
pub const INPUT_KEY_SECRET: &str = "key_secret";
pub const INPUT_BUILDING_BLOCK_RUN_URL: &str = "buildingBlockRunUrl";
pub const INPUT_BUILDING_BLOCK_RUN: &str = "buildingBlockRun";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInputs {
    pub base_url: Option<String>,
    pub bb_run_uuid: Option<String>,
    pub steps: Option<String>,
    pub token: Option<String>,
    pub client_id: Option<String>,
    pub key_secret: Option<String>,
    pub building_block_run_url: Option<String>,
    pub building_block_run: Option<String>,
}

impl StepInputs {
    pub fn from_env(env: &StepEnv) -> Self {
        let input = |name: &str| env.input(name).map(str::to_string);
        Self {
            base_url: input(INPUT_BASE_URL).map(|url| url.trim_end_matches('/').to_string()),
            bb_run_uuid: input(INPUT_BB_RUN_UUID),
            steps: input(INPUT_STEPS),
            token: input(INPUT_TOKEN),
            client_id: input(INPUT_CLIENT_ID),
            key_secret: input(INPUT_KEY_SECRET),
            building_block_run_url: input(INPUT_BUILDING_BLOCK_RUN_URL),
            building_block_run: input(INPUT_BUILDING_BLOCK_RUN),
        }
    }

    pub fn client_credentials(&self) -> Option<ClientCredentials> {
        match (&self.client_id, &self.key_secret) {
            (Some(client_id), Some(client_secret)) => Some(ClientCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        }
    }

    pub fn require_client_credentials(&self) -> Result<ClientCredentials, ConfigError> {
        if self.client_id.is_none() {
            return Err(ConfigError::MissingInput(INPUT_CLIENT_ID.to_string()));
        }
        self.client_credentials()
            .ok_or_else(|| ConfigError::MissingInput(INPUT_KEY_SECRET.to_string()))
    }
}

/// API key pair for the client-credentials login.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
