use super::http::{bearer, decode_json, read_body};
use super::{ApiError, BuildingBlockRun};
use crate::config::ClientCredentials;
use crate::report::{status_source_url, StatusReportRequest};
use serde::Deserialize;
use uuid::Uuid;

pub const RUN_MEDIA_TYPE: &str = "application/vnd.meshcloud.api.meshbuildingblockrun.v1.hal+json";
const LOGIN_PATH: &str = "/api/login";
const RUNS_PATH: &str = "/api/meshobjects/meshbuildingblockruns";
const USER_AGENT: &str = concat!("meshstack-action/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: String,
}

/// Blocking meshStack client. Each call is a single request; failures are
/// returned as-is and never retried.
#[derive(Debug, Clone)]
pub struct MeshApiClient {
    agent: ureq::Agent,
}

impl Default for MeshApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshApiClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    /// Client-credentials login; returns the bearer token.
    pub fn login(
        &self,
        base_url: &str,
        credentials: &ClientCredentials,
    ) -> Result<String, ApiError> {
        let url = format!("{}{LOGIN_PATH}", base_url.trim_end_matches('/'));
        let result = self.agent.post(&url).send_form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ]);
        let body = read_body(&url, result)?;
        let login: LoginResponse = decode_json(&url, &body)?;
        if login.access_token.trim().is_empty() {
            return Err(ApiError::UnexpectedBody {
                url,
                reason: "login response has no access_token".to_string(),
            });
        }
        Ok(login.access_token)
    }

    pub fn fetch_run(&self, run_url: &str, token: &str) -> Result<BuildingBlockRun, ApiError> {
        let result = self
            .agent
            .get(run_url)
            .set("Accept", RUN_MEDIA_TYPE)
            .set("Authorization", &bearer(token))
            .call();
        let body = read_body(run_url, result)?;
        decode_json(run_url, &body)
    }

    /// Posts the status report for `run` and returns the raw response body.
    pub fn register_source(
        &self,
        run: &BuildingBlockRun,
        token: &str,
        request: &StatusReportRequest,
    ) -> Result<String, ApiError> {
        let url = status_source_url(run);
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", RUN_MEDIA_TYPE)
            .set("Accept", RUN_MEDIA_TYPE)
            .set("Authorization", &bearer(token))
            .send_json(request);
        read_body(&url, result)
    }
}

/// Resource URL of a run addressed by uuid.
pub fn run_url(base_url: &str, uuid: &Uuid) -> String {
    format!("{}{RUNS_PATH}/{uuid}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_joins_base_and_uuid() {
        let uuid = Uuid::parse_str("b3116611-e08b-4b00-91c5-10365b25a6ef").expect("uuid");
        assert_eq!(
            run_url("https://mesh.example.com/", &uuid),
            "https://mesh.example.com/api/meshobjects/meshbuildingblockruns/b3116611-e08b-4b00-91c5-10365b25a6ef"
        );
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("reserve port")
            .port();
        let client = MeshApiClient::new();
        let err = client
            .fetch_run(&format!("http://127.0.0.1:{port}/api/run"), "tok")
            .expect_err("listener is closed");
        assert!(matches!(err, ApiError::Network { .. }), "unexpected: {err}");
    }
}
