use super::ApiError;
use serde::de::DeserializeOwned;

/// Collapses a ureq outcome into the response body or an [`ApiError`].
/// Non-2xx responses keep their status and body for diagnostics.
pub(crate) fn read_body(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<String, ApiError> {
    match result {
        Ok(response) => response.into_string().map_err(|e| ApiError::Network {
            url: url.to_string(),
            reason: format!("failed to read response body: {e}"),
        }),
        Err(ureq::Error::Status(status, response)) => Err(ApiError::Upstream {
            url: url.to_string(),
            status,
            body: response.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Network {
            url: url.to_string(),
            reason: transport.to_string(),
        }),
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::UnexpectedBody {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
