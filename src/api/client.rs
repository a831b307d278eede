//! Profile provisioning client
//!
//! One request-response exchange per creation attempt. The client never
//! retries; whether a failed ordinal gets another attempt is the
//! orchestrator's decision, and today it never does.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::types::{ProfileCreationRequest, ProfileHandle, RemoteError};
use super::REQUEST_TIMEOUT;

/// Default base URL of the hosted provisioning API.
pub const DEFAULT_API_URL: &str = "https://api.profile-forge.app";
/// Profile collection path under the base URL.
const PROFILES_PATH: &str = "/browser_profiles";

/// Errors raised while constructing the client, before any remote work.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API token is missing")]
    TokenMissing,

    #[error("invalid API URL {url}: {reason}")]
    BadUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// Client for the remote profile service.
pub struct ProfileApiClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ProfileApiClient {
    /// Build a client against the given service endpoint.
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, ClientError> {
        if api_token.is_empty() {
            return Err(ClientError::TokenMissing);
        }

        reqwest::Url::parse(base_url).map_err(|e| ClientError::BadUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Submit one creation request. Exactly one attempt per call.
    pub async fn create_profile(
        &self,
        request: &ProfileCreationRequest,
    ) -> Result<ProfileHandle, RemoteError> {
        let url = format!("{}{}", self.base_url, PROFILES_PATH);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_send_error)?;
        debug!("create_profile response: status={}, {} bytes", status, body.len());

        evaluate_response(status, &body)
    }
}

fn classify_send_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Transport(error.to_string())
    }
}

/// Decide the outcome of one exchange.
///
/// Success is status 200 or 201 with the nested `data` payload, or the raw
/// body when `data` is absent. Everything else carries the service-provided
/// `message`, falling back to the protocol status text. 5xx statuses get no
/// special handling here; surfacing them is the orchestrator's job.
fn evaluate_response(status: StatusCode, body: &str) -> Result<ProfileHandle, RemoteError> {
    let document: Option<Value> = serde_json::from_str(body).ok();

    if status == StatusCode::OK || status == StatusCode::CREATED {
        let payload = match document {
            Some(json) => json.get("data").cloned().unwrap_or(json),
            None => Value::String(body.to_string()),
        };
        return Ok(ProfileHandle::from_payload(payload));
    }

    let message = document
        .as_ref()
        .and_then(|json| json.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_unwraps_nested_data() {
        let body = r#"{"success": true, "data": {"id": 42, "title": "profile_1"}}"#;
        let handle = evaluate_response(StatusCode::OK, body).expect("success");
        assert_eq!(handle.id, Some(42));
        assert_eq!(handle.payload["title"], "profile_1");
    }

    #[test]
    fn test_success_without_data_uses_raw_body() {
        let body = r#"{"id": 7, "title": "profile_3"}"#;
        let handle = evaluate_response(StatusCode::CREATED, body).expect("success");
        assert_eq!(handle.id, Some(7));
    }

    #[test]
    fn test_success_with_non_json_body_is_still_success() {
        let handle = evaluate_response(StatusCode::OK, "created").expect("success");
        assert_eq!(handle.id, None);
        assert_eq!(handle.payload, Value::String("created".to_string()));
    }

    #[test]
    fn test_business_error_carries_service_message() {
        let body = r#"{"success": false, "message": "duplicate title"}"#;
        let err = evaluate_response(StatusCode::UNPROCESSABLE_ENTITY, body).expect_err("rejected");
        match err {
            RemoteError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "duplicate title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_without_message_falls_back_to_status_text() {
        let err = evaluate_response(StatusCode::NOT_FOUND, "").expect_err("rejected");
        match err {
            RemoteError::Rejected { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_server_errors_surface_like_any_rejection() {
        let body = r#"{"message": "internal error"}"#;
        let err = evaluate_response(StatusCode::INTERNAL_SERVER_ERROR, body).expect_err("rejected");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_redirect_status_is_not_success() {
        let err = evaluate_response(StatusCode::FOUND, "").expect_err("rejected");
        assert_eq!(err.status_code(), Some(302));
    }

    #[test]
    fn test_empty_token_rejected_at_construction() {
        assert!(matches!(
            ProfileApiClient::new(DEFAULT_API_URL, ""),
            Err(ClientError::TokenMissing)
        ));
    }

    #[test]
    fn test_invalid_base_url_rejected_at_construction() {
        assert!(matches!(
            ProfileApiClient::new("not a url", "token"),
            Err(ClientError::BadUrl { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client =
            ProfileApiClient::new("https://api.example.com/", "token").expect("client builds");
        assert_eq!(client.base_url, "https://api.example.com");
    }
}
