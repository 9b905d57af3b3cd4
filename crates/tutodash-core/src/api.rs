//! REST client for the tutorial collection.
//!
//! `TutorialApi` is the seam the controller talks through, so tests can drive
//! the dashboard with an in-memory fake. `HttpTutorialApi` is the production
//! implementation: reqwest against `{base_url}/tutorials`, JSON bodies, and
//! error normalization down to one human-readable string for the UI.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::model::{Tutorial, TutorialDraft};

/// Shown when no better error text is available.
pub const FALLBACK_ERROR: &str = "Unexpected error. Please try again.";

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a call can produce.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. `message` is the structured field from the JSON
    /// error body when the backend provided one.
    #[error("server returned {status}")]
    Server {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// One display string for the dashboard, from any error shape. Structured
    /// server message first, then the underlying error text, then a generic
    /// fallback. Never fails.
    pub fn display_message(&self) -> String {
        let text = match self {
            ApiError::Server { status, message } => message
                .clone()
                .unwrap_or_else(|| format!("Request failed with status {status}")),
            ApiError::Transport(err) => err.to_string(),
            ApiError::Decode(detail) => detail.clone(),
        };
        let text = text.trim();
        if text.is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// The five logical operations (plus single-record fetch) the dashboard needs.
#[async_trait]
pub trait TutorialApi: Send + Sync {
    /// Full snapshot, optionally filtered by title. Blank filters are treated
    /// as absent.
    async fn list(&self, title_filter: Option<&str>) -> ApiResult<Vec<Tutorial>>;

    /// Published records only.
    async fn list_published(&self) -> ApiResult<Vec<Tutorial>>;

    /// Single record by id. In the client surface though the current UI does
    /// not call it.
    async fn get(&self, id: i64) -> ApiResult<Tutorial>;

    async fn create(&self, draft: &TutorialDraft) -> ApiResult<Tutorial>;

    async fn update(&self, id: i64, draft: &TutorialDraft) -> ApiResult<Tutorial>;

    async fn delete(&self, id: i64) -> ApiResult<()>;

    async fn delete_all(&self) -> ApiResult<()>;
}

/// Production client: shared reqwest client, 10 s timeout, JSON throughout.
pub struct HttpTutorialApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTutorialApi {
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: config.base_url.clone(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status line; on failure parses the body for a structured
    /// `message` field so the normalized error carries it.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty());
        Err(ApiError::Server { status, message })
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn read_ack(response: reqwest::Response) -> ApiResult<()> {
        Self::check(response).await.map(|_| ())
    }
}

#[async_trait]
impl TutorialApi for HttpTutorialApi {
    async fn list(&self, title_filter: Option<&str>) -> ApiResult<Vec<Tutorial>> {
        let mut request = self.client.get(self.url("/tutorials"));
        if let Some(filter) = title_filter.map(str::trim).filter(|f| !f.is_empty()) {
            request = request.query(&[("title", filter)]);
        }
        tracing::debug!(filter = title_filter.unwrap_or_default(), "GET /tutorials");
        Self::read_json(request.send().await?).await
    }

    async fn list_published(&self) -> ApiResult<Vec<Tutorial>> {
        tracing::debug!("GET /tutorials/published");
        let response = self
            .client
            .get(self.url("/tutorials/published"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get(&self, id: i64) -> ApiResult<Tutorial> {
        tracing::debug!(id, "GET /tutorials/:id");
        let response = self
            .client
            .get(self.url(&format!("/tutorials/{id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create(&self, draft: &TutorialDraft) -> ApiResult<Tutorial> {
        tracing::debug!(title = %draft.title, "POST /tutorials");
        let response = self
            .client
            .post(self.url("/tutorials"))
            .json(draft)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update(&self, id: i64, draft: &TutorialDraft) -> ApiResult<Tutorial> {
        tracing::debug!(id, title = %draft.title, "PUT /tutorials/:id");
        let response = self
            .client
            .put(self.url(&format!("/tutorials/{id}")))
            .json(draft)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        tracing::debug!(id, "DELETE /tutorials/:id");
        let response = self
            .client
            .delete(self.url(&format!("/tutorials/{id}")))
            .send()
            .await?;
        Self::read_ack(response).await
    }

    async fn delete_all(&self) -> ApiResult<()> {
        tracing::debug!("DELETE /tutorials");
        let response = self.client.delete(self.url("/tutorials")).send().await?;
        Self::read_ack(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_server_message_wins() {
        let err = ApiError::Server {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: Some("Duplicate title".to_string()),
        };
        assert_eq!(err.display_message(), "Duplicate title");
    }

    #[test]
    fn server_error_without_message_names_the_status() {
        let err = ApiError::Server {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(
            err.display_message(),
            "Request failed with status 500 Internal Server Error"
        );
    }

    #[test]
    fn blank_detail_falls_back_to_generic_text() {
        let err = ApiError::Decode("   ".to_string());
        assert_eq!(err.display_message(), FALLBACK_ERROR);
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("nope"));
    }

    #[test]
    fn urls_join_base_and_path() {
        let api = HttpTutorialApi::new(&ApiConfig::default());
        assert_eq!(api.url("/tutorials"), "/api/tutorials");
        assert_eq!(api.url("/tutorials/3"), "/api/tutorials/3");
    }
}
