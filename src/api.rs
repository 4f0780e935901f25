//! HTTP client for the MoreAPI hot board endpoint.
//!
//! `BoardApi` is the transport seam: the MCP tools depend on the trait so
//! tests can substitute a canned backend for the real `ApiClient`. Each
//! fetch is a single attempt bounded by the configured timeout; there are
//! no retries.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::config::ApiConfig;
use crate::types::BoardRequest;

const BOARD_ENDPOINT: &str = "/api/douyin/aweme_board";

// --- Errors ---

/// Failure kinds of a single board fetch.
///
/// Classification happens here so the tool layer only converts one error
/// type into user-facing text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// User-facing line for a failed operation. Every exposed tool
    /// returns this string instead of propagating the error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => "❌ Request timed out, please retry later".to_string(),
            ApiError::Connect(_) => {
                "❌ Network connection error, check your connectivity".to_string()
            }
            ApiError::Http { status, body } => {
                format!("❌ API request failed: HTTP {} - {}", status.as_u16(), body)
            }
            ApiError::Other(e) => format!("❌ Failed to fetch hot board: {}", e),
        }
    }
}

// --- Transport seam ---

/// Backend capable of fetching one board snapshot.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn fetch_board(&self, request: &BoardRequest) -> Result<Value, ApiError>;
}

// --- Real client ---

/// MoreAPI client holding the configured endpoint and bearer token.
pub struct ApiClient {
    base_url: String,
    token: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                secs: self.timeout_secs,
            }
        } else if err.is_connect() {
            ApiError::Connect(err)
        } else {
            ApiError::Other(anyhow::Error::new(err).context("Hot board request failed"))
        }
    }
}

#[async_trait]
impl BoardApi for ApiClient {
    async fn fetch_board(&self, request: &BoardRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, BOARD_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("hot board request failed: {}", e);
                self.classify(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("hot board API returned {}: {}", status, body);
            return Err(ApiError::Http { status, body });
        }

        response.json().await.map_err(|e| self.classify(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_request_serializes_all_fields() {
        let body = serde_json::to_value(BoardRequest::default()).unwrap();
        assert_eq!(body["board_type"], "0");
        assert_eq!(body["board_sub_type"], "");
        assert_eq!(body["proxy"], "");
    }

    #[test]
    fn test_user_messages_distinguish_kinds() {
        let timeout = ApiError::Timeout { secs: 30 }.user_message();
        assert!(timeout.starts_with("❌"));
        assert!(timeout.contains("timed out"));

        let http = ApiError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "overloaded".to_string(),
        }
        .user_message();
        assert!(http.starts_with("❌"));
        assert!(http.contains("503"));
        assert!(http.contains("overloaded"));

        let other = ApiError::Other(anyhow::anyhow!("boom")).user_message();
        assert!(other.starts_with("❌"));
        assert!(other.contains("boom"));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://api.example.com/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://api.example.com");
    }
}
