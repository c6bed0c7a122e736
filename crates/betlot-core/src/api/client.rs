//! Blocking HTTP client for the CLV service.

use std::time::Duration;

use tracing::debug;

use super::schema::{ApiError, ClvRequest, ClvSummary};

/// Default service address, matching `betlot-web`'s default listen port.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Error surfaced to the user in the CLV panel.
#[derive(Debug, thiserror::Error)]
pub enum ClvError {
    /// The service answered with a non-success status.
    #[error("{0}")]
    Api(String),
    /// Nothing is listening on the configured address.
    #[error(
        "betlot-web is not running. Start it with `betlot-web --trades <trades.json>` and retry."
    )]
    ServerUnavailable,
    /// Transport-level failure (DNS, timeout, malformed response).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for `POST /api/v1/clv`.
pub struct ClvClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ClvClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Posts the rows and returns the computed summary.
    ///
    /// Non-success statuses surface the body's `error` field, falling back to
    /// a generic message when the body is unparsable. A connection-refused
    /// condition maps to operator guidance instead of a raw socket error.
    pub fn request_summary(&self, request: &ClvRequest) -> Result<ClvSummary, ClvError> {
        let url = format!("{}/api/v1/clv", self.base_url);
        debug!(%url, rows = request.rows.len(), "requesting clv summary");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ClvError::ServerUnavailable
                } else {
                    ClvError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiError>()
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP error: {status}"));
            return Err(ClvError::Api(message));
        }

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ClvClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn unavailable_error_names_the_server_binary() {
        let message = ClvError::ServerUnavailable.to_string();
        assert!(message.contains("betlot-web"));
        assert!(message.contains("retry"));
    }
}
