//! HTTP client for the dashboard backend.
//!
//! Fetches the journey-health snapshot and exposes a health probe. Failures
//! surface as [`ApiError`] values rendered to descriptive strings by the
//! polling layer; nothing here panics across the core boundary.

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::models::Snapshot;
use crate::refresh::{FetchFuture, Fetcher};
use crate::time_filter::TimeRange;

/// Default backend base URL; override with `--endpoint` or `PULSE_ENDPOINT`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Error type for dashboard API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure (connection, DNS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not a valid snapshot
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Client for the journey-health backend.
///
/// Holds a reusable connection pool; cheap to share by reference.
pub struct DashboardClient {
    /// Base URL for the backend
    pub base_url: String,
    client: Client,
}

impl DashboardClient {
    /// Create a client against the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Fetch the dashboard snapshot.
    ///
    /// Sends `GET /dashboard.json`, with the resolved time window forwarded
    /// as `start_time` / `end_time` query parameters when one is supplied.
    ///
    /// # Arguments
    /// * `range` - Optional resolved time window for the active filter
    pub async fn fetch_dashboard(&self, range: Option<&TimeRange>) -> Result<Snapshot, ApiError> {
        let url = format!("{}/dashboard.json", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(range) = range {
            request = request.query(&[
                ("start_time", range.start_iso()),
                ("end_time", range.end_iso()),
            ]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to fetch dashboard data".to_string());
            return Err(ApiError::Server { status, message });
        }

        let body = response.text().await?;
        let snapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }

    /// Check if the backend is reachable and healthy.
    ///
    /// # Returns
    /// `true` if `GET /health` returns a success status
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

impl Default for DashboardClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a polling-engine fetch callback for a live backend.
///
/// The time-filter token is resolved to a concrete range on every
/// invocation, so preset windows slide with the clock between ticks.
pub fn snapshot_fetcher(client: Arc<DashboardClient>, token: String) -> Fetcher<Snapshot> {
    Arc::new(move || {
        let client = Arc::clone(&client);
        let token = token.clone();
        Box::pin(async move {
            let range = TimeRange::resolve(&token);
            let snapshot = client.fetch_dashboard(Some(&range)).await?;
            Ok(snapshot)
        }) as FetchFuture<Snapshot>
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_uses_default_url() {
        let client = DashboardClient::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_with_base_url() {
        let client = DashboardClient::with_base_url("http://localhost:9000".to_string());
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = DashboardClient::with_base_url("http://localhost:9000/".to_string());
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Server {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("500"));
        assert!(display.contains("Internal Server Error"));
    }

    #[test]
    fn test_api_error_from_json() {
        let json_err = serde_json::from_str::<Snapshot>("not json").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn test_fetch_dashboard_unreachable_host() {
        let client = DashboardClient::with_base_url("http://127.0.0.1:1".to_string());
        let result = client.fetch_dashboard(None).await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }

    #[tokio::test]
    async fn test_health_check_unreachable_host() {
        let client = DashboardClient::with_base_url("http://127.0.0.1:1".to_string());
        let result = client.health_check().await;
        assert!(result.is_err());
    }
}
