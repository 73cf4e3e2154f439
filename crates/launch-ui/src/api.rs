//! Launch API integration.
//!
//! The `LaunchApi` trait is the seam between the views and the network. It
//! returns boxed futures so it stays object-safe and mockable for testing.
//!
//! A failed request is an `Err(ApiError)`; the views render it the same way
//! as any other failed search and log the cause. A detail lookup for an
//! unknown id is `Ok(None)`.

use futures::future::BoxFuture;
use launch_core::{ApiConfig, ApiError, LaunchDetail, LaunchId, LaunchSummary};
use serde::Deserialize;
use std::time::Duration;

// =============================================================================
// LaunchApi Trait
// =============================================================================

/// Trait for launch API operations.
#[cfg_attr(test, mockall::automock)]
pub trait LaunchApi: Send + Sync {
    /// Search launches by free text. An empty query is sent as-is.
    fn search_launches(
        &self,
        query: String,
    ) -> BoxFuture<'static, Result<Vec<LaunchSummary>, ApiError>>;

    /// Fetch one launch. `Ok(None)` when the API does not know the id.
    fn get_launch(&self, id: LaunchId) -> BoxFuture<'static, Result<Option<LaunchDetail>, ApiError>>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// One page of search results.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<LaunchSummary>,
}

/// Launch Library 2 client.
#[derive(Debug, Clone)]
pub struct HttpLaunchApi {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpLaunchApi {
    /// Create a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("launch-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/launch/", self.base_url)
    }

    fn detail_url(&self, id: &LaunchId) -> String {
        format!("{}/launch/{}/", self.base_url, id)
    }
}

fn map_request_error(err: reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout { duration: timeout }
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

impl LaunchApi for HttpLaunchApi {
    fn search_launches(
        &self,
        query: String,
    ) -> BoxFuture<'static, Result<Vec<LaunchSummary>, ApiError>> {
        let http = self.http.clone();
        let url = self.search_url();
        let timeout = self.timeout;

        Box::pin(async move {
            tracing::debug!("Searching launches for {:?}", query);
            let response = http
                .get(&url)
                .query(&[("search", query.as_str()), ("mode", "normal")])
                .send()
                .await
                .map_err(|e| map_request_error(e, timeout))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    url,
                });
            }

            let page: SearchPage = response
                .json()
                .await
                .map_err(|e| map_request_error(e, timeout))?;
            tracing::debug!("Search for {:?} returned {} launches", query, page.results.len());
            Ok(page.results)
        })
    }

    fn get_launch(&self, id: LaunchId) -> BoxFuture<'static, Result<Option<LaunchDetail>, ApiError>> {
        let http = self.http.clone();
        let url = self.detail_url(&id);
        let timeout = self.timeout;

        Box::pin(async move {
            tracing::debug!("Fetching launch {}", id);
            let response = http
                .get(&url)
                .send()
                .await
                .map_err(|e| map_request_error(e, timeout))?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !status.is_success() {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    url,
                });
            }

            let detail = response
                .json()
                .await
                .map_err(|e| map_request_error(e, timeout))?;
            Ok(Some(detail))
        })
    }
}

// =============================================================================
// Stub API for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
