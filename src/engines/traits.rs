// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// Headless browser failure
    #[error("Browser error: {0}")]
    Browser(String),
    /// No engine could serve the request
    #[error("All engines failed")]
    AllEnginesFailed,
    /// Timeout
    #[error("Timeout")]
    Timeout,
    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// Whether another attempt at the same URL can succeed
    ///
    /// # Returns
    ///
    /// `true` for transport failures, timeouts, server errors and 429,
    /// `false` for client errors and configuration problems
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.is_body()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            EngineError::HttpStatus(status) => *status == 429 || *status >= 500,
            EngineError::Browser(_) | EngineError::Timeout | EngineError::AllEnginesFailed => true,
            EngineError::Other(_) => false,
        }
    }
}

/// Fetch request
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// Target URL
    pub url: String,
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// User agent for this attempt
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Whether the page only renders with JavaScript
    pub needs_js: bool,
    /// Settle time after navigation for browser engines
    pub wait_after_load: Duration,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            user_agent: user_agent.into(),
            timeout,
            needs_js: false,
            wait_after_load: Duration::ZERO,
            proxy: None,
        }
    }
}

/// Fetch response
#[derive(Debug, Clone)]
pub struct ScrapeResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response body
    pub content: String,
    /// Content type
    pub content_type: String,
    /// Time spent, in milliseconds
    pub response_time_ms: u64,
}

/// Page fetching engine
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// Fetch the page
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError>;

    /// How well this engine fits the request (0-100, 0 means unsupported)
    fn support_score(&self, request: &ScrapeRequest) -> u8;

    /// Engine name
    fn name(&self) -> &'static str;
}
