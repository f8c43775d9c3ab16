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

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};

/// Plain HTTP engine
///
/// Builds a fresh reqwest client for every request so that user agent,
/// proxy and cookies never leak between attempts.
pub struct ReqwestEngine;

impl ReqwestEngine {
    fn build_client(
        user_agent: &str,
        timeout: Duration,
        proxy: Option<&str>,
    ) -> Result<reqwest::Client, EngineError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .cookie_store(true);

        // socks5:// URLs are handled by reqwest's socks support
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| EngineError::Other(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }

    /// Download raw bytes, used for listing images
    ///
    /// # Arguments
    ///
    /// * `url` - resource URL
    /// * `user_agent` - user agent header
    /// * `timeout` - request timeout
    /// * `proxy` - optional proxy URL
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - response body of a 2xx response
    /// * `Err(EngineError)` - transport failure or non-success status
    pub async fn fetch_bytes(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
        proxy: Option<&str>,
    ) -> Result<Vec<u8>, EngineError> {
        let client = Self::build_client(user_agent, timeout, proxy)?;
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(EngineError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// Execute an HTTP GET
    ///
    /// # Arguments
    ///
    /// * `request` - fetch request
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeResponse)` - a 2xx response
    /// * `Err(EngineError)` - transport failure or non-success status
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            if let (Ok(k), Ok(v)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.insert(k, v);
            }
        }

        let client =
            Self::build_client(&request.user_agent, request.timeout, request.proxy.as_deref())?;

        let start = Instant::now();
        let response = client.get(&request.url).headers(headers).send().await?;

        let status_code = response.status().as_u16();
        if !response.status().is_success() {
            return Err(EngineError::HttpStatus(status_code));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("text/html")
            .to_string();

        let content = response.text().await?;

        Ok(ScrapeResponse {
            status_code,
            content,
            content_type,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn support_score(&self, request: &ScrapeRequest) -> u8 {
        if request.needs_js {
            return 10;
        }
        100
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
