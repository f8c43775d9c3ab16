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

use crate::config::settings::ScraperSettings;
use crate::domain::sources::{FetchedPage, PageSource};
use crate::engines::browser_engine::BrowserEngine;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::router::EngineRouter;
use crate::engines::traits::{ScrapeRequest, ScraperEngine};
use crate::infrastructure::scraping::user_agents::random_user_agent;
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Shared page fetcher
///
/// Requests are spaced at least `min_delay` apart plus random jitter, each
/// attempt gets a fresh user agent and, when enabled, a random proxy.
/// Failed attempts back off exponentially.
pub struct PageFetcher {
    router: EngineRouter,
    http: ReqwestEngine,
    limiter: Option<DefaultDirectRateLimiter>,
    settings: ScraperSettings,
}

impl PageFetcher {
    /// Fetcher using plain HTTP, with headless Chrome for script-rendered pages
    pub fn new(settings: &ScraperSettings) -> Self {
        let engines: Vec<Arc<dyn ScraperEngine>> = vec![
            Arc::new(ReqwestEngine),
            Arc::new(BrowserEngine::new(settings.remote_browser_url.clone())),
        ];
        Self::with_engines(settings, engines)
    }

    /// Fetcher routing through the given engines
    pub fn with_engines(settings: &ScraperSettings, engines: Vec<Arc<dyn ScraperEngine>>) -> Self {
        Self {
            router: EngineRouter::new(engines),
            http: ReqwestEngine,
            limiter: Quota::with_period(settings.min_delay()).map(RateLimiter::direct),
            settings: settings.clone(),
        }
    }

    fn pick_proxy(&self) -> Option<String> {
        if !self.settings.use_proxy {
            return None;
        }
        self.settings.proxies.choose(&mut rand::rng()).cloned()
    }

    fn build_request(&self, url: &str, javascript_required: bool) -> ScrapeRequest {
        let mut request =
            ScrapeRequest::new(url, random_user_agent(), self.settings.request_timeout());
        for (name, value) in [
            ("Accept", ACCEPT),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("Referer", "https://www.google.com/"),
            ("Connection", "keep-alive"),
        ] {
            request.headers.insert(name.to_string(), value.to_string());
        }
        request.needs_js = javascript_required;
        request.wait_after_load = Duration::from_millis(self.settings.browser_wait_ms);
        request.proxy = self.pick_proxy();
        request
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.limiter {
            limiter
                .until_ready_with_jitter(Jitter::up_to(self.settings.jitter()))
                .await;
        }
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_page(
        &self,
        url: &str,
        retries: Option<u32>,
        javascript_required: bool,
    ) -> Option<FetchedPage> {
        self.throttle().await;

        let policy = RetryPolicy::exponential(
            retries.unwrap_or(self.settings.max_retries),
            Duration::from_millis(self.settings.initial_backoff_ms),
        );

        for attempt in 0..policy.max_attempts {
            // fresh user agent and proxy on every attempt
            let request = self.build_request(url, javascript_required);
            info!(
                "Fetching URL: {} (attempt {}/{})",
                url,
                attempt + 1,
                policy.max_attempts
            );

            match self.router.route(&request).await {
                Ok(response) => {
                    return Some(FetchedPage {
                        url: url.to_string(),
                        html: response.content,
                    })
                }
                Err(e) => {
                    error!(
                        "Error fetching {} (attempt {}/{}): {}",
                        url,
                        attempt + 1,
                        policy.max_attempts,
                        e
                    );
                    if !e.is_retryable() {
                        warn!("Not retrying {}: {}", url, e);
                        break;
                    }
                    if policy.should_retry(attempt) {
                        let wait = policy.calculate_backoff(attempt);
                        info!("Retrying {} in {:?}", url, wait);
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }

        warn!("Giving up on {}", url);
        None
    }

    async fn download_image(&self, url: &str) -> Option<Vec<u8>> {
        let proxy = self.pick_proxy();
        match self
            .http
            .fetch_bytes(
                url,
                random_user_agent(),
                self.settings.image_timeout(),
                proxy.as_deref(),
            )
            .await
        {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Error downloading image {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
