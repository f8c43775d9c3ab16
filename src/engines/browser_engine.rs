// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

// One Chrome process per binary; launching it per page is too slow.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

async fn get_browser(remote_url: Option<&str>) -> Result<&'static Browser, EngineError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let (browser, mut handler) = if let Some(url) = remote_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    EngineError::Browser(format!("Failed to connect to remote Chrome: {}", e))
                })?
            } else {
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30))
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(EngineError::Browser)?;

                Browser::launch(config)
                    .await
                    .map_err(|e| EngineError::Browser(e.to_string()))?
            };

            tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// Headless Chrome engine for pages that only render with JavaScript
pub struct BrowserEngine {
    remote_url: Option<String>,
}

impl BrowserEngine {
    /// # Arguments
    ///
    /// * `remote_url` - DevTools endpoint of an already running Chrome; a
    ///   local browser is launched when `None`
    pub fn new(remote_url: Option<String>) -> Self {
        Self { remote_url }
    }
}

#[async_trait]
impl ScraperEngine for BrowserEngine {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        if request.proxy.is_some() {
            tracing::debug!("Per-request proxies are not applied to the browser engine");
        }

        let start = Instant::now();

        let result = tokio::time::timeout(request.timeout + request.wait_after_load, async {
            let browser = get_browser(self.remote_url.as_deref()).await?;

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?;

            page.set_user_agent(request.user_agent.as_str())
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?;

            page.goto(request.url.as_str())
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?;

            if !request.wait_after_load.is_zero() {
                tokio::time::sleep(request.wait_after_load).await;
            }

            let content = page
                .content()
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?;

            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close browser tab: {}", e);
            }

            Ok::<_, EngineError>(content)
        })
        .await;

        let content = match result {
            Ok(content) => content?,
            Err(_) => return Err(EngineError::Timeout),
        };

        Ok(ScrapeResponse {
            status_code: 200,
            content,
            content_type: "text/html".to_string(),
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn support_score(&self, request: &ScrapeRequest) -> u8 {
        if request.needs_js {
            100
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_only_claims_script_pages() {
        let engine = BrowserEngine::new(None);
        let mut request = ScrapeRequest::new("https://example.com", "ua", Duration::from_secs(1));

        assert_eq!(engine.support_score(&request), 0);
        request.needs_js = true;
        assert_eq!(engine.support_score(&request), 100);
        assert_eq!(engine.name(), "browser");
    }
}
