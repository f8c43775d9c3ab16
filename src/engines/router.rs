// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use std::sync::Arc;
use tracing::{debug, warn};

/// Engine router
///
/// Orders engines by `support_score` and falls through to the next one when
/// an engine fails, so a missing Chrome degrades to a plain HTTP fetch.
pub struct EngineRouter {
    engines: Vec<Arc<dyn ScraperEngine>>,
}

impl EngineRouter {
    /// Create a router
    ///
    /// # Arguments
    ///
    /// * `engines` - candidate engines
    pub fn new(engines: Vec<Arc<dyn ScraperEngine>>) -> Self {
        Self { engines }
    }

    fn candidates(&self, request: &ScrapeRequest) -> Vec<Arc<dyn ScraperEngine>> {
        let mut scored: Vec<(u8, Arc<dyn ScraperEngine>)> = self
            .engines
            .iter()
            .map(|engine| (engine.support_score(request), engine.clone()))
            .filter(|(score, _)| *score > 0)
            .collect();
        // stable sort keeps registration order on ties
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, engine)| engine).collect()
    }

    /// Route a request
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeResponse)` - response of the first engine that succeeded
    /// * `Err(EngineError)` - error of the last engine tried, or
    ///   `AllEnginesFailed` when no engine supports the request
    pub async fn route(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let candidates = self.candidates(request);
        if candidates.is_empty() {
            warn!("No suitable engines available for {}", request.url);
            return Err(EngineError::AllEnginesFailed);
        }

        let mut last_error = EngineError::AllEnginesFailed;
        for engine in candidates {
            debug!("Fetching {} with engine {}", request.url, engine.name());
            match engine.scrape(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!("Engine {} failed for {}: {}", engine.name(), request.url, e);
                    // client errors will not change with another engine
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubEngine {
        name: &'static str,
        score: u8,
        fail_with: Option<u16>,
        calls: AtomicUsize,
    }

    impl StubEngine {
        fn new(name: &'static str, score: u8, fail_with: Option<u16>) -> Arc<Self> {
            Arc::new(Self {
                name,
                score,
                fail_with,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ScraperEngine for StubEngine {
        async fn scrape(&self, _request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(status) => Err(EngineError::HttpStatus(status)),
                None => Ok(ScrapeResponse {
                    status_code: 200,
                    content: self.name.to_string(),
                    content_type: "text/html".to_string(),
                    response_time_ms: 1,
                }),
            }
        }

        fn support_score(&self, _request: &ScrapeRequest) -> u8 {
            self.score
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    fn request() -> ScrapeRequest {
        ScrapeRequest::new("https://example.com", "ua", Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_highest_score_wins() {
        let low = StubEngine::new("low", 10, None);
        let high = StubEngine::new("high", 100, None);
        let engines: Vec<Arc<dyn ScraperEngine>> = vec![low.clone(), high];
        let router = EngineRouter::new(engines);

        let response = router.route(&request()).await.unwrap();

        assert_eq!(response.content, "high");
        assert_eq!(low.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_retryable_failure() {
        let broken = StubEngine::new("broken", 100, Some(503));
        let backup = StubEngine::new("backup", 10, None);
        let engines: Vec<Arc<dyn ScraperEngine>> = vec![broken.clone(), backup];
        let router = EngineRouter::new(engines);

        let response = router.route(&request()).await.unwrap();

        assert_eq!(response.content, "backup");
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_stops_routing() {
        let missing = StubEngine::new("missing", 100, Some(404));
        let backup = StubEngine::new("backup", 10, None);
        let engines: Vec<Arc<dyn ScraperEngine>> = vec![missing, backup.clone()];
        let router = EngineRouter::new(engines);

        let err = router.route(&request()).await.unwrap_err();

        assert!(matches!(err, EngineError::HttpStatus(404)));
        assert_eq!(backup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_supporting_engine() {
        let engines: Vec<Arc<dyn ScraperEngine>> = vec![StubEngine::new("none", 0, None)];
        let router = EngineRouter::new(engines);

        let err = router.route(&request()).await.unwrap_err();

        assert!(matches!(err, EngineError::AllEnginesFailed));
    }
}
