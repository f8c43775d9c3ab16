// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::PageFetcher;
use crate::config::settings::ScraperSettings;
use crate::domain::sources::PageSource;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::ScraperEngine;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, header_exists, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(min_delay_ms: u64) -> ScraperSettings {
    ScraperSettings {
        min_delay_ms,
        jitter_ms: 0,
        initial_backoff_ms: 1,
        request_timeout_secs: 5,
        image_timeout_secs: 5,
        ..ScraperSettings::default()
    }
}

fn fetcher(min_delay_ms: u64) -> PageFetcher {
    let engines: Vec<Arc<dyn ScraperEngine>> = vec![Arc::new(ReqwestEngine)];
    PageFetcher::with_engines(&settings(min_delay_ms), engines)
}

#[tokio::test]
async fn test_fetch_page_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(header("referer", "https://www.google.com/"))
        .and(headers("accept-language", vec!["en-US", "en;q=0.9"]))
        .and(header_exists("accept"))
        .and(header("connection", "keep-alive"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Riverside Park</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/listing", server.uri());
    let page = fetcher(0).fetch_page(&url, None, false).await.unwrap();

    assert_eq!(page.url, url);
    assert!(page.html.contains("Riverside Park"));
}

#[tokio::test]
async fn test_fetch_page_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher(0)
        .fetch_page(&format!("{}/flaky", server.uri()), Some(3), false)
        .await;

    assert_eq!(page.unwrap().html, "ok");
}

#[tokio::test]
async fn test_fetch_page_gives_up_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let page = fetcher(0)
        .fetch_page(&format!("{}/down", server.uri()), Some(2), false)
        .await;

    assert!(page.is_none());
}

#[tokio::test]
async fn test_fetch_page_does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher(0)
        .fetch_page(&format!("{}/gone", server.uri()), Some(3), false)
        .await;

    assert!(page.is_none());
}

#[tokio::test]
async fn test_requests_are_spaced_by_min_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page"))
        .mount(&server)
        .await;
    let fetcher = fetcher(300);
    let url = format!("{}/a", server.uri());

    let start = Instant::now();
    fetcher.fetch_page(&url, None, false).await.unwrap();
    let first = start.elapsed();
    fetcher.fetch_page(&url, None, false).await.unwrap();

    assert!(first < Duration::from_millis(300));
    assert!(start.elapsed() >= Duration::from_millis(280));
}

#[tokio::test]
async fn test_download_image() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&server)
        .await;
    let fetcher = fetcher(0);

    let bytes = fetcher
        .download_image(&format!("{}/photo.jpg", server.uri()))
        .await;
    let missing = fetcher
        .download_image(&format!("{}/missing.jpg", server.uri()))
        .await;

    assert_eq!(bytes, Some(vec![0xFF, 0xD8, 0xFF]));
    assert!(missing.is_none());
}
