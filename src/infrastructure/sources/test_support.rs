// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::sources::{FetchedPage, PageSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Serves canned HTML by URL and records every request
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    pub requests: Mutex<Vec<(String, bool)>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(u, _)| u.clone()).collect()
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn fetch_page(
        &self,
        url: &str,
        _retries: Option<u32>,
        javascript_required: bool,
    ) -> Option<FetchedPage> {
        self.requests
            .lock()
            .push((url.to_string(), javascript_required));
        self.pages.get(url).map(|html| FetchedPage {
            url: url.to_string(),
            html: html.clone(),
        })
    }

    async fn download_image(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }
}
