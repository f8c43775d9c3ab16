// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, ScrapedListing};
use async_trait::async_trait;

/// A successfully fetched HTML page
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// Final URL the content was fetched from
    pub url: String,
    pub html: String,
}

/// Page and image access used by source adapters
///
/// Implementations never fail loudly: every error is logged and surfaces as
/// `None` once all attempts are exhausted.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch an HTML page
    ///
    /// # Arguments
    ///
    /// * `url` - page URL
    /// * `retries` - attempt count, `None` for the configured default
    /// * `javascript_required` - render the page in a headless browser
    async fn fetch_page(
        &self,
        url: &str,
        retries: Option<u32>,
        javascript_required: bool,
    ) -> Option<FetchedPage>;

    /// Download an image body
    async fn download_image(&self, url: &str) -> Option<Vec<u8>>;
}

/// Everything an adapter extracted in one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceHarvest {
    pub listings: Vec<ScrapedListing>,
    /// Pages that could not be fetched after all retries
    pub unavailable_pages: Vec<String>,
}

impl SourceHarvest {
    pub fn push(&mut self, listing: ScrapedListing) {
        self.listings.push(listing);
    }

    pub fn unavailable(&mut self, url: impl Into<String>) {
        self.unavailable_pages.push(url.into());
    }
}

/// Site specific extraction rules
///
/// Adapters only know how to walk one site and turn its markup into
/// drafts. Fetching, persistence and reporting are shared.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short identifier used in reports, e.g. `tripadvisor`
    fn name(&self) -> &'static str;

    /// Kind of listing this adapter produces
    fn kind(&self) -> ListingKind;

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest;
}
