// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, PropertyDraft, ScrapedListing};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{attr, select_all, select_text, selector};
use crate::infrastructure::scraping::parsing::digits;
use async_trait::async_trait;
use scraper::Html;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

const MAX_ADDITIONAL_IMAGES: usize = 5;

/// Zillow search results, rendered in a headless browser
///
/// The listings live in JSON embedded in the page rather than in markup.
pub struct ZillowAdapter {
    url: String,
    for_sale: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct SearchResult {
    zpid: String,
    address: String,
    price: i64,
    bedrooms: i32,
    bathrooms: f64,
    size_sqft: i32,
    image_url: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
struct Detail {
    description: Option<String>,
    images: Vec<String>,
}

impl ZillowAdapter {
    /// # Arguments
    ///
    /// * `url` - city search URL ending in `/`
    /// * `for_sale` - walk `for_sale/` listings, otherwise `for_rent/`
    pub fn new(url: impl Into<String>, for_sale: bool) -> Self {
        Self {
            url: url.into(),
            for_sale,
        }
    }

    fn search_url(&self) -> String {
        let segment = if self.for_sale { "for_sale/" } else { "for_rent/" };
        format!("{}{}", self.url, segment)
    }

    fn detail_url(&self, zpid: &str) -> String {
        let origin = Url::parse(&self.url)
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|_| "https://www.zillow.com".to_string());
        format!("{}/homedetails/{}_zpid/", origin, zpid)
    }
}

fn number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => digits(s),
        _ => None,
    }
}

fn list_results(data: &Value) -> Option<&Vec<Value>> {
    data.pointer("/cat1/searchResults/listResults")
        .or_else(|| data.pointer("/searchPageState/searchResults/listResults"))
        .and_then(Value::as_array)
}

fn parse_search(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let Some(scripts) = selector(r#"script[type="application/json"]"#) else {
        return Vec::new();
    };

    let results = document.select(&scripts).find_map(|script| {
        let text = script.text().collect::<String>();
        if !text.contains("searchResults") {
            return None;
        }
        let data: Value = serde_json::from_str(text.trim()).ok()?;
        list_results(&data).cloned()
    });

    results
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let zpid = match item.get("zpid")? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(SearchResult {
                zpid,
                address: item
                    .get("address")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                price: item.get("price").and_then(number).unwrap_or(0),
                bedrooms: item.get("beds").and_then(number).unwrap_or(0) as i32,
                bathrooms: item.get("baths").and_then(Value::as_f64).unwrap_or(0.0),
                size_sqft: item.get("area").and_then(number).unwrap_or(0) as i32,
                image_url: item
                    .get("imgSrc")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            })
        })
        .collect()
}

fn parse_detail(html: &str) -> Detail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut images: Vec<String> = Vec::new();
    for src in select_all(root, "picture img")
        .into_iter()
        .filter_map(|img| attr(img, "src"))
    {
        if !images.contains(&src) {
            images.push(src);
        }
    }
    images.truncate(MAX_ADDITIONAL_IMAGES);

    Detail {
        description: select_text(root, &["div[data-testid='home-description-text']"]),
        images,
    }
}

fn format_bathrooms(bathrooms: f64) -> String {
    if bathrooms.fract() == 0.0 {
        format!("{}", bathrooms as i64)
    } else {
        format!("{}", bathrooms)
    }
}

#[async_trait]
impl SourceAdapter for ZillowAdapter {
    fn name(&self) -> &'static str {
        if self.for_sale {
            "zillow_for_sale"
        } else {
            "zillow_for_rent"
        }
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Property
    }

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest {
        let mut harvest = SourceHarvest::default();
        let search_url = self.search_url();
        let Some(page) = pages.fetch_page(&search_url, None, true).await else {
            harvest.unavailable(search_url);
            return harvest;
        };

        let results = parse_search(&page.html);
        if results.is_empty() {
            warn!("No listing data found in {}", search_url);
        }
        info!("Found {} properties on {}", results.len(), search_url);

        for result in results {
            let detail_url = self.detail_url(&result.zpid);
            let detail = match pages.fetch_page(&detail_url, None, false).await {
                Some(detail_page) => parse_detail(&detail_page.html),
                None => {
                    harvest.unavailable(detail_url);
                    Detail::default()
                }
            };
            debug!("Scraped property {}", result.address);

            let summary = format!(
                "{} bed, {} bath, {} sqft home",
                result.bedrooms,
                format_bathrooms(result.bathrooms),
                result.size_sqft
            );
            harvest.push(ScrapedListing::Property(PropertyDraft {
                title: result.address.clone(),
                description: detail.description.unwrap_or(summary),
                property_type: "House".to_string(),
                address: result.address,
                price: result.price,
                bedrooms: result.bedrooms,
                bathrooms: result.bathrooms,
                size_sqft: result.size_sqft,
                for_sale: self.for_sale,
                image_url: result.image_url,
                additional_images: detail.images,
            }));
        }

        harvest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sources::test_support::StaticPages;

    const BASE: &str = "https://www.zillow.com/macomb-mi/";

    const SEARCH: &str = r#"<html><body>
        <script type="application/json">{"unrelated": true}</script>
        <script type="application/json">{"cat1": {"searchResults": {"listResults": [
            {"zpid": "111", "address": "1 Oak Ct, Macomb, MI", "price": "$425,000", "beds": 4, "baths": 2.5, "area": "2,400", "imgSrc": "https://photos.example.com/111.jpg"},
            {"zpid": 222, "address": "2 Elm St, Macomb, MI", "price": 1800, "beds": 2, "baths": 1, "area": 950}
        ]}}}</script>
    </body></html>"#;

    const DETAIL: &str = r#"<html><body>
        <div data-testid="home-description-text"> Updated colonial  on a cul-de-sac. </div>
        <picture><img src="https://photos.example.com/a.jpg"></picture>
        <picture><img src="https://photos.example.com/a.jpg"></picture>
        <picture><img src="https://photos.example.com/b.jpg"></picture>
    </body></html>"#;

    #[test]
    fn test_parse_search_reads_embedded_json() {
        let results = parse_search(SEARCH);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].price, 425_000);
        assert_eq!(results[0].size_sqft, 2_400);
        assert_eq!(results[0].bathrooms, 2.5);
        assert_eq!(results[1].zpid, "222");
        assert_eq!(results[1].image_url, None);
    }

    #[test]
    fn test_parse_search_page_state_layout() {
        let html = r#"<script type="application/json">{"searchPageState": {"searchResults": {"listResults": [{"zpid": "9", "address": "9 Pine"}]}}}</script>"#;

        assert_eq!(parse_search(html)[0].address, "9 Pine");
        assert!(parse_search("<html></html>").is_empty());
    }

    #[test]
    fn test_parse_detail_dedupes_images() {
        let detail = parse_detail(DETAIL);

        assert_eq!(detail.description.as_deref(), Some("Updated colonial on a cul-de-sac."));
        assert_eq!(
            detail.images,
            vec![
                "https://photos.example.com/a.jpg".to_string(),
                "https://photos.example.com/b.jpg".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_harvest_renders_search_with_javascript() {
        let pages = StaticPages::new()
            .with("https://www.zillow.com/macomb-mi/for_rent/", SEARCH)
            .with("https://www.zillow.com/homedetails/111_zpid/", DETAIL);
        let adapter = ZillowAdapter::new(BASE, false);

        let harvest = adapter.harvest(&pages).await;

        assert_eq!(adapter.name(), "zillow_for_rent");
        assert_eq!(harvest.listings.len(), 2);
        assert_eq!(
            harvest.unavailable_pages,
            vec!["https://www.zillow.com/homedetails/222_zpid/".to_string()]
        );
        let requests = pages.requests.lock().clone();
        assert_eq!(
            requests[0],
            ("https://www.zillow.com/macomb-mi/for_rent/".to_string(), true)
        );

        let ScrapedListing::Property(with_detail) = &harvest.listings[0] else {
            panic!("expected a property");
        };
        assert!(!with_detail.for_sale);
        assert_eq!(with_detail.description, "Updated colonial on a cul-de-sac.");
        assert_eq!(with_detail.additional_images.len(), 2);

        let ScrapedListing::Property(summary_only) = &harvest.listings[1] else {
            panic!("expected a property");
        };
        assert_eq!(summary_only.description, "2 bed, 1 bath, 950 sqft home");
        assert_eq!(summary_only.title, "2 Elm St, Macomb, MI");
    }
}
