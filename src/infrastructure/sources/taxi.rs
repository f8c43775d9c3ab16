// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, ScrapedListing, TransportDraft};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{attr, select_all, select_first, select_text};
use async_trait::async_trait;
use scraper::Html;
use tracing::info;

const TAXI: &str = "Taxi & Rideshare";
/// Rideshare entries are appended when the directory lists fewer companies
const MIN_SERVICES: usize = 3;

/// Taxi companies from a Yellow Pages search
pub struct TaxiAdapter {
    url: String,
}

impl TaxiAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn is_taxi_company(name: &str) -> bool {
    let name = name.to_lowercase();
    ["taxi", "cab", "transportation"]
        .iter()
        .any(|word| name.contains(word))
}

fn parse_companies(html: &str) -> Vec<TransportDraft> {
    let document = Html::parse_document(html);

    select_all(document.root_element(), ".listing, .result")
        .into_iter()
        .filter_map(|listing| {
            let name = select_text(listing, &[".business-name", ".company-name", "h3 a"])
                .unwrap_or_else(|| "Local Taxi Service".to_string());
            if !is_taxi_company(&name) {
                return None;
            }
            let phone = select_text(listing, &[".phones", ".phone-number"])
                .unwrap_or_else(|| "Call for availability".to_string());

            Some(TransportDraft {
                description: format!(
                    "{} provides taxi services in the Macomb County area.",
                    name
                ),
                transport_type: TAXI.to_string(),
                address: select_text(listing, &[".street-address", ".adr", ".address"])
                    .unwrap_or_else(|| "Macomb County, MI".to_string()),
                routes: String::new(),
                schedule: format!("24/7 service available. Contact: {}", phone),
                website: select_first(listing, &["a.website"]).and_then(|a| attr(a, "href")),
                image_url: None,
                name,
            })
        })
        .collect()
}

fn rideshare(name: &str, description: &str, image_url: &str, website: &str) -> TransportDraft {
    TransportDraft {
        name: name.to_string(),
        description: description.to_string(),
        transport_type: TAXI.to_string(),
        address: "Serving all of Macomb County, MI".to_string(),
        routes: String::new(),
        schedule: "24/7 service via mobile app. Availability depends on drivers.".to_string(),
        website: Some(website.to_string()),
        image_url: Some(image_url.to_string()),
    }
}

fn rideshare_services() -> [TransportDraft; 2] {
    [
        rideshare(
            "Uber",
            "Rideshare service available throughout Macomb County via mobile app.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/c/cc/Uber_logo_2018.png/800px-Uber_logo_2018.png",
            "https://www.uber.com",
        ),
        rideshare(
            "Lyft",
            "Rideshare platform offering on-demand transportation services.",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a0/Lyft_logo.svg/800px-Lyft_logo.svg.png",
            "https://www.lyft.com",
        ),
    ]
}

#[async_trait]
impl SourceAdapter for TaxiAdapter {
    fn name(&self) -> &'static str {
        "yellow_pages_taxi"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Transport
    }

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest {
        let mut harvest = SourceHarvest::default();
        let Some(page) = pages.fetch_page(&self.url, None, false).await else {
            harvest.unavailable(self.url.clone());
            return harvest;
        };

        let mut companies = parse_companies(&page.html);
        info!("Found {} taxi companies", companies.len());
        if companies.len() < MIN_SERVICES {
            companies.extend(rideshare_services());
        }
        for company in companies {
            harvest.push(ScrapedListing::Transport(company));
        }
        harvest
    }
}
