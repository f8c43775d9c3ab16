// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, ScrapedListing, TransportDraft};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{select_all, select_any, select_text};
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use tracing::info;

const PARKING: &str = "Parking";

/// Public parking facilities published by the county
pub struct ParkingAdapter {
    url: String,
}

impl ParkingAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Sections with a heading mentioning parking, for pages without facility markup
fn headed_sections(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    select_all(root, "section, article, div")
        .into_iter()
        .filter(|section| {
            select_text(*section, &["h3", "h4"])
                .is_some_and(|heading| heading.to_lowercase().contains("parking"))
        })
        .collect()
}

fn parse_facilities(html: &str, website: &str) -> Vec<TransportDraft> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut sections = select_any(root, &[".parking-info", ".parking-facilities"]);
    if sections.is_empty() {
        sections = headed_sections(root);
    }

    sections
        .into_iter()
        .map(|section| TransportDraft {
            name: select_text(section, &["h3", "h4", ".facility-name"])
                .unwrap_or_else(|| "Downtown Parking".to_string()),
            description: select_text(section, &["p", ".description"])
                .unwrap_or_else(|| "Parking facility in Macomb County.".to_string()),
            transport_type: PARKING.to_string(),
            address: select_text(section, &["address", ".address"])
                .unwrap_or_else(|| "Macomb County, MI".to_string()),
            routes: String::new(),
            schedule: "Open 24/7".to_string(),
            website: Some(website.to_string()),
            image_url: None,
        })
        .collect()
}

fn county_parking(website: &str) -> TransportDraft {
    TransportDraft {
        name: "Macomb County Parking".to_string(),
        description: "Public parking facilities throughout Macomb County.".to_string(),
        transport_type: PARKING.to_string(),
        address: "Macomb County, MI".to_string(),
        routes: String::new(),
        schedule: "Hours vary by location. Most facilities open 24/7.".to_string(),
        website: Some(website.to_string()),
        image_url: None,
    }
}

#[async_trait]
impl SourceAdapter for ParkingAdapter {
    fn name(&self) -> &'static str {
        "county_parking"
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

        let mut facilities = parse_facilities(&page.html, &self.url);
        if facilities.is_empty() {
            info!("No parking facilities listed, using the county entry");
            facilities.push(county_parking(&self.url));
        }
        for facility in facilities {
            harvest.push(ScrapedListing::Transport(facility));
        }
        harvest
    }
}
