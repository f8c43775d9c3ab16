// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{EventDraft, ListingKind, ScrapedListing};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{
    attr, normalize_url, select_all, select_first, select_text,
};
use crate::infrastructure::scraping::parsing::{
    classify_event, parse_loose_time, parse_month_day, placeholder_date, placeholder_time,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::info;

const PLACEHOLDER_DAYS: i64 = 45;

static BACKGROUND_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(['"]?(.*?)['"]?\)"#).unwrap());

/// Event cards from an Eventbrite location search
pub struct EventbriteAdapter {
    url: String,
}

impl EventbriteAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// `src`, then `data-src`, then a CSS `background-image`
fn card_image(card: ElementRef<'_>) -> Option<String> {
    let image = select_first(card, &[".eds-event-card-content__image", "img"])?;
    attr(image, "src")
        .or_else(|| attr(image, "data-src"))
        .or_else(|| {
            let style = attr(image, "style")?;
            if !style.contains("background-image") {
                return None;
            }
            BACKGROUND_URL
                .captures(&style)?
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|url| !url.is_empty())
        })
}

fn parse_events(html: &str, base: &str, today: NaiveDate) -> Vec<EventDraft> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    select_all(root, ".search-event-card, .eds-event-card")
        .into_iter()
        .filter_map(|card| {
            let name = select_text(card, &[".eds-event-card__title", ".event-title", "h3"])?;
            let description = select_text(
                card,
                &[".eds-event-card__description", ".event-description", ".description"],
            )
            .unwrap_or_else(|| "No description available.".to_string());

            let when = select_text(
                card,
                &[".eds-event-card-content__primary-date", ".event-date", ".date"],
            )
            .unwrap_or_default();
            let parsed = parse_month_day(&when, today);
            let date_estimated = parsed.is_none();
            let date = parsed.unwrap_or_else(|| placeholder_date(today, PLACEHOLDER_DAYS));
            let time = parse_loose_time(&when).unwrap_or_else(placeholder_time);

            let website = select_first(
                card,
                &["a.eds-event-card-content__action-link", "a.event-link"],
            )
            .and_then(|a| attr(a, "href"))
            .map(|href| normalize_url(&href, base));

            Some(EventDraft {
                event_type: classify_event(&name, &description).to_string(),
                venue: select_text(
                    card,
                    &[".eds-event-card-content__sub-title", ".venue-name", ".location-name"],
                )
                .unwrap_or_else(|| "Macomb County Event Space".to_string()),
                address: select_text(
                    card,
                    &[".card-text--truncated__one", ".location-info", ".address"],
                )
                .unwrap_or_else(|| "Macomb, MI".to_string()),
                image_url: card_image(card),
                name,
                description,
                date,
                date_estimated,
                time,
                website,
            })
        })
        .collect()
}

#[async_trait]
impl SourceAdapter for EventbriteAdapter {
    fn name(&self) -> &'static str {
        "eventbrite"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Event
    }

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest {
        let mut harvest = SourceHarvest::default();
        let Some(page) = pages.fetch_page(&self.url, None, false).await else {
            harvest.unavailable(self.url.clone());
            return harvest;
        };

        let events = parse_events(&page.html, &self.url, Local::now().date_naive());
        info!("Scraped {} events from Eventbrite", events.len());
        for event in events {
            harvest.push(ScrapedListing::Event(event));
        }
        harvest
    }
}
