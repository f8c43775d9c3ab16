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
    parse_clock_time, parse_event_date, placeholder_date, placeholder_time,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use scraper::Html;
use tracing::info;

const DEFAULT_VENUE: &str = "Macomb Center for the Performing Arts";
const DEFAULT_ADDRESS: &str = "44575 Garfield Rd, Clinton Township, MI";
/// Unparseable dates are replaced by a day at most this far ahead
const PLACEHOLDER_DAYS: i64 = 30;

/// Performances listed by the Macomb Center for the Performing Arts
pub struct MacombCenterAdapter {
    url: String,
}

impl MacombCenterAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn parse_events(html: &str, base: &str, today: NaiveDate) -> Vec<EventDraft> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    select_all(root, ".event-listing, .event-card")
        .into_iter()
        .filter_map(|listing| {
            let name = select_text(listing, &["h2", ".event-title", ".title"])?;
            let when = select_text(listing, &[".event-date", ".date", "time"]).unwrap_or_default();

            let parsed = parse_event_date(&when);
            let date_estimated = parsed.is_none();
            let date = parsed.unwrap_or_else(|| placeholder_date(today, PLACEHOLDER_DAYS));
            let time = parse_clock_time(&when).unwrap_or_else(placeholder_time);

            let image_url = select_first(listing, &["img"])
                .and_then(|img| attr(img, "src"))
                .map(|src| normalize_url(&src, base));
            let website = select_first(listing, &["a.event-link", "a.more-info", "a.details"])
                .and_then(|a| attr(a, "href"))
                .map(|href| normalize_url(&href, base));

            Some(EventDraft {
                name,
                description: select_text(
                    listing,
                    &[".event-description", ".description", ".summary"],
                )
                .unwrap_or_else(|| "No description available.".to_string()),
                event_type: "Performance".to_string(),
                venue: select_text(listing, &[".venue-name", ".venue", ".location-name"])
                    .unwrap_or_else(|| DEFAULT_VENUE.to_string()),
                address: select_text(listing, &[".venue-address", ".address", ".location"])
                    .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
                date,
                date_estimated,
                time,
                website,
                image_url,
            })
        })
        .collect()
}

#[async_trait]
impl SourceAdapter for MacombCenterAdapter {
    fn name(&self) -> &'static str {
        "macomb_center"
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
        info!("Scraped {} events from Macomb Center", events.len());
        for event in events {
            harvest.push(ScrapedListing::Event(event));
        }
        harvest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    const URL: &str = "https://www.macombcenter.com/events";

    const PAGE: &str = r#"<html><body>
        <div class="event-card">
            <h2>The Nutcracker</h2>
            <div class="event-date">Saturday, December 13, 2025 7:30 PM</div>
            <p class="description">Holiday ballet classic.</p>
            <img src="/images/nutcracker.jpg">
            <a class="more-info" href="events/nutcracker">More</a>
        </div>
        <div class="event-listing">
            <h2>Jazz Night</h2>
            <time>Coming soon</time>
            <span class="venue">Lakeside Hall</span>
        </div>
        <div class="event-card"><p>untitled</p></div>
    </body></html>"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events(PAGE, URL, today());

        assert_eq!(events.len(), 2);
        let nutcracker = &events[0];
        assert_eq!(nutcracker.date, NaiveDate::from_ymd_opt(2025, 12, 13).unwrap());
        assert!(!nutcracker.date_estimated);
        assert_eq!(nutcracker.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(nutcracker.venue, DEFAULT_VENUE);
        assert_eq!(nutcracker.address, DEFAULT_ADDRESS);
        assert_eq!(nutcracker.event_type, "Performance");
        assert_eq!(
            nutcracker.image_url.as_deref(),
            Some("https://www.macombcenter.com/images/nutcracker.jpg")
        );
        assert_eq!(
            nutcracker.website.as_deref(),
            Some("https://www.macombcenter.com/events/nutcracker")
        );
    }

    #[test]
    fn test_unparseable_date_gets_future_placeholder() {
        let events = parse_events(PAGE, URL, today());

        let jazz = &events[1];
        assert!(jazz.date > today() && jazz.date <= today() + Duration::days(30));
        assert!(jazz.date_estimated);
        assert_eq!(jazz.description, "No description available.");
        assert_eq!(jazz.venue, "Lakeside Hall");
    }
}
