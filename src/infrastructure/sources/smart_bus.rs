// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, ScrapedListing, TransportDraft};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{
    attr, normalize_url, select_all, select_first, select_text, text_of,
};
use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, info};

/// SMART bus routes and their timetables
pub struct SmartBusAdapter {
    url: String,
}

#[derive(Debug, PartialEq)]
struct Route {
    name: String,
    url: String,
}

#[derive(Debug, Default, PartialEq)]
struct RouteDetail {
    schedule: String,
    image_url: Option<String>,
}

impl SmartBusAdapter {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn parse_routes(html: &str, base: &str) -> Vec<Route> {
    let document = Html::parse_document(html);
    select_all(document.root_element(), ".route-name")
        .into_iter()
        .filter_map(|element| {
            let href = select_first(element, &["a"]).and_then(|a| attr(a, "href"))?;
            let name = text_of(element);
            if name.is_empty() {
                return None;
            }
            Some(Route {
                name,
                url: normalize_url(&href, base),
            })
        })
        .collect()
}

/// Each timetable becomes its caption followed by one ` | ` joined line per row
fn parse_route_detail(html: &str, base: &str) -> RouteDetail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut sections = Vec::new();
    for table in select_all(root, "table.schedule-table") {
        sections.push(select_text(table, &["caption"]).unwrap_or_else(|| "Schedule".to_string()));
        let rows: Vec<String> = select_all(table, "tr")
            .into_iter()
            .map(|row| {
                select_all(row, "td, th")
                    .into_iter()
                    .map(text_of)
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .filter(|row| !row.is_empty())
            .collect();
        if !rows.is_empty() {
            sections.push(rows.join("\n"));
        }
    }

    RouteDetail {
        schedule: sections.join("\n\n"),
        image_url: select_first(root, &["img.route-map-img"])
            .and_then(|img| attr(img, "src"))
            .map(|src| normalize_url(&src, base)),
    }
}

#[async_trait]
impl SourceAdapter for SmartBusAdapter {
    fn name(&self) -> &'static str {
        "smart_bus"
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

        let routes = parse_routes(&page.html, &self.url);
        info!("Found {} bus routes", routes.len());
        for route in routes {
            let Some(detail_page) = pages.fetch_page(&route.url, None, false).await else {
                harvest.unavailable(route.url);
                continue;
            };
            let detail = parse_route_detail(&detail_page.html, &route.url);
            debug!("Scraped bus route {}", route.name);

            harvest.push(ScrapedListing::Transport(TransportDraft {
                name: format!("SMART Bus Route {}", route.name),
                description: format!(
                    "Bus service on route {} through Macomb County.",
                    route.name
                ),
                transport_type: "Public Transit".to_string(),
                address: String::new(),
                routes: route.name,
                schedule: detail.schedule,
                website: Some(route.url),
                image_url: detail.image_url,
            }));
        }
        harvest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sources::test_support::StaticPages;

    const URL: &str = "https://www.smartbus.org/Schedules/Route-Schedules";

    const ROUTES: &str = r#"<html><body>
        <div class="route-name"><a href="/Schedules/Route/510">510</a></div>
        <div class="route-name"><a href="/Schedules/Route/560">560</a></div>
        <div class="route-name">No link</div>
    </body></html>"#;

    const ROUTE_510: &str = r#"<html><body>
        <table class="schedule-table">
            <caption>Northbound</caption>
            <tr><th>Stop</th><th>Time</th></tr>
            <tr><td>Hall Rd</td><td>6:05 AM</td></tr>
        </table>
        <table class="schedule-table"><tr><td>Weekend</td><td>No service</td></tr></table>
        <img class="route-map-img" src="/maps/510.png">
    </body></html>"#;

    #[test]
    fn test_parse_routes_requires_link() {
        let routes = parse_routes(ROUTES, URL);

        assert_eq!(
            routes,
            vec![
                Route {
                    name: "510".to_string(),
                    url: "https://www.smartbus.org/Schedules/Route/510".to_string()
                },
                Route {
                    name: "560".to_string(),
                    url: "https://www.smartbus.org/Schedules/Route/560".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_route_detail_schedule_text() {
        let detail = parse_route_detail(ROUTE_510, "https://www.smartbus.org/Schedules/Route/510");

        assert_eq!(
            detail.schedule,
            "Northbound\n\nStop | Time\nHall Rd | 6:05 AM\n\nSchedule\n\nWeekend | No service"
        );
        assert_eq!(
            detail.image_url.as_deref(),
            Some("https://www.smartbus.org/maps/510.png")
        );
    }

    #[tokio::test]
    async fn test_harvest_skips_routes_without_detail() {
        let pages = StaticPages::new()
            .with(URL, ROUTES)
            .with("https://www.smartbus.org/Schedules/Route/510", ROUTE_510);

        let harvest = SmartBusAdapter::new(URL).harvest(&pages).await;

        assert_eq!(harvest.listings.len(), 1);
        assert_eq!(harvest.listings[0].label(), "SMART Bus Route 510");
        assert_eq!(
            harvest.unavailable_pages,
            vec!["https://www.smartbus.org/Schedules/Route/560".to_string()]
        );
    }
}
