// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKind, RestaurantDraft, ScrapedListing};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{
    attr, clean_text, normalize_url, redirect_target, select_all, select_any, select_first,
    select_text, text_of,
};
use crate::infrastructure::scraping::parsing::{price_level, rating_from_label};
use async_trait::async_trait;
use scraper::{ElementRef, Html};
use tracing::{debug, info};

/// Addresses in these places are kept as they are, others get the city appended
const NEARBY_AREAS: [&str; 6] = [
    "macomb",
    "clinton township",
    "shelby township",
    "sterling heights",
    "utica",
    "chesterfield",
];

const CARD_SELECTORS: [&str; 2] = [
    "li.border-color--default__09f24__NPAKY",
    r#"div[data-testid="serp-ia-card"]"#,
];
const BUSINESS_NAME: &str = ".businessName__09f24__EYSZE";

/// Restaurant search results on Yelp
pub struct YelpAdapter {
    url: String,
    max_pages: u32,
    detail_interval: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Card {
    name: String,
    detail_url: Option<String>,
    cuisine: Option<String>,
    address: Option<String>,
    rating: f64,
    image_url: Option<String>,
    price: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
struct Detail {
    description: Option<String>,
    address: Option<String>,
    opening_hours: Option<String>,
    website: Option<String>,
}

struct ResultPage {
    cards: Vec<Card>,
    has_next: bool,
}

impl YelpAdapter {
    /// # Arguments
    ///
    /// * `url` - search URL, further pages append `&start=`
    /// * `max_pages` - result pages to walk at most
    /// * `detail_interval` - fetch the detail page of every n-th restaurant,
    ///   0 disables detail pages
    pub fn new(url: impl Into<String>, max_pages: u32, detail_interval: usize) -> Self {
        Self {
            url: url.into(),
            max_pages,
            detail_interval,
        }
    }

    fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.url.clone()
        } else {
            format!("{}&start={}", self.url, (page - 1) * 10)
        }
    }

    fn wants_detail(&self, collected: usize) -> bool {
        self.detail_interval > 0 && collected > 0 && collected % self.detail_interval == 0
    }
}

fn local_address(address: &str) -> String {
    let lower = address.to_lowercase();
    if NEARBY_AREAS.iter().any(|area| lower.contains(area)) {
        address.to_string()
    } else {
        format!("{}, Macomb, MI", address)
    }
}

fn card_elements<'a>(root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let cards = select_any(root, &CARD_SELECTORS);
    if !cards.is_empty() {
        return cards;
    }
    // last resort: climb from the business name to its card container
    select_all(root, BUSINESS_NAME)
        .into_iter()
        .filter_map(|name| name.ancestors().filter_map(ElementRef::wrap).nth(2))
        .collect()
}

fn parse_card(card: ElementRef<'_>, base: &str) -> Option<Card> {
    let name = select_text(
        card,
        &[
            "a.businessName__09f24__EYSZE span",
            ".css-1m051bw",
            "h3 a span",
        ],
    )?;

    let detail_url = select_first(card, &["a.businessName__09f24__EYSZE", "h3 a"])
        .and_then(|a| attr(a, "href"))
        .map(|href| normalize_url(&href, base));

    let cuisine = select_text(card, &[".css-16lklrv", ".css-dzq7l1", ".category-str-list"])
        .and_then(|text| {
            text.split(',')
                .next()
                .map(|first| first.trim().to_string())
                .filter(|first| !first.is_empty())
        });

    let rating = select_first(card, &[".css-1fdy0l5", ".i-stars"])
        .and_then(|stars| attr(stars, "aria-label"))
        .map(|label| rating_from_label(&label))
        .unwrap_or(0.0);

    Some(Card {
        name,
        detail_url,
        cuisine,
        address: select_text(card, &[".css-1e4fdj9", ".address-row"]).map(|a| local_address(&a)),
        rating,
        image_url: select_first(card, &["img.css-xlzvdl", ".photo-box img"])
            .and_then(|img| attr(img, "src")),
        price: select_text(card, &[".css-1s7bx9e", ".price-range"]),
    })
}

fn parse_results(html: &str, base: &str) -> ResultPage {
    let document = Html::parse_document(html);
    let root = document.root_element();
    ResultPage {
        cards: card_elements(root)
            .into_iter()
            .filter_map(|card| parse_card(card, base))
            .collect(),
        has_next: select_first(
            root,
            &["a.next-link", ".next_page", r#"[aria-label="Next page"]"#],
        )
        .is_some(),
    }
}

fn parse_detail(html: &str) -> Detail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let about = select_first(root, &[".css-1ewcb8b", ".from-the-business-section"])
        .map(|section| {
            select_all(section, "p")
                .into_iter()
                .map(text_of)
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty());

    let description = about.or_else(|| {
        let name = select_text(root, &["h1"])?;
        let categories: Vec<String> = select_any(root, &[".css-1fdy0l5", ".category-str-list a"])
            .into_iter()
            .map(text_of)
            .filter(|c| !c.is_empty())
            .take(2)
            .collect();
        Some(if categories.is_empty() {
            format!("{} is a popular dining establishment in Macomb County.", name)
        } else {
            format!(
                "{} is a {} restaurant in Macomb County.",
                name,
                categories.join(", ")
            )
        })
    });

    let address = select_first(root, &["address"])
        .map(|a| {
            let text = a.text().collect::<String>();
            let lines: Vec<String> = text
                .split('\n')
                .map(clean_text)
                .filter(|line| !line.is_empty())
                .collect();
            lines.join(", ")
        })
        .filter(|a| !a.is_empty());

    let opening_hours = select_first(root, &[".hours-section", ".css-1p9ibgf"])
        .map(|section| {
            select_all(section, "tbody tr")
                .into_iter()
                .filter_map(|row| {
                    let day = select_text(row, &[".day-of-the-week", ".css-1957s6z"])?;
                    let hours = select_text(row, &[".no-wrap", ".css-1kite64"])?;
                    Some(format!("{}: {}", day, hours))
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|hours| !hours.is_empty());

    let website = select_first(root, &[r#"a[href^="https://www.yelp.com/biz_redir"]"#])
        .and_then(|a| attr(a, "href"))
        .and_then(|href| redirect_target(&href));

    Detail {
        description,
        address,
        opening_hours,
        website,
    }
}

#[async_trait]
impl SourceAdapter for YelpAdapter {
    fn name(&self) -> &'static str {
        "yelp"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Restaurant
    }

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest {
        let mut harvest = SourceHarvest::default();

        for page in 1..=self.max_pages {
            let url = self.page_url(page);
            let Some(results) = pages.fetch_page(&url, None, false).await else {
                harvest.unavailable(url);
                break;
            };
            let ResultPage { cards, has_next } = parse_results(&results.html, &url);
            if cards.is_empty() {
                info!("No restaurant elements found on page {}", page);
                break;
            }

            for card in cards {
                let mut detail = Detail::default();
                if let Some(detail_url) = &card.detail_url {
                    if self.wants_detail(harvest.listings.len()) {
                        match pages.fetch_page(detail_url, None, false).await {
                            Some(detail_page) => detail = parse_detail(&detail_page.html),
                            None => harvest.unavailable(detail_url.clone()),
                        }
                    }
                }
                debug!("Scraped restaurant: {}", card.name);

                harvest.push(ScrapedListing::Restaurant(RestaurantDraft {
                    name: card.name,
                    description: detail.description.unwrap_or_default(),
                    cuisine: card.cuisine.unwrap_or_else(|| "American".to_string()),
                    address: detail.address.or(card.address).unwrap_or_default(),
                    price_level: price_level(card.price.as_deref()),
                    rating: card.rating,
                    opening_hours: detail
                        .opening_hours
                        .unwrap_or_else(|| "Call for hours".to_string()),
                    website: detail.website,
                    image_url: card.image_url,
                }));
            }

            if !has_next {
                break;
            }
            info!("Moving to page {}", page + 1);
        }

        harvest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sources::test_support::StaticPages;

    const SEARCH: &str = "https://www.yelp.com/search?find_desc=restaurants&find_loc=Macomb%2C+MI";

    fn card(n: usize) -> String {
        format!(
            r#"<li class="border-color--default__09f24__NPAKY">
                <h3><a href="/biz/diner-{n}"><span>Diner {n}</span></a></h3>
                <span class="category-str-list">Breakfast & Brunch, Diners</span>
                <span class="address-row">{n} Hall Rd</span>
                <div class="i-stars" aria-label="4.5 star rating"></div>
                <div class="photo-box"><img src="https://img.example.com/{n}.jpg"></div>
                <span class="price-range">$$$</span>
            </li>"#
        )
    }

    fn results(cards: std::ops::Range<usize>, next: bool) -> String {
        let cards: String = cards.map(card).collect();
        let next = if next { r##"<a class="next-link" href="#">Next</a>"## } else { "" };
        format!("<html><body><ul>{}</ul>{}</body></html>", cards, next)
    }

    const DETAIL: &str = r#"<html><body>
        <h1>Diner 5</h1>
        <section class="from-the-business-section"><p>Family owned</p><p>since 1971.</p></section>
        <address><p>42 Main St</p>
        <p>Sterling Heights, MI 48313</p></address>
        <div class="hours-section"><table><tbody>
            <tr><td class="day-of-the-week">Mon</td><td class="no-wrap">7:00 AM - 3:00 PM</td></tr>
            <tr><td class="day-of-the-week">Tue</td><td class="no-wrap">Closed</td></tr>
        </tbody></table></div>
        <a href="https://www.yelp.com/biz_redir?url=https%3A%2F%2Fdiner5.example%2F&cachebuster=1">site</a>
    </body></html>"#;

    #[test]
    fn test_local_address() {
        assert_eq!(local_address("1 Main St, Utica, MI"), "1 Main St, Utica, MI");
        assert_eq!(local_address("1 Main St"), "1 Main St, Macomb, MI");
    }

    #[test]
    fn test_parse_card_fields() {
        let page = parse_results(&results(0..1, true), SEARCH);

        assert!(page.has_next);
        let card = &page.cards[0];
        assert_eq!(card.name, "Diner 0");
        assert_eq!(card.detail_url.as_deref(), Some("https://www.yelp.com/biz/diner-0"));
        assert_eq!(card.cuisine.as_deref(), Some("Breakfast & Brunch"));
        assert_eq!(card.address.as_deref(), Some("0 Hall Rd, Macomb, MI"));
        assert_eq!(card.rating, 4.5);
        assert_eq!(card.price.as_deref(), Some("$$$"));
    }

    #[test]
    fn test_business_name_fallback_climbs_to_card() {
        let html = r#"<html><body><div class="card"><div><h3>
            <a class="businessName__09f24__EYSZE" href="/biz/x"><span>Coney Island</span></a>
            </h3></div><span class="address-row">5 Van Dyke, Utica</span></div></body></html>"#;

        let page = parse_results(html, SEARCH);

        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].name, "Coney Island");
        assert_eq!(page.cards[0].address.as_deref(), Some("5 Van Dyke, Utica"));
    }

    #[test]
    fn test_parse_detail() {
        let detail = parse_detail(DETAIL);

        assert_eq!(detail.description.as_deref(), Some("Family owned since 1971."));
        assert_eq!(
            detail.address.as_deref(),
            Some("42 Main St, Sterling Heights, MI 48313")
        );
        assert_eq!(
            detail.opening_hours.as_deref(),
            Some("Mon: 7:00 AM - 3:00 PM, Tue: Closed")
        );
        assert_eq!(detail.website.as_deref(), Some("https://diner5.example/"));
    }

    #[test]
    fn test_detail_description_from_name_and_categories() {
        let html = r#"<html><body><h1>Lou's</h1>
            <div class="category-str-list"><a>Diners</a><a>Burgers</a><a>Bars</a></div></body></html>"#;

        let detail = parse_detail(html);

        assert_eq!(
            detail.description.as_deref(),
            Some("Lou's is a Diners, Burgers restaurant in Macomb County.")
        );
    }

    #[tokio::test]
    async fn test_harvest_pages_and_every_fifth_detail() {
        let pages = StaticPages::new()
            .with(SEARCH, &results(0..5, true))
            .with(&format!("{}&start=10", SEARCH), &results(5..7, false))
            .with("https://www.yelp.com/biz/diner-5", DETAIL);
        let adapter = YelpAdapter::new(SEARCH, 5, 5);

        let harvest = adapter.harvest(&pages).await;

        assert_eq!(harvest.listings.len(), 7);
        assert!(harvest.unavailable_pages.is_empty());
        let detail_requests: Vec<String> = pages
            .requested()
            .into_iter()
            .filter(|u| u.contains("/biz/"))
            .collect();
        assert_eq!(detail_requests, vec!["https://www.yelp.com/biz/diner-5".to_string()]);

        let ScrapedListing::Restaurant(enriched) = &harvest.listings[5] else {
            panic!("expected a restaurant");
        };
        assert_eq!(enriched.address, "42 Main St, Sterling Heights, MI 48313");
        assert_eq!(enriched.price_level, 3);
        assert_eq!(enriched.opening_hours, "Mon: 7:00 AM - 3:00 PM, Tue: Closed");

        let ScrapedListing::Restaurant(plain) = &harvest.listings[0] else {
            panic!("expected a restaurant");
        };
        assert_eq!(plain.opening_hours, "Call for hours");
        assert_eq!(plain.website, None);
    }

    #[tokio::test]
    async fn test_unavailable_first_page_yields_nothing() {
        let pages = StaticPages::new();

        let harvest = YelpAdapter::new(SEARCH, 5, 5).harvest(&pages).await;

        assert!(harvest.listings.is_empty());
        assert_eq!(harvest.unavailable_pages, vec![SEARCH.to_string()]);
    }
}
