// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{AttractionDraft, ListingKind, ScrapedListing};
use crate::domain::sources::{PageSource, SourceAdapter, SourceHarvest};
use crate::infrastructure::scraping::document::{
    attr, normalize_url, redirect_target, select_all, select_first, select_text,
};
use async_trait::async_trait;
use scraper::Html;
use tracing::{debug, info};

/// Attraction cards on the TripAdvisor "things to do" listing
pub struct TripAdvisorAdapter {
    url: String,
    max_pages: u32,
}

struct Card {
    name: String,
    detail_url: String,
}

#[derive(Debug, Default, PartialEq)]
struct Detail {
    category: Option<String>,
    description: Option<String>,
    address: Option<String>,
    website: Option<String>,
    opening_hours: Option<String>,
    image_url: Option<String>,
}

impl TripAdvisorAdapter {
    pub fn new(url: impl Into<String>, max_pages: u32) -> Self {
        Self {
            url: url.into(),
            max_pages,
        }
    }

    /// `-oa{offset}` is inserted before `.html`, 30 cards per page
    fn page_url(&self, page: u32) -> String {
        if page == 0 {
            self.url.clone()
        } else {
            self.url.replace(".html", &format!("-oa{}.html", page * 30))
        }
    }
}

fn parse_cards(html: &str, base: &str) -> Vec<Card> {
    let document = Html::parse_document(html);
    select_all(document.root_element(), "div._T.Ci._S")
        .into_iter()
        .filter_map(|card| {
            let name = select_text(card, &["div._c"])?;
            let href = select_first(card, &["a[href]"]).and_then(|a| attr(a, "href"))?;
            Some(Card {
                name,
                detail_url: normalize_url(&href, base),
            })
        })
        .collect()
}

fn parse_detail(html: &str) -> Detail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let website = select_first(root, &["a.YnKZo._F.Gi.Gi2.GA"])
        .and_then(|a| attr(a, "href"))
        .map(|href| {
            if href.contains("/Commerce") {
                redirect_target(&href).unwrap_or(href)
            } else {
                href
            }
        });

    Detail {
        category: select_text(root, &["div.eHSEQ a"]),
        description: select_text(root, &["div._d"]),
        address: select_text(root, &["button.UikNM"]),
        website,
        opening_hours: select_text(root, &["div.opDsW"]),
        image_url: select_first(root, &["div.TRFEE img"]).and_then(|img| attr(img, "src")),
    }
}

#[async_trait]
impl SourceAdapter for TripAdvisorAdapter {
    fn name(&self) -> &'static str {
        "tripadvisor"
    }

    fn kind(&self) -> ListingKind {
        ListingKind::Attraction
    }

    async fn harvest(&self, pages: &dyn PageSource) -> SourceHarvest {
        let mut harvest = SourceHarvest::default();

        for page in 0..self.max_pages {
            let url = self.page_url(page);
            let Some(listing) = pages.fetch_page(&url, None, false).await else {
                harvest.unavailable(url);
                continue;
            };
            let cards = parse_cards(&listing.html, &url);
            info!("Found {} attraction cards on {}", cards.len(), url);

            for card in cards {
                let Some(detail_page) = pages.fetch_page(&card.detail_url, None, false).await
                else {
                    harvest.unavailable(card.detail_url);
                    continue;
                };
                let detail = parse_detail(&detail_page.html);
                debug!("Scraped attraction {}", card.name);

                harvest.push(ScrapedListing::Attraction(AttractionDraft {
                    name: card.name,
                    description: detail.description.unwrap_or_default(),
                    category: detail.category.unwrap_or_else(|| "Attraction".to_string()),
                    address: detail.address.unwrap_or_default(),
                    opening_hours: detail
                        .opening_hours
                        .unwrap_or_else(|| "Hours not available".to_string()),
                    website: detail.website,
                    image_url: detail.image_url,
                }));
            }
        }

        harvest
    }
}
