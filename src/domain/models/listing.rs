// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Kind of listing stored by the guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    #[serde(alias = "attractions")]
    Attraction,
    #[serde(alias = "restaurants")]
    Restaurant,
    #[serde(alias = "events")]
    Event,
    #[serde(alias = "properties")]
    Property,
    #[serde(alias = "transportation")]
    Transport,
}

impl ListingKind {
    pub const ALL: [ListingKind; 5] = [
        ListingKind::Attraction,
        ListingKind::Restaurant,
        ListingKind::Event,
        ListingKind::Property,
        ListingKind::Transport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Attraction => "attraction",
            ListingKind::Restaurant => "restaurant",
            ListingKind::Event => "event",
            ListingKind::Property => "property",
            ListingKind::Transport => "transport",
        }
    }

    /// Taxonomy that classifies this kind of listing
    pub fn taxonomy(&self) -> TaxonomyKind {
        match self {
            ListingKind::Attraction => TaxonomyKind::Category,
            ListingKind::Restaurant => TaxonomyKind::Cuisine,
            ListingKind::Event => TaxonomyKind::EventType,
            ListingKind::Property => TaxonomyKind::PropertyType,
            ListingKind::Transport => TaxonomyKind::TransportType,
        }
    }

    /// Storage directory for downloaded images, e.g. `attraction_images`
    pub fn image_dir(&self) -> String {
        format!("{}_images", self.as_str())
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attraction" | "attractions" => Ok(ListingKind::Attraction),
            "restaurant" | "restaurants" => Ok(ListingKind::Restaurant),
            "event" | "events" => Ok(ListingKind::Event),
            "property" | "properties" => Ok(ListingKind::Property),
            "transport" | "transportation" => Ok(ListingKind::Transport),
            other => Err(format!("Unknown listing kind: {}", other)),
        }
    }
}

/// Named classification tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    Category,
    Cuisine,
    EventType,
    PropertyType,
    TransportType,
}

impl TaxonomyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyKind::Category => "category",
            TaxonomyKind::Cuisine => "cuisine",
            TaxonomyKind::EventType => "event_type",
            TaxonomyKind::PropertyType => "property_type",
            TaxonomyKind::TransportType => "transport_type",
        }
    }

    /// Name used when a source does not provide one
    pub fn default_name(&self) -> &'static str {
        match self {
            TaxonomyKind::Category => "Attraction",
            TaxonomyKind::Cuisine => "American",
            TaxonomyKind::EventType => "Community Event",
            TaxonomyKind::PropertyType => "House",
            TaxonomyKind::TransportType => "Public Transit",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scrape run should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeTarget {
    All,
    Only(ListingKind),
}

impl ScrapeTarget {
    pub fn kinds(&self) -> Vec<ListingKind> {
        match self {
            ScrapeTarget::All => ListingKind::ALL.to_vec(),
            ScrapeTarget::Only(kind) => vec![*kind],
        }
    }
}

impl FromStr for ScrapeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ScrapeTarget::All);
        }
        s.parse::<ListingKind>().map(ScrapeTarget::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AttractionDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    pub category: String,
    #[validate(length(max = 255))]
    pub address: String,
    pub opening_hours: String,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RestaurantDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    pub cuisine: String,
    #[validate(length(max = 255))]
    pub address: String,
    #[validate(range(min = 1, max = 4))]
    pub price_level: i32,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    pub opening_hours: String,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    pub event_type: String,
    pub venue: String,
    #[validate(length(max = 255))]
    pub address: String,
    pub date: NaiveDate,
    /// `date` is a placeholder because the page date could not be parsed
    pub date_estimated: bool,
    pub time: NaiveTime,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PropertyDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    pub property_type: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[validate(range(min = 0.0))]
    pub bathrooms: f64,
    #[validate(range(min = 0))]
    pub size_sqft: i32,
    pub for_sale: bool,
    pub image_url: Option<String>,
    pub additional_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct TransportDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    pub transport_type: String,
    pub address: String,
    pub routes: String,
    pub schedule: String,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

/// A record extracted by a source adapter, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapedListing {
    Attraction(AttractionDraft),
    Restaurant(RestaurantDraft),
    Event(EventDraft),
    Property(PropertyDraft),
    Transport(TransportDraft),
}

impl ScrapedListing {
    pub fn kind(&self) -> ListingKind {
        match self {
            ScrapedListing::Attraction(_) => ListingKind::Attraction,
            ScrapedListing::Restaurant(_) => ListingKind::Restaurant,
            ScrapedListing::Event(_) => ListingKind::Event,
            ScrapedListing::Property(_) => ListingKind::Property,
            ScrapedListing::Transport(_) => ListingKind::Transport,
        }
    }

    /// Human readable natural key, used in run reports and logs
    pub fn label(&self) -> String {
        match self {
            ScrapedListing::Attraction(d) => format!("{} ({})", d.name, d.address),
            ScrapedListing::Restaurant(d) => format!("{} ({})", d.name, d.address),
            ScrapedListing::Event(d) => format!("{} on {}", d.name, d.date),
            ScrapedListing::Property(d) => format!("{} ({})", d.title, d.address),
            ScrapedListing::Transport(d) => d.name.clone(),
        }
    }

    /// Raw taxonomy name as scraped, possibly empty
    pub fn taxonomy_name(&self) -> &str {
        match self {
            ScrapedListing::Attraction(d) => &d.category,
            ScrapedListing::Restaurant(d) => &d.cuisine,
            ScrapedListing::Event(d) => &d.event_type,
            ScrapedListing::Property(d) => &d.property_type,
            ScrapedListing::Transport(d) => &d.transport_type,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            ScrapedListing::Attraction(d) => &d.address,
            ScrapedListing::Restaurant(d) => &d.address,
            ScrapedListing::Event(d) => &d.address,
            ScrapedListing::Property(d) => &d.address,
            ScrapedListing::Transport(d) => &d.address,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        let url = match self {
            ScrapedListing::Attraction(d) => d.image_url.as_deref(),
            ScrapedListing::Restaurant(d) => d.image_url.as_deref(),
            ScrapedListing::Event(d) => d.image_url.as_deref(),
            ScrapedListing::Property(d) => d.image_url.as_deref(),
            ScrapedListing::Transport(d) => d.image_url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            ScrapedListing::Attraction(d) => d.validate(),
            ScrapedListing::Restaurant(d) => d.validate(),
            ScrapedListing::Event(d) => d.validate(),
            ScrapedListing::Property(d) => d.validate(),
            ScrapedListing::Transport(d) => d.validate(),
        }
    }
}

/// Geographic point returned by geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_accepts_plural_forms() {
        assert_eq!("attractions".parse::<ListingKind>(), Ok(ListingKind::Attraction));
        assert_eq!("Transportation".parse::<ListingKind>(), Ok(ListingKind::Transport));
        assert!("museums".parse::<ListingKind>().is_err());
    }

    #[test]
    fn test_scrape_target() {
        assert_eq!("all".parse::<ScrapeTarget>().unwrap().kinds().len(), 5);
        assert_eq!(
            "events".parse::<ScrapeTarget>().unwrap().kinds(),
            vec![ListingKind::Event]
        );
    }

    #[test]
    fn test_validation_rejects_blank_names() {
        let listing = ScrapedListing::Transport(TransportDraft {
            name: String::new(),
            description: String::new(),
            transport_type: String::new(),
            address: String::new(),
            routes: String::new(),
            schedule: String::new(),
            website: None,
            image_url: Some("  ".to_string()),
        });

        assert!(listing.validate().is_err());
        assert_eq!(listing.image_url(), None);
        assert_eq!(ListingKind::Transport.image_dir(), "transport_images");
    }
}
