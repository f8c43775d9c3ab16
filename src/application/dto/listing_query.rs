// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::catalog::ListingFilter;
use crate::domain::models::listing::ListingKind;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

const DEFAULT_PAGE_SIZE: u64 = 20;

/// Query string accepted by the listing endpoints
///
/// Each kind reads its own taxonomy parameter (`category`, `cuisine`,
/// `event_type`, `property_type`, `transport_type`); the others are ignored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListingQueryDto {
    pub city: Option<i32>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub event_type: Option<String>,
    pub property_type: Option<String>,
    pub transport_type: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub upcoming: Option<bool>,
    pub date: Option<NaiveDate>,
    pub for_sale: Option<bool>,
    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0.0))]
    pub bathrooms: Option<f64>,
    #[validate(range(min = 1, max = 4))]
    pub price_level: Option<i32>,
}

impl ListingQueryDto {
    pub fn into_filter(self, kind: ListingKind) -> ListingFilter {
        let taxonomy = match kind {
            ListingKind::Attraction => self.category,
            ListingKind::Restaurant => self.cuisine,
            ListingKind::Event => self.event_type,
            ListingKind::Property => self.property_type,
            ListingKind::Transport => self.transport_type,
        };

        ListingFilter {
            city: self.city,
            taxonomy: taxonomy.filter(|t| !t.trim().is_empty()),
            featured: self.featured,
            search: self.search.filter(|s| !s.trim().is_empty()),
            ordering: self.ordering,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
            upcoming: self.upcoming,
            date: self.date,
            for_sale: self.for_sale,
            min_price: self.min_price,
            max_price: self.max_price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            price_level: self.price_level,
        }
    }
}

/// `?city=` on the home page and upcoming event lists
#[derive(Debug, Default, Deserialize)]
pub struct CityQueryDto {
    pub city: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_parameter_follows_kind() {
        let query = ListingQueryDto {
            category: Some("Museum".to_string()),
            cuisine: Some("Thai".to_string()),
            ..Default::default()
        };

        let filter = query.into_filter(ListingKind::Restaurant);

        assert_eq!(filter.taxonomy.as_deref(), Some("Thai"));
        assert_eq!(filter.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListingQueryDto {
            search: Some("  ".to_string()),
            limit: Some(5),
            ..Default::default()
        };

        let filter = query.into_filter(ListingKind::Attraction);

        assert_eq!(filter.search, None);
        assert_eq!(filter.limit, 5);
    }

    #[test]
    fn test_limit_bounds() {
        let query = ListingQueryDto {
            limit: Some(500),
            ..Default::default()
        };

        assert!(query.validate().is_err());
    }
}
