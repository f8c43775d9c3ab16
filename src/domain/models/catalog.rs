// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::Contact;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of one of the taxonomy tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attraction {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub category: Option<String>,
    pub city_id: i32,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: String,
    pub website: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cuisine_id: i32,
    pub cuisine: Option<String>,
    pub city_id: i32,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: String,
    pub website: Option<String>,
    pub price_level: i32,
    pub rating: f64,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub event_type_id: i32,
    pub event_type: Option<String>,
    pub city_id: i32,
    pub venue: String,
    pub address: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub website: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub property_type_id: i32,
    pub property_type: Option<String>,
    pub city_id: i32,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub size_sqft: i32,
    pub for_sale: bool,
    pub image: Option<String>,
    pub additional_images: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportOption {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub transport_type_id: i32,
    pub transport_type: Option<String>,
    pub city_id: i32,
    pub address: Option<String>,
    pub routes: Option<String>,
    pub schedule: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters shared by the listing endpoints
///
/// Kind specific fields are ignored by listings they do not apply to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub city: Option<i32>,
    /// Taxonomy name, compared case-insensitively
    pub taxonomy: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    /// Column name, `-` prefix for descending
    pub ordering: Option<String>,
    pub limit: u64,
    pub offset: u64,
    pub upcoming: Option<bool>,
    pub date: Option<NaiveDate>,
    pub for_sale: Option<bool>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub price_level: Option<i32>,
}

/// One page of a listing query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

/// Cross entity search hits
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub attractions: Vec<Attraction>,
    pub restaurants: Vec<Restaurant>,
    pub events: Vec<Event>,
    pub properties: Vec<Property>,
    pub transportation: Vec<TransportOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityCounts {
    pub cities: u64,
    pub attractions: u64,
    pub restaurants: u64,
    pub events: u64,
    pub properties: u64,
    pub transportation: u64,
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub counts: EntityCounts,
    pub recent_attractions: Vec<Attraction>,
    pub recent_restaurants: Vec<Restaurant>,
    pub upcoming_events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_contacts: Option<Vec<Contact>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub featured_attractions: Vec<Attraction>,
    pub upcoming_events: Vec<Event>,
    pub featured_restaurants: Vec<Restaurant>,
}
