// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::catalog::{
    Attraction, EntityCounts, Event, HomePage, ListingFilter, Page, Property, Restaurant,
    SearchResults, TransportOption,
};
use crate::domain::models::city::CityOverview;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Read side of the listing tables, used by the API
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_attractions(&self, filter: &ListingFilter)
        -> Result<Page<Attraction>, RepositoryError>;
    async fn get_attraction(&self, id: i32) -> Result<Option<Attraction>, RepositoryError>;
    /// Other attractions of the same city and category
    async fn nearby_attractions(&self, id: i32, limit: u64)
        -> Result<Vec<Attraction>, RepositoryError>;

    async fn list_restaurants(&self, filter: &ListingFilter)
        -> Result<Page<Restaurant>, RepositoryError>;
    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, RepositoryError>;

    async fn list_events(&self, filter: &ListingFilter) -> Result<Page<Event>, RepositoryError>;
    async fn get_event(&self, id: i32) -> Result<Option<Event>, RepositoryError>;

    async fn list_properties(&self, filter: &ListingFilter)
        -> Result<Page<Property>, RepositoryError>;
    async fn get_property(&self, id: i32) -> Result<Option<Property>, RepositoryError>;

    async fn list_transport(&self, filter: &ListingFilter)
        -> Result<Page<TransportOption>, RepositoryError>;
    async fn get_transport(&self, id: i32) -> Result<Option<TransportOption>, RepositoryError>;

    /// Case-insensitive search across every listing kind
    ///
    /// # Arguments
    ///
    /// * `query` - substring to look for
    /// * `per_kind` - maximum hits returned for each kind
    async fn search(&self, query: &str, per_kind: u64) -> Result<SearchResults, RepositoryError>;

    async fn counts(&self) -> Result<EntityCounts, RepositoryError>;
    async fn recent_attractions(&self, limit: u64) -> Result<Vec<Attraction>, RepositoryError>;
    async fn recent_restaurants(&self, limit: u64) -> Result<Vec<Restaurant>, RepositoryError>;
    async fn upcoming_events(&self, city: Option<i32>, limit: u64)
        -> Result<Vec<Event>, RepositoryError>;

    async fn city_overview(&self, name: &str) -> Result<Option<CityOverview>, RepositoryError>;
    async fn home_page(&self, city: Option<i32>, limit: u64) -> Result<HomePage, RepositoryError>;
}
