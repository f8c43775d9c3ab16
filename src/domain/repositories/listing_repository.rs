// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{Coordinates, ListingKind, ScrapedListing};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Result of an upsert by natural key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertResult {
    pub id: i32,
    pub created: bool,
    /// The stored row already references an image
    pub has_image: bool,
}

/// Write side of the listing tables, used by ingestion
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert or update a listing by its natural key
    ///
    /// # Arguments
    ///
    /// * `city_id` - owning city
    /// * `taxonomy_id` - resolved taxonomy row for the listing's kind
    /// * `listing` - scraped draft
    /// * `coordinates` - geocoded position; `None` leaves stored values alone
    async fn upsert(
        &self,
        city_id: i32,
        taxonomy_id: i32,
        listing: &ScrapedListing,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError>;

    /// Record the stored image path of a listing
    async fn set_image(&self, kind: ListingKind, id: i32, path: &str)
        -> Result<(), RepositoryError>;

    async fn add_property_image(&self, property_id: i32, path: &str)
        -> Result<(), RepositoryError>;

    async fn property_image_count(&self, property_id: i32) -> Result<u64, RepositoryError>;

    /// Whether a listing with this id exists
    async fn exists(&self, kind: ListingKind, id: i32) -> Result<bool, RepositoryError>;
}
