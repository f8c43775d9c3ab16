// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::city::{City, CityMerge, NewCity};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// City data access
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Return the city named `city.name` with the lowest id, creating it
    /// from `city` when no row matches
    async fn get_or_create(&self, city: &NewCity) -> Result<City, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<City>, RepositoryError>;
    /// Lowest id row with this exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<City>, RepositoryError>;
    async fn list(&self) -> Result<Vec<City>, RepositoryError>;
    /// Keep the lowest id row named `name`, re-point every listing of the
    /// other rows to it and delete them
    async fn merge_duplicates(&self, name: &str) -> Result<Option<CityMerge>, RepositoryError>;
}
