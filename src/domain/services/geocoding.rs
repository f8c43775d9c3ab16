// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Geocoder returned status {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Address to coordinates lookup
#[async_trait]
pub trait GeocodingGateway: Send + Sync {
    /// Resolve a free-form address
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Coordinates))` - best match
    /// * `Ok(None)` - the geocoder knows no such address
    /// * `Err(GeocodingError)` - the lookup itself failed
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, GeocodingError>;
}
