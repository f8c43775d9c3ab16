// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    Json,
};
use std::sync::Arc;

use crate::domain::models::catalog::TaxonomyEntry;
use crate::domain::models::city::{City, CityOverview};
use crate::domain::models::listing::TaxonomyKind;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::domain::repositories::city_repository::CityRepository;
use crate::domain::repositories::taxonomy_repository::TaxonomyRepository;
use crate::presentation::errors::{ApiError, AppError};

pub async fn list_cities(
    Extension(cities): Extension<Arc<dyn CityRepository>>,
) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(cities.list().await?))
}

pub async fn get_city(
    Extension(cities): Extension<Arc<dyn CityRepository>>,
    Path(id): Path<i32>,
) -> Result<Json<City>, AppError> {
    let city = cities
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("City".to_string()))?;
    Ok(Json(city))
}

/// Listing counts for the city with this name
pub async fn city_overview(
    Extension(catalog): Extension<Arc<dyn CatalogRepository>>,
    Path(name): Path<String>,
) -> Result<Json<CityOverview>, AppError> {
    let overview = catalog
        .city_overview(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("City {}", name)))?;
    Ok(Json(overview))
}

async fn taxonomy(
    taxonomies: Arc<dyn TaxonomyRepository>,
    kind: TaxonomyKind,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    Ok(Json(taxonomies.list(kind).await?))
}

pub async fn list_categories(
    Extension(taxonomies): Extension<Arc<dyn TaxonomyRepository>>,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    taxonomy(taxonomies, TaxonomyKind::Category).await
}

pub async fn list_cuisines(
    Extension(taxonomies): Extension<Arc<dyn TaxonomyRepository>>,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    taxonomy(taxonomies, TaxonomyKind::Cuisine).await
}

pub async fn list_event_types(
    Extension(taxonomies): Extension<Arc<dyn TaxonomyRepository>>,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    taxonomy(taxonomies, TaxonomyKind::EventType).await
}

pub async fn list_property_types(
    Extension(taxonomies): Extension<Arc<dyn TaxonomyRepository>>,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    taxonomy(taxonomies, TaxonomyKind::PropertyType).await
}

pub async fn list_transport_types(
    Extension(taxonomies): Extension<Arc<dyn TaxonomyRepository>>,
) -> Result<Json<Vec<TaxonomyEntry>>, AppError> {
    taxonomy(taxonomies, TaxonomyKind::TransportType).await
}
