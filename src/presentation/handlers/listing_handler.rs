// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::listing_query::{CityQueryDto, ListingQueryDto};
use crate::domain::models::catalog::{
    Attraction, Event, HomePage, Page, Property, Restaurant, TransportOption,
};
use crate::domain::models::listing::ListingKind;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::presentation::errors::{ApiError, AppError};

const NEARBY_LIMIT: u64 = 5;
const HOME_SECTION_SIZE: u64 = 5;
const UPCOMING_LIMIT: u64 = 10;

type Catalog = Extension<Arc<dyn CatalogRepository>>;

fn found<T>(value: Option<T>, what: &str) -> Result<Json<T>, AppError> {
    value
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(what.to_string()).into())
}

pub async fn list_attractions(
    Extension(catalog): Catalog,
    Query(query): Query<ListingQueryDto>,
) -> Result<Json<Page<Attraction>>, AppError> {
    query.validate()?;
    let filter = query.into_filter(ListingKind::Attraction);
    Ok(Json(catalog.list_attractions(&filter).await?))
}

pub async fn get_attraction(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<Attraction>, AppError> {
    found(catalog.get_attraction(id).await?, "Attraction")
}

/// Other attractions in the same city and category
pub async fn nearby_attractions(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Attraction>>, AppError> {
    Ok(Json(catalog.nearby_attractions(id, NEARBY_LIMIT).await?))
}

pub async fn list_restaurants(
    Extension(catalog): Catalog,
    Query(query): Query<ListingQueryDto>,
) -> Result<Json<Page<Restaurant>>, AppError> {
    query.validate()?;
    let filter = query.into_filter(ListingKind::Restaurant);
    Ok(Json(catalog.list_restaurants(&filter).await?))
}

pub async fn get_restaurant(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<Restaurant>, AppError> {
    found(catalog.get_restaurant(id).await?, "Restaurant")
}

pub async fn list_events(
    Extension(catalog): Catalog,
    Query(query): Query<ListingQueryDto>,
) -> Result<Json<Page<Event>>, AppError> {
    query.validate()?;
    let filter = query.into_filter(ListingKind::Event);
    Ok(Json(catalog.list_events(&filter).await?))
}

pub async fn upcoming_events(
    Extension(catalog): Catalog,
    Query(query): Query<CityQueryDto>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(catalog.upcoming_events(query.city, UPCOMING_LIMIT).await?))
}

pub async fn get_event(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<Event>, AppError> {
    found(catalog.get_event(id).await?, "Event")
}

pub async fn list_properties(
    Extension(catalog): Catalog,
    Query(query): Query<ListingQueryDto>,
) -> Result<Json<Page<Property>>, AppError> {
    query.validate()?;
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ApiError::BadRequest("min_price exceeds max_price".to_string()).into());
        }
    }
    let filter = query.into_filter(ListingKind::Property);
    Ok(Json(catalog.list_properties(&filter).await?))
}

pub async fn get_property(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<Property>, AppError> {
    found(catalog.get_property(id).await?, "Property")
}

pub async fn list_transport(
    Extension(catalog): Catalog,
    Query(query): Query<ListingQueryDto>,
) -> Result<Json<Page<TransportOption>>, AppError> {
    query.validate()?;
    let filter = query.into_filter(ListingKind::Transport);
    Ok(Json(catalog.list_transport(&filter).await?))
}

pub async fn get_transport(
    Extension(catalog): Catalog,
    Path(id): Path<i32>,
) -> Result<Json<TransportOption>, AppError> {
    found(catalog.get_transport(id).await?, "Transport option")
}

/// Featured attractions and restaurants plus upcoming events
pub async fn home(
    Extension(catalog): Catalog,
    Query(query): Query<CityQueryDto>,
) -> Result<Json<HomePage>, AppError> {
    Ok(Json(catalog.home_page(query.city, HOME_SECTION_SIZE).await?))
}
