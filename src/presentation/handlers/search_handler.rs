// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::application::dto::scrape_request::SearchQueryDto;
use crate::domain::models::catalog::SearchResults;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::presentation::errors::{ApiError, AppError};

const MIN_QUERY_CHARS: usize = 2;
const RESULTS_PER_KIND: u64 = 10;

/// Case-insensitive search across every listing kind
pub async fn search(
    Extension(catalog): Extension<Arc<dyn CatalogRepository>>,
    Query(query): Query<SearchQueryDto>,
) -> Result<Json<SearchResults>, AppError> {
    let q = query.q.trim();
    if q.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Search query must be at least {} characters",
            MIN_QUERY_CHARS
        ))
        .into());
    }

    debug!("Searching listings for {}", q);
    Ok(Json(catalog.search(q, RESULTS_PER_KIND).await?))
}
