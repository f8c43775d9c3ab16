// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::domain::models::catalog::DashboardStats;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::domain::repositories::interaction_repository::InteractionRepository;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::MaybeUser;

const RECENT_LIMIT: u64 = 5;

/// Entity counts and the most recent listings
///
/// Recent contact messages are only included for staff.
pub async fn stats(
    Extension(catalog): Extension<Arc<dyn CatalogRepository>>,
    Extension(interactions): Extension<Arc<dyn InteractionRepository>>,
    MaybeUser(user): MaybeUser,
) -> Result<Json<DashboardStats>, AppError> {
    let recent_contacts = match user {
        Some(user) if user.is_staff => {
            Some(interactions.list_contacts(None, Some(RECENT_LIMIT)).await?)
        }
        _ => None,
    };

    Ok(Json(DashboardStats {
        counts: catalog.counts().await?,
        recent_attractions: catalog.recent_attractions(RECENT_LIMIT).await?,
        recent_restaurants: catalog.recent_restaurants(RECENT_LIMIT).await?,
        upcoming_events: catalog.upcoming_events(None, RECENT_LIMIT).await?,
        recent_contacts,
    }))
}
