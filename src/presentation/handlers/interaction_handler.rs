// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::interaction_request::{
    ContactRequestDto, FavoriteQueryDto, FavoriteRequestDto, ReviewQueryDto, ReviewRequestDto,
    RsvpRequestDto,
};
use crate::domain::models::interaction::{Contact, Favorite, Review, Rsvp};
use crate::domain::models::listing::ListingKind;
use crate::domain::repositories::interaction_repository::InteractionRepository;
use crate::domain::repositories::listing_repository::ListingRepository;
use crate::presentation::errors::{ApiError, AppError};
use crate::presentation::extractors::current_user::{CurrentUser, MaybeUser};

type Interactions = Extension<Arc<dyn InteractionRepository>>;
type Listings = Extension<Arc<dyn ListingRepository>>;

async fn ensure_listing(
    listings: &dyn ListingRepository,
    kind: ListingKind,
    id: i32,
) -> Result<(), AppError> {
    if listings.exists(kind, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("{} {}", kind, id)).into())
    }
}

pub async fn list_favorites(
    Extension(interactions): Interactions,
    CurrentUser(user): CurrentUser,
    Query(query): Query<FavoriteQueryDto>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    Ok(Json(interactions.list_favorites(user.id, query.kind).await?))
}

pub async fn add_favorite(
    Extension(interactions): Interactions,
    Extension(listings): Listings,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<FavoriteRequestDto>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    ensure_listing(listings.as_ref(), payload.listing_kind, payload.object_id).await?;
    let favorite = interactions
        .add_favorite(user.id, payload.listing_kind, payload.object_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove_favorite(
    Extension(interactions): Interactions,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    interactions.remove_favorite(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_rsvps(
    Extension(interactions): Interactions,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Rsvp>>, AppError> {
    Ok(Json(interactions.list_rsvps(user.id).await?))
}

pub async fn create_rsvp(
    Extension(interactions): Interactions,
    Extension(listings): Listings,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<RsvpRequestDto>,
) -> Result<(StatusCode, Json<Rsvp>), AppError> {
    ensure_listing(listings.as_ref(), ListingKind::Event, payload.event_id).await?;
    let rsvp = interactions.create_rsvp(user.id, payload.event_id).await?;
    Ok((StatusCode::CREATED, Json(rsvp)))
}

pub async fn delete_rsvp(
    Extension(interactions): Interactions,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    interactions.delete_rsvp(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public list of reviews, optionally for one listing
pub async fn list_reviews(
    Extension(interactions): Interactions,
    Query(query): Query<ReviewQueryDto>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(
        interactions.list_reviews(query.kind, query.object_id).await?,
    ))
}

pub async fn create_review(
    Extension(interactions): Interactions,
    Extension(listings): Listings,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ReviewRequestDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    payload.validate()?;
    ensure_listing(listings.as_ref(), payload.listing_kind, payload.object_id).await?;
    let review = interactions.create_review(user.id, &payload.into()).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Anyone may write; the sender is recorded when authenticated
pub async fn create_contact(
    Extension(interactions): Interactions,
    MaybeUser(user): MaybeUser,
    Json(payload): Json<ContactRequestDto>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    payload.validate()?;
    let contact = interactions
        .create_contact(user.map(|u| u.id), &payload.into())
        .await?;
    info!("Contact message {} received", contact.id);
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Staff see every message, other users only their own
pub async fn list_contacts(
    Extension(interactions): Interactions,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Contact>>, AppError> {
    let owner = if user.is_staff { None } else { Some(user.id) };
    Ok(Json(interactions.list_contacts(owner, None).await?))
}
