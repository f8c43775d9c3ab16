// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::{Contact, Favorite, NewContact, NewReview, Review, Rsvp};
use crate::domain::models::listing::ListingKind;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Favorites, reviews, RSVPs and contact messages
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn list_favorites(
        &self,
        user_id: i32,
        kind: Option<ListingKind>,
    ) -> Result<Vec<Favorite>, RepositoryError>;
    /// Returns `Conflict` when the favorite already exists
    async fn add_favorite(
        &self,
        user_id: i32,
        kind: ListingKind,
        object_id: i32,
    ) -> Result<Favorite, RepositoryError>;
    /// Returns `NotFound` unless the favorite belongs to `user_id`
    async fn remove_favorite(&self, user_id: i32, id: i32) -> Result<(), RepositoryError>;

    async fn list_reviews(
        &self,
        kind: Option<ListingKind>,
        object_id: Option<i32>,
    ) -> Result<Vec<Review>, RepositoryError>;
    async fn create_review(&self, user_id: i32, review: &NewReview)
        -> Result<Review, RepositoryError>;

    async fn list_rsvps(&self, user_id: i32) -> Result<Vec<Rsvp>, RepositoryError>;
    /// Returns `Conflict` when the user already responded to the event
    async fn create_rsvp(&self, user_id: i32, event_id: i32) -> Result<Rsvp, RepositoryError>;
    async fn delete_rsvp(&self, user_id: i32, id: i32) -> Result<(), RepositoryError>;

    async fn create_contact(
        &self,
        user_id: Option<i32>,
        contact: &NewContact,
    ) -> Result<Contact, RepositoryError>;
    /// Messages of one user, or every message when `user_id` is `None`
    async fn list_contacts(
        &self,
        user_id: Option<i32>,
        limit: Option<u64>,
    ) -> Result<Vec<Contact>, RepositoryError>;
}
