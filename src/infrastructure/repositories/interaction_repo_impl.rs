// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::{Contact, Favorite, NewContact, NewReview, Review, Rsvp};
use crate::domain::models::listing::ListingKind;
use crate::domain::repositories::interaction_repository::InteractionRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{contact, favorite, review, rsvp, user};
use crate::infrastructure::repositories::{conflict_or_db, now};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

fn parse_kind(raw: &str) -> Result<ListingKind, RepositoryError> {
    raw.parse()
        .map_err(|e: String| RepositoryError::Database(DbErr::Custom(e)))
}

fn favorite_to_domain(model: favorite::Model) -> Result<Favorite, RepositoryError> {
    Ok(Favorite {
        id: model.id,
        user_id: model.user_id,
        listing_kind: parse_kind(&model.listing_kind)?,
        object_id: model.object_id,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn review_to_domain(
    model: review::Model,
    author: Option<user::Model>,
) -> Result<Review, RepositoryError> {
    Ok(Review {
        id: model.id,
        user_id: model.user_id,
        username: author.map(|u| u.username),
        listing_kind: parse_kind(&model.listing_kind)?,
        object_id: model.object_id,
        rating: model.rating,
        content: model.content,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn rsvp_to_domain(model: rsvp::Model) -> Rsvp {
    Rsvp {
        id: model.id,
        user_id: model.user_id,
        event_id: model.event_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn contact_to_domain(model: contact::Model) -> Contact {
    Contact {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        email: model.email,
        subject: model.subject,
        message: model.message,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

/// Interaction repository implementation
pub struct InteractionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl InteractionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InteractionRepository for InteractionRepositoryImpl {
    async fn list_favorites(
        &self,
        user_id: i32,
        kind: Option<ListingKind>,
    ) -> Result<Vec<Favorite>, RepositoryError> {
        let mut query = favorite::Entity::find().filter(favorite::Column::UserId.eq(user_id));
        if let Some(kind) = kind {
            query = query.filter(favorite::Column::ListingKind.eq(kind.as_str()));
        }
        query
            .order_by_desc(favorite::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(favorite_to_domain)
            .collect()
    }

    async fn add_favorite(
        &self,
        user_id: i32,
        kind: ListingKind,
        object_id: i32,
    ) -> Result<Favorite, RepositoryError> {
        let model = favorite::ActiveModel {
            user_id: Set(user_id),
            listing_kind: Set(kind.as_str().to_string()),
            object_id: Set(object_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| conflict_or_db(e, "already in favorites"))?;
        favorite_to_domain(model)
    }

    async fn remove_favorite(&self, user_id: i32, id: i32) -> Result<(), RepositoryError> {
        let result = favorite::Entity::delete_many()
            .filter(favorite::Column::Id.eq(id))
            .filter(favorite::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list_reviews(
        &self,
        kind: Option<ListingKind>,
        object_id: Option<i32>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let mut query = review::Entity::find();
        if let Some(kind) = kind {
            query = query.filter(review::Column::ListingKind.eq(kind.as_str()));
        }
        if let Some(object_id) = object_id {
            query = query.filter(review::Column::ObjectId.eq(object_id));
        }
        query
            .order_by_desc(review::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(model, author)| review_to_domain(model, author))
            .collect()
    }

    async fn create_review(
        &self,
        user_id: i32,
        new_review: &NewReview,
    ) -> Result<Review, RepositoryError> {
        let timestamp = now();
        let model = review::ActiveModel {
            user_id: Set(user_id),
            listing_kind: Set(new_review.listing_kind.as_str().to_string()),
            object_id: Set(new_review.object_id),
            rating: Set(new_review.rating),
            content: Set(new_review.content.clone()),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        let author = user::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await?;
        review_to_domain(model, author)
    }

    async fn list_rsvps(&self, user_id: i32) -> Result<Vec<Rsvp>, RepositoryError> {
        Ok(rsvp::Entity::find()
            .filter(rsvp::Column::UserId.eq(user_id))
            .order_by_desc(rsvp::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(rsvp_to_domain)
            .collect())
    }

    async fn create_rsvp(&self, user_id: i32, event_id: i32) -> Result<Rsvp, RepositoryError> {
        let model = rsvp::ActiveModel {
            user_id: Set(user_id),
            event_id: Set(event_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| conflict_or_db(e, "already responded to this event"))?;
        Ok(rsvp_to_domain(model))
    }

    async fn delete_rsvp(&self, user_id: i32, id: i32) -> Result<(), RepositoryError> {
        let result = rsvp::Entity::delete_many()
            .filter(rsvp::Column::Id.eq(id))
            .filter(rsvp::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_contact(
        &self,
        user_id: Option<i32>,
        new_contact: &NewContact,
    ) -> Result<Contact, RepositoryError> {
        let model = contact::ActiveModel {
            user_id: Set(user_id),
            name: Set(new_contact.name.clone()),
            email: Set(new_contact.email.clone()),
            subject: Set(new_contact.subject.clone()),
            message: Set(new_contact.message.clone()),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(contact_to_domain(model))
    }

    async fn list_contacts(
        &self,
        user_id: Option<i32>,
        limit: Option<u64>,
    ) -> Result<Vec<Contact>, RepositoryError> {
        let mut query = contact::Entity::find();
        if let Some(user_id) = user_id {
            query = query.filter(contact::Column::UserId.eq(user_id));
        }
        Ok(query
            .order_by_desc(contact::Column::CreatedAt)
            .order_by_desc(contact::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(contact_to_domain)
            .collect())
    }
}
