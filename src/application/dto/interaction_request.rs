// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::{NewContact, NewReview};
use crate::domain::models::listing::ListingKind;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct FavoriteRequestDto {
    pub listing_kind: ListingKind,
    pub object_id: i32,
}

/// `?kind=` on the favorites list
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteQueryDto {
    pub kind: Option<ListingKind>,
}

#[derive(Debug, Deserialize)]
pub struct RsvpRequestDto {
    pub event_id: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequestDto {
    pub listing_kind: ListingKind,
    pub object_id: i32,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1, max = 5000, message = "content cannot be empty"))]
    pub content: String,
}

impl From<ReviewRequestDto> for NewReview {
    fn from(dto: ReviewRequestDto) -> Self {
        Self {
            listing_kind: dto.listing_kind,
            object_id: dto.object_id,
            rating: dto.rating,
            content: dto.content,
        }
    }
}

/// `?kind=&object_id=` on the public review list
#[derive(Debug, Default, Deserialize)]
pub struct ReviewQueryDto {
    pub kind: Option<ListingKind>,
    pub object_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequestDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl From<ContactRequestDto> for NewContact {
    fn from(dto: ContactRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            subject: dto.subject,
            message: dto.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rating_range() {
        let review: ReviewRequestDto = serde_json::from_value(serde_json::json!({
            "listing_kind": "restaurant",
            "object_id": 3,
            "rating": 6,
            "content": "Great pierogi"
        }))
        .unwrap();

        assert!(review.validate().is_err());
    }

    #[test]
    fn test_contact_requires_valid_email() {
        let contact = ContactRequestDto {
            name: "Pat".to_string(),
            email: "not-an-email".to_string(),
            subject: "Hello".to_string(),
            message: "Question about parking".to_string(),
        };

        let errors = contact.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
