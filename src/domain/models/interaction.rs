// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub listing_kind: ListingKind,
    pub object_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub username: Option<String>,
    pub listing_kind: ListingKind,
    pub object_id: i32,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub listing_kind: ListingKind,
    pub object_id: i32,
    pub rating: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rsvp {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
