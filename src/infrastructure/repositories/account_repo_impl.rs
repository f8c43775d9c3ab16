// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::User;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{api_key, user};
use crate::infrastructure::repositories::{conflict_or_db, now};
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

fn to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        is_staff: model.is_staff,
    }
}

/// Account repository implementation
pub struct AccountRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn find_by_api_key(&self, key: &str) -> Result<Option<User>, RepositoryError> {
        let found = api_key::Entity::find_by_id(key.to_string())
            .find_also_related(user::Entity)
            .one(self.db.as_ref())
            .await?;
        Ok(found.and_then(|(_, owner)| owner).map(to_domain))
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        is_staff: bool,
    ) -> Result<User, RepositoryError> {
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            is_staff: Set(is_staff),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| conflict_or_db(e, "username already taken"))?;
        Ok(to_domain(model))
    }

    async fn issue_api_key(&self, user_id: i32) -> Result<String, RepositoryError> {
        let key = format!("cg_{}", Uuid::new_v4().simple());
        api_key::ActiveModel {
            key: Set(key.clone()),
            user_id: Set(user_id),
            created_at: Set(now()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(key)
    }
}
