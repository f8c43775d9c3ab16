// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::interaction::User;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Users and their API keys
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up the owner of an API key
    async fn find_by_api_key(&self, key: &str) -> Result<Option<User>, RepositoryError>;
    /// Returns `Conflict` when the username is taken
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        is_staff: bool,
    ) -> Result<User, RepositoryError>;
    /// Generate and store a new key for `user_id`
    async fn issue_api_key(&self, user_id: i32) -> Result<String, RepositoryError>;
}
