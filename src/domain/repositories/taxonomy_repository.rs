// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::catalog::TaxonomyEntry;
use crate::domain::models::listing::TaxonomyKind;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// Access to the category, cuisine, event type, property type and
/// transport type tables
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Id of the row named `name`, inserting it when missing
    ///
    /// The name is cleaned first; a blank name resolves to
    /// [`TaxonomyKind::default_name`].
    async fn resolve_or_insert(&self, kind: TaxonomyKind, name: &str)
        -> Result<i32, RepositoryError>;

    async fn list(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyEntry>, RepositoryError>;
}
