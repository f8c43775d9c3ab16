// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::catalog::TaxonomyEntry;
use crate::domain::models::listing::TaxonomyKind;
use crate::domain::repositories::taxonomy_repository::TaxonomyRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::scraping::document::clean_text;
use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, OnConflict, Order, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use std::sync::Arc;
use tracing::debug;

/// The five taxonomy tables share the `(id, name unique)` layout, so they
/// are addressed by table name instead of through five entities.
fn table(kind: TaxonomyKind) -> Alias {
    Alias::new(match kind {
        TaxonomyKind::Category => "categories",
        TaxonomyKind::Cuisine => "cuisines",
        TaxonomyKind::EventType => "event_types",
        TaxonomyKind::PropertyType => "property_types",
        TaxonomyKind::TransportType => "transport_types",
    })
}

/// Taxonomy repository implementation
pub struct TaxonomyRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TaxonomyRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_id(&self, kind: TaxonomyKind, name: &str) -> Result<Option<i32>, DbErr> {
        let stmt = Query::select()
            .column(Alias::new("id"))
            .from(table(kind))
            .and_where(Expr::col(Alias::new("name")).eq(name))
            .to_owned();
        let backend = self.db.get_database_backend();
        match self.db.query_one(backend.build(&stmt)).await? {
            Some(row) => Ok(Some(row.try_get::<i32>("", "id")?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TaxonomyRepository for TaxonomyRepositoryImpl {
    async fn resolve_or_insert(
        &self,
        kind: TaxonomyKind,
        name: &str,
    ) -> Result<i32, RepositoryError> {
        let cleaned = clean_text(name);
        let name = if cleaned.is_empty() {
            kind.default_name().to_string()
        } else {
            cleaned
        };

        if let Some(id) = self.find_id(kind, &name).await? {
            return Ok(id);
        }

        let insert = Query::insert()
            .into_table(table(kind))
            .columns([Alias::new("name")])
            .values([name.as_str().into()])
            .map_err(|e| DbErr::Custom(e.to_string()))?
            .on_conflict(OnConflict::column(Alias::new("name")).do_nothing().to_owned())
            .to_owned();
        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&insert)).await?;
        debug!("Inserted {} {:?}", kind, name);

        self.find_id(kind, &name)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyEntry>, RepositoryError> {
        let stmt = Query::select()
            .columns([Alias::new("id"), Alias::new("name")])
            .from(table(kind))
            .order_by(Alias::new("name"), Order::Asc)
            .to_owned();
        let backend = self.db.get_database_backend();
        let rows = self.db.query_all(backend.build(&stmt)).await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(TaxonomyEntry {
                id: row.try_get("", "id")?,
                name: row.try_get("", "name")?,
            });
        }
        Ok(entries)
    }
}
