// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::city::{City, CityMerge, NewCity};
use crate::domain::repositories::city_repository::CityRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    attraction, city, event, property, restaurant, transport_option,
};
use crate::infrastructure::repositories::now;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use tracing::info;

/// City repository implementation
pub struct CityRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CityRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn rows_named(&self, name: &str) -> Result<Vec<city::Model>, RepositoryError> {
        Ok(city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .order_by_asc(city::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }
}

pub(crate) fn to_domain(model: city::Model) -> City {
    City {
        id: model.id,
        name: model.name,
        state: model.state,
        description: model.description,
        population: model.population,
        climate: model.climate,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl CityRepository for CityRepositoryImpl {
    async fn get_or_create(&self, new_city: &NewCity) -> Result<City, RepositoryError> {
        if let Some(existing) = city::Entity::find()
            .filter(city::Column::Name.eq(new_city.name.as_str()))
            .order_by_asc(city::Column::Id)
            .one(self.db.as_ref())
            .await?
        {
            return Ok(to_domain(existing));
        }

        let timestamp = now();
        let model = city::ActiveModel {
            name: Set(new_city.name.clone()),
            state: Set(new_city.state.clone()),
            description: Set(new_city.description.clone()),
            population: Set(new_city.population),
            climate: Set(new_city.climate.clone()),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        info!("Created city {} with id {}", model.name, model.id);
        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<City>, RepositoryError> {
        Ok(city::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(to_domain))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<City>, RepositoryError> {
        Ok(self.rows_named(name).await?.into_iter().next().map(to_domain))
    }

    async fn list(&self) -> Result<Vec<City>, RepositoryError> {
        Ok(city::Entity::find()
            .order_by_asc(city::Column::Name)
            .order_by_asc(city::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    async fn merge_duplicates(&self, name: &str) -> Result<Option<CityMerge>, RepositoryError> {
        let rows = self.rows_named(name).await?;
        let Some((kept, duplicates)) = rows.split_first() else {
            return Ok(None);
        };
        let removed_ids: Vec<i32> = duplicates.iter().map(|c| c.id).collect();
        if removed_ids.is_empty() {
            return Ok(Some(CityMerge {
                kept_id: kept.id,
                removed_ids,
                moved_listings: 0,
            }));
        }

        let txn = self.db.begin().await?;
        let mut moved = 0;

        moved += attraction::Entity::update_many()
            .col_expr(attraction::Column::CityId, Expr::value(kept.id))
            .filter(attraction::Column::CityId.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        moved += restaurant::Entity::update_many()
            .col_expr(restaurant::Column::CityId, Expr::value(kept.id))
            .filter(restaurant::Column::CityId.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        moved += event::Entity::update_many()
            .col_expr(event::Column::CityId, Expr::value(kept.id))
            .filter(event::Column::CityId.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        moved += property::Entity::update_many()
            .col_expr(property::Column::CityId, Expr::value(kept.id))
            .filter(property::Column::CityId.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        moved += transport_option::Entity::update_many()
            .col_expr(transport_option::Column::CityId, Expr::value(kept.id))
            .filter(transport_option::Column::CityId.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        city::Entity::delete_many()
            .filter(city::Column::Id.is_in(removed_ids.clone()))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            "Merged {} duplicate rows of city {} into id {} ({} listings moved)",
            removed_ids.len(),
            name,
            kept.id,
            moved
        );

        Ok(Some(CityMerge {
            kept_id: kept.id,
            removed_ids,
            moved_listings: moved,
        }))
    }
}
