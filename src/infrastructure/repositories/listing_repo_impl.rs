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

use crate::domain::models::listing::{
    AttractionDraft, Coordinates, EventDraft, ListingKind, PropertyDraft, RestaurantDraft,
    ScrapedListing, TransportDraft,
};
use crate::domain::repositories::listing_repository::{ListingRepository, UpsertResult};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    attraction, event, property, property_image, restaurant, transport_option,
};
use crate::infrastructure::repositories::now;
use async_trait::async_trait;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;

/// Listing write repository implementation
///
/// Each kind is looked up by its natural key first; an existing row gets its
/// mutable fields refreshed and keeps its id.
pub struct ListingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ListingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn upsert_attraction(
        &self,
        city_id: i32,
        category_id: i32,
        d: &AttractionDraft,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError> {
        let db = self.db.as_ref();
        let existing = attraction::Entity::find()
            .filter(attraction::Column::Name.eq(d.name.as_str()))
            .filter(attraction::Column::Address.eq(d.address.as_str()))
            .one(db)
            .await?;

        let timestamp = now();
        let (mut model, result) = match existing {
            Some(row) => {
                let result = UpsertResult {
                    id: row.id,
                    created: false,
                    has_image: row.image.is_some(),
                };
                (row.into_active_model(), result)
            }
            None => (
                attraction::ActiveModel {
                    name: Set(d.name.clone()),
                    address: Set(d.address.clone()),
                    featured: Set(false),
                    image: Set(None),
                    website: Set(None),
                    latitude: Set(None),
                    longitude: Set(None),
                    created_at: Set(timestamp),
                    ..Default::default()
                },
                UpsertResult {
                    id: 0,
                    created: true,
                    has_image: false,
                },
            ),
        };

        model.description = Set(d.description.clone());
        model.category_id = Set(category_id);
        model.city_id = Set(city_id);
        model.opening_hours = Set(d.opening_hours.clone());
        if d.website.is_some() {
            model.website = Set(d.website.clone());
        }
        if let Some(c) = coordinates {
            model.latitude = Set(Some(c.latitude));
            model.longitude = Set(Some(c.longitude));
        }
        model.updated_at = Set(timestamp);

        let saved = if result.created {
            model.insert(db).await?
        } else {
            model.update(db).await?
        };
        Ok(UpsertResult {
            id: saved.id,
            ..result
        })
    }

    async fn upsert_restaurant(
        &self,
        city_id: i32,
        cuisine_id: i32,
        d: &RestaurantDraft,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError> {
        let db = self.db.as_ref();
        let existing = restaurant::Entity::find()
            .filter(restaurant::Column::Name.eq(d.name.as_str()))
            .filter(restaurant::Column::Address.eq(d.address.as_str()))
            .one(db)
            .await?;

        let timestamp = now();
        let (mut model, result) = match existing {
            Some(row) => {
                let result = UpsertResult {
                    id: row.id,
                    created: false,
                    has_image: row.image.is_some(),
                };
                (row.into_active_model(), result)
            }
            None => (
                restaurant::ActiveModel {
                    name: Set(d.name.clone()),
                    address: Set(d.address.clone()),
                    featured: Set(false),
                    image: Set(None),
                    latitude: Set(None),
                    longitude: Set(None),
                    website: Set(None),
                    created_at: Set(timestamp),
                    ..Default::default()
                },
                UpsertResult {
                    id: 0,
                    created: true,
                    has_image: false,
                },
            ),
        };

        model.description = Set(d.description.clone());
        model.cuisine_id = Set(cuisine_id);
        model.city_id = Set(city_id);
        model.opening_hours = Set(d.opening_hours.clone());
        model.price_level = Set(d.price_level);
        model.rating = Set(d.rating);
        if d.website.is_some() {
            model.website = Set(d.website.clone());
        }
        if let Some(c) = coordinates {
            model.latitude = Set(Some(c.latitude));
            model.longitude = Set(Some(c.longitude));
        }
        model.updated_at = Set(timestamp);

        let saved = if result.created {
            model.insert(db).await?
        } else {
            model.update(db).await?
        };
        Ok(UpsertResult {
            id: saved.id,
            ..result
        })
    }

    async fn upsert_event(
        &self,
        city_id: i32,
        event_type_id: i32,
        d: &EventDraft,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError> {
        let db = self.db.as_ref();
        // A placeholder date changes on every run, so such events match any
        // upcoming event of the same name and keep their stored date.
        let mut lookup = event::Entity::find().filter(event::Column::Name.eq(d.name.as_str()));
        lookup = if d.date_estimated {
            lookup
                .filter(event::Column::Date.gte(chrono::Local::now().date_naive()))
                .order_by_asc(event::Column::Id)
        } else {
            lookup.filter(event::Column::Date.eq(d.date))
        };
        let existing = lookup.one(db).await?;

        let timestamp = now();
        let (mut model, result) = match existing {
            Some(row) => {
                let result = UpsertResult {
                    id: row.id,
                    created: false,
                    has_image: row.image.is_some(),
                };
                (row.into_active_model(), result)
            }
            None => (
                event::ActiveModel {
                    name: Set(d.name.clone()),
                    date: Set(d.date),
                    featured: Set(false),
                    image: Set(None),
                    latitude: Set(None),
                    longitude: Set(None),
                    website: Set(None),
                    created_at: Set(timestamp),
                    ..Default::default()
                },
                UpsertResult {
                    id: 0,
                    created: true,
                    has_image: false,
                },
            ),
        };

        model.description = Set(d.description.clone());
        model.event_type_id = Set(event_type_id);
        model.city_id = Set(city_id);
        model.venue = Set(d.venue.clone());
        model.address = Set(d.address.clone());
        model.time = Set(d.time);
        if d.website.is_some() {
            model.website = Set(d.website.clone());
        }
        if let Some(c) = coordinates {
            model.latitude = Set(Some(c.latitude));
            model.longitude = Set(Some(c.longitude));
        }
        model.updated_at = Set(timestamp);

        let saved = if result.created {
            model.insert(db).await?
        } else {
            model.update(db).await?
        };
        Ok(UpsertResult {
            id: saved.id,
            ..result
        })
    }

    async fn upsert_property(
        &self,
        city_id: i32,
        property_type_id: i32,
        d: &PropertyDraft,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError> {
        let db = self.db.as_ref();
        let existing = property::Entity::find()
            .filter(property::Column::Title.eq(d.title.as_str()))
            .filter(property::Column::Address.eq(d.address.as_str()))
            .one(db)
            .await?;

        let timestamp = now();
        let (mut model, result) = match existing {
            Some(row) => {
                let result = UpsertResult {
                    id: row.id,
                    created: false,
                    has_image: row.image.is_some(),
                };
                (row.into_active_model(), result)
            }
            None => (
                property::ActiveModel {
                    title: Set(d.title.clone()),
                    address: Set(d.address.clone()),
                    featured: Set(false),
                    image: Set(None),
                    latitude: Set(None),
                    longitude: Set(None),
                    created_at: Set(timestamp),
                    ..Default::default()
                },
                UpsertResult {
                    id: 0,
                    created: true,
                    has_image: false,
                },
            ),
        };

        // a detail page that failed to load leaves the description empty
        if result.created || !d.description.is_empty() {
            model.description = Set(d.description.clone());
        }
        model.property_type_id = Set(property_type_id);
        model.city_id = Set(city_id);
        model.price = Set(d.price);
        model.bedrooms = Set(d.bedrooms);
        model.bathrooms = Set(d.bathrooms);
        model.size_sqft = Set(d.size_sqft);
        model.for_sale = Set(d.for_sale);
        if let Some(c) = coordinates {
            model.latitude = Set(Some(c.latitude));
            model.longitude = Set(Some(c.longitude));
        }
        model.updated_at = Set(timestamp);

        let saved = if result.created {
            model.insert(db).await?
        } else {
            model.update(db).await?
        };
        Ok(UpsertResult {
            id: saved.id,
            ..result
        })
    }

    async fn upsert_transport(
        &self,
        city_id: i32,
        transport_type_id: i32,
        d: &TransportDraft,
    ) -> Result<UpsertResult, RepositoryError> {
        let db = self.db.as_ref();
        let existing = transport_option::Entity::find()
            .filter(transport_option::Column::Name.eq(d.name.as_str()))
            .one(db)
            .await?;

        let timestamp = now();
        let (mut model, result) = match existing {
            Some(row) => {
                let result = UpsertResult {
                    id: row.id,
                    created: false,
                    has_image: row.image.is_some(),
                };
                (row.into_active_model(), result)
            }
            None => (
                transport_option::ActiveModel {
                    name: Set(d.name.clone()),
                    featured: Set(false),
                    image: Set(None),
                    website: Set(None),
                    created_at: Set(timestamp),
                    ..Default::default()
                },
                UpsertResult {
                    id: 0,
                    created: true,
                    has_image: false,
                },
            ),
        };

        model.description = Set(d.description.clone());
        model.transport_type_id = Set(transport_type_id);
        model.city_id = Set(city_id);
        model.address = Set(non_empty(&d.address));
        model.routes = Set(non_empty(&d.routes));
        model.schedule = Set(non_empty(&d.schedule));
        if d.website.is_some() {
            model.website = Set(d.website.clone());
        }
        model.updated_at = Set(timestamp);

        let saved = if result.created {
            model.insert(db).await?
        } else {
            model.update(db).await?
        };
        Ok(UpsertResult {
            id: saved.id,
            ..result
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl ListingRepository for ListingRepositoryImpl {
    async fn upsert(
        &self,
        city_id: i32,
        taxonomy_id: i32,
        listing: &ScrapedListing,
        coordinates: Option<Coordinates>,
    ) -> Result<UpsertResult, RepositoryError> {
        match listing {
            ScrapedListing::Attraction(d) => {
                self.upsert_attraction(city_id, taxonomy_id, d, coordinates)
                    .await
            }
            ScrapedListing::Restaurant(d) => {
                self.upsert_restaurant(city_id, taxonomy_id, d, coordinates)
                    .await
            }
            ScrapedListing::Event(d) => self.upsert_event(city_id, taxonomy_id, d, coordinates).await,
            ScrapedListing::Property(d) => {
                self.upsert_property(city_id, taxonomy_id, d, coordinates)
                    .await
            }
            ScrapedListing::Transport(d) => self.upsert_transport(city_id, taxonomy_id, d).await,
        }
    }

    async fn set_image(
        &self,
        kind: ListingKind,
        id: i32,
        path: &str,
    ) -> Result<(), RepositoryError> {
        let db = self.db.as_ref();
        let timestamp = now();
        let result = match kind {
            ListingKind::Attraction => {
                attraction::Entity::update_many()
                    .col_expr(attraction::Column::Image, Expr::value(path))
                    .col_expr(attraction::Column::UpdatedAt, Expr::value(timestamp))
                    .filter(attraction::Column::Id.eq(id))
                    .exec(db)
                    .await?
            }
            ListingKind::Restaurant => {
                restaurant::Entity::update_many()
                    .col_expr(restaurant::Column::Image, Expr::value(path))
                    .col_expr(restaurant::Column::UpdatedAt, Expr::value(timestamp))
                    .filter(restaurant::Column::Id.eq(id))
                    .exec(db)
                    .await?
            }
            ListingKind::Event => {
                event::Entity::update_many()
                    .col_expr(event::Column::Image, Expr::value(path))
                    .col_expr(event::Column::UpdatedAt, Expr::value(timestamp))
                    .filter(event::Column::Id.eq(id))
                    .exec(db)
                    .await?
            }
            ListingKind::Property => {
                property::Entity::update_many()
                    .col_expr(property::Column::Image, Expr::value(path))
                    .col_expr(property::Column::UpdatedAt, Expr::value(timestamp))
                    .filter(property::Column::Id.eq(id))
                    .exec(db)
                    .await?
            }
            ListingKind::Transport => {
                transport_option::Entity::update_many()
                    .col_expr(transport_option::Column::Image, Expr::value(path))
                    .col_expr(transport_option::Column::UpdatedAt, Expr::value(timestamp))
                    .filter(transport_option::Column::Id.eq(id))
                    .exec(db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn add_property_image(&self, property_id: i32, path: &str) -> Result<(), RepositoryError> {
        property_image::ActiveModel {
            property_id: Set(property_id),
            image: Set(path.to_string()),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }

    async fn property_image_count(&self, property_id: i32) -> Result<u64, RepositoryError> {
        Ok(property_image::Entity::find()
            .filter(property_image::Column::PropertyId.eq(property_id))
            .count(self.db.as_ref())
            .await?)
    }

    async fn exists(&self, kind: ListingKind, id: i32) -> Result<bool, RepositoryError> {
        let db = self.db.as_ref();
        let count = match kind {
            ListingKind::Attraction => attraction::Entity::find_by_id(id).count(db).await?,
            ListingKind::Restaurant => restaurant::Entity::find_by_id(id).count(db).await?,
            ListingKind::Event => event::Entity::find_by_id(id).count(db).await?,
            ListingKind::Property => property::Entity::find_by_id(id).count(db).await?,
            ListingKind::Transport => transport_option::Entity::find_by_id(id).count(db).await?,
        };
        Ok(count > 0)
    }
}
