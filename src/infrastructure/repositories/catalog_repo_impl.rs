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

use crate::domain::models::catalog::{
    Attraction, EntityCounts, Event, HomePage, ListingFilter, Page, Property, Restaurant,
    SearchResults, TransportOption,
};
use crate::domain::models::city::CityOverview;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    attraction, category, city, cuisine, event, event_type, property, property_image,
    property_type, restaurant, transport_option, transport_type, user,
};
use crate::infrastructure::repositories::city_repo_impl;
use crate::infrastructure::repositories::{icontains, iequals};
use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use sea_orm::sea_query::Query;
use sea_orm::*;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

fn attraction_view(model: attraction::Model, taxonomy: Option<category::Model>) -> Attraction {
    Attraction {
        id: model.id,
        name: model.name,
        description: model.description,
        category_id: model.category_id,
        category: taxonomy.map(|t| t.name),
        city_id: model.city_id,
        address: model.address,
        latitude: model.latitude,
        longitude: model.longitude,
        opening_hours: model.opening_hours,
        website: model.website,
        image: model.image,
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn restaurant_view(model: restaurant::Model, taxonomy: Option<cuisine::Model>) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        description: model.description,
        cuisine_id: model.cuisine_id,
        cuisine: taxonomy.map(|t| t.name),
        city_id: model.city_id,
        address: model.address,
        latitude: model.latitude,
        longitude: model.longitude,
        opening_hours: model.opening_hours,
        website: model.website,
        price_level: model.price_level,
        rating: model.rating,
        image: model.image,
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn event_view(model: event::Model, taxonomy: Option<event_type::Model>) -> Event {
    Event {
        id: model.id,
        name: model.name,
        description: model.description,
        event_type_id: model.event_type_id,
        event_type: taxonomy.map(|t| t.name),
        city_id: model.city_id,
        venue: model.venue,
        address: model.address,
        date: model.date,
        time: model.time,
        website: model.website,
        image: model.image,
        featured: model.featured,
        latitude: model.latitude,
        longitude: model.longitude,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn property_view(
    model: property::Model,
    taxonomy: Option<property_type::Model>,
    additional_images: Vec<String>,
) -> Property {
    Property {
        id: model.id,
        title: model.title,
        description: model.description,
        property_type_id: model.property_type_id,
        property_type: taxonomy.map(|t| t.name),
        city_id: model.city_id,
        address: model.address,
        latitude: model.latitude,
        longitude: model.longitude,
        price: model.price,
        bedrooms: model.bedrooms,
        bathrooms: model.bathrooms,
        size_sqft: model.size_sqft,
        for_sale: model.for_sale,
        image: model.image,
        additional_images,
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn transport_view(
    model: transport_option::Model,
    taxonomy: Option<transport_type::Model>,
) -> TransportOption {
    TransportOption {
        id: model.id,
        name: model.name,
        description: model.description,
        transport_type_id: model.transport_type_id,
        transport_type: taxonomy.map(|t| t.name),
        city_id: model.city_id,
        address: model.address,
        routes: model.routes,
        schedule: model.schedule,
        website: model.website,
        image: model.image,
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

/// Parse `name` or `-name` into a whitelisted column and direction
fn ordering<C: FromStr>(raw: Option<&str>, allowed: &[&str]) -> Option<(C, Order)> {
    let raw = raw?.trim();
    let (name, order) = match raw.strip_prefix('-') {
        Some(name) => (name, Order::Desc),
        None => (raw, Order::Asc),
    };
    if !allowed.contains(&name) {
        return None;
    }
    C::from_str(name).ok().map(|column| (column, order))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Catalog repository implementation
pub struct CatalogRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CatalogRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn attraction_condition(filter: &ListingFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(city_id) = filter.city {
            cond = cond.add(attraction::Column::CityId.eq(city_id));
        }
        if let Some(featured) = filter.featured {
            cond = cond.add(attraction::Column::Featured.eq(featured));
        }
        if let Some(name) = &filter.taxonomy {
            cond = cond.add(
                attraction::Column::CategoryId.in_subquery(
                    Query::select()
                        .column(category::Column::Id)
                        .from(category::Entity)
                        .and_where(iequals((category::Entity, category::Column::Name), name))
                        .to_owned(),
                ),
            );
        }
        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            cond = cond.add(
                Condition::any()
                    .add(icontains((attraction::Entity, attraction::Column::Name), q))
                    .add(icontains(
                        (attraction::Entity, attraction::Column::Description),
                        q,
                    )),
            );
        }
        cond
    }

    fn restaurant_condition(filter: &ListingFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(city_id) = filter.city {
            cond = cond.add(restaurant::Column::CityId.eq(city_id));
        }
        if let Some(featured) = filter.featured {
            cond = cond.add(restaurant::Column::Featured.eq(featured));
        }
        if let Some(level) = filter.price_level {
            cond = cond.add(restaurant::Column::PriceLevel.eq(level));
        }
        if let Some(name) = &filter.taxonomy {
            cond = cond.add(
                restaurant::Column::CuisineId.in_subquery(
                    Query::select()
                        .column(cuisine::Column::Id)
                        .from(cuisine::Entity)
                        .and_where(iequals((cuisine::Entity, cuisine::Column::Name), name))
                        .to_owned(),
                ),
            );
        }
        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            cond = cond.add(
                Condition::any()
                    .add(icontains((restaurant::Entity, restaurant::Column::Name), q))
                    .add(icontains(
                        (restaurant::Entity, restaurant::Column::Description),
                        q,
                    )),
            );
        }
        cond
    }

    fn event_condition(filter: &ListingFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(city_id) = filter.city {
            cond = cond.add(event::Column::CityId.eq(city_id));
        }
        if let Some(featured) = filter.featured {
            cond = cond.add(event::Column::Featured.eq(featured));
        }
        if let Some(date) = filter.date {
            cond = cond.add(event::Column::Date.eq(date));
        }
        match filter.upcoming {
            Some(true) => cond = cond.add(event::Column::Date.gte(today())),
            Some(false) => cond = cond.add(event::Column::Date.lt(today())),
            None => {}
        }
        if let Some(name) = &filter.taxonomy {
            cond = cond.add(
                event::Column::EventTypeId.in_subquery(
                    Query::select()
                        .column(event_type::Column::Id)
                        .from(event_type::Entity)
                        .and_where(iequals((event_type::Entity, event_type::Column::Name), name))
                        .to_owned(),
                ),
            );
        }
        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            cond = cond.add(Self::event_search(q));
        }
        cond
    }

    fn event_search(q: &str) -> Condition {
        Condition::any()
            .add(icontains((event::Entity, event::Column::Name), q))
            .add(icontains((event::Entity, event::Column::Description), q))
            .add(icontains((event::Entity, event::Column::Venue), q))
    }

    fn property_condition(filter: &ListingFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(city_id) = filter.city {
            cond = cond.add(property::Column::CityId.eq(city_id));
        }
        if let Some(featured) = filter.featured {
            cond = cond.add(property::Column::Featured.eq(featured));
        }
        if let Some(for_sale) = filter.for_sale {
            cond = cond.add(property::Column::ForSale.eq(for_sale));
        }
        if let Some(min) = filter.min_price {
            cond = cond.add(property::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            cond = cond.add(property::Column::Price.lte(max));
        }
        if let Some(bedrooms) = filter.bedrooms {
            cond = cond.add(property::Column::Bedrooms.eq(bedrooms));
        }
        if let Some(bathrooms) = filter.bathrooms {
            cond = cond.add(property::Column::Bathrooms.eq(bathrooms));
        }
        if let Some(name) = &filter.taxonomy {
            cond = cond.add(
                property::Column::PropertyTypeId.in_subquery(
                    Query::select()
                        .column(property_type::Column::Id)
                        .from(property_type::Entity)
                        .and_where(iequals(
                            (property_type::Entity, property_type::Column::Name),
                            name,
                        ))
                        .to_owned(),
                ),
            );
        }
        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            cond = cond.add(Self::property_search(q));
        }
        cond
    }

    fn property_search(q: &str) -> Condition {
        Condition::any()
            .add(icontains((property::Entity, property::Column::Title), q))
            .add(icontains((property::Entity, property::Column::Description), q))
            .add(icontains((property::Entity, property::Column::Address), q))
    }

    fn transport_condition(filter: &ListingFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(city_id) = filter.city {
            cond = cond.add(transport_option::Column::CityId.eq(city_id));
        }
        if let Some(featured) = filter.featured {
            cond = cond.add(transport_option::Column::Featured.eq(featured));
        }
        if let Some(name) = &filter.taxonomy {
            cond = cond.add(
                transport_option::Column::TransportTypeId.in_subquery(
                    Query::select()
                        .column(transport_type::Column::Id)
                        .from(transport_type::Entity)
                        .and_where(iequals(
                            (transport_type::Entity, transport_type::Column::Name),
                            name,
                        ))
                        .to_owned(),
                ),
            );
        }
        if let Some(q) = filter.search.as_deref().filter(|q| !q.trim().is_empty()) {
            cond = cond.add(Self::transport_search(q));
        }
        cond
    }

    fn transport_search(q: &str) -> Condition {
        Condition::any()
            .add(icontains(
                (transport_option::Entity, transport_option::Column::Name),
                q,
            ))
            .add(icontains(
                (transport_option::Entity, transport_option::Column::Description),
                q,
            ))
            .add(icontains(
                (transport_option::Entity, transport_option::Column::Routes),
                q,
            ))
    }

    async fn gallery(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<String>>, RepositoryError> {
        let mut gallery: HashMap<i32, Vec<String>> = HashMap::new();
        if ids.is_empty() {
            return Ok(gallery);
        }
        let images = property_image::Entity::find()
            .filter(property_image::Column::PropertyId.is_in(ids.to_vec()))
            .order_by_asc(property_image::Column::Id)
            .all(self.db.as_ref())
            .await?;
        for image in images {
            gallery.entry(image.property_id).or_default().push(image.image);
        }
        Ok(gallery)
    }

    async fn properties_with_gallery(
        &self,
        rows: Vec<(property::Model, Option<property_type::Model>)>,
    ) -> Result<Vec<Property>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|(p, _)| p.id).collect();
        let mut gallery = self.gallery(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|(p, t)| {
                let images = gallery.remove(&p.id).unwrap_or_default();
                property_view(p, t, images)
            })
            .collect())
    }

    async fn featured_attractions(
        &self,
        city: Option<i32>,
        limit: u64,
    ) -> Result<Vec<Attraction>, RepositoryError> {
        let mut query = attraction::Entity::find().filter(attraction::Column::Featured.eq(true));
        if let Some(city_id) = city {
            query = query.filter(attraction::Column::CityId.eq(city_id));
        }
        Ok(query
            .order_by_asc(attraction::Column::Name)
            .find_also_related(category::Entity)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(m, t)| attraction_view(m, t))
            .collect())
    }

    async fn featured_restaurants(
        &self,
        city: Option<i32>,
        limit: u64,
    ) -> Result<Vec<Restaurant>, RepositoryError> {
        let mut query = restaurant::Entity::find().filter(restaurant::Column::Featured.eq(true));
        if let Some(city_id) = city {
            query = query.filter(restaurant::Column::CityId.eq(city_id));
        }
        Ok(query
            .order_by_desc(restaurant::Column::Rating)
            .find_also_related(cuisine::Entity)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(m, t)| restaurant_view(m, t))
            .collect())
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn list_attractions(
        &self,
        filter: &ListingFilter,
    ) -> Result<Page<Attraction>, RepositoryError> {
        let db = self.db.as_ref();
        let cond = Self::attraction_condition(filter);
        let count = attraction::Entity::find()
            .filter(cond.clone())
            .count(db)
            .await?;

        let mut query = attraction::Entity::find().filter(cond);
        query = match ordering::<attraction::Column>(filter.ordering.as_deref(), &["name"]) {
            Some((column, order)) => query.order_by(column, order),
            None => query.order_by_asc(attraction::Column::Name),
        };
        let results = query
            .order_by_asc(attraction::Column::Id)
            .find_also_related(category::Entity)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| attraction_view(m, t))
            .collect();

        Ok(Page { count, results })
    }

    async fn get_attraction(&self, id: i32) -> Result<Option<Attraction>, RepositoryError> {
        Ok(attraction::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(self.db.as_ref())
            .await?
            .map(|(m, t)| attraction_view(m, t)))
    }

    async fn nearby_attractions(
        &self,
        id: i32,
        limit: u64,
    ) -> Result<Vec<Attraction>, RepositoryError> {
        let db = self.db.as_ref();
        let anchor = attraction::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(attraction::Entity::find()
            .filter(attraction::Column::CityId.eq(anchor.city_id))
            .filter(attraction::Column::CategoryId.eq(anchor.category_id))
            .filter(attraction::Column::Id.ne(anchor.id))
            .order_by_asc(attraction::Column::Name)
            .find_also_related(category::Entity)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| attraction_view(m, t))
            .collect())
    }

    async fn list_restaurants(
        &self,
        filter: &ListingFilter,
    ) -> Result<Page<Restaurant>, RepositoryError> {
        let db = self.db.as_ref();
        let cond = Self::restaurant_condition(filter);
        let count = restaurant::Entity::find()
            .filter(cond.clone())
            .count(db)
            .await?;

        let mut query = restaurant::Entity::find().filter(cond);
        query = match ordering::<restaurant::Column>(
            filter.ordering.as_deref(),
            &["name", "rating", "price_level"],
        ) {
            Some((column, order)) => query.order_by(column, order),
            None => query.order_by_asc(restaurant::Column::Name),
        };
        let results = query
            .order_by_asc(restaurant::Column::Id)
            .find_also_related(cuisine::Entity)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| restaurant_view(m, t))
            .collect();

        Ok(Page { count, results })
    }

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, RepositoryError> {
        Ok(restaurant::Entity::find_by_id(id)
            .find_also_related(cuisine::Entity)
            .one(self.db.as_ref())
            .await?
            .map(|(m, t)| restaurant_view(m, t)))
    }

    async fn list_events(&self, filter: &ListingFilter) -> Result<Page<Event>, RepositoryError> {
        let db = self.db.as_ref();
        let cond = Self::event_condition(filter);
        let count = event::Entity::find().filter(cond.clone()).count(db).await?;

        let mut query = event::Entity::find().filter(cond);
        query = match ordering::<event::Column>(filter.ordering.as_deref(), &["date", "name"]) {
            Some((column, order)) => query.order_by(column, order),
            None => query
                .order_by_asc(event::Column::Date)
                .order_by_asc(event::Column::Time),
        };
        let results = query
            .order_by_asc(event::Column::Id)
            .find_also_related(event_type::Entity)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| event_view(m, t))
            .collect();

        Ok(Page { count, results })
    }

    async fn get_event(&self, id: i32) -> Result<Option<Event>, RepositoryError> {
        Ok(event::Entity::find_by_id(id)
            .find_also_related(event_type::Entity)
            .one(self.db.as_ref())
            .await?
            .map(|(m, t)| event_view(m, t)))
    }

    async fn list_properties(
        &self,
        filter: &ListingFilter,
    ) -> Result<Page<Property>, RepositoryError> {
        let db = self.db.as_ref();
        let cond = Self::property_condition(filter);
        let count = property::Entity::find().filter(cond.clone()).count(db).await?;

        let mut query = property::Entity::find().filter(cond);
        query = match ordering::<property::Column>(
            filter.ordering.as_deref(),
            &["price", "bedrooms", "size_sqft", "created_at"],
        ) {
            Some((column, order)) => query.order_by(column, order),
            None => query.order_by_desc(property::Column::CreatedAt),
        };
        let rows = query
            .order_by_asc(property::Column::Id)
            .find_also_related(property_type::Entity)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?;

        Ok(Page {
            count,
            results: self.properties_with_gallery(rows).await?,
        })
    }

    async fn get_property(&self, id: i32) -> Result<Option<Property>, RepositoryError> {
        let row = property::Entity::find_by_id(id)
            .find_also_related(property_type::Entity)
            .one(self.db.as_ref())
            .await?;
        match row {
            Some(row) => Ok(self.properties_with_gallery(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_transport(
        &self,
        filter: &ListingFilter,
    ) -> Result<Page<TransportOption>, RepositoryError> {
        let db = self.db.as_ref();
        let cond = Self::transport_condition(filter);
        let count = transport_option::Entity::find()
            .filter(cond.clone())
            .count(db)
            .await?;

        let mut query = transport_option::Entity::find().filter(cond);
        query = match ordering::<transport_option::Column>(filter.ordering.as_deref(), &["name"]) {
            Some((column, order)) => query.order_by(column, order),
            None => query.order_by_asc(transport_option::Column::Name),
        };
        let results = query
            .order_by_asc(transport_option::Column::Id)
            .find_also_related(transport_type::Entity)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| transport_view(m, t))
            .collect();

        Ok(Page { count, results })
    }

    async fn get_transport(&self, id: i32) -> Result<Option<TransportOption>, RepositoryError> {
        Ok(transport_option::Entity::find_by_id(id)
            .find_also_related(transport_type::Entity)
            .one(self.db.as_ref())
            .await?
            .map(|(m, t)| transport_view(m, t)))
    }

    async fn search(&self, query: &str, per_kind: u64) -> Result<SearchResults, RepositoryError> {
        let db = self.db.as_ref();
        let q = query.trim();

        let attractions = attraction::Entity::find()
            .filter(
                Condition::any()
                    .add(icontains((attraction::Entity, attraction::Column::Name), q))
                    .add(icontains(
                        (attraction::Entity, attraction::Column::Description),
                        q,
                    )),
            )
            .order_by_asc(attraction::Column::Name)
            .find_also_related(category::Entity)
            .limit(per_kind)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| attraction_view(m, t))
            .collect();

        let restaurants = restaurant::Entity::find()
            .filter(
                Condition::any()
                    .add(icontains((restaurant::Entity, restaurant::Column::Name), q))
                    .add(icontains(
                        (restaurant::Entity, restaurant::Column::Description),
                        q,
                    )),
            )
            .order_by_asc(restaurant::Column::Name)
            .find_also_related(cuisine::Entity)
            .limit(per_kind)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| restaurant_view(m, t))
            .collect();

        let events = event::Entity::find()
            .filter(Self::event_search(q))
            .order_by_asc(event::Column::Date)
            .find_also_related(event_type::Entity)
            .limit(per_kind)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| event_view(m, t))
            .collect();

        let property_rows = property::Entity::find()
            .filter(Self::property_search(q))
            .order_by_asc(property::Column::Title)
            .find_also_related(property_type::Entity)
            .limit(per_kind)
            .all(db)
            .await?;

        let transportation = transport_option::Entity::find()
            .filter(Self::transport_search(q))
            .order_by_asc(transport_option::Column::Name)
            .find_also_related(transport_type::Entity)
            .limit(per_kind)
            .all(db)
            .await?
            .into_iter()
            .map(|(m, t)| transport_view(m, t))
            .collect();

        Ok(SearchResults {
            attractions,
            restaurants,
            events,
            properties: self.properties_with_gallery(property_rows).await?,
            transportation,
        })
    }

    async fn counts(&self) -> Result<EntityCounts, RepositoryError> {
        let db = self.db.as_ref();
        Ok(EntityCounts {
            cities: city::Entity::find().count(db).await?,
            attractions: attraction::Entity::find().count(db).await?,
            restaurants: restaurant::Entity::find().count(db).await?,
            events: event::Entity::find().count(db).await?,
            properties: property::Entity::find().count(db).await?,
            transportation: transport_option::Entity::find().count(db).await?,
            users: user::Entity::find().count(db).await?,
        })
    }

    async fn recent_attractions(&self, limit: u64) -> Result<Vec<Attraction>, RepositoryError> {
        Ok(attraction::Entity::find()
            .order_by_desc(attraction::Column::CreatedAt)
            .order_by_desc(attraction::Column::Id)
            .find_also_related(category::Entity)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(m, t)| attraction_view(m, t))
            .collect())
    }

    async fn recent_restaurants(&self, limit: u64) -> Result<Vec<Restaurant>, RepositoryError> {
        Ok(restaurant::Entity::find()
            .order_by_desc(restaurant::Column::CreatedAt)
            .order_by_desc(restaurant::Column::Id)
            .find_also_related(cuisine::Entity)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(m, t)| restaurant_view(m, t))
            .collect())
    }

    async fn upcoming_events(
        &self,
        city: Option<i32>,
        limit: u64,
    ) -> Result<Vec<Event>, RepositoryError> {
        let mut query = event::Entity::find().filter(event::Column::Date.gte(today()));
        if let Some(city_id) = city {
            query = query.filter(event::Column::CityId.eq(city_id));
        }
        Ok(query
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Time)
            .find_also_related(event_type::Entity)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|(m, t)| event_view(m, t))
            .collect())
    }

    async fn city_overview(&self, name: &str) -> Result<Option<CityOverview>, RepositoryError> {
        let db = self.db.as_ref();
        let Some(row) = city::Entity::find()
            .filter(iequals((city::Entity, city::Column::Name), name.trim()))
            .order_by_asc(city::Column::Id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let id = row.id;
        Ok(Some(CityOverview {
            attractions: attraction::Entity::find()
                .filter(attraction::Column::CityId.eq(id))
                .count(db)
                .await?,
            restaurants: restaurant::Entity::find()
                .filter(restaurant::Column::CityId.eq(id))
                .count(db)
                .await?,
            upcoming_events: event::Entity::find()
                .filter(event::Column::CityId.eq(id))
                .filter(event::Column::Date.gte(today()))
                .count(db)
                .await?,
            properties: property::Entity::find()
                .filter(property::Column::CityId.eq(id))
                .count(db)
                .await?,
            city: city_repo_impl::to_domain(row),
        }))
    }

    async fn home_page(&self, city: Option<i32>, limit: u64) -> Result<HomePage, RepositoryError> {
        Ok(HomePage {
            featured_attractions: self.featured_attractions(city, limit).await?,
            upcoming_events: self.upcoming_events(city, limit).await?,
            featured_restaurants: self.featured_restaurants(city, limit).await?,
        })
    }
}
