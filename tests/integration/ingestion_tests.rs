// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{attraction, event, ingestion, restaurant, test_db, FixtureAdapter, NoPages};
use chrono::{DateTime, FixedOffset, Utc};
use cityguide::domain::models::listing::{ListingKind, ScrapeTarget, ScrapedListing};
use cityguide::domain::models::report::ItemOutcome;
use cityguide::domain::repositories::city_repository::CityRepository;
use cityguide::domain::sources::{SourceAdapter, SourceHarvest};
use cityguide::infrastructure::database::entities::{
    attraction as attraction_entity, city, event as event_entity,
};
use cityguide::infrastructure::repositories::city_repo_impl::CityRepositoryImpl;
use cityguide::infrastructure::sources::EventbriteAdapter;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use std::sync::Arc;

#[tokio::test]
async fn test_second_run_updates_instead_of_duplicating() {
    let db = test_db().await;
    let adapter = FixtureAdapter::new(
        ListingKind::Attraction,
        vec![
            attraction("Freedom Hill Park", "Park"),
            attraction("Macomb Township Library", "Library"),
        ],
    );
    let service = ingestion(db.clone(), vec![adapter]);

    let first = service.run(ScrapeTarget::All).await.unwrap();
    assert_eq!(first.totals.created, 2);

    let second = service.run(ScrapeTarget::All).await.unwrap();
    assert_eq!(second.totals.created, 0);
    assert_eq!(second.totals.updated, 2);

    let rows = attraction_entity::Entity::find()
        .count(db.as_ref())
        .await
        .unwrap();
    assert_eq!(rows, 2);
    assert_eq!(city::Entity::find().count(db.as_ref()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_changed_fields_keep_the_same_row() {
    let db = test_db().await;
    let adapter = FixtureAdapter::new(
        ListingKind::Restaurant,
        vec![restaurant("Lakeside Grill", "American", 4.0)],
    );
    let service = ingestion(db.clone(), vec![adapter.clone()]);

    let first = service.run(ScrapeTarget::All).await.unwrap();
    let ItemOutcome::Created { id } = first.sources[0].items[0].outcome else {
        panic!("expected a created item");
    };

    adapter.replace(vec![restaurant("Lakeside Grill", "Seafood", 4.8)]);
    let second = service.run(ScrapeTarget::All).await.unwrap();

    assert_eq!(
        second.sources[0].items[0].outcome,
        ItemOutcome::Updated { id }
    );
}

fn estimated_event(name: &str, days_ahead: i64) -> ScrapedListing {
    match event(name, days_ahead) {
        ScrapedListing::Event(mut draft) => {
            draft.date_estimated = true;
            ScrapedListing::Event(draft)
        }
        other => other,
    }
}

#[tokio::test]
async fn test_placeholder_dated_event_is_not_duplicated() {
    let db = test_db().await;
    let adapter = FixtureAdapter::new(ListingKind::Event, vec![estimated_event("Jazz Night", 12)]);
    let service = ingestion(db.clone(), vec![adapter.clone()]);

    let first = service.run(ScrapeTarget::All).await.unwrap();
    let ItemOutcome::Created { id } = first.sources[0].items[0].outcome else {
        panic!("expected a created item");
    };

    adapter.replace(vec![estimated_event("Jazz Night", 27)]);
    let second = service.run(ScrapeTarget::All).await.unwrap();

    assert_eq!(second.sources[0].items[0].outcome, ItemOutcome::Updated { id });
    assert_eq!(event_entity::Entity::find().count(db.as_ref()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_items_are_skipped_without_aborting() {
    let db = test_db().await;
    let adapter = FixtureAdapter::new(
        ListingKind::Event,
        vec![event("", 3), event("Jazz Night", 3)],
    );
    let service = ingestion(db, vec![adapter]);

    let report = service.run(ScrapeTarget::All).await.unwrap();

    assert_eq!(report.totals.skipped, 1);
    assert_eq!(report.totals.created, 1);
}

#[tokio::test]
async fn test_target_selects_matching_sources() {
    let db = test_db().await;
    let attractions = FixtureAdapter::new(
        ListingKind::Attraction,
        vec![attraction("Freedom Hill Park", "Park")],
    );
    let restaurants = FixtureAdapter::new(
        ListingKind::Restaurant,
        vec![restaurant("Bangkok Garden", "Thai", 4.0)],
    );
    let service = ingestion(db, vec![attractions, restaurants]);

    let report = service
        .run(ScrapeTarget::Only(ListingKind::Restaurant))
        .await
        .unwrap();

    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].kind, ListingKind::Restaurant);
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_harvest() {
    let adapter = EventbriteAdapter::new("https://www.eventbrite.com/d/mi--macomb/events/");

    let SourceHarvest {
        listings,
        unavailable_pages,
    } = adapter.harvest(&NoPages).await;

    assert!(listings.is_empty());
    assert_eq!(unavailable_pages.len(), 1);
}

#[tokio::test]
async fn test_unreachable_source_is_reported() {
    let db = test_db().await;
    let adapter: Arc<dyn SourceAdapter> =
        Arc::new(EventbriteAdapter::new("https://www.eventbrite.com/d/mi--macomb/events/"));
    let service = ingestion(db, vec![adapter]);

    let report = service.run(ScrapeTarget::All).await.unwrap();

    assert_eq!(report.totals.unavailable_pages, 1);
    assert!(report.sources[0].items.is_empty());
}

async fn insert_city(db: &sea_orm::DatabaseConnection, name: &str) -> i32 {
    let now: DateTime<FixedOffset> = Utc::now().into();
    city::ActiveModel {
        name: Set(name.to_string()),
        state: Set("MI".to_string()),
        description: Set(String::new()),
        population: Set(0),
        climate: Set("Continental".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_duplicate_cities_resolve_to_lowest_id() {
    let db = test_db().await;
    let first = insert_city(db.as_ref(), "Macomb").await;
    let second = insert_city(db.as_ref(), "Macomb").await;
    assert!(first < second);

    let cities = CityRepositoryImpl::new(db.clone());
    let found = cities.find_by_name("Macomb").await.unwrap().unwrap();
    assert_eq!(found.id, first);

    // ingestion attaches to the same row
    let adapter = FixtureAdapter::new(
        ListingKind::Attraction,
        vec![attraction("Freedom Hill Park", "Park")],
    );
    ingestion(db.clone(), vec![adapter])
        .run(ScrapeTarget::All)
        .await
        .unwrap();
    let row = attraction_entity::Entity::find()
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.city_id, first);
    assert_eq!(city::Entity::find().count(db.as_ref()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_merge_duplicates_moves_listings() {
    let db = test_db().await;
    let kept = insert_city(db.as_ref(), "Macomb").await;
    let duplicate = insert_city(db.as_ref(), "Macomb").await;

    let adapter = FixtureAdapter::new(
        ListingKind::Attraction,
        vec![attraction("Freedom Hill Park", "Park")],
    );
    ingestion(db.clone(), vec![adapter])
        .run(ScrapeTarget::All)
        .await
        .unwrap();
    let row = attraction_entity::Entity::find()
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    let mut moved: attraction_entity::ActiveModel = row.into();
    moved.city_id = Set(duplicate);
    moved.update(db.as_ref()).await.unwrap();

    let merge = CityRepositoryImpl::new(db.clone())
        .merge_duplicates("Macomb")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(merge.kept_id, kept);
    assert_eq!(merge.removed_ids, vec![duplicate]);
    assert_eq!(merge.moved_listings, 1);
    assert_eq!(city::Entity::find().count(db.as_ref()).await.unwrap(), 1);
    let row = attraction_entity::Entity::find()
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.city_id, kept);
}
