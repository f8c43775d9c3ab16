// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Local, NaiveTime};
use cityguide::config::settings::DatabaseSettings;
use cityguide::domain::models::city::NewCity;
use cityguide::domain::models::listing::{
    AttractionDraft, EventDraft, ListingKind, PropertyDraft, RestaurantDraft, ScrapedListing,
    TransportDraft,
};
use cityguide::domain::repositories::account_repository::AccountRepository;
use cityguide::domain::services::ingestion_service::{
    IngestionDeps, IngestionOptions, IngestionService,
};
use cityguide::domain::sources::{FetchedPage, PageSource, SourceAdapter, SourceHarvest};
use cityguide::infrastructure::database::connection;
use cityguide::infrastructure::repositories::{
    account_repo_impl::AccountRepositoryImpl, city_repo_impl::CityRepositoryImpl,
    listing_repo_impl::ListingRepositoryImpl, taxonomy_repo_impl::TaxonomyRepositoryImpl,
};
use cityguide::infrastructure::storage::InMemoryStorage;
use cityguide::presentation::routes::{self, ApiServices};
use parking_lot::Mutex;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub staff_key: String,
    pub user_key: String,
}

/// Page source that never finds anything
pub struct NoPages;

#[async_trait]
impl PageSource for NoPages {
    async fn fetch_page(&self, _url: &str, _retries: Option<u32>, _js: bool) -> Option<FetchedPage> {
        None
    }

    async fn download_image(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Adapter returning whatever listings the test puts in it
pub struct FixtureAdapter {
    kind: ListingKind,
    listings: Mutex<Vec<ScrapedListing>>,
}

#[allow(dead_code)]
impl FixtureAdapter {
    pub fn new(kind: ListingKind, listings: Vec<ScrapedListing>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            listings: Mutex::new(listings),
        })
    }

    pub fn replace(&self, listings: Vec<ScrapedListing>) {
        *self.listings.lock() = listings;
    }
}

#[async_trait]
impl SourceAdapter for FixtureAdapter {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn kind(&self) -> ListingKind {
        self.kind
    }

    async fn harvest(&self, _pages: &dyn PageSource) -> SourceHarvest {
        SourceHarvest {
            listings: self.listings.lock().clone(),
            unavailable_pages: Vec::new(),
        }
    }
}

/// Fresh in-memory database with every migration applied
pub async fn test_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: None,
        idle_timeout: None,
    };
    let db = connection::create_pool(&settings).await.unwrap();
    connection::migrate(&db).await.unwrap();
    Arc::new(db)
}

pub fn ingestion(
    db: Arc<DatabaseConnection>,
    adapters: Vec<Arc<dyn SourceAdapter>>,
) -> IngestionService {
    let deps = IngestionDeps {
        cities: Arc::new(CityRepositoryImpl::new(db.clone())),
        taxonomies: Arc::new(TaxonomyRepositoryImpl::new(db.clone())),
        listings: Arc::new(ListingRepositoryImpl::new(db)),
        storage: Arc::new(InMemoryStorage::new()),
        geocoder: None,
    };
    let options = IngestionOptions {
        city: NewCity::with_defaults("Macomb", "MI", 91_663, "Continental"),
        geocode: false,
        download_images: false,
    };
    IngestionService::new(deps, Arc::new(NoPages), adapters, options)
}

pub fn attraction(name: &str, category: &str) -> ScrapedListing {
    ScrapedListing::Attraction(AttractionDraft {
        name: name.to_string(),
        description: format!("{} in Macomb County", name),
        category: category.to_string(),
        address: format!("{} Rd, Macomb, MI", name),
        opening_hours: "9 AM - 5 PM".to_string(),
        website: None,
        image_url: None,
    })
}

pub fn restaurant(name: &str, cuisine: &str, rating: f64) -> ScrapedListing {
    ScrapedListing::Restaurant(RestaurantDraft {
        name: name.to_string(),
        description: format!("{} serves {} food", name, cuisine),
        cuisine: cuisine.to_string(),
        address: "21 Main St, Macomb, MI".to_string(),
        price_level: 2,
        rating,
        opening_hours: "Call for hours".to_string(),
        website: None,
        image_url: None,
    })
}

pub fn event(name: &str, days_ahead: i64) -> ScrapedListing {
    ScrapedListing::Event(EventDraft {
        name: name.to_string(),
        description: "Live on stage".to_string(),
        event_type: "Concert".to_string(),
        venue: "Macomb Center for the Performing Arts".to_string(),
        address: "44575 Garfield Rd, Clinton Township, MI".to_string(),
        date: Local::now().date_naive() + Duration::days(days_ahead),
        date_estimated: false,
        time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        website: None,
        image_url: None,
    })
}

pub fn property(address: &str, price: i64, for_sale: bool) -> ScrapedListing {
    ScrapedListing::Property(PropertyDraft {
        title: address.to_string(),
        description: "3 bed, 2 bath, 1800 sqft home".to_string(),
        property_type: "House".to_string(),
        address: address.to_string(),
        price,
        bedrooms: 3,
        bathrooms: 2.0,
        size_sqft: 1800,
        for_sale,
        image_url: None,
        additional_images: Vec::new(),
    })
}

pub fn transport(name: &str, routes: &str) -> ScrapedListing {
    ScrapedListing::Transport(TransportDraft {
        name: name.to_string(),
        description: format!("Bus service on route {} through Macomb County.", routes),
        transport_type: "Public Transit".to_string(),
        address: String::new(),
        routes: routes.to_string(),
        schedule: "Weekdays".to_string(),
        website: None,
        image_url: None,
    })
}

/// Listings every API test starts from
pub fn seed_listings() -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        FixtureAdapter::new(
            ListingKind::Attraction,
            vec![
                attraction("Freedom Hill Park", "Park"),
                attraction("Stony Creek Metropark", "Park"),
                attraction("Macomb Township Library", "Library"),
            ],
        ),
        FixtureAdapter::new(
            ListingKind::Restaurant,
            vec![
                restaurant("Lakeside Grill", "American", 4.5),
                restaurant("Bangkok Garden", "Thai", 4.0),
            ],
        ),
        FixtureAdapter::new(
            ListingKind::Event,
            vec![event("Summer Symphony", 10), event("Past Parade", -10)],
        ),
        FixtureAdapter::new(
            ListingKind::Property,
            vec![
                property("1 Oak Ct, Macomb, MI", 425_000, true),
                property("2 Elm St, Macomb, MI", 1_800, false),
            ],
        ),
        FixtureAdapter::new(
            ListingKind::Transport,
            vec![transport("SMART Bus Route 510", "510")],
        ),
    ]
}

/// API server over a seeded database with one staff and one regular user
pub async fn create_test_app() -> TestApp {
    create_test_app_with(seed_listings()).await
}

pub async fn create_test_app_with(adapters: Vec<Arc<dyn SourceAdapter>>) -> TestApp {
    let db = test_db().await;
    let service = Arc::new(ingestion(db.clone(), adapters));
    service
        .run(cityguide::domain::models::listing::ScrapeTarget::All)
        .await
        .unwrap();

    let accounts = AccountRepositoryImpl::new(db.clone());
    let staff = accounts
        .create_user("editor", "editor@example.com", true)
        .await
        .unwrap();
    let staff_key = accounts.issue_api_key(staff.id).await.unwrap();
    let user = accounts
        .create_user("resident", "resident@example.com", false)
        .await
        .unwrap();
    let user_key = accounts.issue_api_key(user.id).await.unwrap();

    let app = routes::app(ApiServices::from_db(db.clone(), service));
    TestApp {
        server: TestServer::new(app).unwrap(),
        db,
        staff_key,
        user_key,
    }
}

pub fn bearer(key: &str) -> String {
    format!("Bearer {}", key)
}
