// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::domain::repositories::city_repository::CityRepository;
use crate::domain::repositories::interaction_repository::InteractionRepository;
use crate::domain::repositories::listing_repository::ListingRepository;
use crate::domain::repositories::taxonomy_repository::TaxonomyRepository;
use crate::domain::services::ingestion_service::IngestionService;
use crate::infrastructure::repositories::{
    account_repo_impl::AccountRepositoryImpl, catalog_repo_impl::CatalogRepositoryImpl,
    city_repo_impl::CityRepositoryImpl, interaction_repo_impl::InteractionRepositoryImpl,
    listing_repo_impl::ListingRepositoryImpl, taxonomy_repo_impl::TaxonomyRepositoryImpl,
};
use crate::presentation::handlers::{
    city_handler, dashboard_handler, interaction_handler, listing_handler, scrape_handler,
    search_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Everything the handlers pull from request extensions
#[derive(Clone)]
pub struct ApiServices {
    pub cities: Arc<dyn CityRepository>,
    pub taxonomies: Arc<dyn TaxonomyRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub ingestion: Arc<IngestionService>,
}

impl ApiServices {
    /// SeaORM backed repositories sharing one connection pool
    pub fn from_db(db: Arc<DatabaseConnection>, ingestion: Arc<IngestionService>) -> Self {
        Self {
            cities: Arc::new(CityRepositoryImpl::new(db.clone())),
            taxonomies: Arc::new(TaxonomyRepositoryImpl::new(db.clone())),
            catalog: Arc::new(CatalogRepositoryImpl::new(db.clone())),
            listings: Arc::new(ListingRepositoryImpl::new(db.clone())),
            interactions: Arc::new(InteractionRepositoryImpl::new(db.clone())),
            accounts: Arc::new(AccountRepositoryImpl::new(db)),
            ingestion,
        }
    }
}

/// Routes below `/api/v1`
pub fn api_routes() -> Router {
    Router::new()
        .route("/version", get(version))
        .route("/cities", get(city_handler::list_cities))
        .route("/cities/{id}", get(city_handler::get_city))
        .route(
            "/cities/by-name/{name}/overview",
            get(city_handler::city_overview),
        )
        .route("/categories", get(city_handler::list_categories))
        .route("/cuisines", get(city_handler::list_cuisines))
        .route("/event-types", get(city_handler::list_event_types))
        .route("/property-types", get(city_handler::list_property_types))
        .route("/transport-types", get(city_handler::list_transport_types))
        .route("/attractions", get(listing_handler::list_attractions))
        .route("/attractions/{id}", get(listing_handler::get_attraction))
        .route(
            "/attractions/{id}/nearby",
            get(listing_handler::nearby_attractions),
        )
        .route("/restaurants", get(listing_handler::list_restaurants))
        .route("/restaurants/{id}", get(listing_handler::get_restaurant))
        .route("/events", get(listing_handler::list_events))
        .route("/events/upcoming", get(listing_handler::upcoming_events))
        .route("/events/{id}", get(listing_handler::get_event))
        .route("/properties", get(listing_handler::list_properties))
        .route("/properties/{id}", get(listing_handler::get_property))
        .route("/transportation", get(listing_handler::list_transport))
        .route("/transportation/{id}", get(listing_handler::get_transport))
        .route("/home", get(listing_handler::home))
        .route("/search", get(search_handler::search))
        .route("/dashboard/stats", get(dashboard_handler::stats))
        .route("/scrape", post(scrape_handler::run_scrape))
        .route(
            "/favorites",
            get(interaction_handler::list_favorites).post(interaction_handler::add_favorite),
        )
        .route(
            "/favorites/{id}",
            delete(interaction_handler::remove_favorite),
        )
        .route(
            "/rsvps",
            get(interaction_handler::list_rsvps).post(interaction_handler::create_rsvp),
        )
        .route("/rsvps/{id}", delete(interaction_handler::delete_rsvp))
        .route(
            "/reviews",
            get(interaction_handler::list_reviews).post(interaction_handler::create_review),
        )
        .route(
            "/contacts",
            get(interaction_handler::list_contacts).post(interaction_handler::create_contact),
        )
}

/// Full application router
///
/// Authentication runs for every request; handlers that need a user
/// extract it and reject anonymous callers themselves.
pub fn app(services: ApiServices) -> Router {
    let auth_state = AuthState {
        accounts: services.accounts.clone(),
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(Extension(services.cities))
        .layer(Extension(services.taxonomies))
        .layer(Extension(services.catalog))
        .layer(Extension(services.listings))
        .layer(Extension(services.interactions))
        .layer(Extension(services.ingestion))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Application version
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
