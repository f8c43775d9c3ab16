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

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use cityguide::config::settings::Settings;
use cityguide::domain::models::listing::ScrapeTarget;
use cityguide::domain::repositories::account_repository::AccountRepository;
use cityguide::domain::repositories::city_repository::CityRepository;
use cityguide::domain::services::geocoding::GeocodingGateway;
use cityguide::domain::services::ingestion_service::{
    IngestionDeps, IngestionOptions, IngestionService,
};
use cityguide::infrastructure::database::connection;
use cityguide::infrastructure::geocoding::NominatimGeocoder;
use cityguide::infrastructure::repositories::{
    account_repo_impl::AccountRepositoryImpl, city_repo_impl::CityRepositoryImpl,
    listing_repo_impl::ListingRepositoryImpl, taxonomy_repo_impl::TaxonomyRepositoryImpl,
};
use cityguide::infrastructure::scraping::fetcher::PageFetcher;
use cityguide::infrastructure::sources::default_adapters;
use cityguide::infrastructure::storage::LocalStorage;
use cityguide::presentation::routes::{self, ApiServices};
use cityguide::utils::telemetry;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "cityguide", version, about = "Macomb city guide: listing ingestion and REST API")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve,
    /// Scrape listings from the configured sources
    Scrape {
        /// attractions, restaurants, events, properties, transportation or all
        #[arg(long = "type", default_value = "all")]
        scrape_type: String,
    },
    /// Apply pending database migrations
    Migrate,
    /// Merge duplicate rows of a city into the one with the lowest id
    DedupeCities {
        #[arg(long)]
        name: String,
    },
    /// Create a user and print a new API key
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        staff: bool,
    },
}

fn build_ingestion(
    settings: &Settings,
    db: Arc<DatabaseConnection>,
) -> anyhow::Result<IngestionService> {
    let geocoder: Option<Arc<dyn GeocodingGateway>> = if settings.geocoding.enabled {
        Some(Arc::new(NominatimGeocoder::new(&settings.geocoding)?))
    } else {
        None
    };

    let deps = IngestionDeps {
        cities: Arc::new(CityRepositoryImpl::new(db.clone())),
        taxonomies: Arc::new(TaxonomyRepositoryImpl::new(db.clone())),
        listings: Arc::new(ListingRepositoryImpl::new(db)),
        storage: Arc::new(LocalStorage::from_settings(&settings.storage)),
        geocoder,
    };

    Ok(IngestionService::new(
        deps,
        Arc::new(PageFetcher::new(&settings.scraper)),
        default_adapters(&settings.sources),
        IngestionOptions::from(&settings.ingestion),
    ))
}

async fn serve(settings: &Settings, db: Arc<DatabaseConnection>) -> anyhow::Result<()> {
    connection::migrate(db.as_ref()).await?;
    info!("Database migrations applied");

    let ingestion = Arc::new(build_ingestion(settings, db.clone())?);
    let app = routes::app(ApiServices::from_db(db, ingestion));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.json_logs);

    let settings = Settings::new()?;
    info!("Configuration loaded");

    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    match cli.command {
        Command::Serve => serve(&settings, db).await?,
        Command::Scrape { scrape_type } => {
            let target: ScrapeTarget = scrape_type.parse().map_err(|e: String| anyhow!(e))?;
            connection::migrate(db.as_ref()).await?;
            let report = build_ingestion(&settings, db)?.run(target).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Migrate => {
            connection::migrate(db.as_ref()).await?;
            info!("Database migrations applied");
        }
        Command::DedupeCities { name } => {
            match CityRepositoryImpl::new(db).merge_duplicates(&name).await? {
                Some(merge) if merge.removed_ids.is_empty() => {
                    println!("City {} has no duplicates (id {})", name, merge.kept_id)
                }
                Some(merge) => println!(
                    "Kept city {}; removed {:?}; moved {} listings",
                    merge.kept_id, merge.removed_ids, merge.moved_listings
                ),
                None => println!("No city named {}", name),
            }
        }
        Command::CreateUser {
            username,
            email,
            staff,
        } => {
            let accounts = AccountRepositoryImpl::new(db);
            let user = accounts.create_user(&username, &email, staff).await?;
            let key = accounts.issue_api_key(user.id).await?;
            println!("Created user {} (id {})", user.username, user.id);
            println!("API key: {}", key);
        }
    }

    Ok(())
}
