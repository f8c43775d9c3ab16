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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application settings
///
/// Groups server, database, storage, fetcher, ingestion, geocoding and
/// source URL configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerSettings,
    /// Database configuration
    pub database: DatabaseSettings,
    /// Image storage configuration
    pub storage: StorageSettings,
    /// Page fetcher configuration
    pub scraper: ScraperSettings,
    /// Ingestion pipeline configuration
    pub ingestion: IngestionSettings,
    /// Geocoding configuration
    pub geocoding: GeocodingSettings,
    /// Source site URLs
    pub sources: SourceSettings,
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL
    pub url: String,
    /// Maximum pool size
    pub max_connections: Option<u32>,
    /// Minimum pool size
    pub min_connections: Option<u32>,
    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,
    /// Idle timeout in seconds
    pub idle_timeout: Option<u64>,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Image storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory for downloaded images
    pub local_path: String,
}

/// Page fetcher settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// Minimum gap between two page requests, in milliseconds
    pub min_delay_ms: u64,
    /// Upper bound of the random jitter added to the gap, in milliseconds
    pub jitter_ms: u64,
    /// Attempts per page before it is reported unavailable
    pub max_retries: u32,
    /// Base of the exponential backoff between attempts, in milliseconds
    pub initial_backoff_ms: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Image download timeout in seconds
    pub image_timeout_secs: u64,
    /// Whether to route requests through `proxies`
    pub use_proxy: bool,
    /// Proxy URLs (`http://`, `https://` or `socks5://`, credentials inline)
    pub proxies: Vec<String>,
    /// Time to let a page run its scripts before reading the DOM, in milliseconds
    pub browser_wait_ms: u64,
    /// Remote Chrome debugging endpoint; a local browser is launched when unset
    pub remote_browser_url: Option<String>,
}

impl ScraperSettings {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: 5_000,
            jitter_ms: 1_000,
            max_retries: 3,
            initial_backoff_ms: 1_000,
            request_timeout_secs: 30,
            image_timeout_secs: 20,
            use_proxy: false,
            proxies: Vec::new(),
            browser_wait_ms: 5_000,
            remote_browser_url: None,
        }
    }
}

/// Ingestion pipeline settings
///
/// The city every scraped listing is attached to, and the defaults used
/// when that city has to be created.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestionSettings {
    pub city_name: String,
    pub state: String,
    pub default_population: i32,
    pub default_climate: String,
    /// Resolve coordinates for attractions, restaurants and properties
    pub geocode: bool,
    /// Download listing images into storage
    pub download_images: bool,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            city_name: "Macomb".to_string(),
            state: "MI".to_string(),
            default_population: 91_663,
            default_climate: "Continental".to_string(),
            geocode: true,
            download_images: true,
        }
    }
}

/// Geocoding service settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    pub enabled: bool,
    /// Nominatim-compatible search endpoint
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Source site entry points
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub tripadvisor_url: String,
    pub tripadvisor_max_pages: u32,
    pub yelp_url: String,
    pub yelp_max_pages: u32,
    /// Every n-th restaurant gets its detail page fetched
    pub yelp_detail_interval: usize,
    pub macomb_center_url: String,
    pub eventbrite_url: String,
    pub zillow_url: String,
    pub smart_bus_url: String,
    pub parking_url: String,
    pub taxi_url: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            tripadvisor_url:
                "https://www.tripadvisor.com/Attractions-g42424-Activities-Macomb_Michigan.html"
                    .to_string(),
            tripadvisor_max_pages: 3,
            yelp_url: "https://www.yelp.com/search?find_desc=restaurants&find_loc=Macomb%2C+MI"
                .to_string(),
            yelp_max_pages: 5,
            yelp_detail_interval: 5,
            macomb_center_url: "https://www.macombcenter.com/events".to_string(),
            eventbrite_url: "https://www.eventbrite.com/d/mi--macomb/events/".to_string(),
            zillow_url: "https://www.zillow.com/macomb-mi/".to_string(),
            smart_bus_url: "https://www.smartbus.org/Schedules/Route-Schedules".to_string(),
            parking_url: "https://www.macombgov.org/Parking".to_string(),
            taxi_url: "https://www.yellowpages.com/macomb-mi/taxis".to_string(),
        }
    }
}

impl Settings {
    /// Load settings
    ///
    /// Built-in defaults are overridden by `config/default.toml`, then by
    /// `config/{APP_ENVIRONMENT}.toml`, then by `CITYGUIDE__*` environment
    /// variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - the merged configuration
    /// * `Err(ConfigError)` - a source could not be read or deserialized
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let sources = SourceSettings::default();
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://cityguide.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("storage.local_path", "./media")?
            // Fetcher
            .set_default("scraper.min_delay_ms", 5_000)?
            .set_default("scraper.jitter_ms", 1_000)?
            .set_default("scraper.max_retries", 3)?
            .set_default("scraper.initial_backoff_ms", 1_000)?
            .set_default("scraper.request_timeout_secs", 30)?
            .set_default("scraper.image_timeout_secs", 20)?
            .set_default("scraper.use_proxy", false)?
            .set_default("scraper.proxies", Vec::<String>::new())?
            .set_default("scraper.browser_wait_ms", 5_000)?
            // Ingestion
            .set_default("ingestion.city_name", "Macomb")?
            .set_default("ingestion.state", "MI")?
            .set_default("ingestion.default_population", 91_663)?
            .set_default("ingestion.default_climate", "Continental")?
            .set_default("ingestion.geocode", true)?
            .set_default("ingestion.download_images", true)?
            // Geocoding
            .set_default("geocoding.enabled", true)?
            .set_default("geocoding.endpoint", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "macomb_city_guide")?
            .set_default("geocoding.timeout_secs", 10)?
            // Sources
            .set_default("sources.tripadvisor_url", sources.tripadvisor_url)?
            .set_default("sources.tripadvisor_max_pages", sources.tripadvisor_max_pages)?
            .set_default("sources.yelp_url", sources.yelp_url)?
            .set_default("sources.yelp_max_pages", sources.yelp_max_pages)?
            .set_default("sources.yelp_detail_interval", sources.yelp_detail_interval as u64)?
            .set_default("sources.macomb_center_url", sources.macomb_center_url)?
            .set_default("sources.eventbrite_url", sources.eventbrite_url)?
            .set_default("sources.zillow_url", sources.zillow_url)?
            .set_default("sources.smart_bus_url", sources.smart_bus_url)?
            .set_default("sources.parking_url", sources.parking_url)?
            .set_default("sources.taxi_url", sources.taxi_url)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("CITYGUIDE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scraper.proxies")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
