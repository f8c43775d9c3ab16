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

use crate::config::settings::IngestionSettings;
use crate::domain::models::city::{City, NewCity};
use crate::domain::models::listing::{Coordinates, ListingKind, ScrapeTarget, ScrapedListing};
use crate::domain::models::report::{ItemOutcome, ItemReport, RunReport, SourceReport};
use crate::domain::repositories::city_repository::CityRepository;
use crate::domain::repositories::listing_repository::{ListingRepository, UpsertResult};
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::repositories::taxonomy_repository::TaxonomyRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::geocoding::GeocodingGateway;
use crate::domain::sources::{PageSource, SourceAdapter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("No source registered for {0}")]
    NoSource(ListingKind),
}

/// Options fixed at construction
#[derive(Debug, Clone)]
pub struct IngestionOptions {
    /// City every scraped listing is attached to
    pub city: NewCity,
    pub geocode: bool,
    pub download_images: bool,
}

impl From<&IngestionSettings> for IngestionOptions {
    fn from(settings: &IngestionSettings) -> Self {
        Self {
            city: NewCity::with_defaults(
                &settings.city_name,
                &settings.state,
                settings.default_population,
                &settings.default_climate,
            ),
            geocode: settings.geocode,
            download_images: settings.download_images,
        }
    }
}

/// Repositories and gateways used by an ingestion run
#[derive(Clone)]
pub struct IngestionDeps {
    pub cities: Arc<dyn CityRepository>,
    pub taxonomies: Arc<dyn TaxonomyRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub storage: Arc<dyn StorageRepository>,
    pub geocoder: Option<Arc<dyn GeocodingGateway>>,
}

/// Runs source adapters and persists what they extract
///
/// Sources run one after another and items are stored one at a time. A
/// failing item is recorded in the report and never aborts the batch.
pub struct IngestionService {
    deps: IngestionDeps,
    pages: Arc<dyn PageSource>,
    adapters: Vec<Arc<dyn SourceAdapter>>,
    options: IngestionOptions,
}

impl IngestionService {
    /// Create a new ingestion service
    ///
    /// # Arguments
    ///
    /// * `deps` - persistence and geocoding collaborators
    /// * `pages` - shared page fetcher
    /// * `adapters` - registered sources, run in this order
    /// * `options` - city and feature switches
    pub fn new(
        deps: IngestionDeps,
        pages: Arc<dyn PageSource>,
        adapters: Vec<Arc<dyn SourceAdapter>>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            deps,
            pages,
            adapters,
            options,
        }
    }

    /// Run every adapter matching `target`
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - per source and per item outcomes
    /// * `Err(IngestionError)` - the city could not be resolved, or a
    ///   single kind was requested and no adapter produces it
    pub async fn run(&self, target: ScrapeTarget) -> Result<RunReport, IngestionError> {
        if let ScrapeTarget::Only(kind) = target {
            if !self.adapters.iter().any(|a| a.kind() == kind) {
                return Err(IngestionError::NoSource(kind));
            }
        }

        let city = self.deps.cities.get_or_create(&self.options.city).await?;
        info!("Starting scrape of {:?} for {} (city id {})", target, city.name, city.id);

        let mut report = RunReport::start();
        for kind in target.kinds() {
            for adapter in self.adapters.iter().filter(|a| a.kind() == kind) {
                report.push(self.run_adapter(adapter.as_ref(), &city).await);
            }
        }

        let report = report.finish();
        info!(
            created = report.totals.created,
            updated = report.totals.updated,
            skipped = report.totals.skipped,
            failed = report.totals.failed,
            unavailable_pages = report.totals.unavailable_pages,
            "Scrape finished"
        );
        Ok(report)
    }

    async fn run_adapter(&self, adapter: &dyn SourceAdapter, city: &City) -> SourceReport {
        info!("Running source {}", adapter.name());
        let harvest = adapter.harvest(self.pages.as_ref()).await;
        info!(
            "Source {} extracted {} listings ({} pages unavailable)",
            adapter.name(),
            harvest.listings.len(),
            harvest.unavailable_pages.len()
        );

        let mut report = SourceReport::new(adapter.name(), adapter.kind());
        report.unavailable_pages = harvest.unavailable_pages;
        for listing in &harvest.listings {
            report.items.push(self.ingest(city, listing).await);
        }
        report
    }

    /// Store one listing, converting every failure into an outcome
    pub async fn ingest(&self, city: &City, listing: &ScrapedListing) -> ItemReport {
        let label = listing.label();

        if let Err(e) = listing.validate() {
            warn!("Skipping {}: {}", label, e);
            return ItemReport {
                label,
                outcome: ItemOutcome::Skipped {
                    reason: e.to_string(),
                },
                warnings: vec![],
            };
        }

        let mut warnings = Vec::new();
        match self.store(city, listing, &mut warnings).await {
            Ok(result) => {
                debug!("Stored {} as {} {}", label, listing.kind(), result.id);
                let outcome = if result.created {
                    ItemOutcome::Created { id: result.id }
                } else {
                    ItemOutcome::Updated { id: result.id }
                };
                ItemReport {
                    label,
                    outcome,
                    warnings,
                }
            }
            Err(e) => {
                error!("Failed to store {}: {}", label, e);
                ItemReport {
                    label,
                    outcome: ItemOutcome::Failed {
                        reason: e.to_string(),
                    },
                    warnings,
                }
            }
        }
    }

    async fn store(
        &self,
        city: &City,
        listing: &ScrapedListing,
        warnings: &mut Vec<String>,
    ) -> Result<UpsertResult, IngestionError> {
        let kind = listing.kind();
        let taxonomy_id = self
            .deps
            .taxonomies
            .resolve_or_insert(kind.taxonomy(), listing.taxonomy_name())
            .await?;

        let coordinates = self.geocode(city, listing, warnings).await;
        let result = self
            .deps
            .listings
            .upsert(city.id, taxonomy_id, listing, coordinates)
            .await?;

        if !self.options.download_images {
            return Ok(result);
        }

        if result.created || !result.has_image {
            if let Some(url) = listing.image_url() {
                let key = image_key(kind, result.id, url, None);
                match self.save_image(url, &key).await {
                    Ok(()) => {
                        if let Err(e) = self.deps.listings.set_image(kind, result.id, &key).await {
                            warn!("Recording image {} failed: {}", key, e);
                            warnings.push(format!("Image reference not recorded: {}", e));
                        }
                    }
                    Err(w) => warnings.push(w),
                }
            }
        }

        if let ScrapedListing::Property(draft) = listing {
            if draft.additional_images.is_empty() {
                return Ok(result);
            }
            // The listing row is already stored; gallery problems only degrade the item.
            match self.deps.listings.property_image_count(result.id).await {
                Ok(0) => {
                    for (n, url) in draft.additional_images.iter().enumerate() {
                        let key = image_key(kind, result.id, url, Some(n + 1));
                        match self.save_image(url, &key).await {
                            Ok(()) => {
                                if let Err(e) =
                                    self.deps.listings.add_property_image(result.id, &key).await
                                {
                                    warn!("Recording gallery image {} failed: {}", key, e);
                                    warnings.push(format!("Gallery image not recorded: {}", e));
                                }
                            }
                            Err(w) => warnings.push(w),
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Gallery lookup for property {} failed: {}", result.id, e);
                    warnings.push(format!("Gallery not checked: {}", e));
                }
            }
        }

        Ok(result)
    }

    async fn geocode(
        &self,
        city: &City,
        listing: &ScrapedListing,
        warnings: &mut Vec<String>,
    ) -> Option<Coordinates> {
        if !self.options.geocode {
            return None;
        }
        let geocoder = self.deps.geocoder.as_ref()?;
        if !matches!(
            listing.kind(),
            ListingKind::Attraction | ListingKind::Restaurant | ListingKind::Property
        ) {
            return None;
        }
        let address = listing.address().trim();
        if address.is_empty() {
            return None;
        }

        let query = format!("{}, {}, {}", address, city.name, city.state);
        match geocoder.resolve(&query).await {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                debug!("No geocoding match for {}", query);
                None
            }
            Err(e) => {
                warn!("Geocoding failed for {}: {}", query, e);
                warnings.push(format!("Geocoding failed: {}", e));
                None
            }
        }
    }

    async fn save_image(&self, url: &str, key: &str) -> Result<(), String> {
        let bytes = self
            .pages
            .download_image(url)
            .await
            .ok_or_else(|| format!("Image download failed: {}", url))?;
        self.deps
            .storage
            .save(key, &bytes)
            .await
            .map_err(|e| format!("Image save failed for {}: {}", url, e))
    }
}

/// Storage key for a listing image
///
/// Uses the last path segment of the URL when it looks like a file name,
/// prefixed with the listing id so equal names from different listings do
/// not collide.
pub fn image_key(kind: ListingKind, id: i32, url: &str, index: Option<usize>) -> String {
    let segment = url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut s| s.next_back().map(|s| s.to_string()))
        })
        .map(|s| {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
                .collect::<String>()
        })
        .filter(|s| s.contains('.') && !s.starts_with('.'));

    let file = match (segment, index) {
        (Some(name), None) => format!("{}_{}", id, name),
        (Some(name), Some(n)) => format!("{}_{}_{}", id, n, name),
        (None, None) => format!("{}_{}.jpg", kind, id),
        (None, Some(n)) => format!("{}_{}_{}.jpg", kind, id, n),
    };
    format!("{}/{}", kind.image_dir(), file)
}

#[cfg(test)]
#[path = "ingestion_service_test.rs"]
mod tests;
