// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::GeocodingSettings;
use crate::domain::models::listing::Coordinates;
use crate::domain::services::geocoding::{GeocodingError, GeocodingGateway};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Nominatim search client
///
/// Requests are limited to one per second, as the public instance asks.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    limiter: DefaultDirectRateLimiter,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocodingSettings) -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            user_agent: settings.user_agent.clone(),
            limiter: RateLimiter::direct(Quota::per_second(NonZeroU32::MIN)),
        })
    }

    /// Point the client at another Nominatim-compatible server
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

fn to_coordinates(place: &Place) -> Result<Coordinates, GeocodingError> {
    let latitude = place
        .lat
        .parse::<f64>()
        .map_err(|e| GeocodingError::InvalidResponse(format!("lat {}: {}", place.lat, e)))?;
    let longitude = place
        .lon
        .parse::<f64>()
        .map_err(|e| GeocodingError::InvalidResponse(format!("lon {}: {}", place.lon, e)))?;
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[async_trait]
impl GeocodingGateway for NominatimGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        self.limiter.until_ready().await;
        debug!("Geocoding {}", address);

        let response = self
            .client
            .get(format!("{}/search", self.endpoint))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoder returned {} for {}", status, address);
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        places.first().map(to_coordinates).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer) -> NominatimGeocoder {
        let settings = GeocodingSettings {
            enabled: true,
            endpoint: "https://nominatim.invalid".to_string(),
            user_agent: "guide-tests".to_string(),
            timeout_secs: 5,
        };
        NominatimGeocoder::new(&settings)
            .unwrap()
            .with_endpoint(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn test_resolve_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "44575 Garfield Rd, Clinton Township, MI"))
            .and(query_param("format", "json"))
            .and(header("user-agent", "guide-tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "42.6201", "lon": "-82.9305", "display_name": "Macomb Center"},
                {"lat": "0", "lon": "0"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let coordinates = geocoder(&server)
            .resolve("44575 Garfield Rd, Clinton Township, MI")
            .await
            .unwrap()
            .unwrap();

        assert!((coordinates.latitude - 42.6201).abs() < 1e-9);
        assert!((coordinates.longitude + 82.9305).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_address_is_none() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let result = geocoder(&server).resolve("Nowhere Lane").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_blank_address_skips_request() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(geocoder(&server).resolve("  ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_status_and_bad_body() {
        let server = MockServer::start().await;
        Mock::given(query_param("q", "busy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(query_param("q", "garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "north", "lon": "-82.9"}
            ])))
            .mount(&server)
            .await;
        let geocoder = geocoder(&server);

        assert!(matches!(
            geocoder.resolve("busy").await,
            Err(GeocodingError::Status(503))
        ));
        assert!(matches!(
            geocoder.resolve("garbled").await,
            Err(GeocodingError::InvalidResponse(_))
        ));
    }
}
