// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Site adapters for every listing source

pub mod eventbrite;
pub mod macomb_center;
pub mod parking;
pub mod smart_bus;
pub mod taxi;
pub mod tripadvisor;
pub mod yelp;
pub mod zillow;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::settings::SourceSettings;
use crate::domain::sources::SourceAdapter;
use std::sync::Arc;

pub use eventbrite::EventbriteAdapter;
pub use macomb_center::MacombCenterAdapter;
pub use parking::ParkingAdapter;
pub use smart_bus::SmartBusAdapter;
pub use taxi::TaxiAdapter;
pub use tripadvisor::TripAdvisorAdapter;
pub use yelp::YelpAdapter;
pub use zillow::ZillowAdapter;

/// All adapters, grouped in listing kind order
pub fn default_adapters(settings: &SourceSettings) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        Arc::new(TripAdvisorAdapter::new(
            settings.tripadvisor_url.clone(),
            settings.tripadvisor_max_pages,
        )),
        Arc::new(YelpAdapter::new(
            settings.yelp_url.clone(),
            settings.yelp_max_pages,
            settings.yelp_detail_interval,
        )),
        Arc::new(MacombCenterAdapter::new(settings.macomb_center_url.clone())),
        Arc::new(EventbriteAdapter::new(settings.eventbrite_url.clone())),
        Arc::new(ZillowAdapter::new(settings.zillow_url.clone(), true)),
        Arc::new(ZillowAdapter::new(settings.zillow_url.clone(), false)),
        Arc::new(SmartBusAdapter::new(settings.smart_bus_url.clone())),
        Arc::new(ParkingAdapter::new(settings.parking_url.clone())),
        Arc::new(TaxiAdapter::new(settings.taxi_url.clone())),
    ]
}
