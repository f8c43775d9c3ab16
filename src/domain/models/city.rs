// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// City entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state: String,
    pub description: String,
    pub population: i32,
    pub climate: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values used when a city has to be created during ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct NewCity {
    pub name: String,
    pub state: String,
    pub description: String,
    pub population: i32,
    pub climate: String,
}

impl NewCity {
    /// Build the default record for `name`
    ///
    /// # Arguments
    ///
    /// * `name` - city name
    /// * `state` - two letter state code
    /// * `population` - population stored on creation
    /// * `climate` - climate description stored on creation
    pub fn with_defaults(name: &str, state: &str, population: i32, climate: &str) -> Self {
        Self {
            name: name.to_string(),
            state: state.to_string(),
            description: format!("{} is a vibrant city with many attractions.", name),
            population,
            climate: climate.to_string(),
        }
    }
}

/// Result of merging duplicate city rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMerge {
    pub kept_id: i32,
    pub removed_ids: Vec<i32>,
    pub moved_listings: u64,
}

/// Listing counts for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityOverview {
    pub city: City,
    pub attractions: u64,
    pub restaurants: u64,
    pub upcoming_events: u64,
    pub properties: u64,
}
