// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Infrastructure layer
///
/// Concrete implementations of the domain ports: the SeaORM database and
/// repositories, the page fetcher and site adapters, the geocoder and
/// image storage.
pub mod database;
pub mod geocoding;
pub mod repositories;
pub mod scraping;
pub mod sources;
pub mod storage;
