// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Address lookup abstraction
pub mod geocoding;
/// Scrape run orchestration
pub mod ingestion_service;
