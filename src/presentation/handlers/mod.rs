// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP request handlers
///
/// Each handler pulls its repositories from request extensions and maps
/// failures through `AppError`.
pub mod city_handler;
pub mod dashboard_handler;
pub mod interaction_handler;
pub mod listing_handler;
pub mod scrape_handler;
pub mod search_handler;
