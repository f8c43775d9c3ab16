// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Request DTOs
///
/// Query strings and JSON bodies accepted by the API, converted into
/// domain filters and records.
pub mod interaction_request;
pub mod listing_query;
pub mod scrape_request;
