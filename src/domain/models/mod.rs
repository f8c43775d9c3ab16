// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Read models served by the API
pub mod catalog;
pub mod city;
/// Users and the records they create
pub mod interaction;
/// Listing kinds, taxonomies and scraped drafts
pub mod listing;
/// Scrape run outcomes
pub mod report;
