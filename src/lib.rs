// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application layer
///
/// Request DTOs for the REST API
pub mod application;

/// Configuration
///
/// Layered settings from defaults, files and environment variables
pub mod config;

/// Domain layer
///
/// Listing models, repository traits, source adapter contracts and the
/// ingestion pipeline
pub mod domain;

/// Fetch engines
///
/// Plain HTTP and headless browser page retrieval
pub mod engines;

/// Infrastructure
///
/// Database, repositories, page fetcher, site adapters, geocoding and storage
pub mod infrastructure;

/// Presentation layer
///
/// Routes, handlers, middleware and extractors of the REST API
pub mod presentation;

/// Utilities
///
/// Retry policy and tracing setup
pub mod utils;
