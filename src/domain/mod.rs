// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Domain layer
///
/// Models, repository traits and the ingestion pipeline. Nothing here knows
/// which database, HTTP client or site is used.
pub mod models;
pub mod repositories;
pub mod services;
pub mod sources;
