// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Exponential backoff for page fetches
pub mod retry_policy;
/// Tracing subscriber setup
pub mod telemetry;
