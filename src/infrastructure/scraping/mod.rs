// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTML helpers: text cleanup, selector fallbacks, embedded JSON
pub mod document;
/// Rate limited, retrying page fetcher
pub mod fetcher;
pub mod parsing;
pub mod user_agents;
