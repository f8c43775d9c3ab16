// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Headless browser engine
pub mod browser_engine;
/// Plain HTTP engine
pub mod reqwest_engine;
/// Engine selection and fallback
pub mod router;
/// Engine trait, requests and errors
pub mod traits;
