// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

pub mod account_repository;
pub mod catalog_repository;
pub mod city_repository;
pub mod interaction_repository;
pub mod listing_repository;
pub mod storage_repository;
pub mod taxonomy_repository;

/// Repository error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Record not found")]
    NotFound,
    /// A unique constraint would be violated
    #[error("Conflict: {0}")]
    Conflict(String),
}
