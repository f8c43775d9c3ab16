// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::application::dto::scrape_request::ScrapeRequestDto;
use crate::domain::models::report::RunReport;
use crate::domain::services::ingestion_service::{IngestionError, IngestionService};
use crate::presentation::errors::{ApiError, AppError};
use crate::presentation::extractors::current_user::StaffUser;

/// Run a scrape and return its report
///
/// The request completes once every selected source has been processed.
pub async fn run_scrape(
    Extension(ingestion): Extension<Arc<IngestionService>>,
    StaffUser(user): StaffUser,
    Json(payload): Json<ScrapeRequestDto>,
) -> Result<Json<RunReport>, AppError> {
    let target = payload.target().map_err(ApiError::BadRequest)?;
    info!("{} started a scrape of {:?}", user.username, target);

    match ingestion.run(target).await {
        Ok(report) => Ok(Json(report)),
        Err(IngestionError::NoSource(kind)) => {
            Err(ApiError::BadRequest(format!("No source scrapes {}", kind)).into())
        }
        Err(e) => Err(e.into()),
    }
}
