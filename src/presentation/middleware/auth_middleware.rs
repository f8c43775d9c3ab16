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

use crate::domain::repositories::account_repository::AccountRepository;
use crate::presentation::errors::{ApiError, AppError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// State for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    pub accounts: Arc<dyn AccountRepository>,
}

/// Authentication middleware
///
/// Resolves a `Bearer` API key to its user and stores the user in the
/// request extensions. Requests without credentials pass through
/// anonymously; handlers decide whether a user is required.
///
/// # Returns
///
/// * `Ok(Response)` - anonymous or authenticated request handled
/// * `Err(AppError)` - malformed header or unknown key (401)
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    match state.accounts.find_by_api_key(&token).await? {
        Some(user) => {
            debug!("Authenticated {} for {}", user.username, req.uri().path());
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            warn!("Rejected unknown API key for {}", req.uri().path());
            Err(ApiError::Unauthorized.into())
        }
    }
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
