//! Route definitions for the folio API.

pub mod health;
pub mod projects;
pub mod stats;

use axum::{routing::get, Router};

use crate::errors::AppError;
use crate::AppState;

/// Assemble the API router. State and middleware layers are applied by the
/// caller (`main` and the integration tests share this).
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/stats/portfolio", get(stats::portfolio))
        .route("/stats/timeline", get(stats::timeline))
        .route("/projects", get(projects::list))
        .route("/projects/{id}", get(projects::get_by_id))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
