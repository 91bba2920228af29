//! Stats routes: aggregate views over the project/user dataset.
//!
//! Both endpoints are public, idempotent reads. Payloads are bare JSON (an
//! object for the overview, an array for the timeline) because the frontend
//! consumes them unwrapped.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::services::stats::{self as stats_service, PortfolioOverview, TimelineEntry};
use crate::AppState;

/// GET /stats/portfolio — portfolio-wide aggregate counts.
pub async fn portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioOverview>, AppError> {
    let overview = stats_service::portfolio_overview(&state.db).await?;
    Ok(Json(overview))
}

/// GET /stats/timeline — per-month creation statistics, newest first.
pub async fn timeline(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    let entries = stats_service::timeline(&state.db).await?;
    Ok(Json(entries))
}
