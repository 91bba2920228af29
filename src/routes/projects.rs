//! Public project read routes.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::project::Project;
use crate::services::project as project_service;
use crate::AppState;

/// GET /projects — list all projects, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = project_service::list(&state.db).await?;
    Ok(Json(projects))
}

/// GET /projects/:id — fetch one project.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Project>, AppError> {
    let project = project_service::find_by_id(&state.db, id).await?;
    Ok(Json(project))
}
