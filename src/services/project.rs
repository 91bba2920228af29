//! Public read access to project records.
//!
//! The write path (create/update/delete, upload handling) lives in the
//! authenticated CRUD subsystem and is not part of this service.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::project::Project;

/// List all projects, newest first. Undated rows sort last.
pub async fn list(pool: &PgPool) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, image, description, link, user_id, created_at, updated_at
        FROM projects
        ORDER BY created_at DESC NULLS LAST, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(projects)
}

/// Fetch a single project by id.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Project, AppError> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, image, description, link, user_id, created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}
