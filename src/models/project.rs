//! Project record as stored in the `projects` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A portfolio project owned by a user.
///
/// `image` and `link` are optional; `created_at` may be null on legacy rows,
/// which excludes them from the timeline aggregation but not from counts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub image: Option<String>,
    pub description: String,
    pub link: Option<String>,
    pub user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
