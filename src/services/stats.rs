//! Portfolio statistics aggregation queries.
//!
//! Both views are recomputed from the `projects INNER JOIN users` dataset on
//! every call — nothing is cached or persisted. Timeline months are bucketed
//! in UTC: `created_at` is stored as TIMESTAMPTZ and formatted as `YYYY-MM`
//! in UTC at this boundary.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;

/// Number of most-recent months returned by the timeline view.
const TIMELINE_MONTHS: usize = 6;

/// Ordered keyword table for tech-stack classification. First match wins;
/// descriptions matching nothing fall back to "Web".
const TECH_KEYWORDS: [(&str, &str); 4] = [
    ("react", "React"),
    ("javascript", "JavaScript"),
    ("php", "PHP"),
    ("sql", "SQL"),
];

/// Aggregate counts over the whole portfolio.
#[derive(Debug, Serialize)]
pub struct PortfolioOverview {
    pub total_projects: i64,
    pub total_users: i64,
    pub projects_with_image: i64,
    pub projects_with_image_percentage: f64,
}

/// One month of project-creation statistics, newest first on the wire.
#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    pub month: String,
    pub new_projects: i64,
    pub tech_stack: String,
    pub contributors: String,
}

/// Conditional-aggregation row for the overview query.
#[derive(Debug, sqlx::FromRow)]
struct OverviewRow {
    total_projects: i64,
    total_users: i64,
    projects_with_image: i64,
}

/// One joined project row feeding the timeline aggregation.
#[derive(Debug, sqlx::FromRow)]
pub struct TimelineRow {
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub email: String,
}

/// Compute the portfolio overview.
///
/// `total_users` counts distinct project owners, not all registered users:
/// the inner join excludes users with zero projects, matching the observed
/// behavior the frontend depends on.
pub async fn portfolio_overview(pool: &PgPool) -> Result<PortfolioOverview, AppError> {
    let row = sqlx::query_as::<_, OverviewRow>(
        r#"
        SELECT
            COUNT(p.id) AS total_projects,
            COUNT(DISTINCT p.user_id) AS total_users,
            COALESCE(SUM(CASE WHEN p.image IS NOT NULL AND p.image <> '' THEN 1 ELSE 0 END), 0)
                AS projects_with_image
        FROM projects p
        INNER JOIN users u ON p.user_id = u.id
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(PortfolioOverview {
        total_projects: row.total_projects,
        total_users: row.total_users,
        projects_with_image: row.projects_with_image,
        projects_with_image_percentage: image_percentage(
            row.projects_with_image,
            row.total_projects,
        ),
    })
}

/// Compute the monthly timeline: the 6 most recent months containing at
/// least one dated project, newest first. Empty months are never
/// synthesized.
pub async fn timeline(pool: &PgPool) -> Result<Vec<TimelineEntry>, AppError> {
    let rows = sqlx::query_as::<_, TimelineRow>(
        r#"
        SELECT p.created_at, p.description, u.email
        FROM projects p
        INNER JOIN users u ON p.user_id = u.id
        WHERE p.created_at IS NOT NULL
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(build_timeline(&rows))
}

/// Share of projects carrying an image, in percent rounded to 1 decimal.
/// Zero projects yields 0 rather than a division error.
fn image_percentage(with_image: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = with_image as f64 * 100.0 / total as f64;
    (pct * 10.0).round() / 10.0
}

/// Classify a project description into a coarse tech-stack label via
/// case-insensitive substring match. First keyword in table order wins.
pub fn classify(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, label)| *label)
        .unwrap_or("Web")
}

#[derive(Debug, Default)]
struct MonthBucket {
    new_projects: i64,
    tech_stack: BTreeSet<&'static str>,
    contributors: BTreeSet<String>,
}

/// Group dated project rows into per-month entries, newest month first,
/// capped at [`TIMELINE_MONTHS`]. Pure; the caller does the fetching.
fn build_timeline(rows: &[TimelineRow]) -> Vec<TimelineEntry> {
    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();

    for row in rows {
        let month = row.created_at.format("%Y-%m").to_string();
        let bucket = months.entry(month).or_default();
        bucket.new_projects += 1;
        bucket.tech_stack.insert(classify(&row.description));
        bucket.contributors.insert(row.email.clone());
    }

    // Keys are zero-padded "YYYY-MM", so the BTreeMap order reversed is
    // newest-first.
    months
        .into_iter()
        .rev()
        .take(TIMELINE_MONTHS)
        .map(|(month, bucket)| TimelineEntry {
            month,
            new_projects: bucket.new_projects,
            tech_stack: bucket.tech_stack.into_iter().collect::<Vec<_>>().join(","),
            contributors: bucket
                .contributors
                .into_iter()
                .collect::<Vec<_>>()
                .join(","),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(created_at: &str, description: &str, email: &str) -> TimelineRow {
        TimelineRow {
            created_at: created_at.parse().unwrap(),
            description: description.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn classify_matches_each_keyword() {
        assert_eq!(classify("A React dashboard"), "React");
        assert_eq!(classify("Vanilla JavaScript game"), "JavaScript");
        assert_eq!(classify("Blog engine in PHP"), "PHP");
        assert_eq!(classify("SQL query builder"), "SQL");
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify("a REACT app"), "React");
        assert_eq!(classify("javascript everywhere"), "JavaScript");
        assert_eq!(classify("mysql admin tool"), "SQL");
    }

    #[test]
    fn classify_first_match_wins() {
        // Contains both React and PHP; React comes first in the table.
        assert_eq!(classify("React frontend for a PHP backend"), "React");
        // JavaScript before SQL.
        assert_eq!(classify("JavaScript ORM over SQL"), "JavaScript");
    }

    #[test]
    fn classify_falls_back_to_web() {
        assert_eq!(classify("Portfolio site in plain HTML"), "Web");
        assert_eq!(classify(""), "Web");
    }

    #[test]
    fn percentage_zero_projects_is_zero() {
        assert_eq!(image_percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_half() {
        assert_eq!(image_percentage(2, 4), 50.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(image_percentage(1, 3), 33.3);
        assert_eq!(image_percentage(2, 3), 66.7);
        assert_eq!(image_percentage(3, 3), 100.0);
    }

    #[test]
    fn timeline_empty_rows_yield_empty_sequence() {
        assert!(build_timeline(&[]).is_empty());
    }

    #[test]
    fn timeline_groups_one_month() {
        let rows = vec![
            row("2024-01-05T10:00:00Z", "React dashboard", "a@example.com"),
            row("2024-01-12T10:00:00Z", "PHP blog", "a@example.com"),
            row("2024-01-20T10:00:00Z", "React widgets", "b@example.com"),
            row("2024-01-28T10:00:00Z", "Static site", "b@example.com"),
        ];

        let entries = build_timeline(&rows);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].month, "2024-01");
        assert_eq!(entries[0].new_projects, 4);

        let stack: Vec<&str> = entries[0].tech_stack.split(',').collect();
        assert!(stack.contains(&"React"));
        assert!(stack.contains(&"PHP"));
        assert!(stack.contains(&"Web"));
        // React appears twice but is deduplicated.
        assert_eq!(stack.iter().filter(|s| **s == "React").count(), 1);

        let contributors: Vec<&str> = entries[0].contributors.split(',').collect();
        assert_eq!(contributors.len(), 2);
        assert!(contributors.contains(&"a@example.com"));
        assert!(contributors.contains(&"b@example.com"));
    }

    #[test]
    fn timeline_caps_at_six_most_recent_months() {
        let rows: Vec<TimelineRow> = (1..=8)
            .map(|m| {
                row(
                    &format!("2024-{m:02}-15T00:00:00Z"),
                    "React app",
                    "a@example.com",
                )
            })
            .collect();

        let entries = build_timeline(&rows);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].month, "2024-08");
        assert_eq!(entries[5].month, "2024-03");
    }

    #[test]
    fn timeline_months_strictly_descending() {
        let rows = vec![
            row("2023-11-01T00:00:00Z", "PHP site", "a@example.com"),
            row("2024-02-01T00:00:00Z", "React site", "a@example.com"),
            row("2023-12-01T00:00:00Z", "SQL tool", "b@example.com"),
        ];

        let entries = build_timeline(&rows);
        let months: Vec<&str> = entries.iter().map(|e| e.month.as_str()).collect();
        assert_eq!(months, vec!["2024-02", "2023-12", "2023-11"]);
        assert!(months.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn timeline_counts_per_month() {
        let rows = vec![
            row("2024-01-01T00:00:00Z", "React app", "a@example.com"),
            row("2024-01-02T00:00:00Z", "React app", "a@example.com"),
            row("2024-02-01T00:00:00Z", "PHP app", "a@example.com"),
        ];

        let entries = build_timeline(&rows);
        assert_eq!(entries[0].month, "2024-02");
        assert_eq!(entries[0].new_projects, 1);
        assert_eq!(entries[1].month, "2024-01");
        assert_eq!(entries[1].new_projects, 2);
    }

    #[test]
    fn timeline_month_is_zero_padded() {
        let rows = vec![row("2024-03-05T00:00:00Z", "x", "a@example.com")];
        assert_eq!(build_timeline(&rows)[0].month, "2024-03");
    }

    #[test]
    fn overview_serializes_numbers_not_strings() {
        let overview = PortfolioOverview {
            total_projects: 4,
            total_users: 2,
            projects_with_image: 2,
            projects_with_image_percentage: 50.0,
        };
        let json = serde_json::to_value(&overview).unwrap();
        assert!(json["total_projects"].is_i64());
        assert!(json["total_users"].is_i64());
        assert!(json["projects_with_image"].is_i64());
        assert!(json["projects_with_image_percentage"].is_f64());
    }

    #[test]
    fn timeline_entry_always_carries_contributors_key() {
        let rows = vec![row("2024-01-01T00:00:00Z", "x", "a@example.com")];
        let json = serde_json::to_value(build_timeline(&rows)).unwrap();
        assert!(json[0].get("contributors").is_some());
        assert_eq!(json[0]["contributors"], "a@example.com");
    }
}
