//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires a `DATABASE_URL` environment variable (reads .env). Safe to
//! re-run: existing rows are left untouched.

use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== folio seed script ===");

    seed_users(&pool).await?;
    seed_projects(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Users already exist ({count})");
        return Ok(());
    }

    for email in ["alice@folio.local", "bob@folio.local"] {
        sqlx::query("INSERT INTO users (email) VALUES ($1)")
            .bind(email)
            .execute(pool)
            .await?;
    }

    println!("[done] Created 2 sample users");
    Ok(())
}

async fn seed_projects(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Projects already exist ({count})");
        return Ok(());
    }

    // Descriptions exercise every tech-stack label, months span the
    // timeline window, and image coverage is deliberately partial.
    let projects = vec![
        (
            "Interactive React dashboard for tracking reading habits",
            Some("dashboard.png"),
            "alice@folio.local",
            "2024-01-08T10:00:00Z",
        ),
        (
            "Vanilla JavaScript puzzle game",
            None,
            "alice@folio.local",
            "2024-02-14T09:30:00Z",
        ),
        (
            "Blog engine written in PHP with a custom theme system",
            Some("blog.png"),
            "bob@folio.local",
            "2024-02-20T16:45:00Z",
        ),
        (
            "SQL schema visualizer",
            None,
            "bob@folio.local",
            "2024-03-03T11:15:00Z",
        ),
        (
            "Personal portfolio site, plain HTML and CSS",
            Some("portfolio.png"),
            "alice@folio.local",
            "2024-04-18T14:00:00Z",
        ),
    ];

    for (description, image, owner_email, created_at) in projects {
        sqlx::query(
            "INSERT INTO projects (image, description, link, user_id, created_at, updated_at)
             SELECT $1, $2, '', u.id, $4::timestamptz, $4::timestamptz
             FROM users u WHERE u.email = $3",
        )
        .bind(image)
        .bind(description)
        .bind(owner_email)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 5 sample projects");
    Ok(())
}
