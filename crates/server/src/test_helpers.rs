use anyhow::Result;
use edit_workflow::derive_slug;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::str::FromStr;

use crate::category::models::CategoryRow;

/// Creates an in-memory SQLite pool for testing
pub async fn create_test_pool() -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory databases should use a single connection
        .connect_with(connect_options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Inserts a category with a fixed id, bypassing validation.
pub async fn insert_category(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<CategoryRow> {
    let slug = derive_slug(title);
    sqlx::query("INSERT INTO service_categories (id, slug, title, description) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&slug)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(CategoryRow {
        id: id.to_string(),
        slug,
        title: title.to_string(),
        description: description.map(str::to_string),
    })
}
