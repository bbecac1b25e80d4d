use sqlx::SqlitePool;

use super::db::fetch_category_by_slug;
use super::models::CategoryRow;

pub async fn get_all_categories(pool: &SqlitePool) -> anyhow::Result<Vec<CategoryRow>> {
    let records = sqlx::query_as::<_, CategoryRow>(
        "SELECT id, slug, title, description FROM service_categories ORDER BY title, slug",
    )
    .fetch_all(pool)
    .await?;
    Ok(records)
}

pub async fn get_category(pool: &SqlitePool, slug: &str) -> anyhow::Result<Option<CategoryRow>> {
    Ok(fetch_category_by_slug(pool, slug).await?)
}
