use super::models::CategoryRow;
use sqlx::SqlitePool;

pub async fn fetch_category_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        "SELECT id, slug, title, description FROM service_categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_category_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        "SELECT id, slug, title, description FROM service_categories WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Whether a category other than `except_id` already owns `slug`.
pub async fn slug_conflicts_for_category(
    pool: &SqlitePool,
    slug: &str,
    except_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = if let Some(except_id) = except_id {
        sqlx::query_scalar("SELECT 1 FROM service_categories WHERE slug = ? AND id != ? LIMIT 1")
            .bind(slug)
            .bind(except_id)
            .fetch_optional(pool)
            .await?
    } else {
        sqlx::query_scalar("SELECT 1 FROM service_categories WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?
    };

    Ok(exists.is_some())
}
