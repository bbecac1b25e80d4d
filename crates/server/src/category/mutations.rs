use edit_workflow::{CategoryFields, StoreError, derive_slug};
use sqlx::SqlitePool;

use super::db::{fetch_category_by_id, slug_conflicts_for_category};
use super::models::CategoryRow;
use crate::validation::slug::{validate_slug, validate_title};

#[derive(Clone, Debug)]
pub struct CreateCategoryInput {
    pub title: String,
    pub description: Option<String>,
}

fn rejected(err: anyhow::Error) -> StoreError {
    StoreError::rejected(err.to_string())
}

fn write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::rejected("slug already exists");
        }
    }
    StoreError::unavailable(err)
}

fn normalize_description(description: &str) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description.to_string())
    }
}

pub async fn create_category(
    pool: &SqlitePool,
    input: CreateCategoryInput,
) -> Result<CategoryRow, StoreError> {
    validate_title(&input.title).map_err(rejected)?;
    let slug = derive_slug(&input.title);
    validate_slug(&slug).map_err(rejected)?;

    if slug_conflicts_for_category(pool, &slug, None)
        .await
        .map_err(StoreError::unavailable)?
    {
        return Err(StoreError::rejected("slug already exists"));
    }

    let id = cuid2::create_id();
    let description = input.description.as_deref().and_then(normalize_description);
    sqlx::query("INSERT INTO service_categories (id, slug, title, description) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&slug)
        .bind(&input.title)
        .bind(description.as_ref())
        .execute(pool)
        .await
        .map_err(write_error)?;

    tracing::info!(%id, %slug, "created category");

    Ok(CategoryRow {
        id,
        slug,
        title: input.title,
        description,
    })
}

pub async fn update_category(
    pool: &SqlitePool,
    id: &str,
    fields: &CategoryFields,
) -> Result<CategoryRow, StoreError> {
    validate_title(&fields.title).map_err(rejected)?;
    validate_slug(&fields.slug).map_err(rejected)?;

    if fetch_category_by_id(pool, id)
        .await
        .map_err(StoreError::unavailable)?
        .is_none()
    {
        return Err(StoreError::NotFound);
    }

    if slug_conflicts_for_category(pool, &fields.slug, Some(id))
        .await
        .map_err(StoreError::unavailable)?
    {
        return Err(StoreError::rejected("slug already exists"));
    }

    let description = normalize_description(&fields.description);
    let result = sqlx::query(
        "UPDATE service_categories \
         SET title = ?, slug = ?, description = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ?",
    )
    .bind(&fields.title)
    .bind(&fields.slug)
    .bind(description.as_ref())
    .bind(id)
    .execute(pool)
    .await
    .map_err(write_error)?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }

    tracing::info!(%id, slug = %fields.slug, "updated category");

    Ok(CategoryRow {
        id: id.to_string(),
        slug: fields.slug.clone(),
        title: fields.title.clone(),
        description,
    })
}
