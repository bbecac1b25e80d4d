use async_trait::async_trait;
use edit_workflow::{CategoryFields, CategoryRecord, CategoryStore, StoreError};
use sqlx::SqlitePool;

use super::db::fetch_category_by_slug;
use super::mutations::update_category;

/// [`CategoryStore`] backed by the admin SQLite database.
#[derive(Clone)]
pub struct SqliteCategoryStore {
    pool: SqlitePool,
}

impl SqliteCategoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CategoryStore for SqliteCategoryStore {
    async fn retrieve_category(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError> {
        let row = fetch_category_by_slug(&self.pool, slug)
            .await
            .map_err(StoreError::unavailable)?;
        Ok(row.map(CategoryRecord::from))
    }

    async fn update_category(&self, id: &str, fields: &CategoryFields) -> Result<(), StoreError> {
        update_category(&self.pool, id, fields).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_pool, insert_category};

    #[tokio::test]
    async fn test_retrieve_maps_row_to_record() {
        let pool = create_test_pool().await.unwrap();
        insert_category(&pool, "42", "Plumbing", Some("Pipes")).await.unwrap();
        let store = SqliteCategoryStore::new(pool);

        let record = store.retrieve_category("plumbing").await.unwrap().unwrap();
        assert_eq!(
            record,
            CategoryRecord {
                id: "42".to_string(),
                slug: "plumbing".to_string(),
                title: "Plumbing".to_string(),
                description: Some("Pipes".to_string()),
            }
        );
        assert_eq!(store.retrieve_category("roofing").await.unwrap(), None);
    }
}
