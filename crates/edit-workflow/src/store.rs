use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{CategoryFields, CategoryRecord};

/// Data access consumed by the edit workflow.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Look a category up by its current slug. `Ok(None)` means not found.
    async fn retrieve_category(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError>;

    /// Persist `fields` onto the category identified by `id`.
    async fn update_category(&self, id: &str, fields: &CategoryFields) -> Result<(), StoreError>;
}

/// Where the workflow goes once an update lands.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Move to the category listing and make it reflect the latest data.
    async fn navigate_to_listing(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: CategoryStore + ?Sized> CategoryStore for Arc<T> {
    async fn retrieve_category(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError> {
        (**self).retrieve_category(slug).await
    }

    async fn update_category(&self, id: &str, fields: &CategoryFields) -> Result<(), StoreError> {
        (**self).update_category(id, fields).await
    }
}

#[async_trait]
impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    async fn navigate_to_listing(&self) -> anyhow::Result<()> {
        (**self).navigate_to_listing().await
    }
}
