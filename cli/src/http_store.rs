use async_trait::async_trait;
use edit_workflow::{CategoryFields, CategoryRecord, CategoryStore, Navigator, StoreError};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

/// Talks to the admin server's JSON API.
#[derive(Clone)]
pub struct HttpCategoryStore {
    client: reqwest::Client,
    api_url: String,
}

impl HttpCategoryStore {
    pub fn new(api_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn category_url(&self, key: &str) -> String {
        format!("{}/api/categories/{}", self.api_url, urlencoding::encode(key))
    }

    pub async fn list_categories(&self) -> anyhow::Result<Vec<CategoryRecord>> {
        let response = self
            .client
            .get(format!("{}/api/categories", self.api_url))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send request to admin API: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(error_message(status, &body)));
        }

        Ok(response.json().await?)
    }
}

/// The server's `{ "error": .. }` message, or the status line when absent.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("request failed with status: {status}"))
}

#[async_trait]
impl CategoryStore for HttpCategoryStore {
    async fn retrieve_category(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError> {
        let response = self
            .client
            .get(self.category_url(slug))
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<CategoryRecord>()
                .await
                .map(Some)
                .map_err(StoreError::unavailable),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::Unavailable(error_message(status, &body)))
            }
        }
    }

    async fn update_category(&self, id: &str, fields: &CategoryFields) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.category_url(id))
            .json(fields)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => StoreError::Rejected(error_message(status, &body)),
            _ => StoreError::Unavailable(error_message(status, &body)),
        })
    }
}

/// Navigation for the terminal: print the refreshed listing.
pub struct ListingPrinter {
    store: HttpCategoryStore,
}

impl ListingPrinter {
    pub fn new(store: HttpCategoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Navigator for ListingPrinter {
    async fn navigate_to_listing(&self) -> anyhow::Result<()> {
        print_listing(&self.store.list_categories().await?);
        Ok(())
    }
}

pub fn print_listing(categories: &[CategoryRecord]) {
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }
    for category in categories {
        println!("{:<24} {}", category.slug, category.title);
    }
}
