//! JSON endpoints used by the `services-admin` CLI.

use axum::Json;
use axum::extract::{Path, State};
use edit_workflow::{CategoryFields, CategoryRecord, CategoryStore};

use super::errors::ApiError;
use super::server::AppState;
use crate::category::mutations::update_category;
use crate::category::queries::get_all_categories;

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryRecord>>, ApiError> {
    let rows = get_all_categories(state.store.pool())
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(rows.into_iter().map(CategoryRecord::from).collect()))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryRecord>, ApiError> {
    match state.store.retrieve_category(&slug).await? {
        Some(record) => Ok(Json(record)),
        None => Err(edit_workflow::StoreError::NotFound.into()),
    }
}

pub async fn put_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<CategoryFields>,
) -> Result<Json<CategoryRecord>, ApiError> {
    let row = update_category(state.store.pool(), &id, &fields).await?;
    Ok(Json(row.into()))
}
