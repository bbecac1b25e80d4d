use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use super::json::{get_category, list_categories, put_category};
use super::pages::{edit_page, list_page, submit_edit};
use crate::category::SqliteCategoryStore;
use crate::config::{AdminSettings, Config};
use crate::metrics_exporter::render_metrics;

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteCategoryStore,
    pub admin: Arc<AdminSettings>,
}

impl AppState {
    pub fn new(store: SqliteCategoryStore, admin: AdminSettings) -> Self {
        Self {
            store,
            admin: Arc::new(admin),
        }
    }
}

async fn metrics_handler() -> String {
    render_metrics()
}

pub fn build_api_router(state: AppState) -> Router {
    let listing_path = state.admin.listing_path.clone();
    let edit_path = format!("{}/{{category}}/edit", listing_path.trim_end_matches('/'));

    Router::new()
        .route(&listing_path, get(list_page))
        .route(&edit_path, get(edit_page).post(submit_edit))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{key}", get(get_category).put(put_category))
        .route("/metrics", get(metrics_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::PUT, Method::OPTIONS]),
        )
        .with_state(state)
}

pub async fn run_api(config: &Config, state: AppState, shutdown: CancellationToken) -> Result<()> {
    let addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("services admin listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_api_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
