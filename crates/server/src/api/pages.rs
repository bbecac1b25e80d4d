//! Server-rendered admin pages.
//!
//! Each request runs a fresh [`EditSession`]: it loads the category named in
//! the route, replays the operator's edits from the submitted form and, on
//! submit, either redirects to the listing or re-renders the form with the
//! error.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Form;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use edit_workflow::{EditSession, EditState, NOT_FOUND_MESSAGE, Navigator};
use serde::Deserialize;

use super::html::{render_edit_form, render_listing, render_load_error};
use super::server::AppState;
use crate::category::SqliteCategoryStore;
use crate::category::queries::get_all_categories;

/// Records that the workflow asked to return to the listing.
#[derive(Default)]
pub struct ListingRedirect {
    fired: AtomicBool,
}

impl ListingRedirect {
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Navigator for ListingRedirect {
    async fn navigate_to_listing(&self) -> anyhow::Result<()> {
        self.fired.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Shown when the route slug now resolves to a different record than the
/// one the form was opened for.
pub const STALE_FORM_MESSAGE: &str =
    "This category was changed elsewhere. Review the current values and save again.";

#[derive(Debug, Deserialize)]
pub struct EditCategoryForm {
    /// Id of the record the form was rendered for.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

type PageSession = EditSession<SqliteCategoryStore, ListingRedirect>;

pub async fn list_page(State(state): State<AppState>) -> Response {
    match get_all_categories(state.store.pool()).await {
        Ok(categories) => (
            [(header::CACHE_CONTROL, "no-store")],
            Html(render_listing(&state.admin, &categories)),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("failed to list categories: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_load_error("Failed to load categories.")),
            )
                .into_response()
        }
    }
}

pub async fn edit_page(State(state): State<AppState>, Path(category): Path<String>) -> Response {
    let mut session = PageSession::new(state.store.clone(), ListingRedirect::default());
    if let Err(err) = session.mount(&category).await {
        return internal_error(err);
    }
    render_state(&state, &category, session.state())
}

pub async fn submit_edit(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Form(form): Form<EditCategoryForm>,
) -> Response {
    let mut session = PageSession::new(state.store.clone(), ListingRedirect::default());
    if let Err(err) = session.mount(&category).await {
        return internal_error(err);
    }

    // Updates are keyed by id; never apply the edit to whichever record owns the slug now.
    if let Some(ready) = session.state().ready() {
        if ready.id() != Some(form.id.as_str()) {
            tracing::warn!(
                route_key = %category,
                submitted_id = %form.id,
                loaded_id = ?ready.id(),
                "rejecting stale category edit form"
            );
            let ready = ready.clone().with_submit_error(STALE_FORM_MESSAGE);
            return (
                StatusCode::CONFLICT,
                Html(render_edit_form(&state.admin, &category, &ready)),
            )
                .into_response();
        }
    }

    // Only a changed title re-derives the slug; an untouched title keeps the stored one.
    let title_changed = session
        .state()
        .ready()
        .is_some_and(|ready| ready.draft().title() != form.title);
    if title_changed {
        session.change_title(form.title);
    }
    session.change_description(form.description);

    if let Err(err) = session.submit().await {
        return internal_error(err);
    }

    if session.navigator().fired() {
        return Redirect::to(&state.admin.listing_path).into_response();
    }

    match session.state() {
        EditState::Ready(ready) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_edit_form(&state.admin, &category, ready)),
        )
            .into_response(),
        other => render_state(&state, &category, other),
    }
}

fn render_state(state: &AppState, route_key: &str, edit_state: &EditState) -> Response {
    match edit_state {
        EditState::Ready(ready) => Html(render_edit_form(&state.admin, route_key, ready)).into_response(),
        EditState::Error(message) => {
            let status = if message == NOT_FOUND_MESSAGE {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Html(render_load_error(message))).into_response()
        }
        EditState::Saved => Redirect::to(&state.admin.listing_path).into_response(),
        EditState::Loading => Html(render_load_error("Loading...")).into_response(),
    }
}

fn internal_error(err: anyhow::Error) -> Response {
    tracing::error!("edit workflow failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_load_error("Something went wrong.")),
    )
        .into_response()
}
