//! Contact submission listing

use crate::error::AppError;
use crate::state::AppState;
use crate::store::ContactSubmission;
use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use serde::Deserialize;

const MESSAGES_PAGE: &str = include_str!("../../templates/messages.html");

/// Query parameters for the contact listing
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// Substring of the sender's name, email or phone
    pub search: Option<String>,
}

/// GET /api/messages/ - List contact submissions, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<ContactSubmission>>, AppError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let contacts = match search {
        Some(term) => state.store.search_contacts(term).await,
        None => state.store.list_contacts().await,
    }
    .map_err(|e| {
        AppError::Internal(anyhow::Error::new(e).context("failed to list contact submissions"))
    })?;

    Ok(Json(contacts))
}

/// GET /messages-page/ - Static page that renders the listing client-side
pub async fn messages_page() -> Html<&'static str> {
    Html(MESSAGES_PAGE)
}
