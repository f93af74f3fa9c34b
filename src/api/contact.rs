//! Contact form endpoint
//!
//! Validates a submission, stores it and notifies the site owner.

use crate::domain::ContactForm;
use crate::error::AppError;
use crate::notifier::Notification;
use crate::state::AppState;
use crate::store::ContactSubmission;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use tracing::info;

/// Response for a stored contact submission
#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    /// Always "success"
    pub status: &'static str,
    /// The stored record
    pub data: ContactSubmission,
}

/// POST /contact/ - Submit the contact form
///
/// A failed notification is reported as a server error, but the stored
/// submission is kept.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactCreatedResponse>), AppError> {
    let Json(form) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
    let contact = form.into_new_contact().map_err(AppError::InvalidContact)?;

    let submission = state
        .store
        .create_contact(&contact)
        .await
        .map_err(|e| AppError::ContactFailed(e.into()))?;

    state
        .notifier
        .notify_owner(&Notification::for_contact(&submission))
        .await
        .map_err(|e| {
            AppError::ContactFailed(anyhow::Error::new(e).context(format!(
                "notification for contact {} was not sent",
                submission.id
            )))
        })?;

    info!(contact_id = submission.id, "Contact submission received");

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            status: "success",
            data: submission,
        }),
    ))
}
