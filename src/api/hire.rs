//! Hire request endpoint

use crate::domain::{validate_hire_request, ServiceKind};
use crate::error::AppError;
use crate::notifier::Notification;
use crate::state::AppState;
use crate::store::{HireRequest, HireRequestFilter, StoreError};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Hire request body
#[derive(Debug, Default, Deserialize)]
pub struct HireRequestPayload {
    /// Client email
    pub email: Option<String>,
    /// Requested service: graphic, web or both
    pub service: Option<String>,
}

/// Response for a stored hire request
#[derive(Debug, Serialize)]
pub struct HireCreatedResponse {
    /// Always "success"
    pub status: &'static str,
}

/// POST /hire-requests - Ask for a service
pub async fn submit_hire_request(
    State(state): State<AppState>,
    payload: Result<Json<HireRequestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<HireCreatedResponse>), AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;

    let request = validate_hire_request(
        payload.email.as_deref().unwrap_or_default(),
        payload.service.as_deref().unwrap_or_default(),
    )?;

    state
        .store
        .create_hire_request(&request)
        .await
        .map_err(|e| match e {
            StoreError::DuplicateRequest { .. } => {
                warn!(service = %request.service, "Duplicate hire request rejected");
                AppError::DuplicateRequest
            }
            other => AppError::HireRequestFailed(other.into()),
        })?;

    state
        .notifier
        .notify_owner(&Notification::for_hire_request(
            &request.email,
            request.service,
        ))
        .await
        .map_err(|e| AppError::HireRequestFailed(e.into()))?;

    info!(service = %request.service, "Hire request received");

    Ok((
        StatusCode::CREATED,
        Json(HireCreatedResponse { status: "success" }),
    ))
}

/// Query parameters for the hire request listing
#[derive(Debug, Default, Deserialize)]
pub struct HireRequestQuery {
    /// Only requests for this service: graphic, web or both
    pub service: Option<String>,
    /// Substring of the client email
    pub search: Option<String>,
}

impl HireRequestQuery {
    fn into_filter(self) -> Result<HireRequestFilter, AppError> {
        let service = match non_blank(self.service) {
            Some(service) => Some(service.parse::<ServiceKind>()?),
            None => None,
        };
        Ok(HireRequestFilter {
            service,
            email_contains: non_blank(self.search),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/hire-requests/ - List hire requests, newest first
pub async fn list_hire_requests(
    State(state): State<AppState>,
    Query(query): Query<HireRequestQuery>,
) -> Result<Json<Vec<HireRequest>>, AppError> {
    let filter = query.into_filter()?;

    let requests = state.store.list_hire_requests(&filter).await.map_err(|e| {
        AppError::Internal(anyhow::Error::new(e).context("failed to list hire requests"))
    })?;

    Ok(Json(requests))
}
