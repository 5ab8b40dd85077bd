//! HTTP dispatch handlers

use axum::{extract::State, Json};

use crate::dispatch::{DispatchOutcome, DispatchRequest};
use crate::error::Result;
use crate::server::AppState;

/// Send one notification.
///
/// The body is taken as raw JSON so that field validation happens in the
/// dispatcher and can name the offending field; a non-JSON content type is
/// rejected with 415 by the `Json` extractor before this handler runs.
#[tracing::instrument(name = "http.send_notification", skip(state, payload))]
pub async fn send_notification(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<DispatchOutcome>> {
    let request = DispatchRequest::from_payload(payload);
    let outcome = state.dispatcher.dispatch(request).await?;
    Ok(Json(outcome))
}
