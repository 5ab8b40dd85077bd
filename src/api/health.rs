//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Liveness probe. Returns `{"ok": true}` unconditionally.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
