use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::handlers::send_notification;
use super::health::health;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/send", post(send_notification))
}
