//! HTTP API surface: dispatch and health endpoints.

mod handlers;
mod health;
mod routes;

pub use health::HealthResponse;
pub use routes::api_routes;
