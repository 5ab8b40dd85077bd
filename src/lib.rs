// Infrastructure layer (shared components)
pub mod config;
pub mod error;

// Domain layer (business logic)
pub mod audit;
pub mod dispatch;
pub mod preference;
pub mod sink;
pub mod template;

// Application layer
pub mod api;
pub mod server;
