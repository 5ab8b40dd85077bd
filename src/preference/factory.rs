//! Preference backend factory

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{DatabaseConfig, PreferenceSeed};

use super::backend::PreferenceBackend;
use super::memory_backend::MemoryPreferenceBackend;
use super::postgres_backend::PostgresPreferenceBackend;

/// Create a preference backend based on configuration.
///
/// - `"postgres"`: Returns a `PostgresPreferenceBackend` if a pool is provided
/// - `"memory"` (default): Returns a `MemoryPreferenceBackend` pre-loaded
///   with the configured seed rows
pub fn create_preference_backend(
    settings: &DatabaseConfig,
    pool: Option<PgPool>,
    seeds: &[PreferenceSeed],
) -> Arc<dyn PreferenceBackend> {
    match settings.backend.as_str() {
        "postgres" => {
            if let Some(pool) = pool {
                tracing::info!(backend = "postgres", "Creating PostgreSQL preference backend");
                return Arc::new(PostgresPreferenceBackend::new(pool));
            }
            tracing::warn!(
                "PostgreSQL backend requested but no pool provided, falling back to memory"
            );
            Arc::new(seeded_memory_backend(seeds))
        }
        _ => {
            tracing::info!(backend = "memory", "Creating memory preference backend");
            Arc::new(seeded_memory_backend(seeds))
        }
    }
}

fn seeded_memory_backend(seeds: &[PreferenceSeed]) -> MemoryPreferenceBackend {
    let backend = MemoryPreferenceBackend::new();
    for seed in seeds {
        backend.insert(&seed.recipient_id, seed.channel);
    }
    backend
}
