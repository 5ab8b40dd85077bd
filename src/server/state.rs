use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::audit::{create_audit_backend, AuditRecorder, PostgresAuditBackend};
use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::preference::{
    create_preference_backend, PostgresPreferenceBackend, PreferenceResolver,
};
use crate::sink::{LogSink, MessageSink};
use crate::template::TemplateRegistry;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Build the composition root: registry, stores, recorder, and
    /// dispatcher, all constructed once and injected explicitly.
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        Self::with_sink(settings, Arc::new(LogSink)).await
    }

    /// Like [`AppState::new`] but with an externally supplied sink, for
    /// deployments wiring in a real gateway.
    pub async fn with_sink(
        settings: Settings,
        sink: Arc<dyn MessageSink>,
    ) -> anyhow::Result<Self> {
        let registry = Arc::new(
            TemplateRegistry::from_definitions(&settings.templates)
                .context("invalid template definition in settings")?,
        );
        tracing::info!(templates = registry.len(), "Template registry loaded");

        let pool = match settings.database.backend.as_str() {
            "postgres" => Some(Self::connect_postgres(&settings).await?),
            _ => None,
        };

        let preference_backend =
            create_preference_backend(&settings.database, pool.clone(), &settings.preferences.seed);
        let audit_backend = create_audit_backend(&settings.database, pool);

        let dispatcher = Dispatcher::new(
            registry,
            PreferenceResolver::new(preference_backend),
            AuditRecorder::new(audit_backend, sink),
        );

        Ok(Self {
            settings: Arc::new(settings),
            dispatcher: Arc::new(dispatcher),
        })
    }

    async fn connect_postgres(settings: &Settings) -> anyhow::Result<PgPool> {
        let database = &settings.database;
        let pool = PgPoolOptions::new()
            .max_connections(database.pool_size)
            .acquire_timeout(Duration::from_secs(database.connect_timeout_seconds as u64))
            .connect(&database.url)
            .await
            .context("failed to connect to PostgreSQL")?;

        tracing::info!(pool_size = database.pool_size, "PostgreSQL connection pool created");

        PostgresPreferenceBackend::ensure_schema(&pool).await?;
        PostgresAuditBackend::ensure_schema(&pool).await?;
        PostgresPreferenceBackend::seed(&pool, &settings.preferences.seed).await?;

        Ok(pool)
    }
}
