//! PostgreSQL-based preference backend.
//!
//! Table structure:
//! - `recipient_preferences` - One row per recipient, keyed by recipient_id

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::config::PreferenceSeed;

use super::backend::{Channel, PreferenceBackend, PreferenceBackendError};

/// PostgreSQL-based preference backend.
pub struct PostgresPreferenceBackend {
    pool: PgPool,
}

impl PostgresPreferenceBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the preferences table if it does not exist.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), PreferenceBackendError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recipient_preferences (
                recipient_id TEXT PRIMARY KEY,
                preferred_channel TEXT NOT NULL CHECK (preferred_channel IN ('SMS', 'Email'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert seed rows, leaving existing rows untouched. Safe to run on
    /// every startup.
    pub async fn seed(pool: &PgPool, seeds: &[PreferenceSeed]) -> Result<(), PreferenceBackendError> {
        for seed in seeds {
            sqlx::query(
                r#"
                INSERT INTO recipient_preferences (recipient_id, preferred_channel)
                VALUES ($1, $2)
                ON CONFLICT (recipient_id) DO NOTHING
                "#,
            )
            .bind(&seed.recipient_id)
            .bind(seed.channel.as_str())
            .execute(pool)
            .await?;
        }

        tracing::info!(rows = seeds.len(), "Preference seed applied");
        Ok(())
    }
}

#[async_trait]
impl PreferenceBackend for PostgresPreferenceBackend {
    async fn preferred_channel(
        &self,
        recipient_id: &str,
    ) -> Result<Option<Channel>, PreferenceBackendError> {
        let row = sqlx::query(
            "SELECT preferred_channel FROM recipient_preferences WHERE recipient_id = $1",
        )
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored: String = row.try_get("preferred_channel")?;
        let channel = Channel::parse(&stored);
        if channel.is_none() {
            tracing::warn!(
                recipient_id = %recipient_id,
                stored = %stored,
                "Unrecognized channel value in preference row"
            );
        }

        Ok(channel)
    }
}
