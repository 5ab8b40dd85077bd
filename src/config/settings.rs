use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::preference::Channel;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Template definitions, name -> body. Loaded once; the registry is
    /// immutable after startup.
    #[serde(default = "default_templates")]
    pub templates: HashMap<String, String>,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Storage backend: "memory" or "postgres"
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// Rows inserted idempotently at startup
    #[serde(default = "default_preference_seed")]
    pub seed: Vec<PreferenceSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceSeed {
    pub recipient_id: String,
    pub channel: Channel,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost:5432/herald".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_templates() -> HashMap<String, String> {
    HashMap::from([
        (
            "welcome".to_string(),
            "Hi {{ name }}, welcome to {{ product }}!".to_string(),
        ),
        (
            "reset_password".to_string(),
            "Hello {{ name }}, reset your password using this code: {{ code }}".to_string(),
        ),
        (
            "invoice_ready".to_string(),
            "Hi {{ name }}, your invoice #{{ invoice_id }} is ready. Total: {{ total }}"
                .to_string(),
        ),
    ])
}

fn default_preference_seed() -> Vec<PreferenceSeed> {
    vec![
        PreferenceSeed {
            recipient_id: "user_1".to_string(),
            channel: Channel::Email,
        },
        PreferenceSeed {
            recipient_id: "user_2".to_string(),
            channel: Channel::Sms,
        },
    ]
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5050)?
            .set_default("database.backend", "memory")?
            .set_default("database.url", "postgres://localhost:5432/herald")?
            .set_default("database.pool_size", 5)?
            .set_default("database.connect_timeout_seconds", 5)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER_HOST, SERVER_PORT, DATABASE_BACKEND, DATABASE_URL, etc.
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true)
                    .list_separator(","),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            seed: default_preference_seed(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            templates: default_templates(),
            preferences: PreferencesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_database_url(),
            pool_size: default_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 5050);

        let database = DatabaseConfig::default();
        assert_eq!(database.backend, "memory");
    }

    #[test]
    fn test_default_templates_cover_seed_set() {
        let templates = default_templates();
        assert!(templates.contains_key("welcome"));
        assert!(templates.contains_key("reset_password"));
        assert!(templates.contains_key("invoice_ready"));
    }

    #[test]
    fn test_default_seed_rows() {
        let seed = default_preference_seed();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].recipient_id, "user_1");
        assert_eq!(seed[0].channel, Channel::Email);
        assert_eq!(seed[1].channel, Channel::Sms);
    }
}
