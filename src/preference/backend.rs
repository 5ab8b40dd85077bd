//! Backend trait for recipient preference storage.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery medium for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "SMS")]
    Sms,
    Email,
}

impl Channel {
    /// Default channel when a recipient has no stored preference.
    pub const DEFAULT: Channel = Channel::Email;

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "Email",
        }
    }

    /// Parse a stored channel value. Returns `None` for anything outside
    /// the recognized set, so corrupt rows degrade instead of failing.
    pub fn parse(value: &str) -> Option<Channel> {
        match value {
            "SMS" => Some(Channel::Sms),
            "Email" => Some(Channel::Email),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during preference backend operations.
#[derive(Debug, Error)]
pub enum PreferenceBackendError {
    /// PostgreSQL operation failed
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Backend is temporarily unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for recipient channel preferences.
///
/// Read-only from the core's perspective; rows are created externally by
/// seeding or admin tooling.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    /// Fetch the stored channel for a recipient, `None` when no row exists
    /// or the stored value is unrecognized.
    async fn preferred_channel(
        &self,
        recipient_id: &str,
    ) -> Result<Option<Channel>, PreferenceBackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_round_trip() {
        assert_eq!(Channel::parse("SMS"), Some(Channel::Sms));
        assert_eq!(Channel::parse("Email"), Some(Channel::Email));
        assert_eq!(Channel::Sms.as_str(), "SMS");
        assert_eq!(Channel::Email.as_str(), "Email");
    }

    #[test]
    fn test_channel_parse_rejects_unknown() {
        assert_eq!(Channel::parse("email"), None);
        assert_eq!(Channel::parse("push"), None);
        assert_eq!(Channel::parse(""), None);
    }

    #[test]
    fn test_channel_json_representation() {
        assert_eq!(serde_json::to_string(&Channel::Sms).unwrap(), "\"SMS\"");
        assert_eq!(serde_json::to_string(&Channel::Email).unwrap(), "\"Email\"");
    }
}
