//! In-memory preference backend using DashMap.
//!
//! Preference rows live in memory and are lost on restart. This backend is
//! the default for local development and carries the test suite.

use async_trait::async_trait;
use dashmap::DashMap;

use super::backend::{Channel, PreferenceBackend, PreferenceBackendError};

/// In-memory preference backend.
#[derive(Default)]
pub struct MemoryPreferenceBackend {
    preferences: DashMap<String, Channel>,
}

impl MemoryPreferenceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a preference row. Used for seeding and tests.
    pub fn insert(&self, recipient_id: &str, channel: Channel) {
        self.preferences.insert(recipient_id.to_string(), channel);
    }

    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }
}

#[async_trait]
impl PreferenceBackend for MemoryPreferenceBackend {
    async fn preferred_channel(
        &self,
        recipient_id: &str,
    ) -> Result<Option<Channel>, PreferenceBackendError> {
        Ok(self.preferences.get(recipient_id).map(|entry| *entry.value()))
    }
}
