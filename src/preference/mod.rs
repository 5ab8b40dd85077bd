//! Recipient channel preferences.
//!
//! A recipient maps to a preferred channel (SMS or Email) stored in a
//! backend. Resolution never fails: missing rows, unrecognized stored
//! values, and backend faults all degrade to the default channel rather
//! than blocking a dispatch.

mod backend;
mod factory;
mod memory_backend;
mod postgres_backend;

pub use backend::{Channel, PreferenceBackend, PreferenceBackendError};
pub use factory::create_preference_backend;
pub use memory_backend::MemoryPreferenceBackend;
pub use postgres_backend::PostgresPreferenceBackend;

use std::sync::Arc;

/// Resolves a recipient to a delivery channel.
#[derive(Clone)]
pub struct PreferenceResolver {
    backend: Arc<dyn PreferenceBackend>,
}

impl PreferenceResolver {
    pub fn new(backend: Arc<dyn PreferenceBackend>) -> Self {
        Self { backend }
    }

    /// Resolve the channel for a recipient.
    ///
    /// Infallible: a missing row or unrecognized stored value resolves to
    /// `Channel::DEFAULT`, and a backend fault is logged and degrades the
    /// same way. One backend read, no writes.
    pub async fn resolve(&self, recipient_id: &str) -> Channel {
        match self.backend.preferred_channel(recipient_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => Channel::DEFAULT,
            Err(e) => {
                tracing::warn!(
                    recipient_id = %recipient_id,
                    error = %e,
                    "Preference lookup failed, using default channel"
                );
                Channel::DEFAULT
            }
        }
    }
}
