use std::sync::Arc;

use crate::domain::types::OtpPolicy;
use crate::infra::clock::SystemClock;
use crate::infra::memory::InMemoryOtpStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    store: Arc<InMemoryOtpStore>,
    pub clock: SystemClock,
    pub policy: OtpPolicy,
}

impl AppState {
    pub fn new(policy: OtpPolicy) -> Self {
        Self {
            store: Arc::new(InMemoryOtpStore::new()),
            clock: SystemClock,
            policy,
        }
    }

    pub fn otp_store(&self) -> Arc<InMemoryOtpStore> {
        Arc::clone(&self.store)
    }
}
