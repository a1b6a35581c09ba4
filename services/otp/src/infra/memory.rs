use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::repository::OtpRepository;
use crate::domain::types::{OtpRecord, ValidationOutcome};

/// Process-local passcode store.
///
/// Sharded map: operations on one identifier serialize on its shard lock,
/// identifiers on other shards proceed in parallel. Expiry is only checked
/// when a code is submitted; nothing sweeps the map in the background.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: DashMap<String, OtpRecord>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }
}

impl OtpRepository for InMemoryOtpStore {
    fn upsert(&self, identifier: &str, record: OtpRecord) {
        self.records.insert(identifier.to_owned(), record);
    }

    fn consume(
        &self,
        identifier: &str,
        code: &str,
        now: Instant,
        expiry: Duration,
    ) -> ValidationOutcome {
        // The entry guard holds the shard write lock until it is dropped.
        match self.records.entry(identifier.to_owned()) {
            Entry::Vacant(_) => ValidationOutcome::NotFound,
            Entry::Occupied(entry) => {
                if entry.get().is_expired_at(now, expiry) {
                    entry.remove();
                    ValidationOutcome::Expired
                } else if entry.get().matches(code) {
                    entry.remove();
                    ValidationOutcome::Success
                } else {
                    ValidationOutcome::Mismatch
                }
            }
        }
    }
}
