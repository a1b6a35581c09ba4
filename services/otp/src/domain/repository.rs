use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::types::{OtpRecord, ValidationOutcome};

/// Store of pending passcodes, at most one per identifier.
pub trait OtpRepository: Send + Sync {
    /// Insert a record, unconditionally replacing any pending one for the identifier.
    fn upsert(&self, identifier: &str, record: OtpRecord);

    /// Look up, expire, compare and delete as one atomic step for `identifier`.
    ///
    /// Expired records are removed and reported as `Expired`. A matching code
    /// removes the record. A mismatch leaves it untouched.
    fn consume(
        &self,
        identifier: &str,
        code: &str,
        now: Instant,
        expiry: Duration,
    ) -> ValidationOutcome;
}

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

impl<T: OtpRepository + ?Sized> OtpRepository for Arc<T> {
    fn upsert(&self, identifier: &str, record: OtpRecord) {
        (**self).upsert(identifier, record)
    }

    fn consume(
        &self,
        identifier: &str,
        code: &str,
        now: Instant,
        expiry: Duration,
    ) -> ValidationOutcome {
        (**self).consume(identifier, code, now, expiry)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
