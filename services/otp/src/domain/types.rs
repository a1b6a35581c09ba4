use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Number of decimal digits in a generated passcode.
pub const OTP_LENGTH: usize = 6;

/// Longest code length accepted from configuration.
pub const OTP_MAX_LENGTH: usize = 32;

/// Seconds a passcode stays valid after it is issued.
pub const OTP_EXPIRY_SECS: u64 = 30;

/// Pending one-time passcode for a single identifier.
///
/// Records are never mutated; they are replaced by a new generate call or
/// removed when consumed or found expired.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub code: String,
    pub issued_at: Instant,
}

impl OtpRecord {
    pub fn new(code: String, issued_at: Instant) -> Self {
        Self { code, issued_at }
    }

    /// Time elapsed since issuance. Zero if `now` precedes `issued_at`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.issued_at)
    }

    /// Strictly older than `window`: a record whose age equals the window is still live.
    pub fn is_expired_at(&self, now: Instant, window: Duration) -> bool {
        self.age(now) > window
    }

    /// Constant-time comparison against a submitted code.
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}

/// Result of checking a submitted code against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Code matched; the record has been consumed.
    Success,
    /// Wrong code; the record is left in place for a retry.
    Mismatch,
    /// Record aged out and has been removed.
    Expired,
    /// No pending record for the identifier.
    NotFound,
}

/// Code length and expiry window, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    pub code_length: usize,
    pub expiry: Duration,
}

impl OtpPolicy {
    pub fn new(code_length: usize, expiry: Duration) -> Self {
        Self {
            code_length,
            expiry,
        }
    }

    pub fn expires_in_secs(&self) -> u64 {
        self.expiry.as_secs()
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self::new(OTP_LENGTH, Duration::from_secs(OTP_EXPIRY_SECS))
    }
}
