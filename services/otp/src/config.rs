use std::time::Duration;

use crate::domain::types::{OTP_EXPIRY_SECS, OTP_LENGTH, OTP_MAX_LENGTH, OtpPolicy};

/// OTP service configuration loaded from environment variables once at startup.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Digits per passcode, 1 to 32 (default 6). Env var: `OTP_LENGTH`.
    pub otp_length: usize,
    /// Validity window in seconds (default 30). Env var: `OTP_EXPIRY_SECONDS`.
    pub otp_expiry_secs: u64,
    /// TCP port to listen on (default 5000). Env var: `OTP_PORT`, then `PORT`.
    pub otp_port: u16,
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            otp_length: lookup("OTP_LENGTH")
                .and_then(|v| v.trim().parse().ok())
                .filter(|len: &usize| (1..=OTP_MAX_LENGTH).contains(len))
                .unwrap_or(OTP_LENGTH),
            otp_expiry_secs: lookup("OTP_EXPIRY_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(OTP_EXPIRY_SECS),
            otp_port: lookup("OTP_PORT")
                .or_else(|| lookup("PORT"))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5000),
        }
    }

    pub fn policy(&self) -> OtpPolicy {
        OtpPolicy::new(self.otp_length, Duration::from_secs(self.otp_expiry_secs))
    }
}
