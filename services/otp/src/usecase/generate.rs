use rand::RngExt;

use crate::domain::repository::{Clock, OtpRepository};
use crate::domain::types::{OtpPolicy, OtpRecord};
use crate::error::OtpServiceError;

/// `len` decimal digits, each drawn independently from the thread-local CSPRNG.
/// Leading zeros are kept.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

pub struct GenerateOtpInput {
    pub identifier: String,
}

#[derive(Debug, Clone)]
pub struct GenerateOtpOutput {
    pub identifier: String,
    pub code: String,
    pub expires_in_secs: u64,
}

pub struct GenerateOtpUseCase<S, C>
where
    S: OtpRepository,
    C: Clock,
{
    pub store: S,
    pub clock: C,
    pub policy: OtpPolicy,
}

impl<S, C> GenerateOtpUseCase<S, C>
where
    S: OtpRepository,
    C: Clock,
{
    pub fn execute(&self, input: GenerateOtpInput) -> Result<GenerateOtpOutput, OtpServiceError> {
        let identifier = input.identifier.trim();
        if identifier.is_empty() {
            return Err(OtpServiceError::InvalidInput("identifier"));
        }

        let code = generate_code(self.policy.code_length);
        let record = OtpRecord::new(code.clone(), self.clock.now());
        self.store.upsert(identifier, record);

        tracing::info!(expires_in_secs = self.policy.expires_in_secs(), "otp issued");
        tracing::debug!(identifier, "otp issued for identifier");

        Ok(GenerateOtpOutput {
            identifier: identifier.to_owned(),
            code,
            expires_in_secs: self.policy.expires_in_secs(),
        })
    }
}
