use crate::domain::repository::{Clock, OtpRepository};
use crate::domain::types::{OtpPolicy, ValidationOutcome};
use crate::error::OtpServiceError;

pub struct ValidateOtpInput {
    pub identifier: String,
    pub code: String,
}

pub struct ValidateOtpUseCase<S, C>
where
    S: OtpRepository,
    C: Clock,
{
    pub store: S,
    pub clock: C,
    pub policy: OtpPolicy,
}

impl<S, C> ValidateOtpUseCase<S, C>
where
    S: OtpRepository,
    C: Clock,
{
    /// Unlimited retries: a mismatch never locks the identifier out.
    pub fn execute(&self, input: ValidateOtpInput) -> Result<ValidationOutcome, OtpServiceError> {
        let identifier = input.identifier.trim();
        if identifier.is_empty() {
            return Err(OtpServiceError::InvalidInput("identifier"));
        }
        let code = input.code.trim();
        if code.is_empty() {
            return Err(OtpServiceError::InvalidInput("code"));
        }

        let outcome = self
            .store
            .consume(identifier, code, self.clock.now(), self.policy.expiry);

        // Identifiers are personal data; keep them out of info-level events.
        match outcome {
            ValidationOutcome::Success => tracing::info!("otp consumed"),
            ValidationOutcome::Expired => tracing::info!("otp expired"),
            ValidationOutcome::Mismatch | ValidationOutcome::NotFound => {}
        }
        tracing::debug!(identifier, ?outcome, "otp validated");

        Ok(outcome)
    }
}
