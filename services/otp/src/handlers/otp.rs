use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use passcode_core::error::AppError;
use passcode_core::serde::to_rfc3339_ms;

use crate::domain::types::ValidationOutcome;
use crate::error::OtpServiceError;
use crate::state::AppState;
use crate::usecase::generate::{GenerateOtpInput, GenerateOtpUseCase};
use crate::usecase::validate::{ValidateOtpInput, ValidateOtpUseCase};

// ── POST /otp ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateOtpRequest {
    #[serde(default)]
    pub identifier: String,
}

/// No delivery channel exists, so the code is handed straight back to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOtpResponse {
    pub identifier: String,
    pub code: String,
    pub expires_in_secs: u64,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn generate_otp(
    State(state): State<AppState>,
    payload: Result<Json<GenerateOtpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateOtpResponse>), OtpServiceError> {
    let Json(body) = payload.map_err(AppError::from)?;

    let usecase = GenerateOtpUseCase {
        store: state.otp_store(),
        clock: state.clock,
        policy: state.policy,
    };
    let issued_at = Utc::now();
    let output = usecase.execute(GenerateOtpInput {
        identifier: body.identifier,
    })?;

    let expires_at = Duration::from_std(state.policy.expiry)
        .ok()
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let response = GenerateOtpResponse {
        identifier: output.identifier,
        code: output.code,
        expires_in_secs: output.expires_in_secs,
        expires_at,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// ── POST /otp/validate ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateOtpRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateOtpResponse {
    pub outcome: ValidationOutcome,
    pub message: String,
}

pub async fn validate_otp(
    State(state): State<AppState>,
    payload: Result<Json<ValidateOtpRequest>, JsonRejection>,
) -> Result<Json<ValidateOtpResponse>, OtpServiceError> {
    let Json(body) = payload.map_err(AppError::from)?;

    let usecase = ValidateOtpUseCase {
        store: state.otp_store(),
        clock: state.clock,
        policy: state.policy,
    };
    let outcome = usecase.execute(ValidateOtpInput {
        identifier: body.identifier,
        code: body.code,
    })?;

    match outcome {
        ValidationOutcome::Success => Ok(Json(ValidateOtpResponse {
            outcome,
            message: "OTP validation successful.".to_owned(),
        })),
        ValidationOutcome::Mismatch => Err(OtpServiceError::OtpMismatch),
        ValidationOutcome::Expired => Err(OtpServiceError::OtpExpired),
        ValidationOutcome::NotFound => Err(OtpServiceError::OtpNotFound),
    }
}

// ── GET /otp/policy ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct OtpPolicyResponse {
    pub length: usize,
    pub expires_in_secs: u64,
}

pub async fn otp_policy(State(state): State<AppState>) -> Json<OtpPolicyResponse> {
    Json(OtpPolicyResponse {
        length: state.policy.code_length,
        expires_in_secs: state.policy.expires_in_secs(),
    })
}
