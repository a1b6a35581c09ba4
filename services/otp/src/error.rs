use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use passcode_core::error::AppError;

/// OTP service error variants.
///
/// `InvalidInput` is a use-case precondition failure. The `Otp*` variants are
/// how the HTTP layer reports non-success validation outcomes.
#[derive(Debug, thiserror::Error)]
pub enum OtpServiceError {
    #[error("{0} is required")]
    InvalidInput(&'static str),
    #[error("no OTP found for this identifier, generate one first")]
    OtpNotFound,
    #[error("OTP expired, generate a new one")]
    OtpExpired,
    #[error("invalid OTP, try again")]
    OtpMismatch,
    #[error(transparent)]
    App(#[from] AppError),
}

impl OtpServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::App(e) => e.kind(),
        }
    }
}

impl IntoResponse for OtpServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::App(e) => return e.into_response(),
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::OtpNotFound => StatusCode::NOT_FOUND,
            Self::OtpExpired => StatusCode::GONE,
            Self::OtpMismatch => StatusCode::UNAUTHORIZED,
        };
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
