use axum::{
    Router,
    routing::{get, post},
};

use passcode_core::error::fallback;
use passcode_core::health::{healthz, readyz};
use passcode_core::middleware::{
    catch_panic_layer, propagate_request_id_layer, request_id_layer, trace_layer,
};

use crate::handlers::otp::{generate_otp, otp_policy, validate_otp};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP
        .route("/otp", post(generate_otp))
        .route("/otp/validate", post(validate_otp))
        .route("/otp/policy", get(otp_policy))
        .fallback(fallback)
        .with_state(state)
        .layer(catch_panic_layer())
        // Outermost last: the id is set before the trace span opens.
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
}
