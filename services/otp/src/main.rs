use anyhow::Context;
use tracing::info;

use passcode_core::tracing::init_tracing;
use passcode_otp::config::OtpConfig;
use passcode_otp::router::build_router;
use passcode_otp::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,tower_http=debug");

    let config = OtpConfig::from_env();
    let policy = config.policy();
    let state = AppState::new(policy);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.otp_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        otp_length = policy.code_length,
        otp_expiry_secs = policy.expires_in_secs(),
        "otp service listening on {addr}"
    );
    axum::serve(listener, router).await.context("server error")
}
