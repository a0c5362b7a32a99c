use std::sync::Arc;

use mpp_tracking_core::TrackingScraper;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::{router, AppState};
use crate::telemetry;

pub async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.portal.accept_invalid_certs {
        warn!("TLS certificate verification toward the portal is disabled (PORTAL_ACCEPT_INVALID_CERTS)");
    }

    let state = Arc::new(AppState::new(
        config.api_token.clone(),
        TrackingScraper::with_config(config.portal.clone()),
    ));
    let app = router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        connect_timeout_secs = config.portal.connect_timeout_secs,
        read_timeout_secs = config.portal.read_timeout_secs,
        "tracking relay ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("tracking relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
