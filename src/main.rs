//! Service entrypoint: load config and model once, then serve predictions until Ctrl+C.

use health_risk::{
    config::ServiceConfig,
    features::{FeatureNormalizer, FeatureTable},
    logging::StructuredLogger,
    model,
    risk::{RiskClassifier, RiskEngine},
    server,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("HEALTH_RISK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = ServiceConfig::load(&config_path)?.with_env_overrides();

    StructuredLogger::init(&config.log);
    config.validate()?;
    if !config.risk.is_default() {
        tracing::warn!(
            bounds = ?config.risk.bounds(),
            "risk bounds differ from the calibrated defaults"
        );
    }

    info!(config = %config_path.display(), model = %config.model.path.display(), "health-risk service starting");

    let model = model::load(&config.model)?;
    let classifier = Arc::new(RiskClassifier::new(
        FeatureNormalizer::new(FeatureTable::standard()),
        RiskEngine::new(config.risk.clone()),
        model,
    ));
    if !classifier.is_ready() {
        tracing::warn!("serving without a model; /predict will answer 503");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, server::router(classifier))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("health-risk service stopped");
    Ok(())
}
