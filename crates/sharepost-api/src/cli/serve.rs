//! `sharepost serve`: run the HTTP service against a live server.

use std::sync::Arc;

use anyhow::Context;

use sharepost_core::dialog::route::ServerRouteConfig;
use sharepost_core::plugin::check_server_version;
use sharepost_infra::config::{ACCESS_TOKEN_ENV, resolve_access_token};
use sharepost_infra::mattermost::MattermostClient;
use sharepost_types::config::ServiceConfig;
use sharepost_types::error::ConfigError;

use crate::http::router::build_router;
use crate::state::MattermostState;

pub async fn serve(config: ServiceConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    config
        .mattermost
        .site_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingSiteUrl)?;

    let token = resolve_access_token(&config, std::env::var(ACCESS_TOKEN_ENV).ok()).with_context(|| {
        format!("no access token: set {ACCESS_TOKEN_ENV} or mattermost.access_token")
    })?;

    let client = Arc::new(MattermostClient::new(config.mattermost.server_url.clone(), token)?);
    let raw_version = client
        .server_version()
        .await
        .with_context(|| format!("failed to reach {}", client.server_url()))?;
    let version = check_server_version(&raw_version)?;
    tracing::info!(%version, server_url = %client.server_url(), "connected to server");

    let client_config = config.client_config();
    let route = ServerRouteConfig::from_config(Some(&client_config));
    tracing::info!(share_url = %route.share_url(), "dialog submissions routed");

    let router = build_router(MattermostState::for_mattermost(client, client_config));

    let addr = format!(
        "{}:{}",
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "sharepost listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
