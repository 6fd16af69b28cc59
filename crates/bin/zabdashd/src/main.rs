//! # zabdashd — Zabbix dashboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the Zabbix JSON-RPC client (driven adapter)
//! - Construct application services and the device poller, injecting the
//!   client via port traits
//! - Spawn the poller and serve the axum router
//! - Handle graceful shutdown (SIGTERM/SIGINT), stopping the poller too
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use zabdash_adapter_http_axum::icons::EmbeddedIcons;
use zabdash_adapter_http_axum::router;
use zabdash_adapter_http_axum::state::AppState;
use zabdash_adapter_zabbix_reqwest::ZabbixClient;
use zabdash_app::poller::Poller;
use zabdash_app::services::auth_service::AuthService;
use zabdash_app::services::device_service::DeviceService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Driven adapter
    let api = Arc::new(
        ZabbixClient::new(config.zabbix.clone()).context("failed to build Zabbix client")?,
    );
    tracing::info!(url = %api.url(), "using Zabbix API");

    // Services
    let auth_service = Arc::new(AuthService::new(Arc::clone(&api)));
    let device_service = Arc::new(DeviceService::new(Arc::clone(&api), EmbeddedIcons));
    let poller = Arc::new(Poller::new(
        Arc::clone(&device_service),
        config.refresh_interval(),
    ));

    // Poller
    let (stop_tx, stop_rx) = watch::channel(false);
    let poller_task = tokio::spawn(Arc::clone(&poller).run(stopped(stop_rx)));

    // HTTP
    let app = router::build(AppState::from_arcs(auth_service, device_service, poller));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("zabdashd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    let _ = stop_tx.send(true);
    poller_task.await.context("poller task panicked")?;
    tracing::info!("zabdashd stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves once `true` is sent, or the sender is gone.
async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
