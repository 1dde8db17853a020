//! Container Exporter: publishes health gauges for the containers of a local container
//! runtime in the Prometheus text exposition format.
//!
//! Every request to `/metrics` queries the runtime afresh, derives status, restart and
//! uptime gauges per container and answers with the reconciled registry.
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod container;
pub mod error;
pub mod metrics;
pub mod runtime;

pub use config::Config;
pub use error::{Error, Result};

/// Runs the exporter until Ctrl-C or SIGTERM is received.
///
/// Connects to the container runtime, builds the metrics publisher and serves the
/// metrics endpoint on [`Config::listen_addr`].
///
/// # Errors
///
/// Possible errors include:
/// - Failure to configure the container runtime client.
/// - Failure to register the metric families.
/// - Failure to bind the listen address.
pub async fn run(config: Config) -> Result<()> {
    let inspector = runtime::DockerInspector::connect(
        config.runtime_socket.as_deref(),
        config.runtime_timeout,
        config.include_stopped,
    )?;
    log::debug!(
        "Created runtime client (include_stopped={})",
        config.include_stopped
    );

    let publisher = Arc::new(metrics::Publisher::new(
        inspector,
        metrics::ContainerMetrics::new()?,
        config.restart_window,
        config.runtime_timeout,
    ));

    api::APIServer::new(publisher)
        .listen(config.listen_addr, shutdown_signal())
        .await?;
    log::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {}", err);
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
                log::error!("failed to listen for SIGTERM: {}", err);
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
    log::info!("Received shutdown signal");
}
