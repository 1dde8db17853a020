/// Entry point for the container exporter.
///
/// Reads its configuration from the environment, connects to the local Docker daemon
/// and serves container health gauges for Prometheus.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the runtime client cannot be set
/// up or the listen address cannot be bound.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug LISTEN_ADDR=127.0.0.1:1624 RESTART_WINDOW_SECS=600 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = container_exporter::Config::from_env()?;
    container_exporter::run(config).await?;
    Ok(())
}
