use std::sync::Arc;

use prometheus::{Encoder, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};

use super::{Error, Result};

pub const STATUS_METRIC: &str = "container_status";
pub const RESTART_FLAG_METRIC: &str = "container_restart_flag";
pub const UPTIME_METRIC: &str = "container_uptime_seconds";

/// The gauge families published for every container.
///
/// ## Metrics
/// - `container_status{name, status}` - 1 if the container is running, 0 otherwise
/// - `container_restart_flag{name}` - 1 if the container exited within the restart window
/// - `container_uptime_seconds{name}` - seconds since the container was started
///
/// Each value registers into its own [`Registry`]; nothing here is process-global.
#[derive(Clone)]
pub struct ContainerMetrics {
    status: IntGaugeVec,
    restart_flag: IntGaugeVec,
    uptime_seconds: GaugeVec,
    registry: Arc<Registry>,
}

impl ContainerMetrics {
    /// Registers the container gauges in the given registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self> {
        let status = IntGaugeVec::new(
            Opts::new(
                STATUS_METRIC,
                "Container status (1 if status is running, 0 otherwise)",
            ),
            &["name", "status"],
        )
        .map_err(Error::Register)?;
        registry
            .register(Box::new(status.clone()))
            .map_err(Error::Register)?;

        let restart_flag = IntGaugeVec::new(
            Opts::new(
                RESTART_FLAG_METRIC,
                "Container exited within the restart window (1 if yes, 0 otherwise)",
            ),
            &["name"],
        )
        .map_err(Error::Register)?;
        registry
            .register(Box::new(restart_flag.clone()))
            .map_err(Error::Register)?;

        let uptime_seconds = GaugeVec::new(
            Opts::new(UPTIME_METRIC, "Time since the container was started in seconds"),
            &["name"],
        )
        .map_err(Error::Register)?;
        registry
            .register(Box::new(uptime_seconds.clone()))
            .map_err(Error::Register)?;

        Ok(Self {
            status,
            restart_flag,
            uptime_seconds,
            registry,
        })
    }

    /// Creates the container gauges in a fresh registry.
    pub fn new() -> Result<Self> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn set_status(&self, name: &str, status: &str, running: bool) {
        self.status
            .with_label_values(&[name, status])
            .set(i64::from(running));
    }

    pub fn set_restart_flag(&self, name: &str, restarted: bool) {
        self.restart_flag
            .with_label_values(&[name])
            .set(i64::from(restarted));
    }

    pub fn set_uptime(&self, name: &str, seconds: f64) {
        self.uptime_seconds.with_label_values(&[name]).set(seconds);
    }

    pub fn remove_status(&self, name: &str, status: &str) {
        if let Err(err) = self.status.remove_label_values(&[name, status]) {
            log::trace!("no {STATUS_METRIC} series for {name}/{status}: {err}");
        }
    }

    pub fn remove_restart_flag(&self, name: &str) {
        if let Err(err) = self.restart_flag.remove_label_values(&[name]) {
            log::trace!("no {RESTART_FLAG_METRIC} series for {name}: {err}");
        }
    }

    pub fn remove_uptime(&self, name: &str) {
        if let Err(err) = self.uptime_seconds.remove_label_values(&[name]) {
            log::trace!("no {UPTIME_METRIC} series for {name}: {err}");
        }
    }

    /// Serializes every registered family in the text exposition format.
    pub fn encode(&self) -> Result<String> {
        let families = self.registry.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(Error::Encode)?;
        String::from_utf8(buffer).map_err(|err| {
            Error::Encode(prometheus::Error::Msg(format!(
                "exposition is not valid utf-8: {err}"
            )))
        })
    }

    /// Get reference to the underlying prometheus registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}
