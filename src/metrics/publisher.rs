use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::container::{ContainerName, ContainerSnapshot};
use crate::runtime::Inspector;

use super::gauges::ContainerMetrics;
use super::health::derive;
use super::{Error, Result};

/// Turns runtime snapshots into exposition text, one scrape at a time.
///
/// The registry outlives individual scrapes, so every scrape reconciles it against the
/// containers seen in that scrape: series of containers that disappeared are removed,
/// as is the previous `status` series of a container whose status changed.
pub struct Publisher<I> {
    inspector: I,
    restart_window: Duration,
    runtime_timeout: Duration,
    state: Mutex<PublishedState>,
}

/// Series published for one container in the last successful scrape.
#[derive(Debug, Clone, PartialEq)]
struct PublishedSeries {
    status: String,
    uptime: bool,
}

struct PublishedState {
    metrics: ContainerMetrics,
    published: HashMap<ContainerName, PublishedSeries>,
}

impl<I: Inspector> Publisher<I> {
    pub fn new(
        inspector: I,
        metrics: ContainerMetrics,
        restart_window: Duration,
        runtime_timeout: Duration,
    ) -> Self {
        Self {
            inspector,
            restart_window,
            runtime_timeout,
            state: Mutex::new(PublishedState {
                metrics,
                published: HashMap::default(),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Content type of the bodies returned by [`Publisher::scrape`].
    pub fn format_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Queries the runtime and returns the refreshed exposition text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] or [`Error::RequestTimeout`] if the runtime could not
    /// be queried; the registry is left untouched in that case.
    pub async fn scrape(&self) -> Result<String> {
        self.scrape_with_clock(Utc::now).await
    }

    /// Like [`Publisher::scrape`], with `now` evaluated once the runtime has answered.
    pub(crate) async fn scrape_with_clock(
        &self,
        now: impl FnOnce() -> DateTime<Utc> + Send,
    ) -> Result<String> {
        let before = Instant::now();

        // The query runs outside the lock, so a hung runtime delays each scrape by at
        // most `runtime_timeout`.
        let snapshots =
            match tokio::time::timeout(self.runtime_timeout, self.inspector.list_containers())
                .await
            {
                Ok(snapshots) => snapshots?,
                Err(_) => return Err(Error::RequestTimeout(self.runtime_timeout)),
            };

        let body = {
            let mut state = self.state.lock().await;
            state.reconcile(&snapshots, now(), self.restart_window);
            state.metrics.encode()?
        };

        log::trace!(
            "scrape of {} containers took {} microseconds",
            snapshots.len(),
            before.elapsed().as_micros()
        );
        Ok(body)
    }
}

impl PublishedState {
    fn reconcile(
        &mut self,
        snapshots: &[ContainerSnapshot],
        now: DateTime<Utc>,
        window: Duration,
    ) {
        let mut current: HashMap<ContainerName, PublishedSeries> =
            HashMap::with_capacity(snapshots.len());

        for snapshot in snapshots {
            let name = snapshot.name.as_ref();
            let values = derive(snapshot, now, window);
            let status = snapshot.status.as_label();
            log::trace!(
                "container {} ({}): status={} {:?}",
                name,
                snapshot.id,
                status,
                values
            );

            let previous = current.get(name).or_else(|| self.published.get(name));
            if let Some(previous) = previous {
                if previous.status != status {
                    self.metrics.remove_status(name, &previous.status);
                }
                if previous.uptime && values.uptime_seconds.is_none() {
                    self.metrics.remove_uptime(name);
                }
            }

            self.metrics.set_status(name, status, values.running);
            self.metrics.set_restart_flag(name, values.restarted_recently);
            if let Some(uptime) = values.uptime_seconds {
                self.metrics.set_uptime(name, uptime);
            }

            current.insert(
                snapshot.name.clone(),
                PublishedSeries {
                    status: status.to_owned(),
                    uptime: values.uptime_seconds.is_some(),
                },
            );
        }

        let mut removed = 0;
        for (name, series) in &self.published {
            if current.contains_key(name) {
                continue;
            }
            self.metrics.remove_status(name.as_ref(), &series.status);
            self.metrics.remove_restart_flag(name.as_ref());
            if series.uptime {
                self.metrics.remove_uptime(name.as_ref());
            }
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Removed series of {} vanished containers", removed);
        }

        self.published = current;
    }
}
