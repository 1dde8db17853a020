use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::container::ContainerSnapshot;

/// Health signals derived from one [`ContainerSnapshot`] at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedValues {
    pub running: bool,
    pub restarted_recently: bool,
    /// `None` if the start time is unknown; the uptime series is then omitted.
    pub uptime_seconds: Option<f64>,
}

pub fn derive(
    snapshot: &ContainerSnapshot,
    now: DateTime<Utc>,
    window: Duration,
) -> DerivedValues {
    DerivedValues {
        running: snapshot.status.is_running(),
        restarted_recently: exited_within(snapshot.finished_at, now, window),
        uptime_seconds: uptime_seconds(snapshot.started_at, now),
    }
}

/// Returns true if `finished_at` lies less than `window` before `now`.
///
/// A container that never exited (`None`) is never reported. An exit time ahead of
/// `now` counts as zero elapsed time.
pub fn exited_within(
    finished_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    let Some(finished_at) = finished_at else {
        return false;
    };
    let elapsed = (now - finished_at).to_std().unwrap_or(Duration::ZERO);
    elapsed < window
}

/// Seconds between `started_at` and `now`, clamped to zero.
pub fn uptime_seconds(started_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    let started_at = started_at?;
    Some(
        (now - started_at)
            .to_std()
            .map(|uptime| uptime.as_secs_f64())
            .unwrap_or(0.0),
    )
}
