//! Derivation and exposition of per-container health gauges.
//!
//! [`Publisher`] runs one scrape: it asks an [`Inspector`](crate::runtime::Inspector) for the
//! current containers, derives the gauge values, reconciles the [`ContainerMetrics`]
//! registry against the containers it saw and encodes the result in the Prometheus text
//! format.
mod error;
mod gauges;
mod health;
mod publisher;

pub use error::{Error, Result};
pub use gauges::{ContainerMetrics, RESTART_FLAG_METRIC, STATUS_METRIC, UPTIME_METRIC};
pub use health::{DerivedValues, derive, exited_within, uptime_seconds};
pub use publisher::Publisher;
