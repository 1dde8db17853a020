use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to register metric: {0}")]
    Register(#[source] prometheus::Error),
    #[error(transparent)]
    Runtime(#[from] crate::runtime::Error),
    #[error("container runtime did not respond within {0:?}")]
    RequestTimeout(Duration),
    #[error("failed to encode metrics: {0}")]
    Encode(#[source] prometheus::Error),
}

impl Error {
    /// Returns true if the scrape failed because the runtime could not be reached in time.
    pub fn is_runtime_unavailable(&self) -> bool {
        matches!(self, Self::Runtime(_) | Self::RequestTimeout(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
