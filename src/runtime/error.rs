/// Errors raised while querying the container runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to container runtime at `{endpoint}`: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: bollard::errors::Error,
    },
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(#[source] bollard::errors::Error),
    #[error("failed to query container `{id}`: {source}")]
    ContainerQueryFailed {
        id: String,
        #[source]
        source: bollard::errors::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
