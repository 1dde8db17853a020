#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid container name: {0:?}")]
    InvalidContainerName(String),
    #[error("failed to parse timestamp `{value}`: {source}")]
    TimestampParseFailed {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
pub type Result<T> = std::result::Result<T, Error>;
