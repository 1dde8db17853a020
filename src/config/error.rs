/// Errors that may occur while reading the configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value `{value}` for environment variable `{var}`: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("environment variable `{0}` is not valid unicode")]
    NotUnicode(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
