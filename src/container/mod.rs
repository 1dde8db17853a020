use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

mod error;
mod timestamp;

pub use error::{Error, Result};
pub use timestamp::parse_timestamp;

/// The maximum allowed length for a [`ContainerName`].
const CONTAINER_NAME_MAX_LEN: usize = 255;

/// A validated container name, used as the `name` label of every published series.
///
/// Runtimes report names with a leading `/` (e.g. `/web`); it is stripped.
///
/// # Examples
///
/// ```
/// # use container_exporter::container::ContainerName;
/// let name = ContainerName::new("/web").unwrap();
/// assert_eq!(name.as_ref(), "web");
/// assert!(ContainerName::new("/").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerName(Arc<str>);

impl ContainerName {
    /// Creates a new `ContainerName` from the given raw name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerName`] if the name is empty after stripping the
    /// leading `/`, or if it exceeds [`CONTAINER_NAME_MAX_LEN`].
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        let name = src.strip_prefix('/').unwrap_or(src);
        if name.is_empty() || name.len() > CONTAINER_NAME_MAX_LEN {
            return Err(Error::InvalidContainerName(src.to_owned()));
        }

        Ok(Self(name.into()))
    }
}

impl AsRef<str> for ContainerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Restarting,
    /// Any other runtime status (`created`, `removing`, `dead`, ...), kept verbatim.
    Other(String),
}

impl ContainerStatus {
    /// Returns the value used for the `status` label.
    pub fn as_label(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Exited => "exited",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Other(status) => status.as_str(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl From<&str> for ContainerStatus {
    fn from(value: &str) -> Self {
        match value {
            "running" => Self::Running,
            "exited" => Self::Exited,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "" => Self::Other("unknown".to_owned()),
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// State of one container as observed during a single scrape.
///
/// Timestamps are `None` when the runtime reports the zero value (never started or
/// never exited) or when they could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: ContainerName,
    pub status: ContainerStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_name_strips_leading_slash() {
        assert_eq!(ContainerName::new("/db").unwrap().as_ref(), "db");
        assert_eq!(ContainerName::new("db").unwrap().as_ref(), "db");
        // only the first one
        assert_eq!(ContainerName::new("//db").unwrap().as_ref(), "/db");
    }

    #[test]
    fn test_container_name_rejects_empty_and_oversized() {
        assert!(matches!(
            ContainerName::new(""),
            Err(Error::InvalidContainerName(_))
        ));
        let long = "a".repeat(CONTAINER_NAME_MAX_LEN + 1);
        assert!(ContainerName::new(&long).is_err());
        assert!(ContainerName::new(&long[1..]).is_ok());
    }

    #[test]
    fn test_status_from_runtime_string() {
        assert_eq!(ContainerStatus::from("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::from("exited"), ContainerStatus::Exited);
        assert_eq!(ContainerStatus::from("paused"), ContainerStatus::Paused);
        assert_eq!(
            ContainerStatus::from("restarting"),
            ContainerStatus::Restarting
        );
        assert_eq!(
            ContainerStatus::from("dead"),
            ContainerStatus::Other("dead".to_owned())
        );
        assert_eq!(ContainerStatus::from("").as_label(), "unknown");
    }

    #[test]
    fn test_only_running_is_running() {
        assert!(ContainerStatus::Running.is_running());
        assert!(!ContainerStatus::Restarting.is_running());
        assert!(!ContainerStatus::Other("running ".to_owned()).is_running());
    }
}
