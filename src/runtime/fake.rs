use std::sync::Mutex;
use std::time::Duration;

use crate::container::ContainerSnapshot;

use super::{Error, Inspector, Result};

/// In-memory [`Inspector`] for tests.
///
/// Returns the containers last passed to [`FakeInspector::set`], or
/// [`Error::RuntimeUnavailable`] while set to `None`.
#[derive(Debug, Default)]
pub(crate) struct FakeInspector {
    containers: Mutex<Option<Vec<ContainerSnapshot>>>,
    delay: Option<Duration>,
}

impl FakeInspector {
    pub(crate) fn with(containers: Vec<ContainerSnapshot>) -> Self {
        let inspector = Self::default();
        inspector.set(Some(containers));
        inspector
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set(&self, containers: Option<Vec<ContainerSnapshot>>) {
        *self.containers.lock().unwrap() = containers;
    }
}

impl Inspector for FakeInspector {
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        tokio::task::yield_now().await;
        let containers = self.containers.lock().unwrap().clone();
        containers.ok_or_else(|| {
            Error::RuntimeUnavailable(bollard::errors::Error::DockerResponseServerError {
                status_code: 500,
                message: "daemon down".to_owned(),
            })
        })
    }
}
