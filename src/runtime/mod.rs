//! Read-only access to the container runtime.
//!
//! An [`Inspector`] lists the containers currently visible to the runtime and turns their
//! raw state into [`ContainerSnapshot`]s. [`DockerInspector`] talks to the Docker Engine
//! API through `bollard`.
mod docker;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use docker::DockerInspector;
pub use error::{Error, Result};

use crate::container::ContainerSnapshot;

pub trait Inspector {
    /// Lists the containers visible to the runtime.
    ///
    /// Containers that cannot be inspected individually are skipped. Only a failure to
    /// reach the runtime at all is returned as [`Error::RuntimeUnavailable`].
    fn list_containers(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ContainerSnapshot>>> + Send;
}
