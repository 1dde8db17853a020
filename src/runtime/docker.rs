use std::path::Path;
use std::time::Duration;

use bollard::Docker;
use bollard::models::{ContainerInspectResponse, ContainerStateStatusEnum, ContainerSummary};
use bollard::query_parameters::{
    InspectContainerOptions, InspectContainerOptionsBuilder, ListContainersOptions,
    ListContainersOptionsBuilder,
};

use crate::container::{self, ContainerName, ContainerSnapshot, ContainerStatus};
use crate::error::ResultLogExt;

use super::{Error, Inspector, Result};

/// [`Inspector`] backed by the Docker Engine API.
#[derive(Debug, Clone)]
pub struct DockerInspector {
    docker: Docker,
    include_stopped: bool,
}

impl DockerInspector {
    /// Creates a client for the Docker daemon.
    ///
    /// With `socket` set, connects to that unix socket; otherwise uses the client's local
    /// defaults (which honour `DOCKER_HOST`). No request is sent yet, so an unreachable
    /// daemon only surfaces on the first [`Inspector::list_containers`] call.
    ///
    /// `include_stopped` selects whether exited and created containers are listed
    /// alongside running ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] if the client cannot be configured for the endpoint.
    pub fn connect(
        socket: Option<&Path>,
        timeout: Duration,
        include_stopped: bool,
    ) -> Result<Self> {
        let docker = match socket {
            Some(path) => {
                log::debug!("Connecting to {}...", path.display());
                Docker::connect_with_unix(
                    &path.to_string_lossy(),
                    timeout.as_secs().max(1),
                    bollard::API_DEFAULT_VERSION,
                )
                .map_err(|source| Error::Connect {
                    endpoint: path.display().to_string(),
                    source,
                })?
            }
            None => {
                log::debug!("Connecting to docker with local defaults...");
                Docker::connect_with_local_defaults().map_err(|source| Error::Connect {
                    endpoint: "local defaults".to_owned(),
                    source,
                })?
            }
        };

        Ok(Self {
            docker: docker.with_timeout(timeout),
            include_stopped,
        })
    }

    async fn inspect(&self, id: &str) -> Result<ContainerInspectResponse> {
        let options: InspectContainerOptions = InspectContainerOptionsBuilder::new().build();
        self.docker
            .inspect_container(id, Some(options))
            .await
            .map_err(|source| Error::ContainerQueryFailed {
                id: id.to_owned(),
                source,
            })
    }
}

impl Inspector for DockerInspector {
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>> {
        let options: ListContainersOptions = ListContainersOptionsBuilder::new()
            .all(self.include_stopped)
            .build();
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(Error::RuntimeUnavailable)?;
        log::debug!("Found {} containers", summaries.len());

        Ok(collect_snapshots(summaries, |id| async move { self.inspect(&id).await }).await)
    }
}

/// Inspects every listed container and keeps those that yield a snapshot.
///
/// A container that fails to inspect (it may have been removed since it was listed)
/// is logged and skipped.
async fn collect_snapshots<F, Fut>(
    summaries: Vec<ContainerSummary>,
    mut inspect: F,
) -> Vec<ContainerSnapshot>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ContainerInspectResponse>>,
{
    let mut snapshots = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let Some(id) = summary.id else {
            log::warn!("Skipping container without id: names={:?}", summary.names);
            continue;
        };
        let Some(response) = inspect(id.clone()).await.ok_log() else {
            continue;
        };
        if let Some(snapshot) = snapshot_from_inspect(&id, response) {
            snapshots.push(snapshot);
        }
    }
    snapshots
}

/// Extracts the fields the exporter derives its metrics from.
///
/// Returns `None` (after logging) if the container has no usable name. Unparseable
/// timestamps are logged and left empty.
fn snapshot_from_inspect(
    id: &str,
    response: ContainerInspectResponse,
) -> Option<ContainerSnapshot> {
    let name = ContainerName::new(response.name.as_deref().unwrap_or_default())
        .inspect_err(|err| log::warn!("Skipping container `{}`: {}", id, err))
        .ok()?;

    let state = response.state.unwrap_or_default();
    let status = state
        .status
        .map(ContainerStatus::from)
        .unwrap_or_else(|| ContainerStatus::Other("unknown".to_owned()));

    let started_at = state
        .started_at
        .as_deref()
        .and_then(|ts| container::parse_timestamp(ts).ok_log().flatten());
    let finished_at = state
        .finished_at
        .as_deref()
        .and_then(|ts| container::parse_timestamp(ts).ok_log().flatten());

    Some(ContainerSnapshot {
        id: id.to_owned(),
        name,
        status,
        started_at,
        finished_at,
    })
}

impl From<ContainerStateStatusEnum> for ContainerStatus {
    fn from(status: ContainerStateStatusEnum) -> Self {
        match status {
            ContainerStateStatusEnum::RUNNING => Self::Running,
            ContainerStateStatusEnum::EXITED => Self::Exited,
            ContainerStateStatusEnum::PAUSED => Self::Paused,
            ContainerStateStatusEnum::RESTARTING => Self::Restarting,
            ContainerStateStatusEnum::CREATED => Self::Other("created".to_owned()),
            ContainerStateStatusEnum::REMOVING => Self::Other("removing".to_owned()),
            ContainerStateStatusEnum::DEAD => Self::Other("dead".to_owned()),
            ContainerStateStatusEnum::EMPTY => Self::Other("unknown".to_owned()),
        }
    }
}
