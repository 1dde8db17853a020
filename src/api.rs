use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::error::{Error, Result};
use crate::metrics::Publisher;
use crate::runtime::Inspector;

pub const METRICS_PATH: &str = "/metrics";

async fn scrape_metrics<I>(State(publisher): State<Arc<Publisher<I>>>) -> Response
where
    I: Inspector + Send + Sync + 'static,
{
    match publisher.scrape().await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, publisher.format_type())],
            body,
        )
            .into_response(),
        Err(err) if err.is_runtime_unavailable() => {
            log::error!("Failed to scrape containers: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response()
        }
        Err(err) => {
            log::error!("Failed to render metrics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to render metrics",
            )
                .into_response()
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new<I>(publisher: Arc<Publisher<I>>) -> Self
    where
        I: Inspector + Send + Sync + 'static,
    {
        let router = axum::Router::new()
            .route(METRICS_PATH, get(scrape_metrics::<I>))
            .fallback(not_found)
            .with_state(publisher);
        Self { router }
    }

    /// Serves the metrics endpoint on `addr` until `shutdown` resolves.
    pub async fn listen(
        self,
        addr: SocketAddr,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        log::info!("Serving metrics on http://{}{}", addr, METRICS_PATH);
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Error::Serve)
    }
}
