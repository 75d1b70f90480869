//! The service's route table.

use std::sync::Arc;

use http::StatusCode;

use crate::info::{self, Probe};
use crate::logging::AccessLogger;
use crate::middleware::AccessLog;
use crate::{Request, Router, health};

/// Builds the full application: both routes, their HEAD variants, and the
/// access log around all of it.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use hostinfo::{AccessLogger, HostProbe, Server, app};
///
/// # async fn run() -> Result<(), hostinfo::Error> {
/// let router = app(Arc::new(HostProbe), AccessLogger::stdout());
/// Server::bind(([0, 0, 0, 0], 8080).into()).serve(router).await
/// # }
/// ```
pub fn app(probe: Arc<dyn Probe>, logger: AccessLogger) -> Router {
    Router::new()
        .get("/", info::handler(probe))
        .head("/", head)
        .get("/health", health::liveness)
        .head("/health", head)
        .layer(AccessLog::new(logger))
}

// HEAD never consults the GET handler's lookups.
async fn head(_req: Request) -> StatusCode {
    StatusCode::OK
}
