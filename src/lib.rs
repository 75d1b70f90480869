//! # hostinfo
//!
//! A tiny HTTP service that tells you where it is running.
//!
//! | Method | Path      | Response                                   |
//! |--------|-----------|--------------------------------------------|
//! | GET    | `/`       | plain-text host report (see [`info`])      |
//! | HEAD   | `/`       | `200`, empty body                          |
//! | GET    | `/health` | `200 {"status":"Healthy"}`                 |
//! | HEAD   | `/health` | `200`, empty body                          |
//!
//! Anything else is a `404`. Every request, matched or not, produces one
//! JSON access-log line on stdout:
//!
//! ```text
//! {"level":"INFO","message":"HTTP request","client_ip":"10.244.0.1",
//!  "timestamp":"2024-05-01T10:00:00+02:00","method":"GET","path":"/health",
//!  "status":200,"latency":"41.3µs","user_agent":"kube-probe/1.29"}
//! ```
//!
//! ## Pieces
//!
//! - [`Router`] — radix-tree routing via [`matchit`], one tree per method,
//!   wrapped in a [`middleware`] stack
//! - [`middleware::AccessLog`] — the access log, writing through an explicit
//!   [`AccessLogger`]
//! - [`Server`] — hyper on tokio, graceful shutdown on SIGTERM / Ctrl-C
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostinfo::{AccessLogger, HostProbe, Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hostinfo::Error> {
//!     let router = app(Arc::new(HostProbe), AccessLogger::stdout());
//!     Server::bind(([0, 0, 0, 0], 8080).into()).serve(router).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod info;
pub mod logging;
pub mod middleware;

pub use app::app;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use http::StatusCode;
pub use info::{HostProbe, Probe};
pub use logging::{AccessLogger, AccessRecord};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
