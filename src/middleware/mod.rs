//! Middleware layer.
//!
//! A middleware receives the request together with a [`Next`] continuation
//! and decides what happens around the rest of the chain. Every request
//! passes through the full stack, including requests that end in the
//! router's not-found fallback.
//!
//! ```text
//! Router::layer(a).layer(b)
//!
//! request ─▶ a ─▶ b ─▶ handler
//! response ◀─ a ◀─ b ◀─┘
//! ```
//!
//! Built-in middleware:
//! - [`AccessLog`] — one structured record per request with client ip,
//!   method, path, status, latency and user agent

mod access_log;

use std::sync::Arc;

pub use access_log::AccessLog;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;

/// A request-processing stage composed around the terminal handler.
pub trait Middleware: Send + Sync + 'static {
    /// Handles `req`, usually by awaiting `next.run(req)` somewhere inside.
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of the chain: the middleware not yet run, then the handler.
pub struct Next {
    stack: Arc<[BoxedMiddleware]>,
    index: usize,
    handler: BoxedHandler,
}

impl Next {
    pub(crate) fn new(stack: Arc<[BoxedMiddleware]>, handler: BoxedHandler) -> Self {
        Self { stack, index: 0, handler }
    }

    /// Runs the rest of the chain to completion.
    pub fn run(self, req: Request) -> BoxFuture {
        match self.stack.get(self.index).cloned() {
            Some(middleware) => {
                let next = Next { index: self.index + 1, ..self };
                middleware.call(req, next)
            }
            None => self.handler.call(req),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::{HeaderMap, StatusCode};

    use super::*;
    use crate::handler::Handler;
    use crate::response::Response;

    struct Tag {
        name: &'static str,
        trail: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Tag {
        fn call(&self, req: Request, next: Next) -> BoxFuture {
            let name = self.name;
            let trail = Arc::clone(&self.trail);
            Box::pin(async move {
                trail.lock().unwrap().push(format!("{name}:before"));
                let res = next.run(req).await;
                trail.lock().unwrap().push(format!("{name}:after"));
                res
            })
        }
    }

    #[tokio::test]
    async fn runs_outermost_first_and_unwinds_in_reverse() {
        let trail = Arc::new(Mutex::new(Vec::new()));
        let stack: Arc<[BoxedMiddleware]> = Arc::from(vec![
            Arc::new(Tag { name: "a", trail: Arc::clone(&trail) }) as BoxedMiddleware,
            Arc::new(Tag { name: "b", trail: Arc::clone(&trail) }) as BoxedMiddleware,
        ]);
        let handler = (|_req: Request| async { StatusCode::ACCEPTED }).into_boxed_handler();
        let req = Request::new(
            http::Method::GET,
            "/",
            HeaderMap::new(),
            "127.0.0.1:1".parse().unwrap(),
        );

        let res: Response = Next::new(stack, handler).run(req).await;

        assert_eq!(res.status_code(), StatusCode::ACCEPTED);
        assert_eq!(
            *trail.lock().unwrap(),
            ["a:before", "b:before", "b:after", "a:after"]
        );
    }
}
