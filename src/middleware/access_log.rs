use std::time::Instant;

use chrono::{Local, SecondsFormat};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::logging::{AccessLogger, AccessRecord};
use crate::request::Request;

/// Emits one [`AccessRecord`] per request once the inner chain has produced
/// its response, so the logged status is the one the client receives.
#[derive(Clone, Debug)]
pub struct AccessLog {
    logger: AccessLogger,
}

impl AccessLog {
    pub fn new(logger: AccessLogger) -> Self {
        Self { logger }
    }
}

impl Middleware for AccessLog {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let logger = self.logger.clone();
        Box::pin(async move {
            let client_ip = req.client_ip();
            let method = req.method().to_owned();
            let path = req.path().to_owned();
            let user_agent = req.user_agent().to_owned();

            let started_at = Local::now();
            let start = Instant::now();
            let res = next.run(req).await;
            let latency = start.elapsed();

            logger.record(&AccessRecord {
                client_ip,
                timestamp: started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                method,
                path,
                status: res.status_code().as_u16(),
                latency,
                user_agent,
            });
            res
        })
    }
}
