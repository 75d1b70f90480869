//! Liveness check.
//!
//! | Method | Path      | Response                    |
//! |--------|-----------|-----------------------------|
//! | GET    | `/health` | `200 {"status":"Healthy"}`  |
//! | HEAD   | `/health` | `200`, empty body           |
//!
//! If the process can answer HTTP at all it is alive, so neither handler
//! checks any dependency.

use crate::{Request, Response};

const HEALTHY: &[u8] = br#"{"status":"Healthy"}"#;

/// `GET /health`.
pub async fn liveness(_req: Request) -> Response {
    Response::json(HEALTHY.to_vec())
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use http::{HeaderMap, StatusCode};

    use super::*;

    #[tokio::test]
    async fn reports_healthy_as_json() {
        let req = Request::new(
            http::Method::GET,
            "/health",
            HeaderMap::new(),
            "127.0.0.1:1".parse().unwrap(),
        );
        let res = liveness(req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json; charset=utf-8");
        let report: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(report, serde_json::json!({ "status": "Healthy" }));
    }
}
