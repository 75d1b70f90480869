//! Incoming HTTP request type.

use std::net::{IpAddr, SocketAddr};

use http::HeaderMap;
use http::header::USER_AGENT;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// An incoming HTTP request: the request head plus the peer address.
///
/// The body is never read; no route in this service consumes one.
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) remote_addr: SocketAddr,
}

impl Request {
    pub(crate) fn new(
        method: http::Method,
        path: impl Into<String>,
        headers: HeaderMap,
        remote_addr: SocketAddr,
    ) -> Self {
        Self { method, path: path.into(), headers, remote_addr }
    }

    pub(crate) fn from_parts(parts: http::request::Parts, remote_addr: SocketAddr) -> Self {
        Self::new(parts.method, parts.uri.path(), parts.headers, remote_addr)
    }

    /// The method as sent on the wire, including extension methods.
    pub fn method(&self) -> &str { self.method.as_str() }
    pub fn path(&self) -> &str { &self.path }

    /// Header lookup. `HeaderMap` names are case-insensitive.
    /// Values that are not visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `User-Agent` header, or an empty string when absent.
    pub fn user_agent(&self) -> &str {
        self.headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// The address of the client as seen through any fronting proxies.
    ///
    /// Every proxy is trusted. `X-Forwarded-For` is walked from the right;
    /// if every hop parses, the left-most one is returned as written. A hop
    /// that fails to parse voids the whole header. `X-Real-IP` is checked the
    /// same way, and the peer address is the last resort.
    pub fn client_ip(&self) -> String {
        self.header(X_FORWARDED_FOR)
            .and_then(forwarded_client)
            .or_else(|| self.header(X_REAL_IP).and_then(forwarded_client))
            .map(str::to_owned)
            .unwrap_or_else(|| self.remote_addr.ip().to_canonical().to_string())
    }
}

fn forwarded_client(value: &str) -> Option<&str> {
    let mut client = None;
    for hop in value.split(',').rev() {
        let hop = hop.trim();
        hop.parse::<IpAddr>().ok()?;
        client = Some(hop);
    }
    client
}
