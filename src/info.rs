//! Host information report served on `GET /`.
//!
//! ```text
//! Rust APP Demo
//! =================
//! SystemTime : 2024-05-01 10:00:00
//! HostName   : web-7f9c
//! IPAddress  : 10.0.3.17
//! ClientIP   : 203.0.113.7
//! ImageVersion: v1.4.2
//! AppName : hostinfo
//! ```
//!
//! Each value is looked up independently and replaced by a placeholder when
//! the lookup fails, so the report itself never fails. Lookups are blocking
//! system calls made inline on the request task, with no timeout.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::handler::Handler;
use crate::request::Request;

/// Environment variable carrying the deployed image version.
pub const IMAGE_VERSION_VAR: &str = "imgVer";

const UNKNOWN: &str = "unknown";
const NOT_SET: &str = "not set";

/// Source of the host facts in the report.
///
/// [`HostProbe`] asks the operating system; tests substitute fakes.
pub trait Probe: Send + Sync + 'static {
    fn hostname(&self) -> io::Result<String>;

    /// Addresses of every local interface, in enumeration order.
    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>>;

    fn env_var(&self, key: &str) -> Option<String>;

    /// The path the process was started with (`argv[0]`).
    fn program(&self) -> Option<String>;
}

/// The real operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostProbe;

impl Probe for HostProbe {
    fn hostname(&self) -> io::Result<String> {
        hostname::get().map(|name| name.to_string_lossy().into_owned())
    }

    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(if_addrs::get_if_addrs()?.into_iter().map(|iface| iface.ip()).collect())
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn program(&self) -> Option<String> {
        std::env::args_os().next().map(|arg| arg.to_string_lossy().into_owned())
    }
}

/// The rendered values of one report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    pub system_time: String,
    pub host_name: String,
    pub ip_address: String,
    pub client_ip: String,
    pub image_version: String,
    pub app_name: String,
}

impl SystemInfo {
    pub fn gather(probe: &dyn Probe, client_ip: String, now: DateTime<Local>) -> Self {
        let host_name = probe.hostname().unwrap_or_else(|e| {
            debug!(error = %e, "hostname lookup failed");
            UNKNOWN.to_owned()
        });

        let ip_address = match probe.interface_addrs() {
            Ok(addrs) => first_ipv4(&addrs).map_or_else(|| UNKNOWN.to_owned(), |ip| ip.to_string()),
            Err(e) => {
                debug!(error = %e, "interface enumeration failed");
                UNKNOWN.to_owned()
            }
        };

        let image_version = probe
            .env_var(IMAGE_VERSION_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| NOT_SET.to_owned());

        Self {
            system_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            host_name,
            ip_address,
            client_ip,
            image_version,
            app_name: app_name(probe.program().as_deref()),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Rust APP Demo\n\
             =================\n\
             SystemTime : {}\n\
             HostName   : {}\n\
             IPAddress  : {}\n\
             ClientIP   : {}\n\
             ImageVersion: {}\n\
             AppName : {}\n",
            self.system_time,
            self.host_name,
            self.ip_address,
            self.client_ip,
            self.image_version,
            self.app_name,
        )
    }
}

/// First non-loopback IPv4 address, in the order given.
///
/// IPv4-mapped IPv6 addresses count as IPv4. On multi-homed hosts the
/// answer depends on the operating system's enumeration order.
pub fn first_ipv4(addrs: &[IpAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find_map(|addr| {
        let v4 = match addr {
            IpAddr::V4(v4) => *v4,
            IpAddr::V6(v6) => v6.to_ipv4_mapped()?,
        };
        (!v4.is_loopback()).then_some(v4)
    })
}

fn app_name(program: Option<&str>) -> String {
    program
        .and_then(|p| Path::new(p).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

/// `GET /` backed by `probe`.
pub fn handler(probe: Arc<dyn Probe>) -> impl Handler {
    move |req: Request| {
        let probe = Arc::clone(&probe);
        async move { SystemInfo::gather(probe.as_ref(), req.client_ip(), Local::now()).render() }
    }
}
