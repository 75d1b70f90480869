//! End-to-end tests over a real socket.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

use hostinfo::{AccessLogger, Probe, Server, app};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct StaticProbe;

impl Probe for StaticProbe {
    fn hostname(&self) -> io::Result<String> {
        Ok("e2e-host".into())
    }

    fn interface_addrs(&self) -> io::Result<Vec<IpAddr>> {
        Ok(vec!["127.0.0.1".parse().unwrap(), "172.17.0.2".parse().unwrap()])
    }

    fn env_var(&self, _key: &str) -> Option<String> {
        Some("sha-abc123".into())
    }

    fn program(&self) -> Option<String> {
        Some("/app/hostinfo".into())
    }
}

#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl io::Write for Sink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink {
    fn records(&self) -> Vec<serde_json::Value> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

struct Running {
    addr: SocketAddr,
    sink: Sink,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), hostinfo::Error>>,
}

async fn start() -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let sink = Sink::default();
    let writer = sink.clone();
    let router = app(Arc::new(StaticProbe), AccessLogger::with_writer(move || writer.clone()));
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(Server::from_listener(listener).serve_with_shutdown(router, async {
        let _ = stopped.await;
    }));

    Running { addr, sink, stop, handle }
}

struct Reply {
    status: u16,
    head: String,
    body: Vec<u8>,
}

async fn send(addr: SocketAddr, method: &str, path: &str, extra: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nUser-Agent: e2e/1.0\r\n{extra}Connection: close\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8(raw[..split].to_vec()).unwrap();
    let body = raw[split + 4..].to_vec();
    let status = head.split(' ').nth(1).unwrap().parse().unwrap();
    Reply { status, head, body }
}

#[tokio::test]
async fn serves_routes_and_logs_each_request() {
    let server = start().await;

    let root = send(server.addr, "GET", "/", "").await;
    assert_eq!(root.status, 200);
    assert!(root.head.to_ascii_lowercase().contains("content-type: text/plain; charset=utf-8"));
    let body = String::from_utf8(root.body).unwrap();
    assert!(body.contains("HostName   : e2e-host\n"), "{body}");
    assert!(body.contains("IPAddress  : 172.17.0.2\n"), "{body}");
    assert!(body.contains("ClientIP   : 127.0.0.1\n"), "{body}");
    assert!(body.contains("ImageVersion: sha-abc123\n"), "{body}");
    assert!(body.contains("AppName : hostinfo\n"), "{body}");

    let health = send(server.addr, "GET", "/health", "").await;
    assert_eq!(health.status, 200);
    assert!(health.head.to_ascii_lowercase().contains("content-type: application/json; charset=utf-8"));
    assert_eq!(health.body, br#"{"status":"Healthy"}"#);

    for path in ["/", "/health"] {
        let head = send(server.addr, "HEAD", path, "").await;
        assert_eq!(head.status, 200, "HEAD {path}");
        assert!(head.body.is_empty(), "HEAD {path}");
    }

    let missing = send(server.addr, "GET", "/missing", "").await;
    assert_eq!(missing.status, 404);

    let records = server.sink.records();
    let statuses: Vec<_> = records.iter().map(|r| r["status"].as_u64().unwrap()).collect();
    assert_eq!(statuses, [200, 200, 200, 200, 404]);
    for record in &records {
        assert_eq!(record["client_ip"], "127.0.0.1");
        assert_eq!(record["user_agent"], "e2e/1.0");
    }

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn forwarded_client_ip_reaches_report_and_log() {
    let server = start().await;

    let reply = send(server.addr, "GET", "/", "X-Forwarded-For: 203.0.113.50, 10.0.0.1\r\n").await;
    let body = String::from_utf8(reply.body).unwrap();
    assert!(body.contains("ClientIP   : 203.0.113.50\n"), "{body}");

    let records = server.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["client_ip"], "203.0.113.50");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}
