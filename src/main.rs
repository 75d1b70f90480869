use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use hostinfo::{AccessLogger, HostProbe, Server, app};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "hostinfo", version, about = "Reports host information and liveness over HTTP")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Log level for service logs; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    let router = app(Arc::new(HostProbe), AccessLogger::stdout());

    info!(version = env!("CARGO_PKG_VERSION"), addr = %cli.listen, "starting server");

    match Server::bind(cli.listen).serve(router).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "couldn't listen");
            ExitCode::FAILURE
        }
    }
}
