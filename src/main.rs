use anyhow::Context;
use clap::Parser;
use log::{error, info};
use slidepress::cdp::CdpLauncher;
use slidepress::server::{self, AppState};
use slidepress::ServerConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Also installs the `log` bridge so library records reach the subscriber.
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to install log subscriber: {}", e);
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let launcher = CdpLauncher {
        chrome_path: config.chrome_path.clone(),
        sandbox: config.sandbox,
    };
    let state = AppState::from_config(Arc::new(launcher), &config);
    let app = server::router(state, config.max_body_bytes);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "Server running on http://{} (max {} browser sessions)",
        listener.local_addr()?,
        config.max_sessions
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    init_logging();

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
