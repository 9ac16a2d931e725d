use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

mod api;
mod config;
mod error;
mod portraits;
mod randomizer;
mod service;

use crate::config::ServiceConfig;
use crate::service::RandomizerService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_logging();

    info!(
        "Starting team randomizer service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = ServiceConfig::load()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    if !config.assets.portrait_dir.is_dir() {
        tracing::warn!(
            path = %config.assets.portrait_dir.display(),
            "Portrait directory missing, lobbies will be shown without portraits"
        );
    }

    let service = Arc::new(RandomizerService::new(&config));
    let app = api::router(service);

    // Start the server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("team_randomizer_service=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(format))
        .with(filter)
        .init();
}
