use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use kitten_server::cli::Cli;
use kitten_server::http::{self, AppState};
use kitten_server::redis_store::RedisStore;
use kitten_server::store::{MemoryStore, Store};

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let store: Arc<dyn Store> = if cli.memory {
        info!("using in-process memory store");
        Arc::new(MemoryStore::new())
    } else {
        info!(url = %cli.redis_url, "connecting to redis");
        Arc::new(RedisStore::connect(&cli.redis_url).await?)
    };

    let app = http::router(AppState::new(store));
    let listener = TcpListener::bind(cli.listen).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = ?err, "failed to install ctrl-c handler");
    }
    info!("received shutdown signal");
}
