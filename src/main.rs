//! Tournament hub - chess session server
//!
//! Run with: `cargo run -- --bind 127.0.0.1:8000`

use anyhow::Context;
use backend::{api, config};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tournament-hub")]
#[command(about = "Chess rule engine behind an HTTP session API")]
struct Args {
    /// HTTP listen address, overrides CHESS_BIND_ADDR
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Wall-clock budget per game in seconds, overrides CHESS_GAME_DURATION_SECS
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    game_duration_secs: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut server_config = config::ServerConfig::from_env()?;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    if let Some(secs) = args.game_duration_secs {
        server_config.game_duration_secs = secs;
    }

    let app = api::router(&server_config);
    let listener = TcpListener::bind(server_config.bind_addr)
        .await
        .with_context(|| format!("binding {}", server_config.bind_addr))?;

    info!(
        "[SERVER] Chess API listening on {} (game duration {}s)",
        server_config.bind_addr, server_config.game_duration_secs
    );
    axum::serve(listener, app).await?;
    Ok(())
}
