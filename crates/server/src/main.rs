//! HTTP server for the movie messages service.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{AppState, CatalogArgs, MessageOrchestrator, UpstreamArgs};
use upstream::MovieDataFetcher;

#[derive(Parser)]
#[command(name = "movie-messages-server")]
#[command(about = "Serve catalog messages filled in with movie facts", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "MOVIE_MESSAGES_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    #[arg(long, env = "MOVIE_MESSAGES_PORT", default_value_t = 5000)]
    port: u16,

    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting movie messages server");

    let catalog = cli.catalog.load()?;
    let fetcher = MovieDataFetcher::new(cli.upstream.to_config()?)
        .context("Failed to create movie API client")?;
    info!("Using movie API at {}", cli.upstream.api_base);

    let orchestrator = MessageOrchestrator::new(Arc::new(fetcher), catalog);
    let state = AppState::new(orchestrator)?;

    server::serve(SocketAddr::new(cli.bind, cli.port), state).await
}
