//! Burn-stats exporter binary
//!
//! Wires the refresh pipeline to the metrics endpoint: configuration from
//! the environment, one scheduler task, one HTTP server, graceful shutdown
//! on SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use burn_stats_exporter::server::{self, AppState};
use burn_stats_exporter::{
    Config, GaugeSet, JsonRpcChainReader, Scheduler, StatsAggregator, TickerClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let gauges = Arc::new(GaugeSet::new()?);
    let chain = Arc::new(JsonRpcChainReader::new(&config)?);
    let price = Arc::new(TickerClient::new(&config)?);
    let aggregator = StatsAggregator::new(chain, price);
    let scheduler = Scheduler::new(aggregator, gauges.clone(), config.refresh_interval);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx.clone()));

    tokio::spawn(async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let app = server::build_router(AppState { gauges });
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "burn-stats exporter listening");

    let mut server_shutdown = shutdown_rx;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_shutdown.changed().await;
        })
        .await?;

    scheduler_task.await?;
    tracing::info!("shutdown complete");

    Ok(())
}
