//! Sailing efficiency monitor.
//!
//! Usage: `korri-efficiency [CONFIG.json]`. Log verbosity follows `RUST_LOG`
//! (default `info`).
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use korri_efficiency::config::MonitorConfig;
use korri_efficiency::feed::TcpFeedConnector;
use korri_efficiency::monitor::EfficiencyMonitor;
use korri_efficiency::performance::polar::BoatPerformance;
use korri_efficiency::protocol::gateway::open_serial;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => MonitorConfig::from_file(&path)
            .with_context(|| format!("loading configuration {}", path.to_string_lossy()))?,
        None => MonitorConfig::default(),
    };

    let performance = BoatPerformance::sister_ship().context("building the polar model")?;
    info!(
        window_secs = config.averaging_window_secs,
        interval_secs = config.transmit_interval_secs,
        source_address = config.source_address,
        "sailing efficiency monitor starting (sister-ship polar)"
    );

    let gateway = match open_serial(&config.gateway_port).await {
        Ok(gateway) => Some(gateway),
        Err(e) => {
            warn!(port = %config.gateway_port, error = %e, "gateway unavailable");
            None
        }
    };

    let connector = TcpFeedConnector::new(config.feed_address.clone());
    let monitor = EfficiencyMonitor::new(config, performance);

    let shutdown = monitor.shutdown_flag();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutting down");
                shutdown.request();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    monitor
        .run(connector, gateway)
        .await
        .context("monitor task failed")?;
    Ok(())
}
