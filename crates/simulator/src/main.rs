//! `vitals-simulator` -- synthetic device feed for demos.
//!
//! Generates random health readings for a set of device ids and pushes them
//! to the ingestion API on a fixed interval until Ctrl-C. Configuration is
//! read from the environment; see [`SimulatorConfig::from_env`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals_simulator::config::SimulatorConfig;
use vitals_simulator::sender::{self, IngestClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitals_simulator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulatorConfig::from_env();

    let client = IngestClient::new(&config.api_url).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(
        api_url = %config.api_url,
        devices = config.device_ids.len(),
        interval_secs = config.interval.as_secs(),
        batch_size = config.batch_size,
        anomaly_rate = config.anomaly_rate,
        "Starting vitals-simulator",
    );

    sender::run(&config, &client).await;
}
