//! HTTP client for the ingestion API and the periodic push loop.

use std::time::Duration;

use serde::Deserialize;

use crate::config::SimulatorConfig;
use crate::generator::{generate_batch, SimulatedReading};

/// HTTP request timeout for a single push.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The underlying HTTP request failed (network, DNS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

/// Anomaly verdict echoed by `POST /ingest`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnomalyFlag {
    pub detected: bool,
    #[serde(default)]
    pub severity: Option<String>,
}

/// Subset of the `POST /ingest` response the simulator reports on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleAck {
    pub anomaly: AnomalyFlag,
}

/// Subset of the `POST /ingest/batch` response the simulator reports on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchAck {
    pub inserted: usize,
    pub anomalies_detected: usize,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Posts generated readings to the ingestion endpoints.
pub struct IngestClient {
    client: reqwest::Client,
    base_url: String,
}

impl IngestClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Result<Self, SendError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST one reading to `/ingest`.
    pub async fn send_one(&self, reading: &SimulatedReading) -> Result<SingleAck, SendError> {
        let response = self
            .client
            .post(self.endpoint("ingest"))
            .json(reading)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// POST several readings to `/ingest/batch`.
    pub async fn send_batch(&self, readings: &[SimulatedReading]) -> Result<BatchAck, SendError> {
        let response = self
            .client
            .post(self.endpoint("ingest/batch"))
            .json(&serde_json::json!({ "metrics": readings }))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SendError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

// ---------------------------------------------------------------------------
// Push loop
// ---------------------------------------------------------------------------

/// Generate and push readings every `config.interval` until Ctrl-C.
///
/// Failed pushes are logged and the loop carries on with the next tick.
pub async fn run(config: &SimulatorConfig, client: &IngestClient) {
    let mut ticker = tokio::time::interval(config.interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => push_once(config, client).await,
            _ = &mut shutdown => {
                tracing::info!("Received Ctrl-C, stopping simulator");
                break;
            }
        }
    }
}

/// Generate one tick's worth of readings and push them.
pub async fn push_once(config: &SimulatorConfig, client: &IngestClient) {
    let readings = generate_batch(
        &mut rand::rng(),
        &config.device_ids,
        config.batch_size,
        config.anomaly_rate,
    );

    match readings.as_slice() {
        [] => {}
        [reading] => match client.send_one(reading).await {
            Ok(ack) if ack.anomaly.detected => tracing::warn!(
                device_id = %reading.device_id,
                metric_type = %reading.metric_type,
                value = reading.value,
                severity = ack.anomaly.severity.as_deref().unwrap_or("unknown"),
                "Sent reading, anomaly detected",
            ),
            Ok(_) => tracing::info!(
                device_id = %reading.device_id,
                metric_type = %reading.metric_type,
                value = reading.value,
                "Sent reading",
            ),
            Err(e) => tracing::error!(error = %e, "Failed to send reading"),
        },
        batch => match client.send_batch(batch).await {
            Ok(ack) => tracing::info!(
                inserted = ack.inserted,
                anomalies_detected = ack.anomalies_detected,
                "Sent batch",
            ),
            Err(e) => tracing::error!(error = %e, size = batch.len(), "Failed to send batch"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let client = IngestClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.endpoint("ingest"), "http://localhost:3000/api/ingest");
        assert_eq!(
            client.endpoint("/ingest/batch"),
            "http://localhost:3000/api/ingest/batch"
        );
    }

    #[test]
    fn single_ack_parses_api_response() {
        let ack: SingleAck = serde_json::from_str(
            r#"{"success":true,"data":{"id":1},"anomaly":{"detected":true,"severity":"high"}}"#,
        )
        .unwrap();
        assert!(ack.anomaly.detected);
        assert_eq!(ack.anomaly.severity.as_deref(), Some("high"));

        let ack: SingleAck =
            serde_json::from_str(r#"{"success":true,"anomaly":{"detected":false}}"#).unwrap();
        assert_eq!(ack.anomaly.severity, None);
    }

    #[test]
    fn batch_ack_parses_api_response() {
        let ack: BatchAck = serde_json::from_str(
            r#"{"success":true,"inserted":10,"anomalies_detected":2,"anomalies":[]}"#,
        )
        .unwrap();
        assert_eq!(
            ack,
            BatchAck {
                inserted: 10,
                anomalies_detected: 2
            }
        );
    }

    #[test]
    fn http_status_error_mentions_code() {
        let err = SendError::HttpStatus {
            status: 400,
            body: "{\"error\":\"bad\"}".into(),
        };
        assert!(err.to_string().contains("400"));
    }
}
