//! Synthetic reading generation.
//!
//! Normal readings are drawn uniformly from a per-kind base range. Anomalous
//! readings overshoot the top of the range by up to 30% of `max`, or
//! undershoot the bottom by up to 30% of `min`, with equal probability.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use vitals_core::metric_kind::MetricKind;
use vitals_core::types::Timestamp;

/// Fraction of a bound by which an anomalous value may overshoot it.
const ANOMALY_SPREAD: f64 = 0.3;

/// Range normal simulated values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

/// Simulator base range for `kind`.
///
/// Matches the alerting thresholds except for steps, which stay well under
/// the alerting ceiling.
pub const fn base_range(kind: MetricKind) -> BaseRange {
    match kind {
        MetricKind::HeartRate => BaseRange {
            min: 60.0,
            max: 100.0,
            unit: "bpm",
        },
        MetricKind::BloodPressure => BaseRange {
            min: 90.0,
            max: 140.0,
            unit: "mmHg",
        },
        MetricKind::Temperature => BaseRange {
            min: 36.1,
            max: 37.2,
            unit: "°C",
        },
        MetricKind::OxygenSaturation => BaseRange {
            min: 95.0,
            max: 100.0,
            unit: "%",
        },
        MetricKind::Steps => BaseRange {
            min: 0.0,
            max: 10000.0,
            unit: "steps",
        },
    }
}

/// One generated reading, serialized as the ingestion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedReading {
    pub device_id: String,
    pub metric_type: MetricKind,
    pub value: f64,
    pub unit: &'static str,
    pub timestamp: Timestamp,
}

/// Generate a single reading for `device_id`, timestamped now.
pub fn generate_reading<R: Rng + ?Sized>(
    rng: &mut R,
    device_id: &str,
    kind: MetricKind,
    anomalous: bool,
) -> SimulatedReading {
    let range = base_range(kind);
    let value = if anomalous {
        if rng.random_bool(0.5) {
            range.max + rng.random::<f64>() * range.max * ANOMALY_SPREAD
        } else {
            range.min - rng.random::<f64>() * range.min * ANOMALY_SPREAD
        }
    } else {
        range.min + rng.random::<f64>() * (range.max - range.min)
    };

    SimulatedReading {
        device_id: device_id.to_string(),
        metric_type: kind,
        value: round2(value),
        unit: range.unit,
        timestamp: Utc::now(),
    }
}

/// Generate `count` readings spread across `device_ids` and metric kinds.
///
/// Device and kind are picked uniformly per reading; each reading is
/// anomalous with probability `anomaly_rate`. Returns nothing when
/// `device_ids` is empty.
pub fn generate_batch<R: Rng + ?Sized>(
    rng: &mut R,
    device_ids: &[String],
    count: usize,
    anomaly_rate: f64,
) -> Vec<SimulatedReading> {
    if device_ids.is_empty() {
        return Vec::new();
    }
    let anomaly_rate = anomaly_rate.clamp(0.0, 1.0);
    (0..count)
        .map(|_| {
            let device_id = &device_ids[rng.random_range(0..device_ids.len())];
            let kind = MetricKind::ALL[rng.random_range(0..MetricKind::ALL.len())];
            let anomalous = rng.random_bool(anomaly_rate);
            generate_reading(&mut *rng, device_id, kind, anomalous)
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
