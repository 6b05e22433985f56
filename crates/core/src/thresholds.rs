//! Threshold table and anomaly evaluator for health readings.
//!
//! Pure logic. The ingestion pipeline calls [`evaluate`] once per stored
//! reading and persists an anomaly when the verdict is out of range.

use serde::Serialize;

use crate::metric_kind::{MetricKind, Severity};

/// Deviation above which a reading is `critical`.
const CRITICAL_DEVIATION: f64 = 0.5;
/// Deviation above which a reading is `high`.
const HIGH_DEVIATION: f64 = 0.3;
/// Deviation above which a reading is `medium`.
const MEDIUM_DEVIATION: f64 = 0.15;

/// Inclusive acceptable range for one metric kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl Threshold {
    /// `true` when `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        !(value < self.min || value > self.max)
    }
}

/// Fixed acceptable range for a metric kind.
pub const fn threshold_for(kind: MetricKind) -> Threshold {
    match kind {
        MetricKind::HeartRate => Threshold {
            min: 60.0,
            max: 100.0,
            unit: "bpm",
        },
        MetricKind::BloodPressure => Threshold {
            min: 90.0,
            max: 140.0,
            unit: "mmHg",
        },
        MetricKind::Temperature => Threshold {
            min: 36.1,
            max: 37.2,
            unit: "°C",
        },
        MetricKind::OxygenSaturation => Threshold {
            min: 95.0,
            max: 100.0,
            unit: "%",
        },
        MetricKind::Steps => Threshold {
            min: 0.0,
            max: 50000.0,
            unit: "steps",
        },
    }
}

/// Look up a threshold by raw metric name; `None` for unknown names.
pub fn lookup(metric_type: &str) -> Option<Threshold> {
    metric_type.parse::<MetricKind>().ok().map(threshold_for)
}

/// Verdict for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub is_anomaly: bool,
    pub severity: Severity,
    pub threshold_min: Option<f64>,
    pub threshold_max: Option<f64>,
}

/// Classify `value` against the threshold for `metric_type`.
///
/// Unknown kinds are reported in range with severity `low` and no bounds.
/// For known kinds the bounds are always returned, anomalous or not.
pub fn evaluate(metric_type: &str, value: f64) -> Evaluation {
    let Some(threshold) = lookup(metric_type) else {
        return Evaluation {
            is_anomaly: false,
            severity: Severity::Low,
            threshold_min: None,
            threshold_max: None,
        };
    };

    let is_anomaly = !threshold.contains(value);
    let severity = if is_anomaly {
        severity_for(deviation(value, &threshold))
    } else {
        Severity::Low
    };

    Evaluation {
        is_anomaly,
        severity,
        threshold_min: Some(threshold.min),
        threshold_max: Some(threshold.max),
    }
}

/// Relative distance of `value` from both bounds; the larger one wins.
///
/// Both terms are always computed, so the bound that was not crossed still
/// contributes. With `min == 0` (steps) the first term divides by zero and
/// yields `inf` (or `NaN` for a zero value, which is never out of range).
pub fn deviation(value: f64, threshold: &Threshold) -> f64 {
    let below = (value - threshold.min).abs() / threshold.min;
    let above = (value - threshold.max).abs() / threshold.max;
    below.max(above)
}

/// Map a deviation onto a severity tier. Each cutoff is exclusive.
pub fn severity_for(deviation: f64) -> Severity {
    if deviation > CRITICAL_DEVIATION {
        Severity::Critical
    } else if deviation > HIGH_DEVIATION {
        Severity::High
    } else if deviation > MEDIUM_DEVIATION {
        Severity::Medium
    } else {
        Severity::Low
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
