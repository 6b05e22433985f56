use std::time::Duration;

/// Simulator settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Base URL of the API, including the `/api` prefix.
    pub api_url: String,
    pub device_ids: Vec<String>,
    pub interval: Duration,
    /// Readings per tick. `1` posts to `/ingest` instead of `/ingest/batch`.
    pub batch_size: usize,
    /// Probability in `[0, 1]` that a generated reading is out of range.
    pub anomaly_rate: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            device_ids: ["device-001", "device-002", "device-003"]
                .map(String::from)
                .to_vec(),
            interval: Duration::from_secs(5),
            batch_size: 10,
            anomaly_rate: 0.1,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                |
    /// |---------------------------|----------------------------------------|
    /// | `SIMULATOR_API_URL`       | `http://localhost:3000/api`            |
    /// | `SIMULATOR_DEVICES`       | `device-001,device-002,device-003`     |
    /// | `SIMULATOR_INTERVAL_SECS` | `5`                                    |
    /// | `SIMULATOR_BATCH_SIZE`    | `10`                                   |
    /// | `SIMULATOR_ANOMALY_RATE`  | `0.1`                                  |
    ///
    /// Unparsable numbers fall back to their defaults. The batch size is at
    /// least 1 and the anomaly rate is clamped to `[0, 1]`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("SIMULATOR_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.api_url);

        let device_ids: Vec<String> = lookup("SIMULATOR_DEVICES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .filter(|ids: &Vec<String>| !ids.is_empty())
            .unwrap_or(defaults.device_ids);

        let interval = lookup("SIMULATOR_INTERVAL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);

        let batch_size = lookup("SIMULATOR_BATCH_SIZE")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.batch_size)
            .max(1);

        let anomaly_rate = lookup("SIMULATOR_ANOMALY_RATE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|r| r.is_finite())
            .unwrap_or(defaults.anomaly_rate)
            .clamp(0.0, 1.0);

        Self {
            api_url,
            device_ids,
            interval,
            batch_size,
            anomaly_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> SimulatorConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimulatorConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_map(&[]), SimulatorConfig::default());
    }

    #[test]
    fn values_are_parsed_and_normalized() {
        let config = from_map(&[
            ("SIMULATOR_API_URL", "http://api.test/api/"),
            ("SIMULATOR_DEVICES", " a, ,b "),
            ("SIMULATOR_INTERVAL_SECS", "2"),
            ("SIMULATOR_BATCH_SIZE", "0"),
            ("SIMULATOR_ANOMALY_RATE", "1.5"),
        ]);
        assert_eq!(config.api_url, "http://api.test/api");
        assert_eq!(config.device_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.anomaly_rate, 1.0);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = from_map(&[
            ("SIMULATOR_DEVICES", ","),
            ("SIMULATOR_INTERVAL_SECS", "soon"),
            ("SIMULATOR_ANOMALY_RATE", "NaN"),
        ]);
        assert_eq!(config.device_ids.len(), 3);
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.anomaly_rate, 0.1);
    }
}
