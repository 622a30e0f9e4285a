use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the two probe commands. Defaults match the measurement
/// parameters baked into the deployed tooling; tests shrink them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Throughput test duration in seconds.
    pub bandwidth_secs: u64,
    /// Parallel streams for the throughput test.
    pub bandwidth_streams: u32,
    /// Warm-up seconds discarded from the throughput measurement.
    pub bandwidth_omit_secs: u64,
    /// Ping-pong test duration in seconds.
    pub latency_secs: u64,
    /// Ping-pong message size in bytes.
    pub latency_msg_size: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            bandwidth_secs: 10,
            bandwidth_streams: 32,
            bandwidth_omit_secs: 1,
            latency_secs: 30,
            latency_msg_size: 1500,
        }
    }
}

/// Polling parameters for the pre-benchmark readiness gate.
#[derive(Debug, Clone)]
pub struct ReadinessConfig {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            timeout: Duration::from_secs(240),
        }
    }
}

/// Login credentials for the fleet's admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
