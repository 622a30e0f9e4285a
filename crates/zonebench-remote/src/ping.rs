use crate::exec::run_captured;
use tracing::debug;
use zonebench_core::LivenessProbe;

/// Single-packet reachability check via the system `ping` binary.
pub struct IcmpPing {
    timeout_secs: u64,
}

impl IcmpPing {
    pub fn new() -> Self {
        Self { timeout_secs: 2 }
    }
}

impl Default for IcmpPing {
    fn default() -> Self {
        Self::new()
    }
}

impl LivenessProbe for IcmpPing {
    fn check(&self, address: &str) -> bool {
        let args = vec![
            "-c".to_string(),
            "1".to_string(),
            "-W".to_string(),
            self.timeout_secs.to_string(),
            address.to_string(),
        ];
        match run_captured("ping", &args) {
            Ok(output) => {
                debug!("ping {address}: exit {}", output.exit_status);
                output.success()
            }
            Err(e) => {
                debug!("ping {address} failed to run: {e}");
                false
            }
        }
    }
}
