use std::thread;
use std::time::Instant;
use tracing::{info, warn};
use zonebench_abstract::ReadinessConfig;

/// Single-shot reachability check against one address.
pub trait LivenessProbe {
    fn check(&self, address: &str) -> bool;
}

/// Block until one poll pass in which every address answers, or the timeout
/// elapses. A pass gives up at the first unreachable address; there is no
/// per-address progress carried between passes. Timeout is a warning, not a
/// failure: benchmarking proceeds and degraded nodes surface as N/A cells.
pub fn wait_until_ready(probe: &dyn LivenessProbe, addresses: &[String], cfg: &ReadinessConfig) {
    info!("Checking if nodes are reachable...");
    let start = Instant::now();
    while start.elapsed() < cfg.timeout {
        if addresses.iter().all(|addr| probe.check(addr)) {
            info!("All nodes are reachable.");
            return;
        }
        thread::sleep(cfg.poll_interval);
    }
    warn!("Timeout reached. Some nodes may not be reachable.");
}
