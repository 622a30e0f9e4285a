use thiserror::Error;

/// Failures from the topology provider. `EndpointNotFound` is expected when a
/// fleet was never provisioned; `Provider` wraps CLI invocation failures.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("no network interface or address found for node '{0}'")]
    EndpointNotFound(String),

    #[error("topology provider command failed: {0}")]
    Provider(String),

    #[error("topology provider unavailable: {0}")]
    Unavailable(String),
}

/// Failures establishing or using a remote session. Any of these excludes the
/// node as a probe source; none of them aborts the run.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("authentication rejected for {address}")]
    Authentication { address: String },

    #[error("host {address} unreachable: {reason}")]
    Unreachable { address: String, reason: String },

    #[error("remote command transport failed on {address}: {reason}")]
    Io { address: String, reason: String },
}
