pub mod config;
pub mod error;
pub mod fleet;
pub mod node;
pub mod probe;

pub use config::{Credentials, ProbeConfig, ReadinessConfig};
pub use error::{SessionError, TopologyError};
pub use fleet::{FleetOverride, FleetSpec};
pub use node::{AddrClass, Metric, Node};
pub use probe::ProbeOutcome;
