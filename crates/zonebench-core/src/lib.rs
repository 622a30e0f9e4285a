pub mod channel;
pub mod probe;
pub mod readiness;
pub mod report;
pub mod results;
pub mod runner;
pub mod topology;

pub use channel::{CommandChannel, CommandOutput, SessionFactory};
pub use readiness::{LivenessProbe, wait_until_ready};
pub use results::{ProbeKey, ResultSet};
pub use runner::run_all;
pub use topology::{NodeAddresses, TopologyProvider, resolve_nodes};
