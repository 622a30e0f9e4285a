use zonebench_abstract::{Node, SessionError};

/// Captured result of one remote command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// An authenticated channel to one node. A channel executes one command at a
/// time; `run` blocks until the remote command exits and its output is
/// captured in full.
pub trait CommandChannel {
    fn run(&mut self, command: &str) -> Result<CommandOutput, SessionError>;
}

/// Opens channels to nodes. The runner holds one channel per usable node for
/// the duration of a run.
pub trait SessionFactory {
    fn connect(&self, node: &Node) -> Result<Box<dyn CommandChannel>, SessionError>;
}
