use crate::exec::run_captured;
use tracing::{debug, info, warn};
use zonebench_abstract::{Credentials, Node, SessionError};
use zonebench_core::{CommandChannel, CommandOutput, SessionFactory};

const MEASUREMENT_DIR: &str = "azure-network-measurement";
const MEASUREMENT_REPO: &str = "https://github.com/pichuang/azure-network-measurement.git";

/// Opens password-authenticated OpenSSH sessions to nodes and performs the
/// one-time tooling setup on first contact.
pub struct SshFactory {
    credentials: Credentials,
    skip_setup: bool,
    connect_timeout_secs: u64,
}

impl SshFactory {
    pub fn new(credentials: Credentials, skip_setup: bool) -> Self {
        Self {
            credentials,
            skip_setup,
            connect_timeout_secs: 10,
        }
    }
}

impl SessionFactory for SshFactory {
    fn connect(&self, node: &Node) -> Result<Box<dyn CommandChannel>, SessionError> {
        let address = node
            .public_ip
            .clone()
            .ok_or_else(|| SessionError::Unreachable {
                address: node.name.clone(),
                reason: "no public address".to_string(),
            })?;

        let mut session = SshSession {
            address,
            credentials: self.credentials.clone(),
            connect_timeout_secs: self.connect_timeout_secs,
        };

        // Cheap no-op command to surface auth/reachability problems before
        // the runner commits to this node as a source.
        session.run("true")?;
        debug!("SSH connection established with {}", session.address);

        if !self.skip_setup {
            session.ensure_setup()?;
        }
        Ok(Box::new(session))
    }
}

/// One channel to one node, driving the `ssh` binary (via `sshpass` for the
/// fleet's password credentials). Commands run strictly one at a time.
struct SshSession {
    address: String,
    credentials: Credentials,
    connect_timeout_secs: u64,
}

impl SshSession {
    fn ssh_invocation(&self, command: &str) -> (String, Vec<String>) {
        let args = vec![
            "-p".to_string(),
            self.credentials.password.clone(),
            "ssh".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout_secs),
            format!("{}@{}", self.credentials.username, self.address),
            command.to_string(),
        ];
        ("sshpass".to_string(), args)
    }

    /// Install benchmark tooling unless the node already carries it. The
    /// installer is launched in the background and never awaited; the
    /// readiness of the tools shows up in probe results, not here.
    fn ensure_setup(&mut self) -> Result<(), SessionError> {
        let check = self.run(&format!("ls {MEASUREMENT_DIR} && pgrep iperf3"))?;
        if !setup_required(&check.stdout, &check.stderr) {
            info!("Benchmark tooling already present on {}. Skipping setup.", self.address);
            return Ok(());
        }

        info!("Installing benchmark tooling on {}", self.address);
        self.run(&format!("git clone {MEASUREMENT_REPO}"))?;
        // Fire and forget: the install script keeps running after the channel
        // command returns.
        self.run(&format!(
            "cd {MEASUREMENT_DIR} && nohup sudo bash all-in-one-install.sh >/dev/null 2>&1 &"
        ))?;
        Ok(())
    }
}

impl CommandChannel for SshSession {
    fn run(&mut self, command: &str) -> Result<CommandOutput, SessionError> {
        let (program, args) = self.ssh_invocation(command);
        let output = run_captured(&program, &args).map_err(|e| SessionError::Io {
            address: self.address.clone(),
            reason: e.to_string(),
        })?;

        if let Some(failure) = classify_transport_failure(&self.address, &output) {
            return Err(failure);
        }
        Ok(output)
    }
}

/// Setup is skipped only when the tool directory is present and the process
/// check wrote nothing to stderr; anything else re-triggers installation.
fn setup_required(check_stdout: &str, check_stderr: &str) -> bool {
    !(check_stdout.contains(MEASUREMENT_DIR) && check_stderr.trim().is_empty())
}

/// Map an ssh exit into a session error, or `None` when the transport worked
/// (the remote command's own exit status is the caller's business).
///
/// OpenSSH reserves status 255 for its own failures; sshpass reports a
/// rejected password as status 5.
fn classify_transport_failure(address: &str, output: &CommandOutput) -> Option<SessionError> {
    match output.exit_status {
        5 => Some(SessionError::Authentication {
            address: address.to_string(),
        }),
        255 => {
            let reason = output
                .stderr
                .lines()
                .last()
                .unwrap_or("connection failed")
                .to_string();
            if reason.contains("Permission denied") {
                Some(SessionError::Authentication {
                    address: address.to_string(),
                })
            } else {
                Some(SessionError::Unreachable {
                    address: address.to_string(),
                    reason,
                })
            }
        }
        -1 => Some(SessionError::Io {
            address: address.to_string(),
            reason: "ssh terminated by signal".to_string(),
        }),
        status => {
            if status != 0 {
                warn!("Remote command exited {} on {}", status, address);
            }
            None
        }
    }
}
