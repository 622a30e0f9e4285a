use std::io;
use std::process::Command;
use zonebench_core::CommandOutput;

/// Run a local binary with captured output. The exit status is -1 when the
/// process was killed by a signal.
pub(crate) fn run_captured(program: &str, args: &[String]) -> io::Result<CommandOutput> {
    let output = Command::new(program).args(args).output()?;
    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_status: output.status.code().unwrap_or(-1),
    })
}
