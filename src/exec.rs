use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::info;

/// Render a command as the single line logged before execution.
pub fn render_command(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run an external command to completion; non-zero exit is an error.
pub fn run_command(mut cmd: Command) -> Result<()> {
    let line = render_command(&cmd);
    info!("running: {line}");
    let status = cmd
        .status()
        .with_context(|| format!("running '{line}'"))?;
    if !status.success() {
        bail!("command '{line}' failed with {status}");
    }
    Ok(())
}
