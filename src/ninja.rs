use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::exec::run_command;
use crate::toolchain::ToolchainEnv;
use crate::variant::expand_build_type;

/// Name of the build runner, resolved from `PATH`.
pub const NINJA_EXE: &str = "ninja";

/// Build target requested from every output directory.
pub const BUILD_TARGET: &str = "all";

/// Construct the build invocation for one output directory.
pub fn ninja_command(root: &Path, out_dir: &str, env: &ToolchainEnv) -> Command {
    let mut cmd = Command::new(NINJA_EXE);
    cmd.current_dir(root)
        .arg("-C")
        .arg(format!("out/{out_dir}"))
        .arg(BUILD_TARGET);
    env.apply(&mut cmd);
    cmd
}

/// Run the build runner against one output directory.
pub fn run_ninja(root: &Path, out_dir: &str, env: &ToolchainEnv) -> Result<()> {
    run_command(ninja_command(root, out_dir, env))
        .with_context(|| format!("building 'out/{out_dir}'"))
}

/// Build every output directory the keyword expands to, in order.
///
/// A failure on any one aborts the remaining sequence. Unknown keywords
/// reach the build runner unmodified; its failure is the error signal.
pub fn build_variants(root: &Path, build_type: &str, env: &ToolchainEnv) -> Result<()> {
    for out_dir in expand_build_type(build_type) {
        run_ninja(root, out_dir, env)?;
    }
    Ok(())
}
