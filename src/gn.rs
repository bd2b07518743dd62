use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::exec::run_command;
use crate::toolchain::ToolchainEnv;
use crate::variant::{BuildVariant, GENERATE_ORDER};

/// Root-relative path of the vendored generator executable.
pub const GN_EXE: &str = "buildtools/win/gn.exe";

/// Construct the generator invocation for one variant.
///
/// The IDE selector, solution name, target CPU and compiler flag are
/// fixed; only the debug and component-build flags vary per variant.
pub fn gn_command(root: &Path, variant: BuildVariant, env: &ToolchainEnv) -> Command {
    let gn_args = format!(
        "is_debug={} is_component_build={} target_cpu=\"x86\" is_clang=false",
        variant.debug, variant.component
    );

    let mut cmd = Command::new(root.join(GN_EXE));
    cmd.current_dir(root)
        .arg("gen")
        .arg(format!("out/{}", variant.dir_name()))
        .arg("--ide=vs2017")
        .arg("--sln=all")
        .arg(format!("--args={gn_args}"));
    env.apply(&mut cmd);
    cmd
}

/// Run the generator for one variant.
pub fn run_gn(root: &Path, variant: BuildVariant, env: &ToolchainEnv) -> Result<()> {
    run_command(gn_command(root, variant, env))
        .with_context(|| format!("generating project for '{}'", variant.dir_name()))
}

/// Generate all four variants in the fixed order.
///
/// The first generator failure aborts the remaining sequence; variants
/// already generated are left in place.
pub fn generate_all(root: &Path, env: &ToolchainEnv) -> Result<()> {
    for variant in GENERATE_ORDER {
        run_gn(root, variant, env)?;
    }
    Ok(())
}
