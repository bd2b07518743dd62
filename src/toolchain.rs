//! Toolchain configuration for the external generator and build runner.
//!
//! The knobs are opaque to this tool; they select the MSVS toolchain the
//! depot tools use. They are applied per command, never written into the
//! process-wide environment, so nothing leaks between invocations.

use std::process::Command;

/// Environment knobs read by gn and ninja.
#[derive(Debug, Clone)]
pub struct ToolchainEnv {
    /// `DEPOT_TOOLS_WIN_TOOLCHAIN` - use the locally installed toolchain.
    pub win_toolchain: String,
    /// `GYP_GENERATORS` - generator backends to produce.
    pub generators: String,
    /// `GYP_MSVS_VERSION` - Visual Studio version.
    pub msvs_version: String,
    /// `DEPOT_TOOLS_UPDATE` - disable depot tools self-update.
    pub depot_tools_update: String,
    /// `GYP_MSVS_OVERRIDE_PATH` - Visual Studio installation root.
    pub msvs_override_path: String,
    /// `WINDOWSSDKDIR` - platform SDK root.
    pub windows_sdk_dir: String,
}

impl Default for ToolchainEnv {
    fn default() -> Self {
        Self {
            win_toolchain: "0".to_string(),
            generators: "msvs-ninja,ninja".to_string(),
            msvs_version: "2017".to_string(),
            depot_tools_update: "0".to_string(),
            msvs_override_path:
                "C:/Program Files (x86)/Microsoft Visual Studio/2017/Community".to_string(),
            windows_sdk_dir: "C:/Program Files (x86)/Windows Kits/10".to_string(),
        }
    }
}

impl ToolchainEnv {
    /// Variable pairs in the form the external tools read.
    pub fn vars(&self) -> [(&'static str, &str); 6] {
        [
            ("DEPOT_TOOLS_WIN_TOOLCHAIN", self.win_toolchain.as_str()),
            ("GYP_GENERATORS", self.generators.as_str()),
            ("GYP_MSVS_VERSION", self.msvs_version.as_str()),
            ("DEPOT_TOOLS_UPDATE", self.depot_tools_update.as_str()),
            ("GYP_MSVS_OVERRIDE_PATH", self.msvs_override_path.as_str()),
            ("WINDOWSSDKDIR", self.windows_sdk_dir.as_str()),
        ]
    }

    /// Apply the configuration to a single command.
    pub fn apply(&self, cmd: &mut Command) {
        for (key, value) in self.vars() {
            cmd.env(key, value);
        }
    }
}
