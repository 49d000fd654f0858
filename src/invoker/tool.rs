//! Presence check and pinned installation of the external winners CLI.

use crate::invoker::command::ToolCommand;
use crate::invoker::executor::CommandExecutor;
use anyhow::{bail, Context, Result};

pub const DEFAULT_TOOL_BINARY: &str = "ptv5";
pub const DEFAULT_TOOL_PACKAGE: &str = "@generationsoftware/pt-v5-cli";
pub const DEFAULT_TOOL_VERSION: &str = "2.0.8";
pub const DEFAULT_INSTALLER: &str = "npm";

/// Identifies the external CLI and how to install a pinned release of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub binary: String,
    pub package: String,
    pub version: String,
    pub installer: String,
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TOOL_BINARY.to_owned(),
            package: DEFAULT_TOOL_PACKAGE.to_owned(),
            version: DEFAULT_TOOL_VERSION.to_owned(),
            installer: DEFAULT_INSTALLER.to_owned(),
        }
    }
}

impl ToolSpec {
    /// `<binary> --version`
    pub fn version_check(&self) -> ToolCommand {
        ToolCommand::new(&self.binary).arg("--version")
    }

    /// `<installer> install -g <package>@<version>`
    pub fn install_command(&self) -> ToolCommand {
        ToolCommand::new(&self.installer)
            .arg("install")
            .arg("-g")
            .arg(format!("{}@{}", self.package, self.version))
    }
}

/// Makes sure the tool answers a version check, installing the pinned
/// release when it does not. Install failures are returned to the caller
/// like any other attempt failure.
pub async fn ensure_installed<E>(executor: &E, tool: &ToolSpec) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let check = tool.version_check();
    match executor.run(&check).await {
        Ok(status) if status.success() => return Ok(()),
        Ok(status) => {
            tracing::debug!(binary = %tool.binary, %status, "version check failed");
        }
        Err(err) => {
            tracing::debug!(binary = %tool.binary, error = %err, "version check could not start");
        }
    }

    tracing::info!(
        package = %tool.package,
        version = %tool.version,
        "installing winners CLI"
    );
    let install = tool.install_command();
    let status = executor
        .run(&install)
        .await
        .with_context(|| format!("failed to start `{install}`"))?;
    if !status.success() {
        bail!("`{install}` exited with {status}");
    }
    Ok(())
}
