//! Process execution seam. The invoker only ever talks to a
//! [`CommandExecutor`], so tests can script child outcomes without spawning
//! anything.

use crate::invoker::command::ToolCommand;
use anyhow::{Context, Result};
use futures::future::BoxFuture;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Terminated without an exit code (for example, by a signal).
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination without exit code"),
        }
    }
}

/// Runs one command to completion. An `Err` means the child could not be
/// started at all; a started child always yields a [`CommandStatus`].
pub trait CommandExecutor: Send + Sync {
    fn run<'a>(&'a self, command: &'a ToolCommand) -> BoxFuture<'a, Result<CommandStatus>>;
}

/// Spawns real child processes with inherited stdio and the command's
/// environment overlay applied on top of the parent environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    async fn spawn_and_wait(&self, command: &ToolCommand) -> Result<CommandStatus> {
        let mut child = Command::new(command.program());
        child
            .args(command.args())
            .envs(command.env_overlay().iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = child
            .status()
            .await
            .with_context(|| format!("failed to run `{command}`"))?;
        Ok(status.into())
    }
}

impl CommandExecutor for SystemExecutor {
    fn run<'a>(&'a self, command: &'a ToolCommand) -> BoxFuture<'a, Result<CommandStatus>> {
        Box::pin(self.spawn_and_wait(command))
    }
}
