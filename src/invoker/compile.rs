use crate::invoker::command::ToolCommand;
use crate::invoker::executor::CommandExecutor;
use crate::invoker::retry::{retry_with_delay, RetryPolicy};
use crate::invoker::tool::{ensure_installed, ToolSpec};
use crate::runtime::context::RunContext;
use anyhow::{bail, Context, Result};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    /// Attempt number that succeeded (1-based).
    pub attempts: usize,
}

/// Runs `compileWinners` for one [`RunContext`], retrying every failure
/// (version check, install, spawn or non-zero exit) until the policy ceiling.
pub struct WinnersInvoker<E> {
    executor: E,
    tool: ToolSpec,
    policy: RetryPolicy,
}

impl<E: CommandExecutor> WinnersInvoker<E> {
    pub fn new(executor: E, tool: ToolSpec, policy: RetryPolicy) -> Self {
        Self {
            executor,
            tool,
            policy,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn run(&self, ctx: &RunContext) -> Result<InvocationReport> {
        let network = ctx.profile().id;
        let max_attempts = self.policy.max_attempts;

        retry_with_delay(
            self.policy,
            |attempt| self.attempt(ctx, attempt),
            |attempt, err, will_retry| {
                tracing::error!(
                    network,
                    attempt,
                    max_attempts,
                    error = %format!("{err:#}"),
                    "attempt failed"
                );
                if will_retry {
                    tracing::info!(network, attempt, "retrying");
                }
            },
        )
        .await
    }

    async fn attempt(&self, ctx: &RunContext, attempt: usize) -> Result<InvocationReport> {
        let network = ctx.profile().id;
        tracing::info!(
            network,
            attempt,
            max_attempts = self.policy.max_attempts,
            "running winners CLI"
        );

        ensure_installed(&self.executor, &self.tool)
            .await
            .context("winners CLI is not available")?;

        let command = ToolCommand::compile_winners(&self.tool.binary, ctx);
        tracing::info!(network, attempt, command = %command, "executing command");

        let status = self.executor.run(&command).await?;
        if !status.success() {
            bail!("`{}` exited with {status}", self.tool.binary);
        }

        Ok(InvocationReport { attempts: attempt })
    }
}
