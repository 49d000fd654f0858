use crate::invoker::{CommandExecutor, SystemExecutor, WinnersInvoker};
use crate::network::{find_profile, network_ids, resolve_rpc_url_with, UnknownNetwork};
use crate::runtime::config::RunnerConfig;
use crate::runtime::context::RunContext;
use crate::runtime::output::prepare_output_dir;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub network: &'static str,
    pub chain_id: u64,
    pub attempts: usize,
    pub results_dir: PathBuf,
}

/// Composes profile resolution, credential validation, output preparation,
/// and the retry-driven invocation for a single network.
///
/// Configuration and credential problems are reported before the first
/// attempt and never consume one.
pub struct NetworkRunner<E> {
    config: RunnerConfig,
    invoker: WinnersInvoker<E>,
}

impl NetworkRunner<SystemExecutor> {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_executor(config, SystemExecutor)
    }
}

impl<E: CommandExecutor> NetworkRunner<E> {
    pub fn with_executor(config: RunnerConfig, executor: E) -> Self {
        let invoker = WinnersInvoker::new(executor, config.tool().clone(), config.retry_policy());
        Self { config, invoker }
    }

    /// Runs `network` with its RPC URL taken from the process environment.
    pub async fn run(&self, network: Option<&str>) -> Result<RunSummary> {
        self.run_with_env(network, |name| env::var(name).ok()).await
    }

    /// Runs `network` with its RPC URL taken from `lookup`.
    pub async fn run_with_env<F>(&self, network: Option<&str>, lookup: F) -> Result<RunSummary>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let profile = match network {
            Some(id) => find_profile(id)?,
            None => {
                return Err(UnknownNetwork {
                    requested: None,
                    available: network_ids(),
                }
                .into())
            }
        };

        let rpc_url = resolve_rpc_url_with(profile, lookup)?;
        let ctx = RunContext::new(profile, rpc_url, &self.config);

        prepare_output_dir(ctx.output_dir()).await?;

        let report = self.invoker.run(&ctx).await?;
        tracing::info!(
            network = profile.id,
            attempts = report.attempts,
            "winners computed"
        );

        Ok(RunSummary {
            network: profile.id,
            chain_id: profile.chain_id,
            attempts: report.attempts,
            results_dir: ctx.results_dir(),
        })
    }
}
