use crate::invoker::retry::RetryPolicy;
use crate::invoker::tool::ToolSpec;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: usize = 50;
pub const DEFAULT_OUTPUT_DIR: &str = "winners/vaultAccounts";
pub const DEFAULT_PRIZE_TIERS: [u8; 6] = [0, 1, 2, 3, 4, 5];
pub const DEFAULT_REMOTE_STATUS_URL: &str =
    "https://raw.githubusercontent.com/GenerationSoftware/pt-v5-winners/refs/heads/main/winners/vaultAccounts";
pub const DEFAULT_NODE_OPTIONS: &str = "--max_old_space_size=32768";

pub const MAX_ATTEMPTS_ENV: &str = "WINNERS_MAX_ATTEMPTS";
pub const RETRY_DELAY_MS_ENV: &str = "WINNERS_RETRY_DELAY_MS";
pub const OUTPUT_DIR_ENV: &str = "WINNERS_OUTPUT_DIR";
pub const CLI_VERSION_ENV: &str = "WINNERS_CLI_VERSION";

/// Driver knobs shared by every network.
///
/// Instances are built through [`RunnerConfig::builder`] or [`RunnerConfig::new`],
/// both of which validate before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    max_attempts: usize,
    retry_delay: Duration,
    output_dir: PathBuf,
    prize_tiers: Vec<u8>,
    remote_status_url: String,
    node_options: String,
    tool: ToolSpec,
}

pub struct RunnerConfigParams {
    pub max_attempts: usize,
    pub retry_delay: Duration,
    pub output_dir: PathBuf,
    pub prize_tiers: Vec<u8>,
    pub remote_status_url: String,
    pub node_options: String,
    pub tool: ToolSpec,
}

impl RunnerConfig {
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::default()
    }

    pub fn new(params: RunnerConfigParams) -> Result<Self> {
        let RunnerConfigParams {
            max_attempts,
            retry_delay,
            output_dir,
            prize_tiers,
            remote_status_url,
            node_options,
            tool,
        } = params;

        let config = Self {
            max_attempts,
            retry_delay,
            output_dir,
            prize_tiers,
            remote_status_url: remote_status_url.trim().to_owned(),
            node_options: node_options.trim().to_owned(),
            tool,
        };

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by any `WINNERS_*` variables present in the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`RunnerConfig::from_env`] against an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(raw) = read(MAX_ATTEMPTS_ENV) {
            builder = builder.max_attempts(parse_env(MAX_ATTEMPTS_ENV, &raw)?);
        }
        if let Some(raw) = read(RETRY_DELAY_MS_ENV) {
            builder = builder.retry_delay(Duration::from_millis(parse_env(RETRY_DELAY_MS_ENV, &raw)?));
        }
        if let Some(raw) = read(OUTPUT_DIR_ENV) {
            builder = builder.output_dir(raw.trim());
        }
        if let Some(raw) = read(CLI_VERSION_ENV) {
            builder = builder.tool(ToolSpec {
                version: raw.trim().to_owned(),
                ..ToolSpec::default()
            });
        }

        builder.build()
    }

    /// Hard ceiling on attempts of the external CLI.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Pause between attempts; zero retries immediately.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts).with_delay(self.retry_delay)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn prize_tiers(&self) -> &[u8] {
        &self.prize_tiers
    }

    pub fn remote_status_url(&self) -> &str {
        &self.remote_status_url
    }

    /// Value exported to the child as `NODE_OPTIONS`.
    pub fn node_options(&self) -> &str {
        &self.node_options
    }

    pub fn tool(&self) -> &ToolSpec {
        &self.tool
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            bail!("max_attempts must be greater than 0");
        }

        if self.output_dir.as_os_str().is_empty() {
            bail!("output_dir cannot be empty");
        }

        if self.prize_tiers.is_empty() {
            bail!("prize_tiers cannot be empty");
        }

        validate_url(&self.remote_status_url)?;

        ensure_not_empty(&self.tool.binary, "tool binary")?;
        ensure_not_empty(&self.tool.package, "tool package")?;
        ensure_not_empty(&self.tool.version, "tool version")?;
        ensure_not_empty(&self.tool.installer, "tool installer")?;

        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RunnerConfigBuilder {
    max_attempts: Option<usize>,
    retry_delay: Option<Duration>,
    output_dir: Option<PathBuf>,
    prize_tiers: Option<Vec<u8>>,
    remote_status_url: Option<String>,
    node_options: Option<String>,
    tool: Option<ToolSpec>,
}

impl RunnerConfigBuilder {
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn prize_tiers(mut self, tiers: Vec<u8>) -> Self {
        self.prize_tiers = Some(tiers);
        self
    }

    pub fn remote_status_url(mut self, url: impl Into<String>) -> Self {
        self.remote_status_url = Some(url.into());
        self
    }

    pub fn node_options(mut self, options: impl Into<String>) -> Self {
        self.node_options = Some(options.into());
        self
    }

    pub fn tool(mut self, tool: ToolSpec) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn build(self) -> Result<RunnerConfig> {
        let params = RunnerConfigParams {
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            retry_delay: self.retry_delay.unwrap_or(Duration::ZERO),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            prize_tiers: self
                .prize_tiers
                .unwrap_or_else(|| DEFAULT_PRIZE_TIERS.to_vec()),
            remote_status_url: self
                .remote_status_url
                .unwrap_or_else(|| DEFAULT_REMOTE_STATUS_URL.to_owned()),
            node_options: self
                .node_options
                .unwrap_or_else(|| DEFAULT_NODE_OPTIONS.to_owned()),
            tool: self.tool.unwrap_or_default(),
        };

        RunnerConfig::new(params)
    }
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{name} has an invalid value {raw:?}"))
}

fn ensure_not_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} cannot be empty");
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("remote_status_url must start with http:// or https://");
    }
    Ok(())
}
