use crate::network::NetworkProfile;
use crate::runtime::config::RunnerConfig;
use std::path::{Path, PathBuf};

/// Everything one run of the winners CLI needs, fixed before the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    profile: &'static NetworkProfile,
    rpc_url: String,
    output_dir: PathBuf,
    prize_tiers: Vec<u8>,
    remote_status_url: String,
    node_options: String,
}

impl RunContext {
    pub fn new(profile: &'static NetworkProfile, rpc_url: String, config: &RunnerConfig) -> Self {
        Self {
            profile,
            rpc_url,
            output_dir: config.output_dir().to_path_buf(),
            prize_tiers: config.prize_tiers().to_vec(),
            remote_status_url: config.remote_status_url().to_owned(),
            node_options: config.node_options().to_owned(),
        }
    }

    pub fn profile(&self) -> &'static NetworkProfile {
        self.profile
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn prize_tiers(&self) -> &[u8] {
        &self.prize_tiers
    }

    /// Tiers rendered as `0,1,2`.
    pub fn prize_tiers_csv(&self) -> String {
        self.prize_tiers
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn remote_status_url(&self) -> &str {
        &self.remote_status_url
    }

    pub fn node_options(&self) -> &str {
        &self.node_options
    }

    /// Directory the CLI writes this chain's artifacts into.
    pub fn results_dir(&self) -> PathBuf {
        self.output_dir.join(self.profile.chain_id.to_string())
    }
}
