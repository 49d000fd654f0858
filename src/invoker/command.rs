//! Child command lines and the environment overlay handed to them.

use crate::runtime::context::RunContext;
use std::fmt;

pub const RPC_URL_ENV: &str = "JSON_RPC_URL";
pub const NODE_OPTIONS_ENV: &str = "NODE_OPTIONS";
pub const PRIZE_TIERS_ENV: &str = "PRIZE_TIERS_TO_COMPUTE";
pub const DEBUG_ENV: &str = "DEBUG";

/// A program, its arguments, and the variables layered over the inherited
/// parent environment when it is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    env_overlay: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_overlay: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds or replaces an overlay entry. Later values win.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.env_overlay.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.env_overlay.push((key, value)),
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env_overlay(&self) -> &[(String, String)] {
        &self.env_overlay
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env_overlay
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value following `flag` in the argument list, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map(String::as_str)
    }

    /// Builds `<binary> utils compileWinners ...` for one run.
    pub fn compile_winners(binary: &str, ctx: &RunContext) -> Self {
        let profile = ctx.profile();
        let mut command = Self::new(binary)
            .arg("utils")
            .arg("compileWinners")
            .arg("-o")
            .arg(ctx.output_dir().display().to_string())
            .arg("-p")
            .arg(profile.prize_pool_address)
            .arg("-c")
            .arg(profile.chain_id.to_string())
            .arg("-j")
            .arg(profile.contract_json_url)
            .arg("-s")
            .arg(profile.subgraph_url)
            .arg("-r")
            .arg(ctx.remote_status_url());

        if let Some(multicall) = profile.multicall_address {
            command = command.arg("-m").arg(multicall);
        }

        command
            .env(RPC_URL_ENV, ctx.rpc_url())
            .env(NODE_OPTIONS_ENV, ctx.node_options())
            .env(PRIZE_TIERS_ENV, ctx.prize_tiers_csv())
            .env(DEBUG_ENV, "true")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
