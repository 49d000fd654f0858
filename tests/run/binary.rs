//! End-to-end runs of the compiled binary against a fake `ptv5` on PATH.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tempfile::TempDir;
use winners_runner::network_ids;

const FAKE_PTV5: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "2.0.8"
  exit 0
fi
echo "$*" >> "$PTV5_LOG"
[ "$JSON_RPC_URL" = "https://rpc.example" ] || exit 3
[ "$PRIZE_TIERS_TO_COMPUTE" = "0,1,2,3,4,5" ] || exit 4
[ "$DEBUG" = "true" ] || exit 5
exit "${PTV5_EXIT:-1}"
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create sandbox")?;
        let bin = dir.path().join("bin");
        fs::create_dir(&bin)?;
        let script = bin.join("ptv5");
        fs::write(&script, FAKE_PTV5)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        Ok(Self { dir })
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn log_path(&self) -> PathBuf {
        self.root().join("ptv5.log")
    }

    fn invocations(&self) -> usize {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    fn run(&self, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
        let mut command = Command::new(env!("CARGO_BIN_EXE_winners-runner"));
        command
            .args(args)
            .env_clear()
            .env("PATH", self.root().join("bin"))
            .env("PTV5_LOG", self.log_path())
            .env("RUST_LOG", "warn")
            .current_dir(self.root());
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().context("failed to run winners-runner")
    }
}

#[test]
fn unknown_network_lists_every_identifier() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(&["nonexistent-network"], &[])?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in network_ids() {
        assert!(stdout.contains(id), "stdout should list {id}: {stdout}");
    }
    assert_eq!(sandbox.invocations(), 0);
    Ok(())
}

#[test]
fn no_argument_prints_usage() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(&[], &[])?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: winners-runner <network-name>"));
    Ok(())
}

#[test]
fn missing_credential_exits_without_invoking() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(&["optimism-mainnet"], &[])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPTIMISM_MAINNET_RPC_URL"),
        "stderr should name the variable: {stderr}"
    );
    assert_eq!(sandbox.invocations(), 0);
    assert!(!sandbox.root().join("winners").exists());
    Ok(())
}

#[test]
fn success_on_first_attempt() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(
        &["gnosis-mainnet"],
        &[
            ("GNOSIS_MAINNET_RPC_URL", "https://rpc.example"),
            ("PTV5_EXIT", "0"),
        ],
    )?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(sandbox.invocations(), 1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Successfully computed winners for gnosis-mainnet!"));
    assert!(stdout.contains("Results saved to winners/vaultAccounts/100/"));
    assert!(sandbox.root().join("winners/vaultAccounts").is_dir());

    let log = fs::read_to_string(sandbox.log_path())?;
    assert!(log.starts_with("utils compileWinners -o winners/vaultAccounts"));
    assert!(log.contains("-m 0xcA11bde05977b3631167028862bE2a173976CA11"));
    Ok(())
}

#[test]
fn persistent_failure_stops_after_fifty_attempts() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(
        &["base-mainnet"],
        &[("BASE_MAINNET_RPC_URL", "https://rpc.example")],
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sandbox.invocations(), 50);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Exceeded maximum retries (50)"),
        "stderr should report exhaustion: {stderr}"
    );
    Ok(())
}

#[test]
fn attempt_ceiling_follows_environment_override() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(
        &["base-mainnet"],
        &[
            ("BASE_MAINNET_RPC_URL", "https://rpc.example"),
            ("WINNERS_MAX_ATTEMPTS", "2"),
        ],
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sandbox.invocations(), 2);
    Ok(())
}

#[test]
fn flag_like_or_extra_arguments_still_print_the_network_list() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let cases: [&[&str]; 4] = [
        &["--bogus"],
        &["-nonexistent"],
        &["nonexistent-network", "extra"],
        &["--help"],
    ];

    for args in cases {
        let output = sandbox.run(args, &[])?;
        assert_eq!(output.status.code(), Some(1), "args {args:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        for id in network_ids() {
            assert!(stdout.contains(id), "args {args:?} should list {id}: {stdout}");
        }
    }
    assert_eq!(sandbox.invocations(), 0);
    Ok(())
}

#[test]
fn arguments_after_the_network_are_ignored() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(
        &["base-mainnet", "extra", "--more"],
        &[
            ("BASE_MAINNET_RPC_URL", "https://rpc.example"),
            ("PTV5_EXIT", "0"),
        ],
    )?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(sandbox.invocations(), 1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Successfully computed winners for base-mainnet!"));
    Ok(())
}
