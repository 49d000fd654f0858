use crate::support::{
    executor::{Outcome, ScriptedExecutor},
    helpers::{config_in, env_lookup, init_tracing},
};
use anyhow::Result;
use winners_runner::{
    network_ids, MissingCredential, NetworkRunner, RetriesExhausted, UnknownNetwork,
};

const BASE_RPC: (&str, &str) = ("BASE_MAINNET_RPC_URL", "https://base.example/rpc");

#[tokio::test]
async fn unknown_network_fails_before_any_subprocess() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let runner = NetworkRunner::with_executor(config_in(root.path(), 3), executor);

    let err = runner
        .run_with_env(Some("nonexistent-network"), env_lookup(&[BASE_RPC]))
        .await
        .expect_err("unknown network must fail");

    let unknown = err
        .downcast_ref::<UnknownNetwork>()
        .expect("unknown network error");
    assert_eq!(unknown.available, network_ids());
    assert!(state.lock().unwrap().commands.is_empty());
    assert!(
        !root.path().join("winners").exists(),
        "no output directory should be created"
    );
    Ok(())
}

#[tokio::test]
async fn missing_network_argument_is_a_configuration_error() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let runner = NetworkRunner::with_executor(config_in(root.path(), 3), executor);

    let err = runner
        .run_with_env(None, env_lookup(&[]))
        .await
        .expect_err("no network must fail");

    let unknown = err.downcast_ref::<UnknownNetwork>().unwrap();
    assert_eq!(unknown.requested, None);
    assert!(state.lock().unwrap().commands.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_credential_never_installs_or_invokes() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let runner = NetworkRunner::with_executor(config_in(root.path(), 3), executor);

    let err = runner
        .run_with_env(Some("gnosis-mainnet"), env_lookup(&[BASE_RPC]))
        .await
        .expect_err("missing credential must fail");

    let missing = err.downcast_ref::<MissingCredential>().unwrap();
    assert_eq!(missing.variable, "GNOSIS_MAINNET_RPC_URL");
    assert!(state.lock().unwrap().commands.is_empty());
    Ok(())
}

#[tokio::test]
async fn first_success_runs_exactly_once() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let executor = executor.compile([Outcome::Exit(0)]);
    let runner = NetworkRunner::with_executor(config_in(root.path(), 50), executor);

    let summary = runner
        .run_with_env(Some("base-mainnet"), env_lookup(&[BASE_RPC]))
        .await?;

    assert_eq!(summary.network, "base-mainnet");
    assert_eq!(summary.chain_id, 8453);
    assert_eq!(summary.attempts, 1);
    assert_eq!(
        summary.results_dir,
        root.path().join("winners/vaultAccounts/8453")
    );
    assert!(root.path().join("winners/vaultAccounts").is_dir());

    let guard = state.lock().unwrap();
    assert_eq!(guard.version_checks(), 1);
    assert_eq!(guard.installs(), 0);
    assert_eq!(guard.invocations(), 1);

    let command = guard.commands.last().unwrap();
    assert_eq!(command.env_value("JSON_RPC_URL"), Some("https://base.example/rpc"));
    assert_eq!(command.flag_value("-c"), Some("8453"));
    Ok(())
}

#[tokio::test]
async fn fifty_failures_stop_at_the_ceiling() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let executor = executor.compile(std::iter::repeat(Outcome::Exit(1)).take(60));
    let runner = NetworkRunner::with_executor(config_in(root.path(), 50), executor);

    let err = runner
        .run_with_env(Some("base-mainnet"), env_lookup(&[BASE_RPC]))
        .await
        .expect_err("every attempt fails");

    let exhausted = err.downcast_ref::<RetriesExhausted>().unwrap();
    assert_eq!(exhausted.attempts, 50);

    let guard = state.lock().unwrap();
    assert_eq!(guard.invocations(), 50, "never a 51st attempt");
    assert_eq!(guard.version_checks(), 50);
    Ok(())
}

#[tokio::test]
async fn install_and_spawn_failures_consume_attempts() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    let (executor, state) = ScriptedExecutor::new();
    let executor = executor
        .version_check([Outcome::SpawnError, Outcome::SpawnError, Outcome::Exit(0)])
        .install([Outcome::Exit(1), Outcome::Exit(0)])
        .compile([Outcome::SpawnError, Outcome::Exit(0)]);
    let runner = NetworkRunner::with_executor(config_in(root.path(), 3), executor);

    // 1: version check fails, install fails. 2: version check fails, install ok, spawn fails.
    // 3: version check ok, compile succeeds.
    let summary = runner
        .run_with_env(Some("base-mainnet"), env_lookup(&[BASE_RPC]))
        .await?;
    assert_eq!(summary.attempts, 3);

    let guard = state.lock().unwrap();
    assert_eq!(guard.version_checks(), 3);
    assert_eq!(guard.installs(), 2);
    assert_eq!(guard.invocations(), 2);
    Ok(())
}

#[tokio::test]
async fn output_directory_failure_happens_before_the_retry_loop() -> Result<()> {
    init_tracing();
    let root = tempfile::tempdir()?;
    std::fs::write(root.path().join("winners"), b"file in the way")?;
    let (executor, state) = ScriptedExecutor::new();
    let runner = NetworkRunner::with_executor(config_in(root.path(), 3), executor);

    let err = runner
        .run_with_env(Some("base-mainnet"), env_lookup(&[BASE_RPC]))
        .await
        .expect_err("directory creation must fail");

    assert!(format!("{err:#}").contains("failed to create output directory"));
    assert!(err.downcast_ref::<RetriesExhausted>().is_none());
    assert!(state.lock().unwrap().commands.is_empty());
    Ok(())
}
