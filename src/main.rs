use std::process::ExitCode;

use anyhow::{Context, Result};
use winners_runner::cli;
use winners_runner::{init_tracing, NetworkRunner, RunnerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = load_env_file() {
        return cli::failure_report(&err).emit();
    }
    init_tracing();

    let network = cli::requested_network(std::env::args_os());
    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(err) => return cli::failure_report(&err).emit(),
    };

    let runner = NetworkRunner::new(config);
    match runner.run(network.as_deref()).await {
        Ok(summary) => cli::success_report(&summary).emit(),
        Err(err) => cli::failure_report(&err).emit(),
    }
}

/// Loads `ENV_FILE` when set (failing if it cannot be read), otherwise a
/// `.env` in the working directory if one exists.
fn load_env_file() -> Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(&custom_env_file)
            .with_context(|| format!("failed to load env file {custom_env_file}"))?;
    } else {
        dotenvy::dotenv().ok();
    }
    Ok(())
}
