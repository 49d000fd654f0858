pub mod cli;
pub mod invoker;
pub mod network;
pub mod runtime;

pub use invoker::{
    CommandExecutor, CommandStatus, RetriesExhausted, RetryPolicy, SystemExecutor, ToolCommand,
    ToolSpec, WinnersInvoker,
};
pub use network::{find_profile, network_ids, MissingCredential, NetworkProfile, UnknownNetwork};
pub use runtime::config::{RunnerConfig, RunnerConfigBuilder};
pub use runtime::context::RunContext;
pub use runtime::output::prepare_output_dir;
pub use runtime::runner::{NetworkRunner, RunSummary};
pub use runtime::telemetry::init_tracing;
