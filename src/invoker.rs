//! Retry-driven invocation of the external winners CLI: command assembly,
//! process execution, tool installation, and the bounded retry loop.

pub mod command;
pub mod compile;
pub mod executor;
pub mod retry;
pub mod tool;

pub use command::ToolCommand;
pub use compile::{InvocationReport, WinnersInvoker};
pub use executor::{CommandExecutor, CommandStatus, SystemExecutor};
pub use retry::{retry_with_delay, AttemptState, RetriesExhausted, RetryPolicy};
pub use tool::{ensure_installed, ToolSpec};
