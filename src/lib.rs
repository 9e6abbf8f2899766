//! mprsh - a line-oriented command shell for resource-constrained deployments
//!
//! This library provides the shell dispatch engine, the built-in
//! command set, and the streaming HTTP fetch protocol behind `wget`.
//! A thin binary supplies the prompt loop; everything with actual
//! protocol or state-machine logic lives here.
//!
//! ## Module Organization
//!
//! - [`shell`] - The dispatch engine and command registry
//! - [`commands`] - The command contract and the built-in commands
//! - [`fetch`] - The streaming HTTP GET protocol
//! - [`pathinfo`] - On-demand path status summaries
//! - [`config`] - TOML/JSON configuration with defaults
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```
//! use mprsh::commands::ShellContext;
//! use mprsh::shell::Shell;
//!
//! let mut shell = Shell::with_builtins(ShellContext::new("console"), "mprsh# ");
//! let result = shell.submit("pwd");
//! assert!(result.success);
//! ```
//!
//! ## Execution Model
//!
//! Single-threaded and cooperative by construction: one command runs
//! to completion, including all of its blocking socket reads, before
//! the engine accepts another line. A slow server therefore stalls the
//! shell for the duration of a fetch. That is an accepted constraint
//! of the target deployment (one interactive user, one connection) and
//! deliberately not papered over with worker threads or timeouts.

#[macro_use]
extern crate tracing;

pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pathinfo;
pub mod shell;

pub use commands::{Command, InputRequest, Outcome, ShellContext};
pub use config::Config;
pub use error::{Error, Result};
pub use shell::{CommandRegistry, PendingInput, Shell, SubmitOutcome};

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build a shell session from a loaded configuration
pub fn init(config: &Config) -> Shell {
    info!("initializing {} v{}", NAME, VERSION);
    let mut ctx = ShellContext::new(config.shell.username.clone());
    ctx.fetch_port = config.fetch.port;
    Shell::with_builtins(ctx, config.shell.prompt.clone())
}
