//! Shell dispatch engine
//!
//! Turns one submitted text line into a command invocation, manages
//! commands that need a follow-up line (password entry with suppressed
//! echo), and enforces the command contract. The engine is a two-state
//! machine: `IDLE`, where lines are tokenized into command invocations,
//! and `AWAITING_INPUT`, where the next line is raw data for the
//! command that asked for it.
//!
//! One invocation runs to completion before the next line is accepted;
//! there is no background work and no overlap, so the continuation
//! state and the registry need no locking.

pub mod registry;

pub use registry::CommandRegistry;

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::commands::{Outcome, ShellContext};

/// Engine-owned continuation state
///
/// Present exactly while the most recent invocation requested a
/// follow-up line; the next submitted line is routed to `owner`'s
/// continuation and is never re-parsed as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInput {
    /// Command the next line belongs to
    pub owner: String,
    /// Prompt the terminal layer should display
    pub prompt: String,
    /// Whether the terminal should echo the typed characters
    pub echo: bool,
}

/// What the caller gets back for one submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether the invocation succeeded
    pub success: bool,
    /// Output lines for this line only, never accumulated
    pub output: Vec<String>,
    /// Whether the caller should end the session
    pub exit: bool,
}

impl SubmitOutcome {
    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            success: outcome.success,
            output: outcome.output,
            exit: false,
        }
    }

    fn quiet(success: bool) -> Self {
        Self {
            success,
            output: Vec::new(),
            exit: false,
        }
    }
}

/// The shell engine: registry, continuation state and prompt
pub struct Shell {
    registry: CommandRegistry,
    ctx: ShellContext,
    prompt: String,
    pending: Option<PendingInput>,
}

impl Shell {
    pub fn new(registry: CommandRegistry, ctx: ShellContext, prompt: impl Into<String>) -> Self {
        Self {
            registry,
            ctx,
            prompt: prompt.into(),
            pending: None,
        }
    }

    /// Shell with every built-in registered
    pub fn with_builtins(ctx: ShellContext, prompt: impl Into<String>) -> Self {
        Self::new(CommandRegistry::builtin(), ctx, prompt)
    }

    /// Prompt to display when no continuation is pending
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Continuation state, if a command is waiting for a line
    pub fn pending_input(&self) -> Option<&PendingInput> {
        self.pending.as_ref()
    }

    /// Feed one line into the engine.
    ///
    /// In `IDLE` the line is tokenized and dispatched; in
    /// `AWAITING_INPUT` it is handed verbatim to the waiting command's
    /// continuation, even if it reads `help` or `exit`. Continuations
    /// are a hard single step: the engine returns to `IDLE`
    /// unconditionally afterwards.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        if let Some(pending) = self.pending.take() {
            return self.run_continuation(pending, line);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::quiet(true);
        }
        if trimmed == "exit" {
            debug!("session exit requested");
            return SubmitOutcome {
                success: true,
                output: Vec::new(),
                exit: true,
            };
        }
        if trimmed == "help" {
            return SubmitOutcome {
                success: true,
                output: self.help_lines(),
                exit: false,
            };
        }

        let mut tokens = trimmed.split_whitespace().map(String::from);
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.collect();

        let Some(command) = self.registry.get(&name) else {
            return SubmitOutcome {
                success: false,
                output: vec![format!("Unknown command: {}", name)],
                exit: false,
            };
        };

        let ctx = &self.ctx;
        let outcome = guarded(&name, || command.run(&args, ctx));

        // Only commands that declare the capability may park the engine
        if let Some(request) = outcome.request.as_ref() {
            if command.accepts_continuation() {
                self.pending = Some(PendingInput {
                    owner: name,
                    prompt: request.prompt.clone(),
                    echo: request.echo,
                });
            } else {
                warn!("command '{}' requested input without declaring the capability", name);
            }
        }

        SubmitOutcome::from_outcome(outcome)
    }

    /// `AWAITING_INPUT`: the line is raw data for the owner, never tokenized
    fn run_continuation(&mut self, pending: PendingInput, line: &str) -> SubmitOutcome {
        let Some(command) = self.registry.get(&pending.owner) else {
            // Unreachable while the registry is immutable for the session
            error!("continuation owner '{}' is not registered", pending.owner);
            return SubmitOutcome {
                success: false,
                output: vec![format!("Unknown command: {}", pending.owner)],
                exit: false,
            };
        };

        let ctx = &self.ctx;
        let outcome = guarded(&pending.owner, || command.continuation(line, ctx));

        // Hard single-step rule: a continuation cannot ask for another line
        if outcome.request.is_some() {
            warn!(
                "command '{}' requested chained continuation; ignoring",
                pending.owner
            );
        }

        SubmitOutcome::from_outcome(outcome)
    }

    /// One line per registered command plus the two engine-level entries
    fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .registry
            .iter()
            .map(|c| format!("{} - {}", c.name(), c.help()))
            .collect();
        lines.push("help - displays list of shell commands".to_string());
        lines.push("exit - exits shell".to_string());
        lines
    }
}

/// The single fault barrier between the engine and command code.
///
/// A panicking command is a programming defect, not a recoverable
/// condition; it is converted into a generic failure line so the
/// session loop survives.
fn guarded<F: FnOnce() -> Outcome>(name: &str, invoke: F) -> Outcome {
    match catch_unwind(AssertUnwindSafe(invoke)) {
        Ok(outcome) => outcome,
        Err(_) => {
            error!("command '{}' panicked", name);
            Outcome::failure(format!("Error running shell cmd: {}", name))
        }
    }
}
