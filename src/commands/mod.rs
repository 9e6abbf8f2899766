//! Built-in commands and the command contract
//!
//! Every built-in is a flat implementer of [`Command`]; there is no
//! inheritance chain, only shared free functions for flag extraction
//! (here) and path inspection ([`crate::pathinfo`]). Commands are
//! stateless between invocations: a command that wants a follow-up
//! line asks for one through its [`Outcome`], and the engine owns the
//! resulting continuation state.

pub mod fs;
pub mod net;
pub mod passwd;
pub mod sys;
pub mod wget;

use crate::error::{Error, Result};

/// Per-session facts shared with every command
#[derive(Debug, Clone)]
pub struct ShellContext {
    /// Name the session was started under
    pub username: String,
    /// Port the fetch protocol connects to
    pub fetch_port: u16,
}

impl ShellContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            fetch_port: 80,
        }
    }
}

/// Request for one follow-up input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    /// Prompt the terminal layer should display
    pub prompt: String,
    /// Whether the terminal should echo the typed characters
    pub echo: bool,
}

/// Result of one `run` or `continuation` invocation
///
/// Produced fresh by every call and handed to the engine for exactly
/// one submitted line; output is never accumulated across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the invocation succeeded
    pub success: bool,
    /// Output lines in display order
    pub output: Vec<String>,
    /// Present when the command wants one more input line
    pub request: Option<InputRequest>,
}

impl Outcome {
    /// Success with no output
    pub fn ok() -> Self {
        Self {
            success: true,
            output: Vec::new(),
            request: None,
        }
    }

    /// Success with the given output lines
    pub fn lines(output: Vec<String>) -> Self {
        Self {
            success: true,
            output,
            request: None,
        }
    }

    /// Success with a single output line
    pub fn line(text: impl Into<String>) -> Self {
        Self::lines(vec![text.into()])
    }

    /// Failure with a single explanatory line
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            success: false,
            output: vec![text.into()],
            request: None,
        }
    }

    /// Success that asks the engine for one follow-up line
    pub fn needs_input(prompt: impl Into<String>, echo: bool) -> Self {
        Self {
            success: true,
            output: Vec::new(),
            request: Some(InputRequest {
                prompt: prompt.into(),
                echo,
            }),
        }
    }
}

/// Polymorphic unit of shell behavior
///
/// `run` must not panic: any internal fault is converted into a
/// `success=false` outcome with a human-readable line. Side effects
/// happen only after argument validation has completed, so re-running
/// after a failed flag parse mutates nothing.
pub trait Command {
    /// Unique registry key
    fn name(&self) -> &str;

    /// One-line description for `help`
    fn help(&self) -> &str;

    /// Whether this command ever requests a follow-up line
    fn accepts_continuation(&self) -> bool {
        false
    }

    /// Execute with the already-split argument list (command name excluded)
    fn run(&self, args: &[String], ctx: &ShellContext) -> Outcome;

    /// Handle the follow-up line requested by a previous `run`.
    ///
    /// The engine only routes here for commands with
    /// `accepts_continuation() == true`; for everything else this
    /// default is unreachable through the engine.
    fn continuation(&self, _line: &str, _ctx: &ShellContext) -> Outcome {
        Outcome::failure("Command does not accept follow-up input")
    }
}

/// Extract single-letter boolean flags from an argument list.
///
/// Flag tokens (a single dash followed by one letter) are removed
/// before positional arguments are interpreted. An unrecognized flag
/// is a user error, reported before the command touches anything.
pub fn extract_flags(args: &[String], allowed: &[char]) -> Result<(Vec<char>, Vec<String>)> {
    let mut flags = Vec::new();
    let mut positional = Vec::new();

    for arg in args {
        match arg.strip_prefix('-') {
            Some(rest) => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(flag), None) if allowed.contains(&flag) => flags.push(flag),
                    _ => {
                        return Err(Error::InvalidFlag {
                            flag: rest.to_string(),
                        })
                    }
                }
            }
            None => positional.push(arg.clone()),
        }
    }

    Ok((flags, positional))
}
