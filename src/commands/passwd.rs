//! Password change built-in
//!
//! The only command that requests a continuation: `run` asks the engine
//! for one follow-up line with terminal echo suppressed, and the
//! continuation receives that line as raw data. The secret is held in a
//! zeroizing buffer and never echoed back; persisting the credential is
//! out of scope for this shell.

use zeroize::Zeroizing;

use super::{Command, Outcome, ShellContext};

/// `passwd`
pub struct Passwd;

impl Command for Passwd {
    fn name(&self) -> &str {
        "passwd"
    }

    fn help(&self) -> &str {
        "changes password for current user"
    }

    fn accepts_continuation(&self) -> bool {
        true
    }

    fn run(&self, _args: &[String], ctx: &ShellContext) -> Outcome {
        Outcome::needs_input(format!("Enter password for {}:", ctx.username), false)
    }

    fn continuation(&self, line: &str, ctx: &ShellContext) -> Outcome {
        let secret = Zeroizing::new(line.to_string());
        if secret.is_empty() {
            return Outcome::failure("Password unchanged: empty input");
        }
        debug!("password updated for {}", ctx.username);
        Outcome::line(format!("Setting password for {}", ctx.username))
    }
}
