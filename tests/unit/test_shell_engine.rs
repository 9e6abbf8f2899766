//! Unit tests for the shell dispatch engine
//!
//! Exercises the engine's state machine against the full built-in
//! registry: routing, help output, continuation handling and the
//! fixed engine-level lines.

use mprsh::commands::ShellContext;
use mprsh::shell::Shell;

fn builtin_shell() -> Shell {
    Shell::with_builtins(ShellContext::new("console"), "mprsh# ")
}

#[test]
fn test_empty_line_leaves_state_unchanged() {
    let mut shell = builtin_shell();
    let result = shell.submit("");
    assert!(result.success);
    assert!(result.output.is_empty());
    assert!(!result.exit);
    assert!(shell.pending_input().is_none());
}

#[test]
fn test_whitespace_only_line_is_a_noop() {
    let mut shell = builtin_shell();
    let result = shell.submit("   ");
    assert!(result.success);
    assert!(result.output.is_empty());
}

#[test]
fn test_unknown_command_reports_name() {
    let mut shell = builtin_shell();
    let result = shell.submit("nope");
    assert!(!result.success);
    assert_eq!(result.output, vec!["Unknown command: nope"]);
}

#[test]
fn test_help_covers_every_builtin_plus_engine_lines() {
    let mut shell = builtin_shell();
    let result = shell.submit("help");
    assert!(result.success);

    // 14 built-ins plus the two engine-level entries
    assert_eq!(result.output.len(), 16);
    assert_eq!(result.output[0], "whoami - prints your username");
    assert_eq!(
        result.output[result.output.len() - 2],
        "help - displays list of shell commands"
    );
    assert_eq!(result.output[result.output.len() - 1], "exit - exits shell");
}

#[test]
fn test_exit_ends_session_with_no_output() {
    let mut shell = builtin_shell();
    let result = shell.submit("exit");
    assert!(result.exit);
    assert!(result.output.is_empty());
}

#[test]
fn test_passwd_parks_the_engine() {
    let mut shell = builtin_shell();
    let result = shell.submit("passwd");
    assert!(result.success);

    let pending = shell.pending_input().expect("passwd requests a follow-up");
    assert_eq!(pending.owner, "passwd");
    assert_eq!(pending.prompt, "Enter password for console:");
    assert!(!pending.echo);
}

#[test]
fn test_pending_line_is_never_tokenized() {
    let mut shell = builtin_shell();
    shell.submit("passwd");

    // "help" here is the password, not the help command
    let result = shell.submit("help");
    assert!(result.success);
    assert_eq!(result.output, vec!["Setting password for console"]);
    assert!(shell.pending_input().is_none());
}

#[test]
fn test_pending_exit_does_not_end_session() {
    let mut shell = builtin_shell();
    shell.submit("passwd");
    let result = shell.submit("exit");
    assert!(!result.exit);
    assert!(shell.pending_input().is_none());

    // Back in IDLE, exit works again
    assert!(shell.submit("exit").exit);
}

#[test]
fn test_continuation_is_exactly_one_round_trip() {
    let mut shell = builtin_shell();
    shell.submit("passwd");
    shell.submit("secret");
    assert!(shell.pending_input().is_none());

    let result = shell.submit("whoami");
    assert_eq!(result.output, vec!["console"]);
}

#[test]
fn test_invalid_flag_is_reported_not_fatal() {
    let mut shell = builtin_shell();
    let result = shell.submit("ls -q");
    assert!(!result.success);
    assert_eq!(result.output, vec!["Invalid flag: q"]);

    // Session continues normally
    assert!(shell.submit("pwd").success);
}
