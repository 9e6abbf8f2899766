//! mprsh - interactive prompt loop around the shell engine
//!
//! The binary owns everything the library treats as external: reading
//! lines, printing output, showing the right prompt, and suppressing
//! terminal echo while a password continuation is pending.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mprsh::config::Config;
use mprsh::shell::Shell;

/// Parsed command line
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".to_string());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    process::exit(0);
                }
                other => {
                    return Err(format!("Unknown argument: {}", other));
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

fn print_usage() {
    println!("Usage: mprsh [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Load configuration from PATH");
    println!("  -d, --debug          Enable debug logging");
    println!("  -h, --help           Show this help");
}

fn main() -> anyhow::Result<()> {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(2);
        }
    };

    let default_filter = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config_path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_or_default(),
    };

    let mut shell = mprsh::init(&config);
    repl(&mut shell)
}

/// One line in, one batch of output lines out, until `exit` or EOF
fn repl(shell: &mut Shell) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let (prompt, echo) = match shell.pending_input() {
            Some(pending) => (format!("{} ", pending.prompt), pending.echo),
            None => (shell.prompt().to_string(), true),
        };

        print!("{}", prompt);
        io::stdout().flush()?;

        if !echo {
            set_echo(false);
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                debug!("stdin closed, ending session");
                break;
            }
        };
        if !echo {
            set_echo(true);
            // The suppressed newline still needs to happen visually
            println!();
        }

        let result = shell.submit(&line);
        for output_line in &result.output {
            println!("{}", output_line);
        }
        if result.exit {
            break;
        }
    }

    Ok(())
}

/// Toggle terminal echo for password entry
#[cfg(unix)]
fn set_echo(on: bool) {
    let flag = if on { "echo" } else { "-echo" };
    if let Err(e) = process::Command::new("stty").arg(flag).status() {
        debug!("stty {} failed: {}", flag, e);
    }
}

#[cfg(not(unix))]
fn set_echo(_on: bool) {}
