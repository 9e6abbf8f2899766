//! Filesystem built-ins
//!
//! Thin wrappers around single `std::fs` calls. Each validates its
//! arguments against a fresh [`PathStatus`] before touching anything.

use std::path::Path;

use super::{extract_flags, Command, Outcome, ShellContext};
use crate::pathinfo::PathStatus;

/// `ls [-l] [path...]`
pub struct Ls;

impl Ls {
    fn list_dir(&self, dir: &Path, long: bool, out: &mut Vec<String>) -> std::io::Result<()> {
        let mut names: Vec<String> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        for name in names {
            if long {
                let status = PathStatus::query(dir.join(&name));
                if status.is_file {
                    out.push(format!("file {} {}", status.human_size, name));
                } else if status.is_dir {
                    out.push(format!("dir  {} {}", status.human_size, name));
                }
            } else {
                out.push(name);
            }
        }
        Ok(())
    }
}

impl Command for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn help(&self) -> &str {
        "lists files on disk"
    }

    fn run(&self, args: &[String], _ctx: &ShellContext) -> Outcome {
        let (flags, targets) = match extract_flags(args, &['l']) {
            Ok(split) => split,
            Err(e) => return Outcome::failure(e.to_string()),
        };
        let long = flags.contains(&'l');

        let targets = if targets.is_empty() {
            match std::env::current_dir() {
                Ok(cwd) => vec![cwd.to_string_lossy().into_owned()],
                Err(e) => return Outcome::failure(format!("Couldnt read working directory: {}", e)),
            }
        } else {
            targets
        };

        let mut out = Vec::new();
        for target in &targets {
            let status = PathStatus::query(target);
            if !status.exists {
                return Outcome::failure(status.error);
            }

            if status.is_file {
                if long {
                    out.push(format!("file {} {}", status.human_size, target));
                } else {
                    out.push(target.clone());
                }
            } else if status.is_dir {
                if let Err(e) = self.list_dir(Path::new(target), long, &mut out) {
                    return Outcome::failure(format!("Couldnt list directory {}: {}", target, e));
                }
            }
        }
        Outcome::lines(out)
    }
}

/// `pwd`
pub struct Pwd;

impl Command for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn help(&self) -> &str {
        "prints the current working directory"
    }

    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        match std::env::current_dir() {
            Ok(cwd) => Outcome::line(cwd.to_string_lossy()),
            Err(e) => Outcome::failure(format!("Couldnt read working directory: {}", e)),
        }
    }
}

/// `cd <dir>`, changes the process working directory
pub struct Cd;

impl Command for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn help(&self) -> &str {
        "change directory"
    }

    fn run(&self, args: &[String], _ctx: &ShellContext) -> Outcome {
        let Some(target) = args.first() else {
            return Outcome::ok();
        };

        let status = PathStatus::query(target);
        if !status.exists {
            return Outcome::failure(status.error);
        }
        if status.is_file {
            return Outcome::failure(format!("Not a directory: {}", target));
        }
        match std::env::set_current_dir(target) {
            Ok(()) => Outcome::ok(),
            Err(e) => Outcome::failure(format!("Couldnt change directory to {}: {}", target, e)),
        }
    }
}

/// `cat <file>`
pub struct Cat;

impl Command for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn help(&self) -> &str {
        "prints a file to the screen"
    }

    fn run(&self, args: &[String], _ctx: &ShellContext) -> Outcome {
        let Some(target) = args.first() else {
            return Outcome::failure("Please specify a file");
        };

        let status = PathStatus::query(target);
        if !status.exists {
            return Outcome::failure(status.error);
        }
        if status.is_dir {
            return Outcome::failure(format!("Cant cat a directory: {}", target));
        }
        match std::fs::read_to_string(target) {
            Ok(text) => Outcome::lines(text.lines().map(String::from).collect()),
            Err(e) => Outcome::failure(format!("Couldnt read file {}: {}", target, e)),
        }
    }
}

/// `rm <path>` / `rmdir <path>`, the same remover registered under
/// both names
pub struct Remove {
    name: &'static str,
}

impl Remove {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Command for Remove {
    fn name(&self) -> &str {
        self.name
    }

    fn help(&self) -> &str {
        "removes a file or directory"
    }

    fn run(&self, args: &[String], _ctx: &ShellContext) -> Outcome {
        let Some(target) = args.first() else {
            return Outcome::ok();
        };

        let status = PathStatus::query(target);
        if !status.exists {
            return Outcome::failure(status.error);
        }
        if status.is_dir {
            match std::fs::remove_dir(target) {
                Ok(()) => Outcome::ok(),
                Err(_) => Outcome::failure(format!("Couldnt remove directory: {}", target)),
            }
        } else {
            match std::fs::remove_file(target) {
                Ok(()) => Outcome::ok(),
                Err(_) => Outcome::failure(format!("Couldnt remove file: {}", target)),
            }
        }
    }
}

/// `mkdir <dir>`
pub struct Mkdir;

impl Command for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn help(&self) -> &str {
        "creates a directory"
    }

    fn run(&self, args: &[String], _ctx: &ShellContext) -> Outcome {
        let Some(target) = args.first() else {
            return Outcome::ok();
        };

        let status = PathStatus::query(target);
        if status.exists {
            return Outcome::failure(format!("Already exists: {}", target));
        }
        match std::fs::create_dir(target) {
            Ok(()) => Outcome::ok(),
            Err(_) => Outcome::failure(format!("Couldnt make directory: {}", target)),
        }
    }
}
