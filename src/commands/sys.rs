//! System reporting built-ins
//!
//! Identity, platform, memory and disk reporting. Platform facts are
//! probed the cheap way: `/etc/os-release` and `/proc/meminfo` on
//! Linux, `statvfs` on Unix, with degraded one-line reports elsewhere.

use super::{Command, Outcome, ShellContext};

/// `whoami`
pub struct Whoami;

impl Command for Whoami {
    fn name(&self) -> &str {
        "whoami"
    }

    fn help(&self) -> &str {
        "prints your username"
    }

    fn run(&self, _args: &[String], ctx: &ShellContext) -> Outcome {
        Outcome::line(ctx.username.clone())
    }
}

/// `uname`, reporting platform, version, architecture and hostname
pub struct Uname;

impl Command for Uname {
    fn name(&self) -> &str {
        "uname"
    }

    fn help(&self) -> &str {
        "prints the system information"
    }

    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());

        Outcome::lines(vec![
            format!("Platform={}", std::env::consts::OS),
            format!("Version={}", os_version()),
            format!("Arch={}", std::env::consts::ARCH),
            format!("Hostname={}", host),
        ])
    }
}

/// Get OS version information
fn os_version() -> String {
    #[cfg(target_os = "linux")]
    {
        // On Linux, try to get version from /etc/os-release
        if let Ok(content) = std::fs::read_to_string("/etc/os-release") {
            for line in content.lines() {
                if line.starts_with("PRETTY_NAME=") {
                    if let Some(value) = line.split('=').nth(1) {
                        return value.trim_matches('"').to_string();
                    }
                }
            }
        }
    }

    "unknown".to_string()
}

/// `meminfo`
pub struct Meminfo;

impl Command for Meminfo {
    fn name(&self) -> &str {
        "meminfo"
    }

    fn help(&self) -> &str {
        "prints memory usage"
    }

    #[cfg(target_os = "linux")]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        let content = match std::fs::read_to_string("/proc/meminfo") {
            Ok(content) => content,
            Err(e) => return Outcome::failure(format!("Couldnt read memory info: {}", e)),
        };

        let mut out = Vec::new();
        for line in content.lines() {
            if line.starts_with("MemTotal:")
                || line.starts_with("MemFree:")
                || line.starts_with("MemAvailable:")
            {
                out.push(line.split_whitespace().collect::<Vec<_>>().join(" "));
            }
        }
        if out.is_empty() {
            return Outcome::failure("Couldnt read memory info: no fields found");
        }
        Outcome::lines(out)
    }

    #[cfg(not(target_os = "linux"))]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        Outcome::failure("Memory information not available on this platform")
    }
}

/// `df`, usage of the root filesystem
pub struct Df;

impl Command for Df {
    fn name(&self) -> &str {
        "df"
    }

    fn help(&self) -> &str {
        "prints disk usage"
    }

    #[cfg(unix)]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        let stat = match nix::sys::statvfs::statvfs("/") {
            Ok(stat) => stat,
            Err(e) => return Outcome::failure(format!("Couldnt stat filesystem: {}", e)),
        };

        let size = stat.blocks() as u64 * stat.fragment_size() as u64;
        let avail = stat.blocks_available() as u64 * stat.fragment_size() as u64;
        let used = size.saturating_sub(stat.blocks_free() as u64 * stat.fragment_size() as u64);
        let used_pct = if size > 0 {
            used as f64 / size as f64 * 100.0
        } else {
            0.0
        };

        Outcome::lines(vec![
            "Filesystem\tSize\tUsed\tAvail\tUse%".to_string(),
            format!(
                "/\t\t{:.1}M\t{:.1}M\t{:.1}M\t{:.0}%",
                size as f64 / 1_000_000.0,
                used as f64 / 1_000_000.0,
                avail as f64 / 1_000_000.0,
                used_pct
            ),
        ])
    }

    #[cfg(not(unix))]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        Outcome::failure("Disk usage not available on this platform")
    }
}
