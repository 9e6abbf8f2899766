//! Network status built-in

use super::{Command, Outcome, ShellContext};

/// `ifconfig`, reporting interface names, link state and hardware address
pub struct Ifconfig;

impl Command for Ifconfig {
    fn name(&self) -> &str {
        "ifconfig"
    }

    fn help(&self) -> &str {
        "prints network information"
    }

    #[cfg(target_os = "linux")]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        let entries = match std::fs::read_dir("/sys/class/net") {
            Ok(entries) => entries,
            Err(e) => return Outcome::failure(format!("Couldnt read network interfaces: {}", e)),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        if names.is_empty() {
            return Outcome::failure("No network interfaces found");
        }

        let mut out = Vec::new();
        for name in names {
            let base = format!("/sys/class/net/{}", name);
            let state = read_trimmed(&format!("{}/operstate", base))
                .map(|s| s.to_uppercase())
                .unwrap_or_else(|| "UNKNOWN".to_string());
            let mac = read_trimmed(&format!("{}/address", base))
                .unwrap_or_else(|| "00:00:00:00:00:00".to_string());
            out.push(format!("{} <{}>", name, state));
            out.push(format!("ether {}", mac));
        }
        Outcome::lines(out)
    }

    #[cfg(not(target_os = "linux"))]
    fn run(&self, _args: &[String], _ctx: &ShellContext) -> Outcome {
        Outcome::failure("Network information not available on this platform")
    }
}

#[cfg(target_os = "linux")]
fn read_trimmed(path: &str) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}
