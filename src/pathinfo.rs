//! Path status summaries for file-oriented commands
//!
//! A [`PathStatus`] is derived on demand from a single filesystem query
//! and never cached; commands consult it before mutating anything so a
//! failed validation leaves no partial effect.

use std::path::Path;

/// Snapshot of what the filesystem says about one path
#[derive(Debug, Clone)]
pub struct PathStatus {
    /// Whether the path exists at all
    pub exists: bool,
    /// Whether it is a regular file
    pub is_file: bool,
    /// Whether it is a directory
    pub is_dir: bool,
    /// Size in bytes (zero for directories and missing paths)
    pub size_bytes: u64,
    /// Human-readable size, decimal units
    pub human_size: String,
    /// Error text for missing or unreadable paths
    pub error: String,
}

impl PathStatus {
    /// Query the filesystem for `path`
    pub fn query(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(meta) => {
                let size_bytes = if meta.is_file() { meta.len() } else { 0 };
                Self {
                    exists: true,
                    is_file: meta.is_file(),
                    is_dir: meta.is_dir(),
                    size_bytes,
                    human_size: human_size(size_bytes),
                    error: String::new(),
                }
            }
            Err(_) => Self {
                exists: false,
                is_file: false,
                is_dir: false,
                size_bytes: 0,
                human_size: human_size(0),
                error: format!("No such file or directory: {}", path.display()),
            },
        }
    }
}

/// Format a byte count with decimal units and one fractional digit
pub fn human_size(bytes: u64) -> String {
    if bytes < 1_000 {
        format!("{:.1}B", bytes as f64)
    } else if bytes < 1_000_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    }
}
