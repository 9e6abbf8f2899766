//! HTTP file retrieval built-in
//!
//! Validates the URL shape, then hands the transfer to the fetch
//! protocol ([`crate::fetch`]). The destination file name is the final
//! path segment of the URL.

use std::path::Path;

use super::{Command, Outcome, ShellContext};
use crate::fetch::{FetchError, HttpFetch};

/// `wget <url>`
pub struct Wget;

/// Host and path split out of a `[http://]host/path...` URL
#[derive(Debug, PartialEq, Eq)]
pub struct UrlParts {
    pub host: String,
    pub path: String,
    pub file_name: String,
}

/// Split a URL into host, request path and destination file name.
///
/// Rejects URLs without at least a host and one path segment, and URLs
/// whose final segment is empty (nothing to name the destination after).
pub fn split_url(url: &str) -> Option<UrlParts> {
    let stripped = url.strip_prefix("http://").unwrap_or(url);
    let (host, path) = stripped.split_once('/')?;
    if host.is_empty() || path.is_empty() {
        return None;
    }
    let file_name = path.rsplit('/').next()?;
    if file_name.is_empty() {
        return None;
    }
    Some(UrlParts {
        host: host.to_string(),
        path: path.to_string(),
        file_name: file_name.to_string(),
    })
}

impl Command for Wget {
    fn name(&self) -> &str {
        "wget"
    }

    fn help(&self) -> &str {
        "retrieve a file over http"
    }

    fn run(&self, args: &[String], ctx: &ShellContext) -> Outcome {
        let Some(url) = args.first() else {
            return Outcome::ok();
        };

        let Some(parts) = split_url(url) else {
            return Outcome::failure(format!("Invalid url: {}", url));
        };

        info!("fetching http://{}/{}", parts.host, parts.path);
        let fetch = HttpFetch::new(parts.host, parts.path).port(ctx.fetch_port);
        match fetch.download(Path::new(&parts.file_name)) {
            Ok(_) => Outcome::line(format!("Retrieved as file: {}", parts.file_name)),
            Err(FetchError::Status { header }) => {
                let mut output = vec!["Couldnt retrieve, HTTP header dump:".to_string()];
                output.extend(header.dump_lines());
                Outcome {
                    success: false,
                    output,
                    request: None,
                }
            }
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}
