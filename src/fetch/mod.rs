//! Streaming HTTP fetch protocol
//!
//! Drives a socket byte stream through header-parse and body-copy states:
//! `CONNECTING -> HEADER_WAIT -> (TEXT_COPY | BINARY_COPY | FAILED) -> CLOSED`.
//!
//! This is deliberately not a general HTTP client. It issues a single
//! unauthenticated `HTTP/1.0` GET with no TLS, no redirects, no chunked
//! transfer-encoding, no connection reuse and no retries. Reads are
//! blocking; a stalled server stalls the calling shell for the duration
//! of the transfer. That is an accepted constraint of the target
//! deployment (one interactive user, one connection), not an oversight.

pub mod header;

pub use header::{ContentClass, ResponseHeader};

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};

/// Read granularity for socket chunks
const READ_CHUNK: usize = 1024;

/// Header/body delimiter in the response stream
const HEADER_DELIMITER: &[u8] = b"\r\n\r\n";

/// Upper bound on accumulated header bytes before the transfer is abandoned
const MAX_HEADER_BYTES: usize = 16 * 1024;

/// Fetch protocol failures
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Host name did not resolve to any address
    #[error("Could not resolve host: {host}")]
    Resolve { host: String },

    /// TCP connect failed
    #[error("Could not connect to {addr}: {reason}")]
    Connect { addr: SocketAddr, reason: String },

    /// Server answered with a non-200 status; the sealed header table
    /// travels with the error so the caller can render a diagnostic dump
    #[error("Server returned HTTP {}", .header.code)]
    Status { header: ResponseHeader },

    /// Stream ended before the header/body delimiter arrived
    #[error("Connection closed before headers completed")]
    TruncatedHeader,

    /// Server kept sending header bytes past the accumulation bound
    #[error("Response headers exceed {MAX_HEADER_BYTES} bytes")]
    HeaderTooLarge,

    /// Socket or destination-file I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result of a completed transfer
#[derive(Debug)]
pub struct FetchOutcome {
    /// Sealed response header table
    pub header: ResponseHeader,
    /// Body bytes delivered to the sink
    pub bytes_written: u64,
    /// Destination the body was written to
    pub dest: PathBuf,
}

/// Growable accumulation buffer that finds the header/body delimiter
/// across read boundaries.
///
/// The delimiter may be split between two (or more) reads in arbitrary
/// ways; `feed` keeps every byte seen so far and rescans only the bytes
/// a previous scan could not have ruled out.
#[derive(Debug, Default)]
pub struct HeaderAccumulator {
    buf: Vec<u8>,
    scanned: usize,
}

/// Header bytes and the body bytes that arrived bundled with them
#[derive(Debug, PartialEq)]
pub struct HeaderSplit {
    /// Bytes before the delimiter
    pub header: Vec<u8>,
    /// Bytes after the delimiter, the first body write
    pub leftover: Vec<u8>,
}

impl HeaderAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Feed one read chunk; returns the split once the delimiter is found.
    ///
    /// Returns `None` while the delimiter has not yet appeared.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<HeaderSplit> {
        self.buf.extend_from_slice(chunk);

        if self.buf.len() < HEADER_DELIMITER.len() {
            return None;
        }

        for i in self.scanned..=self.buf.len() - HEADER_DELIMITER.len() {
            if &self.buf[i..i + HEADER_DELIMITER.len()] == HEADER_DELIMITER {
                let leftover = self.buf[i + HEADER_DELIMITER.len()..].to_vec();
                let header = self.buf[..i].to_vec();
                return Some(HeaderSplit { header, leftover });
            }
        }

        // A later chunk may complete a delimiter starting in the last 3 bytes
        self.scanned = self.buf.len() - (HEADER_DELIMITER.len() - 1);
        None
    }
}

/// Destination sink, fixed to text or binary for the whole transfer
enum BodySink {
    Text(BufWriter<File>),
    Binary(BufWriter<File>),
}

impl BodySink {
    fn create(dest: &Path, class: ContentClass) -> std::io::Result<Self> {
        let file = BufWriter::new(File::create(dest)?);
        Ok(match class {
            ContentClass::Text => BodySink::Text(file),
            ContentClass::Binary => BodySink::Binary(file),
        })
    }

    /// Write one body chunk, returning the number of source bytes consumed
    fn write_chunk(&mut self, chunk: &[u8]) -> std::io::Result<u64> {
        match self {
            BodySink::Text(file) => {
                let decoded = String::from_utf8_lossy(chunk);
                file.write_all(decoded.as_bytes())?;
            }
            BodySink::Binary(file) => {
                file.write_all(chunk)?;
            }
        }
        Ok(chunk.len() as u64)
    }

    fn finish(self) -> std::io::Result<()> {
        match self {
            BodySink::Text(mut file) | BodySink::Binary(mut file) => file.flush(),
        }
    }
}

/// A single fixed-format GET against a bare host/path pair
#[derive(Debug, Clone)]
pub struct HttpFetch {
    host: String,
    path: String,
    port: u16,
}

impl HttpFetch {
    /// Describe a fetch of `http://<host>/<path>` on the default port
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            port: 80,
        }
    }

    /// Override the server port (tests and non-standard deployments)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Run the whole protocol, writing the body to `dest`.
    ///
    /// `dest` is only created after a 200 status line has been parsed, so
    /// a failed fetch never leaves a file behind. The socket is closed on
    /// every exit path.
    pub fn download(&self, dest: &Path) -> Result<FetchOutcome, FetchError> {
        // CONNECTING
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|_| FetchError::Resolve {
                host: self.host.clone(),
            })?
            .next()
            .ok_or_else(|| FetchError::Resolve {
                host: self.host.clone(),
            })?;

        debug!("connecting to {} for /{}", addr, self.path);
        let mut stream = TcpStream::connect(addr).map_err(|e| FetchError::Connect {
            addr,
            reason: e.to_string(),
        })?;

        let request = format!(
            "GET /{} HTTP/1.0\r\nHost: {}\r\n\r\n",
            self.path, self.host
        );
        stream.write_all(request.as_bytes())?;

        // Socket closes when `stream` drops, on success and failure alike
        transfer(&mut stream, dest)
    }
}

/// Drive `HEADER_WAIT` and the body-copy states over an already-open
/// byte stream.
///
/// Split out from [`HttpFetch::download`] so the incremental parsing can
/// be exercised against an injected byte source.
pub fn transfer<R: Read>(stream: &mut R, dest: &Path) -> Result<FetchOutcome, FetchError> {
    let mut accumulator = HeaderAccumulator::new();
    let mut chunk = [0u8; READ_CHUNK];

    // HEADER_WAIT
    let (header, first_body) = loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(FetchError::TruncatedHeader);
        }
        if let Some(split) = accumulator.feed(&chunk[..n]) {
            break (ResponseHeader::parse(&split.header), split.leftover);
        }
        if accumulator.len() > MAX_HEADER_BYTES {
            return Err(FetchError::HeaderTooLarge);
        }
    };

    if !header.is_success() {
        // FAILED: stop before the destination is ever created
        debug!("fetch failed with status {} {}", header.code, header.status);
        return Err(FetchError::Status { header });
    }

    // TEXT_COPY / BINARY_COPY
    let mut sink = BodySink::create(dest, header.content_class)?;
    let mut bytes_written = sink.write_chunk(&first_body)?;

    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            // CLOSED
            break;
        }
        bytes_written += sink.write_chunk(&chunk[..n])?;
    }

    sink.finish()?;
    debug!("fetch complete, {} body bytes", bytes_written);

    Ok(FetchOutcome {
        header,
        bytes_written,
        dest: dest.to_path_buf(),
    })
}
