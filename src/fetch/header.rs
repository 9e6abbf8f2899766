//! HTTP response header table
//!
//! Parses the bytes before the header/body delimiter into a sealed
//! key/value table plus the status-line fields. Parsing is tolerant:
//! a malformed header line is skipped, never fatal.

/// Text/binary classification of a fetched body, derived from the
/// response's `Content-Type` and fixed for the whole transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// Body is written through a decoding text sink
    Text,
    /// Body is written verbatim as raw bytes
    Binary,
}

/// Content types the reference servers label plain text with.
const TEXT_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "text/html",
    "text/html; charset=iso-8859-1",
];

/// Parsed response header table
///
/// Built once from the bytes preceding the `\r\n\r\n` delimiter and
/// never mutated afterward.
#[derive(Debug, Clone)]
pub struct ResponseHeader {
    /// HTTP version token from the status line
    pub version: String,
    /// Status code as the server sent it (e.g. `"200"`)
    pub code: String,
    /// Status text, everything after the code
    pub status: String,
    /// Header fields in arrival order
    fields: Vec<(String, String)>,
    /// Body classification from `Content-Type`
    pub content_class: ContentClass,
}

impl ResponseHeader {
    /// Parse raw header bytes (without the trailing delimiter)
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let mut lines = text.lines();

        let (version, code, status) = match lines.next() {
            Some(status_line) => {
                let mut parts = status_line.split(' ');
                let version = parts.next().unwrap_or("").to_string();
                let code = parts.next().unwrap_or("").to_string();
                let status = parts.collect::<Vec<_>>().join(" ");
                (version, code, status)
            }
            None => (String::new(), String::new(), String::new()),
        };

        let mut fields = Vec::new();
        for line in lines {
            // Lines without the separator are skipped, not fatal
            match line.split_once(": ") {
                Some((key, value)) => fields.push((key.to_string(), value.to_string())),
                None => continue,
            }
        }

        let content_class = match fields
            .iter()
            .find(|(key, _)| key == "Content-Type")
            .map(|(_, value)| value.as_str())
        {
            Some(value) if TEXT_CONTENT_TYPES.contains(&value) => ContentClass::Text,
            _ => ContentClass::Binary,
        };

        Self {
            version,
            code,
            status,
            fields,
            content_class,
        }
    }

    /// Look up a header field by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Header fields in arrival order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the status line carried a 200 code
    pub fn is_success(&self) -> bool {
        self.code == "200"
    }

    /// Render the table as `key = value` diagnostic lines
    pub fn dump_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Version = {}", self.version),
            format!("Code = {}", self.code),
            format!("Status = {}", self.status),
        ];
        for (key, value) in &self.fields {
            lines.push(format!("{} = {}", key, value));
        }
        lines
    }
}
