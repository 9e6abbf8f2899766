//! Unit tests for response header parsing and delimiter accumulation

use mprsh::fetch::{ContentClass, HeaderAccumulator, ResponseHeader};

#[test]
fn test_status_line_fields() {
    let header = ResponseHeader::parse(b"HTTP/1.0 200 OK\r\nContent-Type: text/plain");
    assert_eq!(header.version, "HTTP/1.0");
    assert_eq!(header.code, "200");
    assert_eq!(header.status, "OK");
    assert!(header.is_success());
}

#[test]
fn test_tolerant_parsing_skips_separator_less_lines() {
    let header = ResponseHeader::parse(
        b"HTTP/1.0 200 OK\r\ngarbage without separator\r\nContent-Type: text/plain\r\nX: 1",
    );
    assert_eq!(header.get("Content-Type"), Some("text/plain"));
    assert_eq!(header.get("X"), Some("1"));
    assert_eq!(header.fields().count(), 2);
}

#[test]
fn test_content_class_is_text_only_for_known_types() {
    let text = ResponseHeader::parse(b"HTTP/1.0 200 OK\r\nContent-Type: text/html");
    assert_eq!(text.content_class, ContentClass::Text);

    let binary = ResponseHeader::parse(b"HTTP/1.0 200 OK\r\nContent-Type: image/png");
    assert_eq!(binary.content_class, ContentClass::Binary);

    // Unknown charset parameter falls to binary, the match is exact
    let odd = ResponseHeader::parse(b"HTTP/1.0 200 OK\r\nContent-Type: text/plain; charset=utf-8");
    assert_eq!(odd.content_class, ContentClass::Binary);
}

#[test]
fn test_empty_status_line_is_not_success() {
    let header = ResponseHeader::parse(b"");
    assert!(!header.is_success());
    assert_eq!(header.code, "");
}

#[test]
fn test_accumulator_handles_every_split_point() {
    let raw = b"HTTP/1.0 200 OK\r\nA: 1\r\n\r\nbody bytes";

    for cut in 1..raw.len() {
        let mut acc = HeaderAccumulator::new();
        // Bytes past the split point are later body reads when the
        // delimiter already landed in the first chunk
        let (split, extra): (_, &[u8]) = match acc.feed(&raw[..cut]) {
            Some(split) => (split, &raw[cut..]),
            None => (
                acc.feed(&raw[cut..])
                    .unwrap_or_else(|| panic!("delimiter missed with cut at {}", cut)),
                &[],
            ),
        };

        let mut body = split.leftover.clone();
        body.extend_from_slice(extra);
        assert_eq!(split.header, b"HTTP/1.0 200 OK\r\nA: 1", "cut at {}", cut);
        assert_eq!(body, b"body bytes", "cut at {}", cut);
    }
}

#[test]
fn test_accumulator_reports_progress() {
    let mut acc = HeaderAccumulator::new();
    assert!(acc.is_empty());
    acc.feed(b"HTTP/1.0");
    assert_eq!(acc.len(), 8);
}
