//! Property tests for header parsing robustness
//!
//! The parser must never panic on arbitrary bytes, and the delimiter
//! accumulator must find the same split no matter how the stream is
//! chunked.

use proptest::prelude::*;

use mprsh::fetch::{HeaderAccumulator, ResponseHeader};

proptest! {
    #[test]
    fn parse_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = ResponseHeader::parse(&raw);
    }

    #[test]
    fn parse_tolerates_arbitrary_header_lines(lines in proptest::collection::vec("[ -~]{0,40}", 0..10)) {
        let mut raw = b"HTTP/1.0 200 OK".to_vec();
        for line in &lines {
            raw.extend_from_slice(b"\r\n");
            raw.extend_from_slice(line.as_bytes());
        }
        let header = ResponseHeader::parse(&raw);
        prop_assert_eq!(header.code.as_str(), "200");
        // Every parsed field must come from a line with the separator
        prop_assert!(header.fields().count() <= lines.len());
    }

    #[test]
    fn accumulator_split_is_chunking_independent(
        header in "[ -~]{0,60}",
        body in proptest::collection::vec(any::<u8>(), 0..60),
        cuts in proptest::collection::vec(1usize..20, 0..8),
    ) {
        // Delimiter-free header text by construction: strip any CR/LF
        let header: String = header.chars().filter(|c| *c != '\r' && *c != '\n').collect();
        let mut raw = header.clone().into_bytes();
        raw.extend_from_slice(b"\r\n\r\n");
        raw.extend_from_slice(&body);

        let mut acc = HeaderAccumulator::new();
        let mut found = None;
        let mut pos = 0usize;
        let mut cut_iter = cuts.iter();
        while pos < raw.len() && found.is_none() {
            let step = cut_iter.next().copied().unwrap_or(raw.len());
            let end = (pos + step).min(raw.len());
            found = acc.feed(&raw[pos..end]);
            pos = end;
        }

        let split = found.expect("delimiter must be found once all bytes are fed");
        prop_assert_eq!(split.header, header.into_bytes());
        // Body bytes after the found split point plus the leftover
        // reconstruct the original body
        let mut reconstructed = split.leftover.clone();
        reconstructed.extend_from_slice(&raw[pos..]);
        prop_assert_eq!(reconstructed, body);
    }
}
