//! Tolerant decoding of HTML/CSS files.
//!
//! Uses encoding_rs so files with a BOM or stray non-UTF-8 bytes still
//! load instead of failing the whole open operation.

use std::io;
use std::path::Path;

/// Decode bytes as UTF-8, replacing invalid sequences and stripping a
/// leading BOM if present.
pub fn decode_bytes(data: &[u8]) -> String {
    let (decoded, _, _) = encoding_rs::UTF_8.decode(data);
    decoded.into_owned()
}

/// Read a file and decode it tolerantly.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(decode_bytes(b"<p>Hello</p>"), "<p>Hello</p>");
    }

    #[test]
    fn test_bom_is_stripped() {
        let data: &[u8] = &[0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_bytes(data), "hi");
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let data: &[u8] = &[b'a', 0xFF, b'b'];
        let decoded = decode_bytes(data);
        assert!(decoded.starts_with('a'));
        assert!(decoded.ends_with('b'));
        assert!(decoded.contains('\u{FFFD}'));
    }
}
