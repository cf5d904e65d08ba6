//! Windows-1252 text utilities for Fingerprint printers
//!
//! Fingerprint programs are plain 8-bit text. This module provides:
//! - Converting UTF-8 text to the printer's windows-1252 character set
//! - Quoting text as a Fingerprint string expression

use crate::error::{PrintError, PrintResult};

/// Double quote as a Fingerprint character function
const QUOTE_CHR: &str = "CHR$(34)";

/// Encode text as single-byte windows-1252
///
/// Uses the WHATWG windows-1252 mapping: Latin-1 letters keep their code
/// points, 0x80..=0x9F carry the typographic characters (`€`, `…`, `‘`),
/// and most C1 control characters are not representable. Characters
/// outside the code page are rejected instead of being replaced, so a label
/// never prints something other than what was asked.
pub fn encode_cp1252(s: &str) -> PrintResult<Vec<u8>> {
    if s.is_ascii() {
        return Ok(s.as_bytes().to_vec());
    }

    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(s);
    if had_errors {
        let bad: String = s
            .chars()
            .filter(|c| !is_cp1252_char(*c))
            .take(8)
            .collect();
        return Err(PrintError::Encoding(format!(
            "text {:?} contains characters outside windows-1252: {:?}",
            s, bad
        )));
    }
    Ok(bytes.into_owned())
}

/// Check whether every character of the text can be sent to the printer
pub fn is_cp1252(s: &str) -> bool {
    s.chars().all(is_cp1252_char)
}

fn is_cp1252_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    let (_, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    !had_errors
}

/// Quote text as a Fingerprint string expression
///
/// String literals cannot contain `"`, so embedded quotes are spliced in with
/// `CHR$(34)` and the pieces joined with `;`.
///
/// `12` becomes `"12"`, `say "hi"` becomes `"say ";CHR$(34);"hi";CHR$(34)`.
pub fn quote_text(s: &str) -> String {
    if !s.contains('"') {
        return format!("\"{}\"", s);
    }

    let segments: Vec<&str> = s.split('"').collect();
    let mut parts: Vec<String> = Vec::with_capacity(segments.len() * 2);
    for (idx, segment) in segments.iter().enumerate() {
        if !segment.is_empty() {
            parts.push(format!("\"{}\"", segment));
        }
        if idx < segments.len() - 1 {
            parts.push(QUOTE_CHR.to_string());
        }
    }
    parts.join(";")
}
