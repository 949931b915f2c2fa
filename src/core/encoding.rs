//! Input Encoding Detection and Conversion
//!
//! Strips byte order marks and converts UTF-16/UTF-32 input to UTF-8 before
//! the tokenizer sees it. BOMs are checked longest first so a UTF-32 LE mark
//! is not mistaken for a UTF-16 LE one.

use crate::error::ErrorRecord;
use std::borrow::Cow;

/// Error code for undecodable input
pub const ENCODING_ERROR: i32 = 5;

/// Encoding announced by a byte order mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl FeedEncoding {
    /// Detect encoding from the byte order mark, returning the BOM length
    pub fn detect(input: &[u8]) -> (Self, usize) {
        if input.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
            (FeedEncoding::Utf32Be, 4)
        } else if input.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
            (FeedEncoding::Utf32Le, 4)
        } else if input.starts_with(&[0xFE, 0xFF]) {
            (FeedEncoding::Utf16Be, 2)
        } else if input.starts_with(&[0xFF, 0xFE]) {
            (FeedEncoding::Utf16Le, 2)
        } else if input.starts_with(&[0xEF, 0xBB, 0xBF]) {
            (FeedEncoding::Utf8, 3)
        } else {
            (FeedEncoding::Utf8, 0)
        }
    }
}

/// Strip any BOM and return the input as UTF-8 text
pub fn decode_input(input: &[u8]) -> Result<Cow<'_, str>, ErrorRecord> {
    let (encoding, bom) = FeedEncoding::detect(input);
    let bytes = &input[bom..];

    match encoding {
        FeedEncoding::Utf8 => std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| {
            ErrorRecord::new(ENCODING_ERROR, format!("Input is not proper UTF-8: {}", e))
                .at_offset(bytes, e.valid_up_to())
        }),
        FeedEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes).map(Cow::Owned),
        FeedEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes).map(Cow::Owned),
        FeedEncoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes).map(Cow::Owned),
        FeedEncoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes).map(Cow::Owned),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, ErrorRecord> {
    if bytes.len() % 2 != 0 {
        return Err(ErrorRecord::new(ENCODING_ERROR, "Invalid UTF-16: odd number of bytes"));
    }
    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units)
        .map_err(|e| ErrorRecord::new(ENCODING_ERROR, format!("Invalid UTF-16: {}", e)))
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> Result<String, ErrorRecord> {
    if bytes.len() % 4 != 0 {
        return Err(ErrorRecord::new(ENCODING_ERROR, "Invalid UTF-32: truncated code unit"));
    }
    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let scalar = unit([chunk[0], chunk[1], chunk[2], chunk[3]]);
            char::from_u32(scalar).ok_or_else(|| {
                ErrorRecord::new(ENCODING_ERROR, format!("Invalid UTF-32 scalar: {:#x}", scalar))
            })
        })
        .collect()
}
