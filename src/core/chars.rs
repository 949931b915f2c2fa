//! XML character classes

/// Check if byte is XML whitespace (S production: space, tab, CR, LF)
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// True if `text` consists only of XML whitespace (or is empty).
///
/// Other Unicode spaces such as U+00A0 are content, not whitespace.
#[inline]
pub fn is_xml_whitespace(text: &str) -> bool {
    text.bytes().all(is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_whitespace() {
        assert!(is_xml_whitespace(" \t\r\n"));
        assert!(is_xml_whitespace(""));
        assert!(!is_xml_whitespace(" x "));
    }

    #[test]
    fn test_unicode_spaces_are_content() {
        assert!(!is_xml_whitespace("\u{a0}"));
        assert!(!is_xml_whitespace("\u{3000}"));
        assert!(!is_xml_whitespace(" \u{2028} "));
    }
}
