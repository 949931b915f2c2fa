//! Parse Errors
//!
//! Two failure classes reach the caller: malformed input reported by the
//! tokenizer, and the memory guard aborting the event loop. A third variant
//! covers event streams that break the open/close discipline.

use thiserror::Error;

/// Flat error record handed to callers: code, message and position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Tokenizer error code, if the failure came from the tokenizer
    pub code: Option<i32>,
    /// Human readable message
    pub message: String,
    /// 1-based line of the failure
    pub line: Option<usize>,
    /// 1-based column of the failure
    pub column: Option<usize>,
}

impl ErrorRecord {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        ErrorRecord {
            code: Some(code),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a position computed from a byte offset into `input`
    pub fn at_offset(mut self, input: &[u8], offset: usize) -> Self {
        let (line, column) = line_column(input, offset);
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

/// Failure of a whole parse; no partial tree survives it
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{}", .0.message)]
    Malformed(ErrorRecord),

    #[error("Memory limit exceeded: more than {used} bytes used to parse")]
    MemoryLimitExceeded { used: usize },

    #[error("unbalanced event stream: {0}")]
    Invariant(&'static str),
}

impl ParseError {
    /// Error record for this failure
    pub fn record(&self) -> ErrorRecord {
        match self {
            ParseError::Malformed(record) => record.clone(),
            other => ErrorRecord {
                code: None,
                message: other.to_string(),
                line: None,
                column: None,
            },
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ParseError::Malformed(record) => record.code,
            _ => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Malformed(record) => record.line,
            _ => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            ParseError::Malformed(record) => record.column,
            _ => None,
        }
    }

    /// True for the memory guard abort
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, ParseError::MemoryLimitExceeded { .. })
    }
}

/// Convert a byte offset to a 1-based (line, column) pair
pub fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let head = &input[..offset];
    let line = memchr::memchr_iter(b'\n', head).count() + 1;
    let line_start = memchr::memrchr(b'\n', head).map_or(0, |pos| pos + 1);
    let column = std::str::from_utf8(&head[line_start..])
        .map(|s| s.chars().count())
        .unwrap_or(offset - line_start)
        + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_first_line() {
        assert_eq!(line_column(b"<a>", 0), (1, 1));
        assert_eq!(line_column(b"<a>", 2), (1, 3));
    }

    #[test]
    fn test_line_column_after_newlines() {
        let input = b"<a>\n  <b>\n</c>";
        assert_eq!(line_column(input, 10), (3, 1));
        assert_eq!(line_column(input, 6), (2, 3));
    }

    #[test]
    fn test_line_column_clamps_offset() {
        assert_eq!(line_column(b"ab", 99), (1, 3));
    }

    #[test]
    fn test_memory_message() {
        let err = ParseError::MemoryLimitExceeded { used: 42 };
        assert_eq!(
            err.to_string(),
            "Memory limit exceeded: more than 42 bytes used to parse"
        );
        assert!(err.is_resource_exhaustion());
        assert_eq!(err.record().code, None);
    }

    #[test]
    fn test_malformed_record() {
        let record = ErrorRecord::new(2, "mismatched end tag").at_offset(b"<a>\n</b>", 5);
        let err = ParseError::Malformed(record.clone());
        assert_eq!(err.to_string(), "mismatched end tag");
        assert_eq!(err.code(), Some(2));
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(2));
        assert_eq!(err.record(), record);
    }
}
