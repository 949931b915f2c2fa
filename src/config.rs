//! Parser configuration

/// Default ceiling on memory growth during one parse (128 MiB)
pub const DEFAULT_MEMORY_LIMIT: usize = 128 * 1024 * 1024;

/// Default number of events between memory samples
pub const DEFAULT_SAMPLE_INTERVAL: usize = 300;

/// Tunables for a [`FeedParser`](crate::FeedParser)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Abort once memory grows by more than this many bytes
    pub memory_limit: usize,
    /// Sample memory on every Nth event
    pub sample_interval: usize,
    /// Base URI of the document itself, inherited by the root sentinel
    pub document_base: String,
    /// Keep whitespace-only text outside literal markup
    pub preserve_whitespace: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            memory_limit: DEFAULT_MEMORY_LIMIT,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            document_base: String::new(),
            preserve_whitespace: false,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = bytes;
        self
    }

    /// Zero is treated as one (sample every event)
    pub fn with_sample_interval(mut self, events: usize) -> Self {
        self.sample_interval = events.max(1);
        self
    }

    pub fn with_document_base(mut self, base: impl Into<String>) -> Self {
        self.document_base = base.into();
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.memory_limit, 128 * 1024 * 1024);
        assert_eq!(config.sample_interval, 300);
        assert!(config.document_base.is_empty());
        assert!(!config.preserve_whitespace);
    }

    #[test]
    fn test_sample_interval_floor() {
        let config = ParserConfig::new().with_sample_interval(0);
        assert_eq!(config.sample_interval, 1);
    }
}
