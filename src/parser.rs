//! Feed Parser
//!
//! Entry point tying the pieces together: input preparation, the
//! namespace-resolving reader and the event loop.

use crate::config::ParserConfig;
use crate::core::encoding::decode_input;
use crate::dom::FeedDocument;
use crate::error::ParseError;
use crate::memory::{AllocatorProbe, MemoryProbe};
use crate::reader::{EventSource, FeedReader};
use crate::resolve::{UrlJoin, UrlResolver};
use crate::strategy::event_loop::{self, ParseContext};
use std::fmt;
use std::sync::Arc;

/// Reusable parser; every call to [`parse`](FeedParser::parse) gets fresh
/// per-parse state, so one parser may serve many threads.
#[derive(Clone)]
pub struct FeedParser {
    config: ParserConfig,
    resolver: Arc<dyn UrlResolver>,
    probe: Arc<dyn MemoryProbe>,
}

impl FeedParser {
    pub fn new(config: ParserConfig) -> Self {
        FeedParser {
            config,
            resolver: Arc::new(UrlJoin),
            probe: Arc::new(AllocatorProbe),
        }
    }

    /// Replace the `xml:base` resolver
    pub fn with_resolver(mut self, resolver: impl UrlResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the memory probe sampled by the guard
    pub fn with_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse raw bytes (UTF-8, or UTF-16/UTF-32 with a BOM)
    pub fn parse(&self, input: &[u8]) -> Result<FeedDocument, ParseError> {
        let text = decode_input(input).map_err(ParseError::Malformed)?;
        self.parse_str(&text)
    }

    /// Parse text that is already UTF-8
    pub fn parse_str(&self, input: &str) -> Result<FeedDocument, ParseError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        self.parse_source(FeedReader::new(input))
    }

    /// Build a tree from pre-tokenized events
    pub fn parse_source<S: EventSource>(&self, source: S) -> Result<FeedDocument, ParseError> {
        let ctx = ParseContext::new(&self.config, self.resolver.as_ref());
        event_loop::run(source, ctx, &self.config, self.probe.as_ref())
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl fmt::Debug for FeedParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedParser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
