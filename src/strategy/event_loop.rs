//! Event Loop and Memory Guard
//!
//! Drives an [`EventSource`] to completion, dispatching each event through
//! the name splitter, the context stack and the tree builder. Memory is
//! sampled every `sample_interval` events (starting with the first) before
//! the event is dispatched; growth beyond `memory_limit` since the loop
//! started aborts the parse.

use crate::config::ParserConfig;
use crate::core::chars::is_xml_whitespace;
use crate::core::qname::NameSplitter;
use crate::dom::builder::TreeBuilder;
use crate::dom::context::ContextStack;
use crate::dom::node::Attribute;
use crate::dom::FeedDocument;
use crate::error::ParseError;
use crate::memory::MemoryProbe;
use crate::reader::events::{EventSource, RawAttribute, XmlEvent};
use crate::resolve::UrlResolver;
use tracing::{debug, warn};

/// All mutable state of one parse
pub struct ParseContext<'r> {
    splitter: NameSplitter,
    stack: ContextStack,
    builder: TreeBuilder,
    resolver: &'r dyn UrlResolver,
    preserve_whitespace: bool,
}

impl<'r> ParseContext<'r> {
    pub fn new(config: &ParserConfig, resolver: &'r dyn UrlResolver) -> Self {
        let stack = ContextStack::new(config.document_base.clone());
        let builder = TreeBuilder::new(stack.top());
        ParseContext {
            splitter: NameSplitter::new(),
            stack,
            builder,
            resolver,
            preserve_whitespace: config.preserve_whitespace,
        }
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: XmlEvent) -> Result<(), ParseError> {
        match event {
            XmlEvent::ElementOpen {
                name,
                attributes,
                self_closing,
            } => {
                self.open(&name, &attributes);
                if self_closing {
                    self.close(&name)?;
                }
            }
            XmlEvent::ElementClose { name } => self.close(&name)?,
            XmlEvent::Text(value) => self.text(&value),
            XmlEvent::CData(value) => self.builder.append_text(&value),
        }
        Ok(())
    }

    fn open(&mut self, name: &str, raw: &[RawAttribute]) {
        let qname = self.splitter.split(name);
        let attributes: Vec<Attribute> = raw
            .iter()
            .map(|attr| {
                let split = self.splitter.split(&attr.name);
                Attribute {
                    namespace: split.namespace,
                    name: split.local,
                    value: attr.value.clone(),
                }
            })
            .collect();

        let frame = self.stack.enter(qname, &attributes, self.resolver);
        self.builder.open(frame, &attributes);
    }

    fn close(&mut self, name: &str) -> Result<(), ParseError> {
        if self.stack.depth() == 0 {
            return Err(ParseError::Invariant("close event without an open element"));
        }
        let qname = self.splitter.split(name);
        let top = self.stack.top();
        if top.namespace != qname.namespace || top.element != qname.local {
            return Err(ParseError::Invariant("close event does not match the open element"));
        }
        self.builder.close(top)?;
        self.stack.leave()?;
        Ok(())
    }

    fn text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if !self.preserve_whitespace
            && !self.builder.in_literal()
            && is_xml_whitespace(value)
        {
            return;
        }
        self.builder.append_text(value);
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Complete the tree; every element must have closed
    pub fn finish(self) -> Result<FeedDocument, ParseError> {
        if self.stack.depth() > 0 {
            return Err(ParseError::Invariant("input ended with unclosed elements"));
        }
        self.builder.finish()
    }
}

/// Run `source` to completion against `ctx`
pub fn run<S: EventSource>(
    mut source: S,
    mut ctx: ParseContext<'_>,
    config: &ParserConfig,
    probe: &dyn MemoryProbe,
) -> Result<FeedDocument, ParseError> {
    let interval = config.sample_interval.max(1);
    let limit = config.memory_limit;
    let baseline = probe.current_usage();
    let mut events = 0usize;
    debug!(baseline, limit, interval, "parse started");

    while let Some(event) = source.next_event() {
        if events % interval == 0 {
            let used = probe.current_usage();
            if used.saturating_sub(baseline) > limit {
                warn!(used, baseline, limit, events, "memory limit exceeded, aborting parse");
                return Err(ParseError::MemoryLimitExceeded { used });
            }
        }
        events += 1;
        ctx.handle(event)?;
    }

    if let Some(record) = source.error() {
        return Err(ParseError::Malformed(record.clone()));
    }

    let doc = ctx.finish()?;
    debug!(events, nodes = doc.node_count(), "parse finished");
    Ok(doc)
}
