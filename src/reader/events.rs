//! XML Event Types
//!
//! The tree builder consumes a flat stream of element opens, closes and
//! text runs. Names are combined tokens (`"<namespace-uri> <local-name>"`,
//! or a bare local name), see [`crate::core::qname`].

use crate::core::qname::join_token;
use crate::error::ErrorRecord;

/// One attribute as delivered by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Combined namespace/local-name token
    pub name: String,
    /// Decoded value
    pub value: String,
}

impl RawAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        RawAttribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Attribute in a namespace
    pub fn namespaced(namespace: &str, local: &str, value: impl Into<String>) -> Self {
        RawAttribute {
            name: join_token(namespace, local),
            value: value.into(),
        }
    }
}

/// Parse event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Start of an element; `self_closing` for `<name/>`
    ElementOpen {
        name: String,
        attributes: Vec<RawAttribute>,
        self_closing: bool,
    },
    /// End of an element
    ElementClose { name: String },
    /// Character data, entities decoded
    Text(String),
    /// Content of a CDATA section, verbatim
    CData(String),
}

impl XmlEvent {
    /// Open event without attributes
    pub fn open(name: impl Into<String>) -> Self {
        XmlEvent::ElementOpen {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    pub fn open_with(name: impl Into<String>, attributes: Vec<RawAttribute>) -> Self {
        XmlEvent::ElementOpen {
            name: name.into(),
            attributes,
            self_closing: false,
        }
    }

    pub fn empty(name: impl Into<String>, attributes: Vec<RawAttribute>) -> Self {
        XmlEvent::ElementOpen {
            name: name.into(),
            attributes,
            self_closing: true,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        XmlEvent::ElementClose { name: name.into() }
    }

    pub fn text(value: impl Into<String>) -> Self {
        XmlEvent::Text(value.into())
    }

    pub fn cdata(value: impl Into<String>) -> Self {
        XmlEvent::CData(value.into())
    }

    /// Check if this is an element open event
    pub fn is_open(&self) -> bool {
        matches!(self, XmlEvent::ElementOpen { .. })
    }

    /// Check if this is an element close event
    pub fn is_close(&self) -> bool {
        matches!(self, XmlEvent::ElementClose { .. })
    }
}

/// Pull source of parse events.
///
/// `next_event` returns `None` once input is exhausted or the tokenizer hit
/// a fatal error; `error` then distinguishes the two.
pub trait EventSource {
    fn next_event(&mut self) -> Option<XmlEvent>;

    /// Terminal tokenizer error, if any
    fn error(&self) -> Option<&ErrorRecord> {
        None
    }
}

/// Event source over any iterator of events, optionally ending in an error
pub struct IterSource<I> {
    events: I,
    error: Option<ErrorRecord>,
}

impl<I: Iterator<Item = XmlEvent>> IterSource<I> {
    pub fn new(events: impl IntoIterator<IntoIter = I, Item = XmlEvent>) -> Self {
        IterSource {
            events: events.into_iter(),
            error: None,
        }
    }

    /// Report `error` once the events run out
    pub fn failing_with(mut self, error: ErrorRecord) -> Self {
        self.error = Some(error);
        self
    }
}

impl<I: Iterator<Item = XmlEvent>> EventSource for IterSource<I> {
    fn next_event(&mut self) -> Option<XmlEvent> {
        self.events.next()
    }

    fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Option<XmlEvent> {
        (**self).next_event()
    }

    fn error(&self) -> Option<&ErrorRecord> {
        (**self).error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_attribute_token() {
        let attr = RawAttribute::namespaced("http://www.w3.org/XML/1998/namespace", "lang", "en");
        assert_eq!(attr.name, "http://www.w3.org/XML/1998/namespace lang");
        assert_eq!(RawAttribute::namespaced("", "href", "x").name, "href");
    }

    #[test]
    fn test_iter_source() {
        let mut source = IterSource::new(vec![XmlEvent::open("a"), XmlEvent::close("a")]);
        assert!(source.next_event().is_some_and(|e| e.is_open()));
        assert!(source.next_event().is_some_and(|e| e.is_close()));
        assert!(source.next_event().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_iter_source_error() {
        let source = IterSource::new(Vec::new()).failing_with(ErrorRecord::new(1, "boom"));
        assert_eq!(source.error().map(|e| e.message.as_str()), Some("boom"));
    }
}
