//! Namespace-Resolving Feed Reader
//!
//! Adapts `quick_xml::NsReader` to [`EventSource`]. Element and attribute
//! names come out as combined tokens with their namespace URI already
//! resolved. Comments, processing instructions, DOCTYPE and the XML
//! declaration never reach the tree builder.

use super::events::{EventSource, RawAttribute, XmlEvent};
use crate::core::chars::is_xml_whitespace;
use crate::core::namespace::ns;
use crate::core::qname::join_token;
use crate::error::ErrorRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::borrow::Cow;
use tracing::warn;

/// Error codes reported through [`ErrorRecord::code`]
pub mod codes {
    pub const SYNTAX: i32 = 1;
    pub const ILL_FORMED: i32 = 2;
    pub const INVALID_ATTRIBUTE: i32 = 3;
    pub const ESCAPE: i32 = 4;
    pub const ENCODING: i32 = crate::core::encoding::ENCODING_ERROR;
    pub const UNCLOSED: i32 = 6;
    pub const IO: i32 = 7;
    pub const NAMESPACE: i32 = 8;
    pub const OTHER: i32 = 9;
}

/// Pull reader producing [`XmlEvent`]s from UTF-8 text
pub struct FeedReader<'a> {
    input: &'a str,
    reader: NsReader<&'a [u8]>,
    depth: usize,
    seen_root: bool,
    error: Option<ErrorRecord>,
    done: bool,
}

impl<'a> FeedReader<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut reader = NsReader::from_str(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = false;
        config.check_end_names = true;

        FeedReader {
            input,
            reader,
            depth: 0,
            seen_root: false,
            error: None,
            done: false,
        }
    }

    /// Current element nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn fail(&mut self, code: i32, message: impl Into<String>, offset: usize) {
        let record = ErrorRecord::new(code, message).at_offset(self.input.as_bytes(), offset);
        warn!(code, message = %record.message, line = ?record.line, "malformed feed input");
        self.error = Some(record);
        self.done = true;
    }

    fn position(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    fn read(&mut self) -> Result<Option<XmlEvent>, (i32, String, usize)> {
        let (resolved, event) = match self.reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => {
                let offset = self.reader.error_position() as usize;
                return Err((error_code(&e), e.to_string(), offset));
            }
        };
        let namespace = namespace_of(resolved);

        match event {
            Event::Start(start) | Event::Empty(start) if self.depth == 0 && self.seen_root => Err((
                codes::ILL_FORMED,
                format!(
                    "Extra content at the end of the document: <{}>",
                    String::from_utf8_lossy(start.name().as_ref())
                ),
                self.position(),
            )),

            Event::Start(start) => {
                let event = self.open_event(namespace, &start, false)?;
                self.depth += 1;
                self.seen_root = true;
                Ok(Some(event))
            }

            Event::Empty(start) => {
                let event = self.open_event(namespace, &start, true)?;
                self.seen_root = true;
                Ok(Some(event))
            }

            Event::End(end) => {
                let namespace = namespace.map_err(|msg| (codes::NAMESPACE, msg, self.position()))?;
                self.depth = self.depth.saturating_sub(1);
                let local = utf8(end.local_name().into_inner(), self.position())?;
                Ok(Some(XmlEvent::close(join_token(&namespace, &local))))
            }

            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| (error_code(&e), e.to_string(), self.position()))?;
                if self.depth == 0 {
                    if !is_xml_whitespace(&value) {
                        return Err((
                            codes::ILL_FORMED,
                            "Text content not allowed outside the document element".to_string(),
                            self.position(),
                        ));
                    }
                    return Ok(None);
                }
                if value.is_empty() {
                    return Ok(None);
                }
                Ok(Some(XmlEvent::Text(value.into_owned())))
            }

            Event::CData(cdata) if self.depth > 0 => {
                let bytes = cdata.into_inner();
                let value = utf8(&bytes, self.position())?;
                Ok(Some(XmlEvent::CData(value.into_owned())))
            }

            Event::CData(_) => Err((
                codes::ILL_FORMED,
                "CDATA section not allowed outside the document element".to_string(),
                self.position(),
            )),

            Event::Eof => {
                self.done = true;
                if self.depth > 0 {
                    return Err((
                        codes::UNCLOSED,
                        format!("Premature end of data: {} unclosed element(s)", self.depth),
                        self.input.len(),
                    ));
                }
                if !self.seen_root {
                    return Err((codes::SYNTAX, "Document is empty".to_string(), self.input.len()));
                }
                Ok(None)
            }

            _ => Ok(None),
        }
    }

    fn open_event(
        &self,
        namespace: Result<String, String>,
        start: &BytesStart<'a>,
        self_closing: bool,
    ) -> Result<XmlEvent, (i32, String, usize)> {
        let position = self.position();
        let namespace = namespace.map_err(|msg| (codes::NAMESPACE, msg, position))?;
        let local = utf8(start.local_name().into_inner(), position)?;

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| (codes::INVALID_ATTRIBUTE, e.to_string(), position))?;
            let key = attr.key.as_ref();

            let (attr_ns, attr_local) = if key == b"xmlns" {
                (ns::XMLNS.to_string(), Cow::Borrowed("xmlns"))
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                (ns::XMLNS.to_string(), utf8(prefix, position)?)
            } else {
                let (resolved, local) = self.reader.resolve_attribute(attr.key);
                let attr_ns = namespace_of(resolved).map_err(|msg| (codes::NAMESPACE, msg, position))?;
                (attr_ns, utf8(local.into_inner(), position)?)
            };

            let value = attr
                .unescape_value()
                .map_err(|e| (error_code(&e), e.to_string(), position))?;
            attributes.push(RawAttribute::namespaced(&attr_ns, &attr_local, value.into_owned()));
        }

        Ok(XmlEvent::ElementOpen {
            name: join_token(&namespace, &local),
            attributes,
            self_closing,
        })
    }
}

impl EventSource for FeedReader<'_> {
    fn next_event(&mut self) -> Option<XmlEvent> {
        while !self.done {
            match self.read() {
                Ok(Some(event)) => return Some(event),
                Ok(None) => continue,
                Err((code, message, offset)) => self.fail(code, message, offset),
            }
        }
        None
    }

    fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }
}

/// Owned namespace URI for a resolution result; the `xml` prefix is always
/// bound even if the tokenizer does not pre-declare it.
fn namespace_of(resolved: ResolveResult<'_>) -> Result<String, String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(ns::XML.to_string()),
        ResolveResult::Unknown(prefix) => Err(format!(
            "Namespace prefix {} is not defined",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

fn utf8(bytes: &[u8], position: usize) -> Result<Cow<'_, str>, (i32, String, usize)> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| (codes::ENCODING, e.to_string(), position))
}

fn error_code(error: &quick_xml::Error) -> i32 {
    use quick_xml::errors::IllFormedError;
    use quick_xml::Error;
    match error {
        Error::Io(_) => codes::IO,
        Error::Syntax(_) => codes::SYNTAX,
        Error::IllFormed(IllFormedError::MissingEndTag(_)) => codes::UNCLOSED,
        Error::IllFormed(_) => codes::ILL_FORMED,
        Error::InvalidAttr(_) => codes::INVALID_ATTRIBUTE,
        Error::Escape(_) => codes::ESCAPE,
        _ => codes::OTHER,
    }
}

/// Tokenize a whole document, returning events and the terminal error
pub fn read_events(input: &str) -> (Vec<XmlEvent>, Option<ErrorRecord>) {
    let mut reader = FeedReader::new(input);
    let mut events = Vec::new();
    while let Some(event) = reader.next_event() {
        events.push(event);
    }
    let error = reader.error().cloned();
    (events, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let (events, error) = read_events("<root>hello</root>");
        assert!(error.is_none());
        assert_eq!(
            events,
            vec![XmlEvent::open("root"), XmlEvent::text("hello"), XmlEvent::close("root")]
        );
    }

    #[test]
    fn test_default_namespace() {
        let (events, _) = read_events(r#"<feed xmlns="http://www.w3.org/2005/Atom"><id>1</id></feed>"#);
        assert_eq!(
            events[0],
            XmlEvent::open_with(
                "http://www.w3.org/2005/Atom feed",
                vec![RawAttribute::namespaced(ns::XMLNS, "xmlns", "http://www.w3.org/2005/Atom")]
            )
        );
        assert_eq!(events[1], XmlEvent::open("http://www.w3.org/2005/Atom id"));
        assert_eq!(events[4], XmlEvent::close("http://www.w3.org/2005/Atom feed"));
    }

    #[test]
    fn test_prefixed_names_and_xml_attributes() {
        let input = r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:creator xml:lang="fr" role="x">A</dc:creator></rss>"#;
        let (events, error) = read_events(input);
        assert!(error.is_none());
        assert_eq!(
            events[1],
            XmlEvent::open_with(
                "http://purl.org/dc/elements/1.1/ creator",
                vec![
                    RawAttribute::namespaced(ns::XML, "lang", "fr"),
                    RawAttribute::new("role", "x"),
                ]
            )
        );
    }

    #[test]
    fn test_empty_element() {
        let (events, _) = read_events(r#"<a><br class="x"/></a>"#);
        assert_eq!(events[1], XmlEvent::empty("br", vec![RawAttribute::new("class", "x")]));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_entities_and_cdata() {
        let (events, _) = read_events("<a>x &amp; y<![CDATA[<b>&amp;</b>]]></a>");
        assert_eq!(events[1], XmlEvent::text("x & y"));
        assert_eq!(events[2], XmlEvent::cdata("<b>&amp;</b>"));
    }

    #[test]
    fn test_skips_comments_and_declarations() {
        let (events, error) =
            read_events("<?xml version=\"1.0\"?>\n<!-- c --><a><?pi x?><!-- d --></a>\n");
        assert!(error.is_none());
        assert_eq!(events, vec![XmlEvent::open("a"), XmlEvent::close("a")]);
    }

    #[test]
    fn test_mismatched_end_tag() {
        let (events, error) = read_events("<a>\n<b></c></a>");
        let error = error.unwrap();
        assert_eq!(error.code, Some(codes::ILL_FORMED));
        assert_eq!(error.line, Some(2));
        assert_eq!(events.last(), Some(&XmlEvent::open("b")));
    }

    #[test]
    fn test_unclosed_at_eof() {
        let (_, error) = read_events("<rss><channel>");
        assert_eq!(error.unwrap().code, Some(codes::UNCLOSED));
    }

    #[test]
    fn test_undeclared_prefix() {
        let (_, error) = read_events("<a><x:b/></a>");
        assert_eq!(error.unwrap().code, Some(codes::NAMESPACE));
    }

    #[test]
    fn test_second_root() {
        let (_, error) = read_events("<a/><b/>");
        assert_eq!(error.unwrap().code, Some(codes::ILL_FORMED));
    }

    #[test]
    fn test_non_breaking_space_after_root() {
        let (_, error) = read_events("<rss/>\u{a0}");
        assert_eq!(error.unwrap().code, Some(codes::ILL_FORMED));

        let (_, error) = read_events("<rss/>\r\n\t ");
        assert!(error.is_none());
    }

    #[test]
    fn test_whitespace_cdata_is_delivered() {
        let (events, error) = read_events("<a>x<![CDATA[ ]]>y</a>");
        assert!(error.is_none());
        assert_eq!(events[2], XmlEvent::cdata(" "));
    }

    #[test]
    fn test_depth() {
        let mut reader = FeedReader::new("<a><b><c/></b></a>");
        assert_eq!(reader.depth(), 0);
        reader.next_event();
        reader.next_event();
        assert_eq!(reader.depth(), 2);
        reader.next_event();
        assert_eq!(reader.depth(), 2);
        reader.next_event();
        assert_eq!(reader.depth(), 1);
    }

    #[test]
    fn test_empty_document() {
        let (_, error) = read_events("   ");
        assert_eq!(error.unwrap().code, Some(codes::SYNTAX));
    }
}
