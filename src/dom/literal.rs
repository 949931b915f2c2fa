//! Literal Markup
//!
//! Some feed elements embed markup (Atom `type="xhtml"`, Atom 0.3
//! `mode="xml"`, RSS titles). Their whole subtree is kept as an escaped
//! string on the element's node instead of being expanded into child nodes.
//! Only XHTML-namespace descendants are written back out as tags.

use super::node::{find_attribute, Attribute};
use crate::core::escape::{escape_attribute, escape_text};
use crate::core::namespace::ns;

/// One (namespace, elements, marker attribute) combination that embeds markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralTrigger {
    pub namespace: &'static str,
    pub elements: &'static [&'static str],
    /// Un-namespaced attribute and the value it must carry, if any
    pub marker: Option<(&'static str, &'static str)>,
}

impl LiteralTrigger {
    pub fn matches(&self, namespace: &str, element: &str, attributes: &[Attribute]) -> bool {
        if namespace != self.namespace || !self.elements.iter().any(|e| *e == element) {
            return false;
        }
        match self.marker {
            Some((name, value)) => find_attribute(attributes, "", name) == Some(value),
            None => true,
        }
    }
}

pub const TRIGGERS: &[LiteralTrigger] = &[
    LiteralTrigger {
        namespace: ns::ATOM_03,
        elements: &["title", "tagline", "copyright", "info", "summary", "content"],
        marker: Some(("mode", "xml")),
    },
    LiteralTrigger {
        namespace: ns::ATOM_10,
        elements: &["rights", "subtitle", "summary", "info", "title", "content"],
        marker: Some(("type", "xhtml")),
    },
    LiteralTrigger {
        namespace: ns::RSS_20,
        elements: &["title"],
        marker: None,
    },
    LiteralTrigger {
        namespace: ns::RSS_090,
        elements: &["title"],
        marker: None,
    },
    LiteralTrigger {
        namespace: ns::RSS_10,
        elements: &["title"],
        marker: None,
    },
];

/// HTML elements that never take an end tag
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "basefont", "br", "col", "frame", "hr", "img", "input", "isindex", "link",
    "meta", "param",
];

/// Does opening this element switch its subtree to literal markup?
pub fn starts_literal(namespace: &str, element: &str, attributes: &[Attribute]) -> bool {
    TRIGGERS
        .iter()
        .any(|trigger| trigger.matches(namespace, element, attributes))
}

#[inline]
pub fn is_void(element: &str) -> bool {
    VOID_ELEMENTS.iter().any(|e| *e == element)
}

/// Append `<element attr="value"...>` with the un-namespaced attributes
pub fn write_start_tag(out: &mut String, element: &str, attributes: &[Attribute]) {
    out.push('<');
    out.push_str(element);
    for attr in attributes.iter().filter(|a| a.namespace.is_empty()) {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attr.value));
        out.push('"');
    }
    out.push('>');
}

/// Append `</element>` unless the element is void
pub fn write_end_tag(out: &mut String, element: &str) {
    if is_void(element) {
        return;
    }
    out.push_str("</");
    out.push_str(element);
    out.push('>');
}

/// Append escaped character data
pub fn write_text(out: &mut String, text: &str) {
    out.push_str(&escape_text(text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_10_needs_marker() {
        let xhtml = [Attribute::new("", "type", "xhtml")];
        let html = [Attribute::new("", "type", "html")];
        assert!(starts_literal(ns::ATOM_10, "content", &xhtml));
        assert!(!starts_literal(ns::ATOM_10, "content", &html));
        assert!(!starts_literal(ns::ATOM_10, "content", &[]));
        assert!(!starts_literal(ns::ATOM_10, "entry", &xhtml));
    }

    #[test]
    fn test_marker_must_be_unnamespaced() {
        let attrs = [Attribute::new(ns::ATOM_10, "type", "xhtml")];
        assert!(!starts_literal(ns::ATOM_10, "summary", &attrs));
    }

    #[test]
    fn test_atom_03_mode_xml() {
        let attrs = [Attribute::new("", "mode", "xml")];
        assert!(starts_literal(ns::ATOM_03, "tagline", &attrs));
        assert!(!starts_literal(ns::ATOM_03, "tagline", &[Attribute::new("", "mode", "escaped")]));
    }

    #[test]
    fn test_rss_titles() {
        assert!(starts_literal(ns::RSS_20, "title", &[]));
        assert!(starts_literal(ns::RSS_090, "title", &[]));
        assert!(starts_literal(ns::RSS_10, "title", &[]));
        assert!(!starts_literal(ns::RSS_20, "description", &[]));
    }

    #[test]
    fn test_start_tag_skips_namespaced_attributes() {
        let attrs = [
            Attribute::new(ns::XMLNS, "xmlns", ns::XHTML),
            Attribute::new("", "href", "/a?x=1&y=\"2\""),
            Attribute::new("", "title", "it's"),
        ];
        let mut out = String::new();
        write_start_tag(&mut out, "a", &attrs);
        assert_eq!(out, "<a href=\"/a?x=1&amp;y=&quot;2&quot;\" title=\"it's\">");
    }

    #[test]
    fn test_void_end_tag_omitted() {
        let mut out = String::new();
        write_end_tag(&mut out, "br");
        write_end_tag(&mut out, "p");
        assert_eq!(out, "</p>");
    }
}
