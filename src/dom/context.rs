//! Context Stack
//!
//! Inherited state scoped to the open elements: namespace, element name,
//! base URI (plus whether it was declared here) and language. One frame is
//! pushed per element open and popped per close, so all four values always
//! move together.
//!
//! A failed `xml:base` resolution still pushes a frame; it inherits the
//! parent's base with `base_explicit = false` rather than skipping the push.

use super::node::{find_attribute, Attribute};
use crate::core::namespace::ns;
use crate::core::qname::QName;
use crate::error::ParseError;
use crate::resolve::UrlResolver;
use tracing::debug;

/// Values in effect for one open element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFrame {
    pub namespace: String,
    pub element: String,
    pub base: String,
    pub base_explicit: bool,
    pub lang: String,
}

impl ContextFrame {
    /// Root sentinel frame
    pub fn root(document_base: impl Into<String>) -> Self {
        ContextFrame {
            base: document_base.into(),
            ..ContextFrame::default()
        }
    }
}

/// Stack of frames with a permanent root sentinel
#[derive(Debug, Clone)]
pub struct ContextStack {
    root: ContextFrame,
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new(document_base: impl Into<String>) -> Self {
        ContextStack {
            root: ContextFrame::root(document_base),
            frames: Vec::with_capacity(16),
        }
    }

    /// Push the frame for an opening element and return it
    pub fn enter(
        &mut self,
        name: QName,
        attributes: &[Attribute],
        resolver: &dyn UrlResolver,
    ) -> &ContextFrame {
        let parent = self.top();

        let (base, base_explicit) = match find_attribute(attributes, ns::XML, "base") {
            Some(reference) => match resolver.absolutize(reference, &parent.base) {
                Some(resolved) => (resolved, true),
                None => {
                    debug!(reference, parent = %parent.base, "unresolvable xml:base, inheriting");
                    (parent.base.clone(), false)
                }
            },
            None => (parent.base.clone(), parent.base_explicit),
        };

        let lang = find_attribute(attributes, ns::XML, "lang")
            .map_or_else(|| parent.lang.clone(), str::to_string);

        self.frames.push(ContextFrame {
            namespace: name.namespace,
            element: name.local,
            base,
            base_explicit,
            lang,
        });
        self.top()
    }

    /// Pop the frame of the closing element
    pub fn leave(&mut self) -> Result<ContextFrame, ParseError> {
        self.frames
            .pop()
            .ok_or(ParseError::Invariant("close event without an open element"))
    }

    /// Innermost frame; the root sentinel when no element is open
    pub fn top(&self) -> &ContextFrame {
        self.frames.last().unwrap_or(&self.root)
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Stack length including the root sentinel (always >= 1)
    pub fn len(&self) -> usize {
        self.frames.len() + 1
    }

    /// Frames from the root sentinel to the innermost element
    pub fn frames(&self) -> impl Iterator<Item = &ContextFrame> {
        std::iter::once(&self.root).chain(self.frames.iter())
    }
}
