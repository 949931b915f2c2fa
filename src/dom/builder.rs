//! Tree Builder
//!
//! Turns element opens and closes into nodes of a [`FeedDocument`]. The
//! active node is tracked by id; entering a child saves the parent on the
//! ancestor stack and the matching close restores it.
//!
//! Inside literal markup no nodes are created: opens and closes only move
//! the literal depth, and XHTML tags are written into the text of the node
//! that started literal mode.

use super::context::ContextFrame;
use super::document::FeedDocument;
use super::literal;
use super::node::{group_attributes, Attribute, FeedNode, NodeId};
use crate::core::namespace::ns;
use crate::error::ParseError;
use tracing::trace;

pub struct TreeBuilder {
    doc: FeedDocument,
    active: NodeId,
    ancestors: Vec<NodeId>,
    /// Literal opens below the triggering element; `None` outside literal mode
    literal_depth: Option<usize>,
}

impl TreeBuilder {
    /// Start a document whose root sentinel carries `root`'s values
    pub fn new(root: &ContextFrame) -> Self {
        TreeBuilder {
            doc: FeedDocument::with_root(FeedNode::from_frame(root, Default::default())),
            active: 0,
            ancestors: Vec::with_capacity(16),
            literal_depth: None,
        }
    }

    /// Element open; `frame` is the frame just pushed for it
    pub fn open(&mut self, frame: &ContextFrame, attributes: &[Attribute]) {
        if let Some(depth) = self.literal_depth.as_mut() {
            *depth += 1;
            if frame.namespace == ns::XHTML {
                let text = &mut self.doc.node_mut(self.active).text;
                literal::write_start_tag(text, &frame.element, attributes);
            }
            return;
        }

        self.ancestors.push(self.active);
        let node = FeedNode::from_frame(frame, group_attributes(attributes));
        self.active = self
            .doc
            .push_child(self.active, &frame.namespace, &frame.element, node);

        if literal::starts_literal(&frame.namespace, &frame.element, attributes) {
            trace!(namespace = %frame.namespace, element = %frame.element, "entering literal markup");
            self.literal_depth = Some(0);
        }
    }

    /// Element close; `frame` is the frame about to be popped
    pub fn close(&mut self, frame: &ContextFrame) -> Result<(), ParseError> {
        if let Some(depth) = self.literal_depth {
            if frame.namespace == ns::XHTML {
                let text = &mut self.doc.node_mut(self.active).text;
                literal::write_end_tag(text, &frame.element);
            }
            self.literal_depth = depth.checked_sub(1);
            if self.literal_depth.is_some() {
                return Ok(());
            }
            trace!(element = %frame.element, "leaving literal markup");
        }

        self.active = self
            .ancestors
            .pop()
            .ok_or(ParseError::Invariant("close event without an open element"))?;
        Ok(())
    }

    /// Character data; escaped while in literal mode, raw otherwise
    pub fn append_text(&mut self, value: &str) {
        let text = &mut self.doc.node_mut(self.active).text;
        if self.literal_depth.is_some() {
            literal::write_text(text, value);
        } else {
            text.push_str(value);
        }
    }

    pub fn in_literal(&self) -> bool {
        self.literal_depth.is_some()
    }

    pub fn literal_depth(&self) -> Option<usize> {
        self.literal_depth
    }

    /// Id of the node receiving text
    pub fn active(&self) -> NodeId {
        self.active
    }

    /// Number of saved ancestor frames (open ordinary elements)
    pub fn open_elements(&self) -> usize {
        self.ancestors.len()
    }

    /// Hand over the document once every element has closed
    pub fn finish(self) -> Result<FeedDocument, ParseError> {
        if !self.ancestors.is_empty() || self.literal_depth.is_some() {
            return Err(ParseError::Invariant("input ended with unclosed elements"));
        }
        Ok(self.doc)
    }
}
