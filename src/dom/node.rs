//! Feed Node representation
//!
//! Nodes live in an arena owned by [`FeedDocument`](super::FeedDocument)
//! and refer to their children by [`NodeId`], grouped by namespace and
//! local name.

use super::context::ContextFrame;
use std::collections::HashMap;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Attribute values grouped by namespace, then local name
pub type AttributeMap = HashMap<String, HashMap<String, String>>;

/// Child ids grouped by namespace, then local name, in document order
pub type ChildMap = HashMap<String, HashMap<String, Vec<NodeId>>>;

/// An attribute after namespace splitting, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: String,
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Look up an attribute value in an ordered attribute list
pub fn find_attribute<'a>(attributes: &'a [Attribute], namespace: &str, name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.namespace == namespace && a.name == name)
        .map(|a| a.value.as_str())
}

/// Group an ordered attribute list by namespace
pub fn group_attributes(attributes: &[Attribute]) -> AttributeMap {
    let mut grouped = AttributeMap::new();
    for attr in attributes {
        grouped
            .entry(attr.namespace.clone())
            .or_default()
            .insert(attr.name.clone(), attr.value.clone());
    }
    grouped
}

/// One element of the output tree (or the root sentinel)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedNode {
    /// Accumulated character data; escaped markup for literal subtrees
    pub text: String,
    pub attributes: AttributeMap,
    /// Absolute base URI in effect when the element opened
    pub base_uri: String,
    /// True if this element declared `xml:base` itself
    pub base_uri_explicit: bool,
    /// Effective `xml:lang`
    pub lang: String,
    pub children: ChildMap,
}

impl FeedNode {
    /// Node carrying the inherited values of `frame`
    pub fn from_frame(frame: &ContextFrame, attributes: AttributeMap) -> Self {
        FeedNode {
            text: String::new(),
            attributes,
            base_uri: frame.base.clone(),
            base_uri_explicit: frame.base_explicit,
            lang: frame.lang.clone(),
            children: ChildMap::new(),
        }
    }

    /// Get attribute value by namespace and local name
    pub fn attribute(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .get(namespace)
            .and_then(|group| group.get(name))
            .map(String::as_str)
    }

    /// Ids of children with the given qualified name
    pub fn child_ids(&self, namespace: &str, name: &str) -> &[NodeId] {
        self.children
            .get(namespace)
            .and_then(|group| group.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.children.values().any(|group| group.values().any(|ids| !ids.is_empty()))
    }

    pub(crate) fn push_child(&mut self, namespace: &str, name: &str, id: NodeId) {
        self.children
            .entry(namespace.to_string())
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_attributes() {
        let attrs = vec![
            Attribute::new("", "type", "xhtml"),
            Attribute::new("http://www.w3.org/XML/1998/namespace", "lang", "en"),
            Attribute::new("", "href", "/a"),
        ];
        let grouped = group_attributes(&attrs);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[""].len(), 2);
        assert_eq!(grouped["http://www.w3.org/XML/1998/namespace"]["lang"], "en");
        assert_eq!(find_attribute(&attrs, "", "href"), Some("/a"));
        assert_eq!(find_attribute(&attrs, "", "lang"), None);
    }

    #[test]
    fn test_node_from_frame() {
        let frame = ContextFrame {
            base: "http://example.org/".to_string(),
            base_explicit: true,
            lang: "de".to_string(),
            ..ContextFrame::default()
        };
        let node = FeedNode::from_frame(&frame, AttributeMap::new());
        assert_eq!(node.base_uri, "http://example.org/");
        assert!(node.base_uri_explicit);
        assert_eq!(node.lang, "de");
        assert!(node.text.is_empty());
        assert!(!node.has_children());
    }

    #[test]
    fn test_child_ids() {
        let mut node = FeedNode::default();
        node.push_child("", "item", 3);
        node.push_child("", "item", 5);
        assert_eq!(node.child_ids("", "item"), &[3, 5]);
        assert!(node.child_ids("", "title").is_empty());
        assert!(node.has_children());
    }
}
