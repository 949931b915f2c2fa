//! Feed Document - arena of feed nodes
//!
//! Node 0 is the root sentinel: it carries the document base URI and holds
//! the document element as its only child.

use super::node::{AttributeMap, FeedNode, NodeId};

/// Output of a successful parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    nodes: Vec<FeedNode>,
}

impl FeedDocument {
    pub(crate) fn with_root(root: FeedNode) -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(root);
        FeedDocument { nodes }
    }

    /// The root sentinel node
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { doc: self, id: 0 }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (self.nodes.len() > id as usize).then_some(NodeRef { doc: self, id })
    }

    /// Get node count, including the root sentinel
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root element (the first child of the sentinel, whatever its name)
    pub fn document_element(&self) -> Option<NodeRef<'_>> {
        self.nodes
            .first()?
            .children
            .values()
            .flat_map(|group| group.values())
            .flatten()
            .min()
            .and_then(|&id| self.get(id))
    }

    /// Append `node` under `parent` as a `namespace`/`name` child
    pub(crate) fn push_child(&mut self, parent: NodeId, namespace: &str, name: &str, node: FeedNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.node_mut(parent).push_child(namespace, name, id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut FeedNode {
        &mut self.nodes[id as usize]
    }
}

/// Borrowed view of one node with navigation through its document
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a FeedDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The underlying node
    pub fn node(&self) -> &'a FeedNode {
        &self.doc.nodes[self.id as usize]
    }

    pub fn text(&self) -> &'a str {
        &self.node().text
    }

    pub fn attribute(&self, namespace: &str, name: &str) -> Option<&'a str> {
        self.node().attribute(namespace, name)
    }

    pub fn attributes(&self) -> &'a AttributeMap {
        &self.node().attributes
    }

    pub fn base_uri(&self) -> &'a str {
        &self.node().base_uri
    }

    pub fn base_uri_explicit(&self) -> bool {
        self.node().base_uri_explicit
    }

    pub fn lang(&self) -> &'a str {
        &self.node().lang
    }

    /// Children named `namespace`/`name`, in document order
    pub fn children(&self, namespace: &str, name: &str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node()
            .child_ids(namespace, name)
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// First child named `namespace`/`name`
    pub fn child(&self, namespace: &str, name: &str) -> Option<NodeRef<'a>> {
        self.children(namespace, name).next()
    }

    /// Number of children named `namespace`/`name`
    pub fn child_count(&self, namespace: &str, name: &str) -> usize {
        self.node().child_ids(namespace, name).len()
    }

    /// All child groups as `(namespace, name, count)`, in no particular order
    pub fn child_groups(&self) -> impl Iterator<Item = (&'a str, &'a str, usize)> + 'a {
        self.node().children.iter().flat_map(|(namespace, group)| {
            group
                .iter()
                .map(move |(name, ids)| (namespace.as_str(), name.as_str(), ids.len()))
        })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}
