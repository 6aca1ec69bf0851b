//! Document tree for the sprig markup parser.
//!
//! The tree builder folds tokens into a [`DomTree`]: an arena of nodes
//! addressed by [`NodeId`], with the Document always at [`NodeId::ROOT`].
//!
//! # Design
//!
//! Every node kind shares the same ordered `children` list; the kind itself
//! is a tagged [`NodeType`]. Indices instead of references keep the open
//! element stack in the builder free of borrow juggling.

mod serialize;

pub use serialize::NodeView;

use indexmap::IndexMap;

/// Ordered map of attribute names to values for an element.
///
/// Insertion order is document order. Re-inserting an existing name replaces
/// the value but keeps the original position.
pub type AttributesMap = IndexMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A single arena entry: the node's kind plus its place in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What this node is.
    pub node_type: NodeType,

    /// The node this one was appended to. `None` for the Document.
    pub parent: Option<NodeId>,

    /// Children in insertion (document) order.
    pub children: Vec<NodeId>,
}

/// The closed set of node kinds the tree builder produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The tree root. Exactly one per tree.
    Document,
    /// Created from a start tag.
    Element(ElementData),
    /// Accumulated character data.
    Text(String),
}

/// Element-specific data copied from the start tag that opened it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given tag name and attributes.
    #[must_use]
    pub const fn new(tag_name: String, attrs: AttributesMap) -> Self {
        Self { tag_name, attrs }
    }

    /// Look up an attribute value by (lowercase) name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]. The
/// Document node is created with the tree and is always at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the tree, Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a tree built with [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new, detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Does nothing if either ID is out of range.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate a node and append it to `parent` in one step.
    pub fn append_new(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = self.alloc(node_type);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Mutable access to a text node's value, for appending fragments.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Text(s) => Some(s),
            _ => None,
        })
    }

    /// Returns true if the node is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        self.as_text(id).is_some()
    }

    /// A [`serde::Serialize`] view of the subtree rooted at `id`.
    #[must_use]
    pub const fn serialize_node(&self, id: NodeId) -> NodeView<'_> {
        NodeView::new(self, id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
