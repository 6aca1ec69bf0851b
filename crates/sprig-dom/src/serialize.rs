//! Nested serialization of a [`DomTree`].
//!
//! The arena is flat, but consumers want the document shape back:
//!
//! ```json
//! { "type": "document", "children": [
//!     { "type": "element", "name": "p", "attributes": { "id": "x" },
//!       "children": [ { "type": "text", "value": "hi" } ] } ] }
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{DomTree, NodeId, NodeType};

/// Borrowed view of one node and its subtree, serialized recursively.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    pub(crate) const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

struct ChildrenView<'a> {
    tree: &'a DomTree,
    ids: &'a [NodeId],
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeView::new(self.tree, id))?;
        }
        seq.end()
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };
        let children = ChildrenView {
            tree: self.tree,
            ids: &node.children,
        };

        match &node.node_type {
            NodeType::Document => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "document")?;
                map.serialize_entry("children", &children)?;
                map.end()
            }
            NodeType::Element(data) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "element")?;
                map.serialize_entry("name", &data.tag_name)?;
                map.serialize_entry("attributes", &data.attrs)?;
                map.serialize_entry("children", &children)?;
                map.end()
            }
            NodeType::Text(value) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("value", value)?;
                map.end()
            }
        }
    }
}

impl Serialize for DomTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_node(NodeId::ROOT).serialize(serializer)
    }
}
