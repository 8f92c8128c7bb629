//! Serialisable view of the document tree.
//!
//! The snapshot is flat: one record per node in document order, linked by
//! arena index. Neither building nor serialising it recurses, so depth is
//! bounded only by memory.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{DomTree, NodeId, NodeType};

/// What a snapshot record holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotKind {
    /// An element.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes in name order.
        attributes: BTreeMap<String, String>,
    },
    /// A text node.
    Text {
        /// Decoded text.
        text: String,
    },
}

/// One node of a [`TreeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// Arena index of the node.
    pub id: usize,
    /// Arena index of the parent, `None` for the snapshot root.
    pub parent: Option<usize>,
    /// Distance from the snapshot root.
    pub depth: usize,
    /// Arena indices of the children in document order.
    pub children: Vec<usize>,
    /// Node payload.
    #[serde(flatten)]
    pub kind: SnapshotKind,
}

/// An owned copy of a subtree, suitable for JSON output.
///
/// Attributes are sorted so the output is stable between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    /// Arena index of the subtree root.
    pub root: usize,
    /// Every node of the subtree in document order, root first.
    pub nodes: Vec<NodeSnapshot>,
}

impl TreeSnapshot {
    pub(crate) fn build(tree: &DomTree, root: NodeId) -> Option<Self> {
        let _ = tree.get(root)?;

        let mut nodes = Vec::new();
        let mut stack = vec![(root, None, 0)];
        while let Some((id, parent, depth)) = stack.pop() {
            let Some(node) = tree.get(id) else {
                continue;
            };
            let kind = match &node.node_type {
                NodeType::Text(text) => SnapshotKind::Text { text: text.clone() },
                NodeType::Element(data) => SnapshotKind::Element {
                    tag: data.tag_name.clone(),
                    attributes: data
                        .attrs
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                },
            };
            nodes.push(NodeSnapshot {
                id: id.0,
                parent: parent.map(|p: NodeId| p.0),
                depth,
                children: node.children.iter().map(|c| c.0).collect(),
                kind,
            });
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(id), depth + 1)),
            );
        }

        Some(Self {
            root: root.0,
            nodes,
        })
    }

    /// The record for the subtree root.
    #[must_use]
    pub fn root_node(&self) -> Option<&NodeSnapshot> {
        self.nodes.first()
    }
}
