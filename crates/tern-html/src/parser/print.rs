use std::fmt::Write;

use tern_dom::{DomTree, NodeId, NodeType};

/// Print the subtree rooted at `id` to stdout, one node per line.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// Render the subtree rooted at `id` as indented text.
///
/// Elements print as `<tag key=value flag>` (attributes sorted, valueless ones
/// as a bare key) and text nodes as a quoted, escaped string. Walks with an explicit stack, so very
/// deep trees do not exhaust the call stack.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    let mut stack = vec![(id, indent)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Element(data) => {
                let mut attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}={v}")
                        }
                    })
                    .collect();
                attrs.sort();
                if attrs.is_empty() {
                    let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
                } else {
                    let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let _ = writeln!(out, "{prefix}{data:?}");
            }
        }
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
    out
}
