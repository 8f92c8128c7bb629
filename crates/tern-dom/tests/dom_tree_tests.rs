//! Tests for arena allocation, linking, and traversal.

use tern_dom::{DomTree, ElementData, NodeId, NodeType, SnapshotKind};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

/// Helper to build `html > body > (p > "one", "two")`.
fn sample_tree() -> (DomTree, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    let one = tree.alloc(NodeType::Text("one".to_string()));
    let two = tree.alloc(NodeType::Text("two".to_string()));
    tree.append_child(p, one);
    tree.append_child(body, p);
    tree.append_child(body, two);
    tree.append_child(html, body);
    (tree, body, p)
}

#[test]
fn test_root_is_first_allocation() {
    let (tree, _, _) = sample_tree();
    assert_eq!(tree.root(), NodeId::ROOT);
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_append_child_sets_parent() {
    let (tree, body, p) = sample_tree();
    assert_eq!(tree.parent(p), Some(body));
    assert_eq!(tree.children(body).len(), 2);
    assert_eq!(tree.children(body)[0], p);
}

#[test]
fn test_ancestors_walk_to_root() {
    let (tree, body, p) = sample_tree();
    let text = tree.children(p)[0];
    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![p, body, NodeId::ROOT]);
    assert!(tree.is_descendant_of(text, NodeId::ROOT));
    assert!(!tree.is_descendant_of(NodeId::ROOT, text));
}

#[test]
fn test_iter_all_is_document_order() {
    let (tree, _, _) = sample_tree();
    let order: Vec<String> = tree
        .iter_all()
        .map(|id| match &tree.get(id).expect("node").node_type {
            NodeType::Element(e) => e.tag_name.clone(),
            NodeType::Text(t) => t.clone(),
        })
        .collect();
    assert_eq!(order, ["html", "body", "p", "one", "two"]);
}

#[test]
fn test_text_content_concatenates() {
    let (tree, body, _) = sample_tree();
    assert_eq!(tree.text_content(body), "onetwo");
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.head(), None);
}

#[test]
fn test_unattached_nodes_not_visited() {
    let (mut tree, _, _) = sample_tree();
    let _orphan = alloc_element(&mut tree, "div");
    assert_eq!(tree.iter_all().count(), 5);
    assert_eq!(tree.len(), 6);
}

#[test]
fn test_snapshot_lists_nodes_in_document_order() {
    let mut tree = DomTree::new();
    let html = tree.alloc(NodeType::Element(ElementData::new("html")));
    let mut link = ElementData::new("a");
    let _ = link.attrs.insert("href".to_string(), "\"/x\"".to_string());
    let a = tree.alloc(NodeType::Element(link));
    let text = tree.alloc(NodeType::Text("go".to_string()));
    tree.append_child(a, text);
    tree.append_child(html, a);

    let snapshot = tree.snapshot(html).expect("root");
    let root = snapshot.root_node().expect("root record");
    assert_eq!(root.parent, None);
    assert_eq!(root.children, vec![a.0]);
    assert!(matches!(&root.kind, SnapshotKind::Element { tag, .. } if tag == "html"));

    let ids: Vec<usize> = snapshot.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![html.0, a.0, text.0]);
    let SnapshotKind::Element { attributes, .. } = &snapshot.nodes[1].kind else {
        panic!("Expected element record");
    };
    assert_eq!(attributes.get("href").map(String::as_str), Some("\"/x\""));
    assert_eq!(snapshot.nodes[2].depth, 2);
    assert_eq!(snapshot.nodes[2].parent, Some(a.0));

    let json = tree.to_json().expect("json");
    assert!(json.contains("\"type\": \"element\""));
    assert!(json.contains("\"text\": \"go\""));
}

#[test]
fn test_deep_tree_serialises_without_recursion() {
    let depth = 50_000;
    let mut tree = DomTree::new();
    let mut parent = alloc_element(&mut tree, "html");
    for _ in 0..depth {
        let child = alloc_element(&mut tree, "div");
        tree.append_child(parent, child);
        parent = child;
    }

    let snapshot = tree.snapshot(NodeId::ROOT).expect("root");
    assert_eq!(snapshot.nodes.len(), depth + 1);
    assert_eq!(snapshot.nodes.last().map(|n| n.depth), Some(depth));

    let json = tree.to_json().expect("json");
    assert_eq!(json.matches("\"tag\": \"div\"").count(), depth);
}

#[test]
fn test_empty_tree() {
    let tree = DomTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.iter_all().count(), 0);
    assert!(tree.snapshot(NodeId::ROOT).is_none());
}
