//! Integration tests for the tree builder.

use tern_dom::{DomTree, NodeId};
use tern_html::{format_tree, parse_document};

/// Tag names of the element children of `id`.
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<&str> {
    tree.children(id)
        .iter()
        .filter_map(|&child| tree.tag_name(child))
        .collect()
}

/// Follow a path of tag names down from the root, taking the first match at
/// each level.
fn descend(tree: &DomTree, path: &[&str]) -> NodeId {
    let mut current = tree.root();
    assert_eq!(tree.tag_name(current), Some(path[0]));
    for tag in &path[1..] {
        current = *tree
            .children(current)
            .iter()
            .find(|&&child| tree.tag_name(child) == Some(tag))
            .unwrap_or_else(|| panic!("no <{tag}> under {current:?}"));
    }
    current
}

#[test]
fn test_balanced_markup_under_body() {
    let tree = parse_document("<a><b>text</b></a>");
    let b = descend(&tree, &["html", "body", "a", "b"]);
    let children = tree.children(b);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("text"));
}

#[test]
fn test_bare_text_gets_skeleton() {
    let tree = parse_document("hello");
    assert_eq!(child_tags(&tree, tree.root()), ["body"]);
    let body = descend(&tree, &["html", "body"]);
    assert_eq!(tree.as_text(tree.children(body)[0]), Some("hello"));
}

#[test]
fn test_title_goes_to_head_then_body() {
    let tree = parse_document("<title>x</title>hello");
    assert_eq!(child_tags(&tree, tree.root()), ["head", "body"]);
    let title = descend(&tree, &["html", "head", "title"]);
    assert_eq!(tree.text_content(title), "x");
    let body = descend(&tree, &["html", "body"]);
    assert_eq!(tree.text_content(body), "hello");
}

#[test]
fn test_empty_input_yields_html_body() {
    let tree = parse_document("");
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(child_tags(&tree, tree.root()), ["body"]);
    let body = descend(&tree, &["html", "body"]);
    assert!(tree.children(body).is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let tree = parse_document("  \n\t ");
    assert_eq!(child_tags(&tree, tree.root()), ["body"]);
    assert_eq!(tree.text_content(tree.root()), "");
}

#[test]
fn test_whitespace_text_between_tags_ignored() {
    let tree = parse_document("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
    let ul = descend(&tree, &["html", "body", "ul"]);
    assert_eq!(child_tags(&tree, ul), ["li", "li"]);
    assert_eq!(tree.children(ul).len(), 2);
}

#[test]
fn test_full_document() {
    let tree = parse_document(
        "<!DOCTYPE html><html><head><meta charset=utf-8><title>T</title></head>\
         <body><p>one</p></body></html>",
    );
    assert_eq!(child_tags(&tree, tree.root()), ["head", "body"]);
    let head = descend(&tree, &["html", "head"]);
    assert_eq!(child_tags(&tree, head), ["meta", "title"]);
    let meta = tree.children(head)[0];
    assert_eq!(
        tree.as_element(meta).and_then(|e| e.attrs.get("charset")).map(String::as_str),
        Some("utf-8")
    );
    assert_eq!(tree.text_content(descend(&tree, &["html", "body", "p"])), "one");
}

#[test]
fn test_unclosed_elements_closed_at_eof() {
    let tree = parse_document("<div><p>dangling");
    let p = descend(&tree, &["html", "body", "div", "p"]);
    assert_eq!(tree.text_content(p), "dangling");
}

#[test]
fn test_void_elements_are_leaves() {
    let tree = parse_document("<p>a<br>b<img src=x.png>c</p>");
    let p = descend(&tree, &["html", "body", "p"]);
    assert_eq!(tree.children(p).len(), 5);
    assert_eq!(child_tags(&tree, p), ["br", "img"]);
    let br = tree.children(p)[1];
    assert!(tree.children(br).is_empty());
}

#[test]
fn test_link_after_body_content_stays_in_body() {
    let tree = parse_document("<p>x</p><link rel=a>");
    let body = descend(&tree, &["html", "body"]);
    assert_eq!(child_tags(&tree, body), ["p", "link"]);
}

#[test]
fn test_close_pops_regardless_of_name() {
    // End tags close the current element without matching names.
    let tree = parse_document("<div><span>a</div>b");
    let div = descend(&tree, &["html", "body", "div"]);
    assert_eq!(child_tags(&tree, div), ["span"]);
    assert_eq!(tree.text_content(div), "ab");
}

#[test]
fn test_extra_closers_ignored() {
    let tree = parse_document("</p></p></div>text");
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(tree.text_content(tree.root()), "text");
}

#[test]
fn test_parent_links_match_children() {
    let tree = parse_document("<div><p>a</p><p>b<i>c</i></p></div>");
    for id in tree.iter_all() {
        for &child in tree.children(id) {
            assert_eq!(tree.parent(child), Some(id));
        }
    }
}

#[test]
fn test_format_tree() {
    let tree = parse_document("<p class=x>hi</p>");
    assert_eq!(
        format_tree(&tree, tree.root(), 0),
        "<html>\n  <body>\n    <p class=x>\n      \"hi\"\n"
    );
}

#[test]
fn test_deeply_nested_input() {
    let html = "<div>".repeat(50_000);
    let tree = parse_document(&html);
    assert_eq!(tree.iter_all().count(), 50_002);
    assert!(!format_tree(&tree, tree.root(), 0).is_empty());
    let json = tree.to_json().expect("json");
    assert_eq!(json.matches("\"tag\": \"div\"").count(), 50_000);
}
