//! Property tests: the tokenizer and tree builder accept any input.

use quickcheck_macros::quickcheck;
use tern_dom::DomTree;
use tern_html::{extract_text, parse_document, tokenize};

/// Every attached node is reachable exactly once from the root, and no node
/// is its own ancestor.
fn well_formed(tree: &DomTree) -> bool {
    let visited: Vec<_> = tree.iter_all().collect();
    let mut unique = visited.clone();
    unique.sort();
    unique.dedup();
    unique.len() == visited.len()
        && visited
            .iter()
            .all(|&id| !tree.is_descendant_of(id, id) && tree.ancestors(id).count() < visited.len())
}

#[quickcheck]
fn prop_any_input_yields_html_root(input: String) -> bool {
    let tree = parse_document(&input);
    tree.tag_name(tree.root()) == Some("html") && tree.parent(tree.root()).is_none()
}

#[quickcheck]
fn prop_tree_is_acyclic(input: String) -> bool {
    well_formed(&parse_document(&input))
}

#[quickcheck]
fn prop_markup_soup_yields_tree(parts: Vec<u8>) -> bool {
    const PIECES: &[&str] = &[
        "<", ">", "</", "<p>", "</p>", "<head>", "</head>", "<body>", "</html>", "<title>",
        "<br>", "&", ";", "&lt;", "<!--", "-->", "<!x>", "text", " ", "=",
    ];
    let input: String = parts
        .iter()
        .map(|&b| PIECES[usize::from(b) % PIECES.len()])
        .collect();
    let tree = parse_document(&input);
    tree.tag_name(tree.root()) == Some("html") && well_formed(&tree)
}

#[quickcheck]
fn prop_plain_text_round_trips(input: String) -> bool {
    if input.contains(['<', '&']) {
        return true;
    }
    extract_text(&tokenize(&input)) == input
}
