use strata::SyntaxKind::*;
use strata::{Language, MutationError, NodeId, ParseOptions, Tree, parse_text};

fn revisions(tree: &Tree, node: NodeId) -> Vec<u64> {
    tree.node(node).ancestors_and_self().map(|node| node.revision()).collect()
}

#[test]
fn edits_bump_every_ancestor() {
    let mut document =
        parse_text("void f() { if (x) { g(); } }\n", Language::C, ParseOptions::default());
    let call = document.root().descendants().find(|node| node.kind() == FUNCTION_CALL).unwrap();
    let (call, body) = (call.id(), call.parent().unwrap().id());
    let before = revisions(document.tree(), call);

    // Reads leave revisions alone.
    let _ = document.root().debug_dump();
    let _ = document.text();
    assert_eq!(revisions(document.tree(), call), before);

    let tree = document.tree_mut();
    let comment = tree.new_leaf(CPP_COMMENT, "// call\n").unwrap();
    tree.insert_previous_sibling(call, comment).unwrap();

    let after = revisions(document.tree(), call);
    assert_eq!(after[0], before[0]);
    for (after, before) in after.iter().zip(&before).skip(1) {
        assert!(after > before);
    }
    assert_eq!(document.tree().parent(comment), Some(body));
    assert_eq!(document.text(), "void f() { if (x) { // call\ng(); } }\n");
}

#[test]
fn atomic_nodes_refuse_children() {
    let mut document = parse_text("x = 1;", Language::C, ParseOptions::default());
    let number = document.root().descendants().find(|node| node.kind() == NUMBER).unwrap().id();

    let tree = document.tree_mut();
    let leaf = tree.new_leaf(TEXT, "y").unwrap();
    assert_eq!(tree.append_child(number, leaf), Err(MutationError::Atomic(NUMBER)));
    assert_eq!(tree.remove(tree.root_id()), Err(MutationError::Root));
    assert_eq!(document.text(), "x = 1;");
}

#[test]
fn removed_subtrees_are_stale() {
    let mut document =
        parse_text("int f() { return g(h(1)); }", Language::C, ParseOptions::default());
    let root = document.root();
    let outer = root.descendants().find(|node| node.kind() == FUNCTION_CALL).unwrap();
    let inner = outer.descendants().skip(1).find(|node| node.kind() == FUNCTION_CALL).unwrap();
    let (outer, inner) = (outer.id(), inner.id());

    let tree = document.tree_mut();
    tree.remove(outer).unwrap();
    assert!(!tree.contains(outer));
    assert!(!tree.contains(inner));
    assert_eq!(tree.detach(inner), Err(MutationError::Stale(inner)));
    assert_eq!(document.text(), "int f() { return ; }");
}
