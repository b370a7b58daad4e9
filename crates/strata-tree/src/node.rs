use std::borrow::Cow;
use std::fmt;

use strata_kinds::{SyntaxKind, SyntaxSet};
use text_size::TextRange;

use crate::{LineRange, NodeId, Preorder, Tree, WalkEvent};

/// Read-only node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

impl<'a> SyntaxNode<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a Tree {
        self.tree
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.tree.kind(self.id)
    }

    /// Byte range in the source, fixed when the node was created.
    #[inline]
    pub fn range(self) -> TextRange {
        self.tree.range(self.id)
    }

    #[inline]
    pub fn lines(self) -> LineRange {
        self.tree.lines(self.id)
    }

    #[inline]
    pub fn revision(self) -> u64 {
        self.tree.revision(self.id)
    }

    pub fn content(self) -> Cow<'a, str> {
        self.tree.content(self.id)
    }

    /// Leaf text, or `None` for containers.
    pub fn text(self) -> Option<&'a str> {
        self.tree.leaf_text(self.id)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    fn wrap(self, id: NodeId) -> Self {
        Self { tree: self.tree, id }
    }

    pub fn parent(self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| self.wrap(id))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + 'a {
        let tree = self.tree;
        tree.children(self.id).iter().map(move |&id| Self { tree, id })
    }

    pub fn first_child(self) -> Option<Self> {
        self.children().next()
    }

    pub fn last_child(self) -> Option<Self> {
        self.children().next_back()
    }

    /// Index of this node among its parent's children.
    pub fn index(self) -> Option<usize> {
        let parent = self.tree.parent(self.id)?;
        self.tree.children(parent).iter().position(|&child| child == self.id)
    }

    fn siblings(self) -> Option<(&'a [NodeId], usize)> {
        let parent = self.tree.parent(self.id)?;
        let siblings = self.tree.children(parent);
        let index = siblings.iter().position(|&child| child == self.id)?;
        Some((siblings, index))
    }

    /// Siblings before this node, nearest first.
    pub fn prev_siblings(self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        let before = self.siblings().map_or(&[][..], |(siblings, index)| &siblings[..index]);
        before.iter().rev().map(move |&id| Self { tree, id })
    }

    /// Siblings after this node, nearest first.
    pub fn next_siblings(self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        let after = self.siblings().map_or(&[][..], |(siblings, index)| &siblings[index + 1..]);
        after.iter().map(move |&id| Self { tree, id })
    }

    pub fn prev_sibling(self) -> Option<Self> {
        self.prev_siblings().next()
    }

    pub fn next_sibling(self) -> Option<Self> {
        self.next_siblings().next()
    }

    /// Previous sibling, skipping whitespace, indentation and newlines.
    pub fn prev_sibling_non_trivia(self) -> Option<Self> {
        self.prev_siblings().find(|node| !node.is_trivia())
    }

    /// Next sibling, skipping whitespace, indentation and newlines.
    pub fn next_sibling_non_trivia(self) -> Option<Self> {
        self.next_siblings().find(|node| !node.is_trivia())
    }

    pub fn find_prev_sibling(self, kinds: impl Into<SyntaxSet>) -> Option<Self> {
        let kinds = kinds.into();
        self.prev_siblings().find(|node| kinds.contains(node.kind()))
    }

    pub fn find_next_sibling(self, kinds: impl Into<SyntaxSet>) -> Option<Self> {
        let kinds = kinds.into();
        self.next_siblings().find(|node| kinds.contains(node.kind()))
    }

    pub fn find_first_child(self, kinds: impl Into<SyntaxSet>) -> Option<Self> {
        let kinds = kinds.into();
        self.children().find(|node| kinds.contains(node.kind()))
    }

    pub fn find_last_child(self, kinds: impl Into<SyntaxSet>) -> Option<Self> {
        let kinds = kinds.into();
        self.children().rev().find(|node| kinds.contains(node.kind()))
    }

    /// Parent, grandparent and so on up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn ancestors_and_self(self) -> impl Iterator<Item = Self> + 'a {
        std::iter::successors(Some(self), |node| node.parent())
    }

    /// Nearest ancestor of one of `kinds`.
    pub fn ancestor(self, kinds: impl Into<SyntaxSet>) -> Option<Self> {
        let kinds = kinds.into();
        self.ancestors().find(|node| kinds.contains(node.kind()))
    }

    /// Number of steps up to the nearest ancestor of one of `kinds`, or the number of
    /// ancestors when `kinds` is `None`. `None` if no such ancestor exists.
    pub fn depth(self, kinds: Option<SyntaxSet>) -> Option<usize> {
        match kinds {
            Some(kinds) => {
                self.ancestors().position(|node| kinds.contains(node.kind())).map(|i| i + 1)
            }
            None => Some(self.ancestors().count()),
        }
    }

    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self.tree, self.id)
    }

    /// This node and everything below it, in pre-order.
    pub fn descendants(self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        self.preorder().filter_map(move |event| match event {
            WalkEvent::Enter(id) => Some(Self { tree, id }),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn leaves(self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        tree.leaves(self.id).map(move |id| Self { tree, id })
    }

    /// Indented dump of the subtree, one node per line with leaf text quoted.
    pub fn debug_dump(self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;

        for event in self.preorder() {
            match event {
                WalkEvent::Enter(id) => {
                    let node = self.wrap(id);
                    out.push_str(&"  ".repeat(depth));
                    out.push_str(&format!("{:?}@{:?}", node.kind(), node.range()));
                    if let Some(text) = node.text() {
                        out.push_str(&format!(" {text:?}"));
                    }
                    out.push('\n');
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use strata_kinds::SyntaxKind::*;
    use strata_kinds::SyntaxSet;
    use text_size::{TextRange, TextSize};

    use crate::{NodeId, Tree};

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    /// `{ a; }\nb` with the braces containing a statement.
    fn sample() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new("{ a; }\nb");
        let root = tree.root_id();
        let braces = tree.open_node(root, BRACES, TextSize::from(0));
        tree.push_leaf(braces, DELIMITER, range(0, 1));
        tree.push_leaf(braces, WHITESPACE, range(1, 2));
        let a = tree.push_leaf(braces, TEXT, range(2, 3));
        tree.push_leaf(braces, SEMICOLON, range(3, 4));
        tree.push_leaf(braces, WHITESPACE, range(4, 5));
        tree.push_leaf(braces, DELIMITER, range(5, 6));
        tree.close_node(braces, TextSize::from(6));
        tree.push_leaf(root, NEWLINE, range(6, 7));
        tree.push_leaf(root, TEXT, range(7, 8));
        (tree, braces, a)
    }

    #[test]
    fn navigation() {
        let (tree, braces, a) = sample();
        let a = tree.node(a);
        let braces = tree.node(braces);

        assert_eq!(a.parent(), Some(braces));
        assert_eq!(a.prev_sibling().map(|n| n.kind()), Some(WHITESPACE));
        assert_eq!(a.prev_sibling_non_trivia().map(|n| n.kind()), Some(DELIMITER));
        assert_eq!(a.next_sibling().map(|n| n.kind()), Some(SEMICOLON));
        assert_eq!(braces.next_sibling_non_trivia().map(|n| n.content()), Some("b".into()));
        assert_eq!(braces.first_child().map(|n| n.kind()), Some(DELIMITER));
        assert_eq!(braces.find_first_child(SEMICOLON).map(|n| n.range()), Some(range(3, 4)));
        assert_eq!(braces.find_last_child(WHITESPACE).map(|n| n.range()), Some(range(4, 5)));
        assert_eq!(a.find_next_sibling(DELIMITER).map(|n| n.range()), Some(range(5, 6)));
        assert_eq!(a.find_prev_sibling(SEMICOLON), None);
        assert_eq!(tree.root().prev_sibling(), None);
    }

    #[test]
    fn ancestry_and_depth() {
        let (tree, braces, a) = sample();
        let a = tree.node(a);

        assert_eq!(a.ancestor(ROOT), Some(tree.root()));
        let block = a.ancestor(SyntaxSet::new([BRACES, PARENTHESIS]));
        assert_eq!(block.map(|n| n.id()), Some(braces));
        assert_eq!(a.depth(None), Some(2));
        assert_eq!(a.depth(Some(BRACES.into())), Some(1));
        assert_eq!(a.depth(Some(ROOT.into())), Some(2));
        assert_eq!(a.depth(Some(FUNCTION_DEFINITION.into())), None);
        assert_eq!(tree.root().depth(None), Some(0));
    }

    #[test]
    fn lines() {
        let (tree, braces, _) = sample();
        assert_eq!(tree.node(braces).lines().to_string(), "[1:1]");
        assert_eq!(tree.root().lines().to_string(), "[1:2]");
        let newline = tree.root().find_first_child(NEWLINE).unwrap();
        assert_eq!(newline.lines().to_string(), "[1:2]");
    }

    #[test]
    fn carriage_returns_end_lines() {
        let mut tree = Tree::new("a\rb\r\nc");
        let root = tree.root_id();
        let b = tree.push_leaf(root, TEXT, range(2, 3));
        let c = tree.push_leaf(root, TEXT, range(5, 6));
        assert_eq!(tree.node(b).lines().to_string(), "[2:2]");
        assert_eq!(tree.node(c).lines().to_string(), "[3:3]");
        assert_eq!(tree.root().lines().to_string(), "[1:3]");
    }

    #[test]
    fn content_of_containers() {
        let (tree, braces, _) = sample();
        assert_eq!(tree.node(braces).content(), "{ a; }");
        assert_eq!(tree.text(), "{ a; }\nb");
        assert_eq!(tree.root().leaves().count(), 8);
    }

    #[test]
    fn dump() {
        let (tree, _, _) = sample();
        expect![[r#"
            ROOT@0..8
              BRACES@0..6
                DELIMITER@0..1 "{"
                WHITESPACE@1..2 " "
                TEXT@2..3 "a"
                SEMICOLON@3..4 ";"
                WHITESPACE@4..5 " "
                DELIMITER@5..6 "}"
              NEWLINE@6..7 "\n"
              TEXT@7..8 "b"
        "#]]
        .assert_eq(&tree.root().debug_dump());
    }

    #[test]
    fn walk_can_skip_and_redirect() {
        let (mut tree, braces, _) = sample();
        let mut seen = Vec::new();
        let root = tree.root_id();
        tree.walk(root, |tree, node| {
            seen.push(tree.kind(node));
            if node == braces { None } else { Some(node) }
        });
        assert_eq!(seen, [ROOT, BRACES, NEWLINE, TEXT]);
    }
}
