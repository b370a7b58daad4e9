use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;

use line_index::LineIndex;
use strata_kinds::SyntaxKind;
use text_size::{TextRange, TextSize};

use crate::arena::{Arena, Key};
use crate::{Preorder, SyntaxNode, WalkEvent};

/// Handle to a node of a [`Tree`]. Stays valid until the node is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Key<NodeData>);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:?})", self.0)
    }
}

/// 1-based line span of a node: the line of its first byte and the line of its end offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.start, self.end)
    }
}

pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) lines: LineRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) revision: u64,
    /// Text of leaves created through the mutation API; other leaves read the source.
    pub(crate) text: Option<Box<str>>,
}

impl NodeData {
    fn new(kind: SyntaxKind, range: TextRange, lines: LineRange) -> Self {
        Self { kind, range, lines, parent: None, children: Vec::new(), revision: 0, text: None }
    }
}

/// Arena-backed mutable syntax tree over one source text.
pub struct Tree {
    source: Box<str>,
    line_index: LineIndex,
    pub(crate) nodes: Arena<NodeData>,
    pub(crate) root: NodeId,
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("source_len", &self.source.len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Creates a tree holding only a `ROOT` node that spans `source`.
    pub fn new(source: impl Into<Box<str>>) -> Self {
        let source = source.into();
        let line_index = line_index(&source);
        let mut nodes = Arena::default();

        let range = TextRange::up_to(TextSize::of(&*source));
        let lines = line_range(&line_index, range);
        let root = NodeId(nodes.alloc(NodeData::new(SyntaxKind::ROOT, range, lines)));

        Self { source, line_index, nodes, root }
    }

    /// The text the tree was built from. Mutations never change it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Line index of the source, in which a lone `\r` also ends a line.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(self.root)
    }

    /// # Panics
    ///
    /// Panics if `id` was removed.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        assert!(self.contains(id), "{id:?} is not part of the tree");
        SyntaxNode::new(self, id)
    }

    pub fn get(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        self.contains(id).then(|| SyntaxNode::new(self, id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Number of live nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.0].kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.0].range
    }

    pub fn lines(&self, id: NodeId) -> LineRange {
        self.nodes[id.0].lines
    }

    pub fn revision(&self, id: NodeId) -> u64 {
        self.nodes[id.0].revision
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Leaf text, or `None` for containers.
    pub fn leaf_text(&self, id: NodeId) -> Option<&str> {
        let data = &self.nodes[id.0];
        if data.kind.is_atomic() {
            Some(data.text.as_deref().unwrap_or(&self.source[data.range]))
        } else {
            None
        }
    }

    /// Text of a node: leaf text, or the concatenated leaves of a container.
    pub fn content(&self, id: NodeId) -> Cow<'_, str> {
        if let Some(text) = self.leaf_text(id) {
            return Cow::Borrowed(text);
        }
        let mut content = String::new();
        self.write_content(id, &mut content);
        Cow::Owned(content)
    }

    pub fn write_content(&self, id: NodeId, out: &mut String) {
        for leaf in self.leaves(id) {
            out.push_str(self.leaf_text(leaf).unwrap_or_default());
        }
    }

    /// Reconstructs the document from its leaves.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.source.len());
        self.write_content(self.root, &mut text);
        text
    }

    /// Leaves under `id` in document order, `id` itself if it is a leaf.
    pub fn leaves(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        Preorder::new(self, id).filter_map(move |event| match event {
            WalkEvent::Enter(node) if self.kind(node).is_atomic() => Some(node),
            _ => None,
        })
    }

    /// Pre-order walk from `start`. The visitor returns the node whose children are visited
    /// next, normally the node it was given, or `None` to skip the subtree.
    pub fn walk(
        &mut self,
        start: NodeId,
        mut visitor: impl FnMut(&mut Self, NodeId) -> Option<NodeId>,
    ) {
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !self.contains(node) {
                continue;
            }
            let Some(next) = visitor(self, node) else {
                continue;
            };
            if let Some(data) = self.nodes.get(next.0) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
    }

    pub(crate) fn alloc(&mut self, kind: SyntaxKind, range: TextRange) -> NodeId {
        let lines = line_range(&self.line_index, range);
        NodeId(self.nodes.alloc(NodeData::new(kind, range, lines)))
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(!self.kind(parent).is_atomic(), "{:?} is atomic", self.kind(parent));
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Appends a leaf backed by `range` of the source. Construction only: revisions are left
    /// untouched.
    pub fn push_leaf(&mut self, parent: NodeId, kind: SyntaxKind, range: TextRange) -> NodeId {
        let leaf = self.alloc(kind, range);
        self.attach(parent, leaf);
        leaf
    }

    /// Appends an empty container starting at `start`; [`Tree::close_node`] fixes its end.
    pub fn open_node(&mut self, parent: NodeId, kind: SyntaxKind, start: TextSize) -> NodeId {
        let node = self.alloc(kind, TextRange::empty(start));
        self.attach(parent, node);
        node
    }

    pub fn close_node(&mut self, node: NodeId, end: TextSize) {
        let start = self.range(node).start();
        let range = TextRange::new(start, end.max(start));
        let lines = line_range(&self.line_index, range);
        let data = &mut self.nodes[node.0];
        data.range = range;
        data.lines = lines;
    }

    /// Wraps the children of `parent` at `run` into a new `kind` container placed where the
    /// run was. Construction only: revisions are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `run` is empty or out of bounds.
    pub fn adopt(
        &mut self,
        parent: NodeId,
        run: RangeInclusive<usize>,
        kind: SyntaxKind,
    ) -> NodeId {
        let (start, end) = (*run.start(), *run.end());
        assert!(start <= end && end < self.children(parent).len(), "invalid run {run:?}");

        let adopted = self.children(parent)[start..=end].to_vec();
        let range = self.range(adopted[0]).cover(self.range(adopted[adopted.len() - 1]));
        let node = self.alloc(kind, range);

        for &child in &adopted {
            self.nodes[child.0].parent = Some(node);
        }
        self.nodes[node.0].parent = Some(parent);
        self.nodes[node.0].children = adopted;
        self.nodes[parent.0].children.splice(start..=end, [node]);

        node
    }
}

/// `\n`, `\r\n` and a lone `\r` all end a line. `LineIndex` only knows about `\n`, so lone
/// carriage returns are swapped for line feeds first; offsets are unaffected.
fn line_index(text: &str) -> LineIndex {
    if !text.contains('\r') {
        return LineIndex::new(text);
    }
    let mut unified = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() != Some(&'\n') => unified.push('\n'),
            c => unified.push(c),
        }
    }
    LineIndex::new(&unified)
}

pub(crate) fn line_range(line_index: &LineIndex, range: TextRange) -> LineRange {
    let start = line_index.line_col(range.start()).line + 1;
    let end = line_index.line_col(range.end()).line + 1;
    LineRange { start, end }
}
