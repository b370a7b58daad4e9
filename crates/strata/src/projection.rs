use indexmap::IndexMap;
use serde::Serialize;
use strata_tree::SyntaxNode;

use crate::{attributes, clean_content, tag};

/// An owned, serializable snapshot of a node and its subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagView>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    /// Text of leaves. Containers leave it to their children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Leaf text with literal syntax removed, when it differs from `content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<String>,
    pub start: u32,
    pub end: u32,
    pub lines: [u32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagView {
    pub name: String,
    pub form: &'static str,
}

pub fn project(node: SyntaxNode<'_>) -> NodeView {
    let range = node.range();
    let lines = node.lines();
    let content = node.text();
    let clean =
        content.map(|_| clean_content(node)).filter(|clean| Some(clean.as_str()) != content);

    NodeView {
        kind: node.kind().name(),
        tag: tag(node).map(|tag| TagView { name: tag.name.to_owned(), form: tag.form.as_str() }),
        attributes: attributes(node),
        content: content.map(str::to_owned),
        clean,
        start: range.start().into(),
        end: range.end().into(),
        lines: [lines.start, lines.end],
        parent: node.parent().map(|parent| parent.kind().name()),
        children: node.children().map(project).collect(),
    }
}
