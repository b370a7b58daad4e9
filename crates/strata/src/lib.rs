//! Tolerant concrete syntax trees for C family, markup and feed languages.
//!
//! [`parse_text`] and [`parse_file`] produce a [`Document`]. Its tree is read through
//! [`SyntaxNode`] handles and edited through [`Tree`]. [`project`] turns any node into an owned,
//! serializable view.

mod attributes;
mod content;
mod document;
mod error;
mod projection;

pub use attributes::{attributes, tag};
pub use content::clean_content;
pub use document::{
    Document, language_for_path, parse_file, parse_file_as, parse_named, parse_text,
};
pub use error::Error;
pub use projection::{NodeView, TagView, project};
pub use strata_errors::{Diagnostic, Severity};
pub use strata_kinds::{SyntaxKind, SyntaxSet};
pub use strata_parse::{Language, ParseOptions, Tag, TagForm};
pub use strata_tree::{LineRange, MutationError, NodeId, SyntaxNode, Tree, WalkEvent};
pub use text_size::{TextRange, TextSize};
