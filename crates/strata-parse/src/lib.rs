//! Language catalogs and the parse pipeline: scan, pair delimiters, then run the syntax
//! analysis passes of the language.

mod analysis;
mod build;
mod grammar;
mod language;

pub use analysis::{Marker, Match, Parser, Pass, analyze};
pub use build::build;
pub use language::{Grammar, Language, LineEndings, MarkupRules, Tag, TagForm, UnknownLanguage};
use strata_errors::Diagnostic;
use strata_tree::Tree;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Run the analysis passes after pairing. Without them the tree only has the
    /// delimiter, directive and element containers.
    pub syntax_analysis: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { syntax_analysis: true }
    }
}

#[derive(Debug)]
pub struct Parse {
    tree: Tree,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Recoveries made while pairing, in the order they happened.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Tree, Vec<Diagnostic>) {
        (self.tree, self.diagnostics)
    }
}

pub fn parse(text: &str, language: Language, options: ParseOptions) -> Parse {
    let _span = tracing::debug_span!("parse", %language, len = text.len()).entered();

    let text = language.prepare(text);
    let grammar = language.grammar();
    let (mut tree, diagnostics) = build(&text, grammar);
    if options.syntax_analysis {
        analyze(&mut tree, grammar.passes);
    }

    tracing::debug!(nodes = tree.len(), diagnostics = diagnostics.len(), "parsed");
    Parse { tree, diagnostics }
}
