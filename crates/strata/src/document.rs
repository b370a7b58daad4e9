use std::fs;
use std::io;

use camino::Utf8Path;
use strata_errors::Diagnostic;
use strata_parse::{Language, ParseOptions};
use strata_tree::{SyntaxNode, Tree};

use crate::Error;

/// A parsed source text: its language, its tree and the recoveries made while pairing.
#[derive(Debug)]
pub struct Document {
    language: Language,
    tree: Tree,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    /// The text of the document as the tree currently spells it.
    pub fn text(&self) -> String {
        self.tree.text()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Tree, Vec<Diagnostic>) {
        (self.tree, self.diagnostics)
    }

    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        for leaf in self.tree.leaves(self.tree.root_id()) {
            out.write_all(self.tree.leaf_text(leaf).unwrap_or_default().as_bytes())?;
        }
        out.flush()
    }

    pub fn write_to_file(&self, path: &Utf8Path) -> Result<(), Error> {
        let file = fs::File::create(path).map_err(|err| Error::io(path, err))?;
        self.write_to(io::BufWriter::new(file)).map_err(|err| Error::io(path, err))
    }
}

pub fn parse_text(text: &str, language: Language, options: ParseOptions) -> Document {
    let (tree, diagnostics) = strata_parse::parse(text, language, options).into_parts();
    Document { language, tree, diagnostics }
}

/// Parses `text` in the language called `name`, or one of its aliases.
pub fn parse_named(text: &str, name: &str, options: ParseOptions) -> Result<Document, Error> {
    let language = name.parse::<Language>()?;
    Ok(parse_text(text, language, options))
}

/// Picks the language of `path` from its extension.
pub fn language_for_path(path: &Utf8Path) -> Result<Language, Error> {
    let Some(extension) = path.extension() else {
        return Err(Error::MissingExtension { path: path.to_owned() });
    };
    let language = Language::from_extension(extension)
        .ok_or_else(|| Error::UnsupportedExtension { extension: extension.to_owned() })?;
    tracing::debug!(%path, %language, "resolved language");
    Ok(language)
}

pub fn parse_file(path: &Utf8Path, options: ParseOptions) -> Result<Document, Error> {
    let language = language_for_path(path)?;
    parse_file_as(path, language, options)
}

pub fn parse_file_as(
    path: &Utf8Path,
    language: Language,
    options: ParseOptions,
) -> Result<Document, Error> {
    let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    Ok(parse_text(&text, language, options))
}
