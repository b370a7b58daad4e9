use camino::Utf8PathBuf;
use salsa::{Accumulator as _, Database};
use strata::{Diagnostic, ParseOptions, TextRange};
use strata_inputs::SourceFile;

/// Registers `text` as the contents of `path`, with its line endings prepared the way the
/// parser reads them, so recovery notes and the line index agree on offsets.
pub(crate) fn source_file(
    db: &dyn Database,
    path: Utf8PathBuf,
    text: String,
) -> Result<SourceFile, strata::Error> {
    let language = strata::language_for_path(&path)?;
    let text = language.prepare(&text).into_owned();
    Ok(SourceFile::new(db, path, text))
}

/// Parses `file` in the language of its extension and accumulates every recovery note.
#[salsa::tracked]
pub(crate) fn check_file(db: &dyn Database, file: SourceFile) {
    let language = match strata::language_for_path(file.path(db)) {
        Ok(language) => language,
        Err(err) => {
            Diagnostic::error(err.to_string(), TextRange::empty(0.into())).accumulate(db);
            return;
        }
    };

    let document = strata::parse_text(file.text(db), language, ParseOptions::default());
    let (_, diagnostics) = document.into_parts();
    tracing::debug!(path = %file.path(db), notes = diagnostics.len(), "checked");

    for diagnostic in diagnostics {
        diagnostic.accumulate(db);
    }
}

#[cfg(test)]
mod tests {
    use salsa::DatabaseImpl;
    use strata::Diagnostic;

    use super::{check_file, source_file};

    fn locations(path: &str, text: &str) -> Vec<String> {
        let db = DatabaseImpl::new();
        let file = source_file(&db, path.into(), text.to_owned()).unwrap();
        check_file::accumulated::<Diagnostic>(&db, file)
            .iter()
            .map(|diagnostic| file.location(&db, diagnostic.range().start()))
            .collect()
    }

    #[test]
    fn notes_after_crlf_keep_their_lines() {
        assert_eq!(locations("x.c", "a;\r\nb;\r\n}"), ["x.c:3:1"]);
        assert_eq!(locations("x.c", "a;\rb;\r}"), ["x.c:3:1"]);
    }

    #[test]
    fn unsupported_paths_are_rejected() {
        let db = DatabaseImpl::new();
        assert!(source_file(&db, "notes.txt".into(), String::new()).is_err());
    }
}
