use camino::Utf8PathBuf;
use strata_parse::UnknownLanguage;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown language `{name}`")]
    UnknownLanguage { name: String },
    #[error("no language handles `.{extension}` files")]
    UnsupportedExtension { extension: String },
    #[error("cannot infer the language of `{path}`, it has no extension")]
    MissingExtension { path: Utf8PathBuf },
    #[error("failed to access `{path}`")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

impl From<UnknownLanguage> for Error {
    fn from(UnknownLanguage(name): UnknownLanguage) -> Self {
        Self::UnknownLanguage { name }
    }
}
