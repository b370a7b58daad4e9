//! Supported languages and the grammar data each one is parsed with.

mod c;
pub(crate) mod markup;

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use strata_kinds::KindTable;

use crate::analysis::Pass;
use crate::grammar;
pub use markup::{MarkupRules, Tag, TagForm};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Cpp,
    ObjC,
    ObjCpp,
    Html,
    Xml,
    Rss,
    PropertyList,
}

/// How a language treats `\r\n` and lone `\r` before scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEndings {
    /// Rewrite every line ending to `\n`.
    Normalize,
    /// Scan the text as is; newline kinds accept all three forms.
    Preserve,
}

/// Everything the parser needs to know about one language.
pub struct Grammar {
    pub kinds: KindTable,
    pub passes: &'static [Pass],
    pub markup: Option<MarkupRules>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("kinds", &self.kinds.specs().len())
            .field("passes", &self.passes.iter().map(|pass| pass.name).collect::<Vec<_>>())
            .field("markup", &self.markup.is_some())
            .finish()
    }
}

static C: Lazy<Grammar> = Lazy::new(|| Grammar {
    kinds: KindTable::new(c::kinds()),
    passes: grammar::C_PASSES,
    markup: None,
});

static CPP: Lazy<Grammar> = Lazy::new(|| Grammar {
    kinds: KindTable::new(c::cpp_kinds()),
    passes: grammar::C_PASSES,
    markup: None,
});

static OBJC: Lazy<Grammar> = Lazy::new(|| Grammar {
    kinds: KindTable::new(c::objc_kinds()),
    passes: grammar::OBJC_PASSES,
    markup: None,
});

static OBJCPP: Lazy<Grammar> = Lazy::new(|| Grammar {
    kinds: KindTable::new(c::objcpp_kinds()),
    passes: grammar::OBJC_PASSES,
    markup: None,
});

static HTML: Lazy<Grammar> = Lazy::new(|| markup::grammar(markup::HTML));
static XML: Lazy<Grammar> = Lazy::new(|| markup::grammar(markup::XML));
static RSS: Lazy<Grammar> = Lazy::new(|| markup::grammar(markup::RSS));
static PROPERTY_LIST: Lazy<Grammar> = Lazy::new(|| markup::grammar(markup::PROPERTY_LIST));

impl Language {
    pub const ALL: &'static [Self] = &[
        Self::C,
        Self::Cpp,
        Self::ObjC,
        Self::ObjCpp,
        Self::Html,
        Self::Xml,
        Self::Rss,
        Self::PropertyList,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Cpp => "C++",
            Self::ObjC => "Objective-C",
            Self::ObjCpp => "Objective-C++",
            Self::Html => "HTML",
            Self::Xml => "XML",
            Self::Rss => "RSS",
            Self::PropertyList => "PropertyList",
        }
    }

    /// Lower-case alternative names accepted by [`Language::from_name`].
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::C => &["c"],
            Self::Cpp => &["c++", "cpp", "cxx"],
            Self::ObjC => &["objective-c", "objc", "obj-c"],
            Self::ObjCpp => &["objective-c++", "objc++", "objcpp", "obj-c++"],
            Self::Html => &["html", "htm", "sgml"],
            Self::Xml => &["xml"],
            Self::Rss => &["rss", "atom"],
            Self::PropertyList => &["propertylist", "plist", "property-list"],
        }
    }

    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::C => &["c", "h"],
            Self::Cpp => &["cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx"],
            Self::ObjC => &["m"],
            Self::ObjCpp => &["mm"],
            Self::Html => &["html", "htm", "shtml"],
            Self::Xml => &["xml", "xsl", "xslt", "svg", "xhtml"],
            Self::Rss => &["rss", "atom"],
            Self::PropertyList => &["plist"],
        }
    }

    pub const fn line_endings(self) -> LineEndings {
        match self {
            Self::C | Self::Cpp | Self::ObjC | Self::ObjCpp => LineEndings::Normalize,
            Self::Html | Self::Xml | Self::Rss | Self::PropertyList => LineEndings::Preserve,
        }
    }

    /// Case-insensitive lookup by name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|language| {
            language.name().eq_ignore_ascii_case(name)
                || language.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|language| {
            language.extensions().iter().any(|known| known.eq_ignore_ascii_case(extension))
        })
    }

    /// Returns `None` when the path has no extension or the extension is not recognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|extension| extension.to_str()).and_then(Self::from_extension)
    }

    /// Kind table, passes and markup rules, built on first use.
    pub fn grammar(self) -> &'static Grammar {
        match self {
            Self::C => &C,
            Self::Cpp => &CPP,
            Self::ObjC => &OBJC,
            Self::ObjCpp => &OBJCPP,
            Self::Html => &HTML,
            Self::Xml => &XML,
            Self::Rss => &RSS,
            Self::PropertyList => &PROPERTY_LIST,
        }
    }

    /// Applies the line ending policy of the language.
    pub fn prepare(self, text: &str) -> Cow<'_, str> {
        match self.line_endings() {
            LineEndings::Normalize if text.contains('\r') => {
                Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
            }
            LineEndings::Normalize | LineEndings::Preserve => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown language `{0}`")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| UnknownLanguage(name.to_owned()))
    }
}
