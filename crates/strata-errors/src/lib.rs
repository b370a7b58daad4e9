use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    /// Input the parser recovered from; the tree is still complete.
    Warning,
}

#[salsa::accumulator]
#[derive(Debug)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Error, message: message.into(), range }
    }

    pub fn warning(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Warning, message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, Renderer, Severity, TextRange};

    #[test]
    fn renders_origin_and_message() {
        let text = "int main() {\n";
        let diagnostic =
            Diagnostic::warning("unclosed `{`", TextRange::new(11.into(), 12.into()));
        assert_eq!(diagnostic.severity(), Severity::Warning);

        let rendered = diagnostic.render(&Renderer::plain(), "main.c", text).to_string();
        assert!(rendered.contains("warning: unclosed `{`"), "{rendered}");
        assert!(rendered.contains("main.c"), "{rendered}");
    }
}
