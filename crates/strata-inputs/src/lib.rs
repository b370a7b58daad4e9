pub use line_index::{LineCol, LineIndex};
use text_size::TextSize;

#[salsa::input(debug)]
pub struct SourceFile {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl SourceFile {
    /// A lone `\r` ends a line too, as it does in markup files kept as written.
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        let text = self.text(db);
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
}

impl SourceFile {
    /// `path:line:column` of `offset`, both 1-based.
    pub fn location(self, db: &dyn salsa::Database, offset: TextSize) -> String {
        let LineCol { line, col } = self.line_index(db).line_col(offset);
        format!("{}:{}:{}", self.path(db), line + 1, col + 1)
    }
}
