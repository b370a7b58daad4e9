//! Kind catalogs of the C family. C++ and Objective-C extend the C catalog; Objective-C++
//! layers the Objective-C additions on top of C++.

use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::{
    KindSpec, MatchContext, MatchFn, Pattern, SyntaxSet, compose, is_identifier_char,
};

fn whitespace(cx: MatchContext<'_>) -> Option<usize> {
    let len = cx.rest.len() - cx.rest.trim_start_matches([' ', '\t', '\u{b}', '\u{c}']).len();
    (len > 0).then_some(len)
}

fn indenting(cx: MatchContext<'_>) -> Option<usize> {
    if cx.at_line_start() { whitespace(cx) } else { None }
}

/// Zero-length match in front of a newline; the newline itself stays outside the span.
fn line_end(cx: MatchContext<'_>) -> Option<usize> {
    cx.rest.starts_with('\n').then_some(0)
}

fn number(cx: MatchContext<'_>) -> Option<usize> {
    if !cx.at_word_boundary() || !cx.rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let len = cx.rest.find(|c: char| !is_identifier_char(c) && c != '.').unwrap_or(cx.rest.len());
    Some(len)
}

fn operator(cx: MatchContext<'_>) -> Option<usize> {
    let mut len = 0;
    for c in cx.rest.chars() {
        if !matches!(c, '+' | '-' | '/' | '%' | '<' | '>') {
            break;
        }
        let rest = &cx.rest[len..];
        if len > 0 && ["//", "/*", "->"].iter().any(|&stop| rest.starts_with(stop)) {
            break;
        }
        len += 1;
    }
    (len > 0).then_some(len)
}

/// `#`, optional blanks and the directive name, with nothing but blanks before it on its line.
fn directive(cx: MatchContext<'_>, name: &str) -> Option<usize> {
    if !cx.blank_prefix {
        return None;
    }
    let after_pound = cx.rest.strip_prefix('#')?;
    let after_name = after_pound.trim_start_matches([' ', '\t']).strip_prefix(name)?;
    if after_name.starts_with(is_identifier_char) {
        return None;
    }
    Some(cx.rest.len() - after_name.len())
}

macro_rules! directives {
    ($($matcher:ident => $name:literal,)*) => {
        $(
            fn $matcher(cx: MatchContext<'_>) -> Option<usize> {
                directive(cx, $name)
            }
        )*
    };
}

directives! {
    directive_if => "if",
    directive_ifdef => "ifdef",
    directive_ifndef => "ifndef",
    directive_elif => "elif",
    directive_else => "else",
    directive_endif => "endif",
    directive_define => "define",
    directive_undef => "undef",
    directive_include => "include",
    directive_import => "import",
    directive_pragma => "pragma",
    directive_warning => "warning",
    directive_error => "error",
}

const DIRECTIVE_INTERIOR: SyntaxSet = SyntaxSet::new([
    WHITESPACE,
    NEWLINE,
    C_COMMENT,
    CPP_COMMENT,
    STRING_SINGLE_QUOTE,
    STRING_DOUBLE_QUOTE,
    PARENTHESIS,
    EXCLAMATION_MARK,
    AMPERSAND,
    VERTICAL_BAR,
    COMMA,
]);

/// Runs to the end of the line; a backslash continues it on the next one.
const fn directive_spec(kind: SyntaxKind, matcher: MatchFn) -> KindSpec {
    KindSpec::custom(kind, matcher)
        .until(Pattern::Custom(line_end))
        .escape('\\')
        .interior(DIRECTIVE_INTERIOR)
        .patches(SyntaxSet::new([POUND]))
}

const fn quoted(kind: SyntaxKind, open: &'static str, close: &'static str) -> KindSpec {
    KindSpec::literal(kind, open).until(Pattern::Literal(close)).escape('\\')
}

const C_KINDS: &[KindSpec] = &[
    KindSpec::custom(WHITESPACE, whitespace),
    KindSpec::custom(INDENTING, indenting).patches(SyntaxSet::new([WHITESPACE])),
    KindSpec::literal(NEWLINE, "\n"),
    KindSpec::custom(NUMBER, number),
    KindSpec::custom(OPERATOR, operator),
    KindSpec::pair(BRACES, "{", "}"),
    KindSpec::pair(PARENTHESIS, "(", ")"),
    KindSpec::pair(BRACKETS, "[", "]"),
    KindSpec::literal(COLON, ":"),
    KindSpec::literal(SEMICOLON, ";"),
    KindSpec::literal(QUESTION_MARK, "?"),
    KindSpec::literal(EXCLAMATION_MARK, "!"),
    KindSpec::literal(VERTICAL_BAR, "|"),
    KindSpec::literal(TILDE, "~"),
    KindSpec::literal(CARET, "^"),
    KindSpec::literal(AMPERSAND, "&"),
    KindSpec::literal(ASTERISK, "*"),
    KindSpec::literal(COMMA, ","),
    KindSpec::literal(EQUAL, "="),
    KindSpec::literal(POUND, "#"),
    KindSpec::literal(DOT, "."),
    KindSpec::literal(ARROW, "->").patches(SyntaxSet::new([OPERATOR])),
    KindSpec::literal(C_COMMENT, "/*")
        .until(Pattern::Literal("*/"))
        .patches(SyntaxSet::new([OPERATOR])),
    KindSpec::literal(CPP_COMMENT, "//")
        .until(Pattern::Custom(line_end))
        .patches(SyntaxSet::new([OPERATOR])),
    quoted(STRING_SINGLE_QUOTE, "'", "'"),
    quoted(STRING_DOUBLE_QUOTE, "\"", "\""),
    directive_spec(PREPROCESSOR_IF, directive_if),
    directive_spec(PREPROCESSOR_IFDEF, directive_ifdef),
    directive_spec(PREPROCESSOR_IFNDEF, directive_ifndef),
    directive_spec(PREPROCESSOR_ELIF, directive_elif),
    directive_spec(PREPROCESSOR_ELSE, directive_else),
    directive_spec(PREPROCESSOR_ENDIF, directive_endif),
    directive_spec(PREPROCESSOR_DEFINE, directive_define),
    directive_spec(PREPROCESSOR_UNDEF, directive_undef),
    directive_spec(PREPROCESSOR_INCLUDE, directive_include),
    directive_spec(PREPROCESSOR_PRAGMA, directive_pragma),
    directive_spec(PREPROCESSOR_WARNING, directive_warning),
    directive_spec(PREPROCESSOR_ERROR, directive_error),
    KindSpec::keyword(IF_KW, "if"),
    KindSpec::keyword(ELSE_KW, "else"),
    KindSpec::keyword(SWITCH_KW, "switch"),
    KindSpec::keyword(CASE_KW, "case"),
    KindSpec::keyword(DEFAULT_KW, "default"),
    KindSpec::keyword(FOR_KW, "for"),
    KindSpec::keyword(DO_KW, "do"),
    KindSpec::keyword(WHILE_KW, "while"),
    KindSpec::keyword(BREAK_KW, "break"),
    KindSpec::keyword(CONTINUE_KW, "continue"),
    KindSpec::keyword(GOTO_KW, "goto"),
    KindSpec::keyword(RETURN_KW, "return"),
    KindSpec::keyword(TYPEDEF_KW, "typedef"),
    KindSpec::keyword(ENUM_KW, "enum"),
    KindSpec::keyword(STRUCT_KW, "struct"),
    KindSpec::keyword(UNION_KW, "union"),
    KindSpec::keyword(SIZEOF_KW, "sizeof"),
    KindSpec::keyword(TYPEOF_KW, "typeof"),
    KindSpec::keyword(NULL_KW, "NULL"),
    KindSpec::keyword(VOID_KW, "void"),
    KindSpec::keyword(AUTO_KW, "auto"),
    KindSpec::keyword(STATIC_KW, "static"),
    KindSpec::keyword(REGISTER_KW, "register"),
    KindSpec::keyword(VOLATILE_KW, "volatile"),
    KindSpec::keyword(CONST_KW, "const"),
    KindSpec::keyword(EXTERN_KW, "extern"),
    KindSpec::keyword(INLINE_KW, "inline"),
    KindSpec::keyword(SIGNED_KW, "signed"),
    KindSpec::keyword(UNSIGNED_KW, "unsigned"),
    KindSpec::keyword(CHAR_KW, "char"),
    KindSpec::keyword(SHORT_KW, "short"),
    KindSpec::keyword(INT_KW, "int"),
    KindSpec::keyword(LONG_KW, "long"),
    KindSpec::keyword(FLOAT_KW, "float"),
    KindSpec::keyword(DOUBLE_KW, "double"),
];

const CPP_KINDS: &[KindSpec] = &[
    KindSpec::literal(DOUBLE_COLON, "::").patches(SyntaxSet::new([COLON])),
    KindSpec::keyword(NAMESPACE_KW, "namespace"),
    KindSpec::keyword(CLASS_KW, "class"),
    KindSpec::keyword(PUBLIC_KW, "public"),
    KindSpec::keyword(PROTECTED_KW, "protected"),
    KindSpec::keyword(PRIVATE_KW, "private"),
    KindSpec::keyword(USING_KW, "using"),
    KindSpec::keyword(VIRTUAL_KW, "virtual"),
    KindSpec::keyword(TRY_KW, "try"),
    KindSpec::keyword(CATCH_KW, "catch"),
    KindSpec::keyword(THROW_KW, "throw"),
    KindSpec::keyword(NEW_KW, "new"),
    KindSpec::keyword(DELETE_KW, "delete"),
    KindSpec::keyword(TEMPLATE_KW, "template"),
    KindSpec::keyword(TYPENAME_KW, "typename"),
    KindSpec::keyword(OPERATOR_KW, "operator"),
    KindSpec::keyword(THIS_KW, "this"),
    KindSpec::keyword(TRUE_KW, "true"),
    KindSpec::keyword(FALSE_KW, "false"),
    KindSpec::keyword(BOOL_KW, "bool"),
    KindSpec::keyword(EXPLICIT_KW, "explicit"),
    KindSpec::keyword(FRIEND_KW, "friend"),
    KindSpec::keyword(MUTABLE_KW, "mutable"),
];

const OBJC_KINDS: &[KindSpec] = &[
    directive_spec(PREPROCESSOR_IMPORT, directive_import),
    quoted(OBJC_STRING, "@\"", "\""),
    KindSpec::keyword(AT_INTERFACE_KW, "@interface"),
    KindSpec::keyword(AT_IMPLEMENTATION_KW, "@implementation"),
    KindSpec::keyword(AT_PROTOCOL_KW, "@protocol"),
    KindSpec::keyword(AT_END_KW, "@end"),
    KindSpec::keyword(AT_CLASS_KW, "@class"),
    KindSpec::keyword(AT_PUBLIC_KW, "@public"),
    KindSpec::keyword(AT_PROTECTED_KW, "@protected"),
    KindSpec::keyword(AT_PRIVATE_KW, "@private"),
    KindSpec::keyword(AT_REQUIRED_KW, "@required"),
    KindSpec::keyword(AT_OPTIONAL_KW, "@optional"),
    KindSpec::keyword(AT_PROPERTY_KW, "@property"),
    KindSpec::keyword(AT_SYNTHESIZE_KW, "@synthesize"),
    KindSpec::keyword(AT_TRY_KW, "@try"),
    KindSpec::keyword(AT_CATCH_KW, "@catch"),
    KindSpec::keyword(AT_FINALLY_KW, "@finally"),
    KindSpec::keyword(AT_THROW_KW, "@throw"),
    KindSpec::keyword(AT_SYNCHRONIZED_KW, "@synchronized"),
    KindSpec::keyword(AT_SELECTOR_KW, "@selector"),
    KindSpec::keyword(AT_ENCODE_KW, "@encode"),
    KindSpec::keyword(NIL_KW, "nil"),
    KindSpec::keyword(SELF_KW, "self"),
    KindSpec::keyword(SUPER_KW, "super"),
];

pub(super) fn kinds() -> Vec<KindSpec> {
    C_KINDS.to_vec()
}

pub(super) fn cpp_kinds() -> Vec<KindSpec> {
    compose(C_KINDS, CPP_KINDS)
}

pub(super) fn objc_kinds() -> Vec<KindSpec> {
    compose(C_KINDS, OBJC_KINDS)
}

pub(super) fn objcpp_kinds() -> Vec<KindSpec> {
    compose(&cpp_kinds(), OBJC_KINDS)
}

#[cfg(test)]
mod tests {
    use strata_kinds::KindTable;
    use strata_kinds::SyntaxKind::{self, *};
    use strata_scanner::scan;

    fn leaves(table: &KindTable, text: &str) -> Vec<(SyntaxKind, String)> {
        let spans = scan(text, table);
        spans.iter().map(|span| (span.kind(), text[span.range()].to_owned())).collect()
    }

    fn kinds(table: &KindTable, text: &str) -> Vec<SyntaxKind> {
        scan(text, table).iter().map(|span| span.kind()).collect()
    }

    #[test]
    fn numbers_and_operators() {
        let table = KindTable::new(super::kinds());
        assert_eq!(
            leaves(&table, "x1+0x1F-2.5"),
            [
                (TEXT, "x1".to_owned()),
                (OPERATOR, "+".to_owned()),
                (NUMBER, "0x1F".to_owned()),
                (OPERATOR, "-".to_owned()),
                (NUMBER, "2.5".to_owned()),
            ]
        );
        assert_eq!(kinds(&table, "a->b"), [TEXT, ARROW, TEXT]);
        assert_eq!(kinds(&table, "a</*c*/b"), [TEXT, OPERATOR, C_COMMENT, TEXT]);
        assert_eq!(kinds(&table, "x // y"), [TEXT, WHITESPACE, CPP_COMMENT]);
    }

    #[test]
    fn directives() {
        let table = KindTable::new(super::kinds());
        assert_eq!(kinds(&table, "#include <a.h>\n"), [PREPROCESSOR_INCLUDE, NEWLINE]);
        assert_eq!(kinds(&table, "  #  ifdef X\n"), [INDENTING, PREPROCESSOR_IFDEF, NEWLINE]);
        assert_eq!(kinds(&table, "#ifdef X"), [PREPROCESSOR_IFDEF]);
        assert_eq!(kinds(&table, "#iffy"), [POUND, TEXT]);
        assert_eq!(kinds(&table, "a#if"), [TEXT, POUND, IF_KW]);
        assert_eq!(
            kinds(&table, "x; #if A"),
            [TEXT, SEMICOLON, WHITESPACE, POUND, IF_KW, WHITESPACE, TEXT]
        );
        assert_eq!(
            kinds(&table, "x;\n\t#endif"),
            [TEXT, SEMICOLON, NEWLINE, INDENTING, PREPROCESSOR_ENDIF]
        );
        // `#import` is an Objective-C directive.
        assert_eq!(
            kinds(&table, "#import <a.h>"),
            [POUND, TEXT, WHITESPACE, OPERATOR, TEXT, DOT, TEXT, OPERATOR]
        );
    }

    #[test]
    fn language_additions() {
        let c = KindTable::new(super::kinds());
        let cpp = KindTable::new(super::cpp_kinds());
        let objc = KindTable::new(super::objc_kinds());
        let objcpp = KindTable::new(super::objcpp_kinds());

        assert_eq!(kinds(&c, "a::b"), [TEXT, COLON, COLON, TEXT]);
        assert_eq!(kinds(&cpp, "a::b"), [TEXT, DOUBLE_COLON, TEXT]);
        assert_eq!(kinds(&c, "class"), [TEXT]);
        assert_eq!(kinds(&cpp, "class"), [CLASS_KW]);
        assert_eq!(kinds(&objc, "@end"), [AT_END_KW]);
        assert_eq!(kinds(&objc, "@\"hi\""), [OBJC_STRING]);
        assert_eq!(
            kinds(&objcpp, "@interface A::B"),
            [AT_INTERFACE_KW, WHITESPACE, TEXT, DOUBLE_COLON, TEXT]
        );
        assert_eq!(kinds(&objc, "#import <a.h>"), [PREPROCESSOR_IMPORT]);
    }
}
