use strata_kinds::SyntaxKind::{self, *};
use strata_kinds::SyntaxSet;

use crate::analysis::Pass;

mod calls;
mod flow;
mod functions;
mod objc;
mod preprocessor;
mod types;

pub(crate) const C_PASSES: &[Pass] = &[
    Pass { name: "preprocessor", rule: preprocessor::conditional },
    Pass { name: "types", rule: types::types },
    Pass { name: "functions", rule: functions::function },
    Pass { name: "flow", rule: flow::flow },
    Pass { name: "labels", rule: flow::labels },
    Pass { name: "calls", rule: calls::call },
];

pub(crate) const OBJC_PASSES: &[Pass] = &[
    Pass { name: "preprocessor", rule: preprocessor::conditional },
    Pass { name: "declarations", rule: objc::declaration },
    Pass { name: "types", rule: types::types },
    Pass { name: "functions", rule: functions::function },
    Pass { name: "flow", rule: flow::flow },
    Pass { name: "labels", rule: flow::labels },
    Pass { name: "calls", rule: objc::call },
];

const DIRECTIVES: SyntaxSet = SyntaxSet::new([
    PREPROCESSOR_IF,
    PREPROCESSOR_IFDEF,
    PREPROCESSOR_IFNDEF,
    PREPROCESSOR_ELIF,
    PREPROCESSOR_ELSE,
    PREPROCESSOR_ENDIF,
    PREPROCESSOR_DEFINE,
    PREPROCESSOR_UNDEF,
    PREPROCESSOR_INCLUDE,
    PREPROCESSOR_IMPORT,
    PREPROCESSOR_PRAGMA,
    PREPROCESSOR_WARNING,
    PREPROCESSOR_ERROR,
]);

/// Siblings after which a new declaration or statement can start.
const BOUNDARY: SyntaxSet = SyntaxSet::new([SEMICOLON, BRACES, DELIMITER, COLON, AT_END_KW])
    .union(&DIRECTIVES)
    .union(&SyntaxSet::SYNTHESIZED);

/// Siblings a plain statement never runs across.
const STATEMENT_STOP: SyntaxSet =
    SyntaxSet::new([DELIMITER, CASE_KW, DEFAULT_KW, PREPROCESSOR_CONDITIONAL]).union(&DIRECTIVES);

const TYPE_WORDS: SyntaxSet = SyntaxSet::new([
    VOID_KW,
    AUTO_KW,
    STATIC_KW,
    REGISTER_KW,
    VOLATILE_KW,
    CONST_KW,
    EXTERN_KW,
    INLINE_KW,
    SIGNED_KW,
    UNSIGNED_KW,
    CHAR_KW,
    SHORT_KW,
    INT_KW,
    LONG_KW,
    FLOAT_KW,
    DOUBLE_KW,
    STRUCT_KW,
    UNION_KW,
    ENUM_KW,
    VIRTUAL_KW,
    EXPLICIT_KW,
    FRIEND_KW,
    MUTABLE_KW,
    BOOL_KW,
    TYPENAME_KW,
]);

/// Words that can make up the return type and name of a function.
const DECLARATION_WORDS: SyntaxSet =
    SyntaxSet::new([TEXT, ASTERISK, AMPERSAND, TILDE, DOUBLE_COLON]).union(&TYPE_WORDS);

fn at_boundary(prev: Option<SyntaxKind>) -> bool {
    prev.is_none_or(|kind| BOUNDARY.contains(kind))
}
