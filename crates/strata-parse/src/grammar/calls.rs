use strata_kinds::SyntaxKind::*;
use strata_kinds::SyntaxSet;

use crate::analysis::{Match, Parser};

const CALLEES: SyntaxSet = SyntaxSet::new([TEXT, THIS_KW, SELF_KW, SUPER_KW]);

const MEMBER_ACCESS: SyntaxSet = SyntaxSet::new([DOT, ARROW, DOUBLE_COLON]);

/// Nodes whose parameter lists look like calls but are not.
const NOT_CALLS: SyntaxSet = SyntaxSet::new([
    FUNCTION_DEFINITION,
    FUNCTION_PROTOTYPE,
    CPP_NEW,
    OBJC_METHOD_DECLARATION,
    OBJC_METHOD_IMPLEMENTATION,
]);

/// `name(args)`, `object.method(args)`, `ns::name(args)`.
pub(super) fn call(p: &mut Parser<'_>) -> Option<Match> {
    if !p.at_any(CALLEES)
        || NOT_CALLS.contains(p.parent_kind())
        || p.prev_kind().is_some_and(|kind| MEMBER_ACCESS.contains(kind))
    {
        return None;
    }

    let m = p.start();
    p.advance();
    while p.at_any(MEMBER_ACCESS) && p.nth(1).is_some_and(|kind| CALLEES.contains(kind)) {
        p.advance();
        p.advance();
    }
    let called = p.eat(PARENTHESIS);
    m.finish(p, called.then_some(FUNCTION_CALL))
}
