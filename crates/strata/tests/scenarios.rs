use expect_test::expect;
use strata::SyntaxKind::{self, *};
use strata::{Document, Language, ParseOptions, SyntaxNode, parse_text};

fn parse(text: &str, language: Language) -> Document {
    let document = parse_text(text, language, ParseOptions::default());
    assert_eq!(document.text(), text);
    document
}

fn significant_kinds(node: SyntaxNode<'_>) -> Vec<SyntaxKind> {
    node.children().filter(|child| !child.is_trivia()).map(SyntaxNode::kind).collect()
}

#[test]
fn function_with_return() {
    let document = parse("int main(){return 0;}", Language::C);
    expect![[r#"
        ROOT@0..21
          FUNCTION_DEFINITION@0..21
            INT_KW@0..3 "int"
            WHITESPACE@3..4 " "
            TEXT@4..8 "main"
            PARENTHESIS@8..10
              DELIMITER@8..9 "("
              DELIMITER@9..10 ")"
            BRACES@10..21
              DELIMITER@10..11 "{"
              FLOW_RETURN@11..20
                RETURN_KW@11..17 "return"
                WHITESPACE@17..18 " "
                NUMBER@18..19 "0"
                SEMICOLON@19..20 ";"
              DELIMITER@20..21 "}"
    "#]]
    .assert_eq(&document.root().debug_dump());
}

#[test]
fn switch_labels_are_flat() {
    let text = "void f(int x) {
    switch (x) {
    case 1:
        a();
        break;
    case 2:
    case 3:
        b();
        break;
    case 5:
        c();
    default:
        d();
    }
}
";
    let document = parse(text, Language::C);
    let switch = document
        .root()
        .descendants()
        .find(|node| node.kind() == FLOW_SWITCH)
        .expect("switch statement");
    let body = switch.find_first_child(BRACES).expect("switch body");

    assert_eq!(
        significant_kinds(body),
        [DELIMITER, FLOW_CASE, FLOW_CASE, FLOW_CASE, FLOW_CASE, FLOW_DEFAULT, DELIMITER]
    );
    let calls = body.descendants().filter(|node| node.kind() == FUNCTION_CALL).count();
    assert_eq!(calls, 4);
}

#[test]
fn unterminated_string_runs_to_the_end() {
    let text = "char *s = \"never closed;\nint x;";
    let document = parse(text, Language::C);

    let last = document.root().leaves().last().unwrap();
    assert_eq!(last.kind(), STRING_DOUBLE_QUOTE);
    assert_eq!(u32::from(last.range().end()) as usize, text.len());
    assert_eq!(last.lines().start, 1);
    assert_eq!(last.lines().end, 2);
}

#[test]
fn conditionals_nest() {
    let text = "#if A
void f() {
#ifdef B
    g();
#else
    h();
#endif
}
#if C
int y;
#endif
#else
int x;
#endif
";
    let document = parse(text, Language::C);
    let conditionals = document
        .root()
        .descendants()
        .filter(|node| node.kind() == PREPROCESSOR_CONDITIONAL)
        .collect::<Vec<_>>();
    assert_eq!(conditionals.len(), 3);

    let (outer, in_braces, same_level) = (conditionals[0], conditionals[1], conditionals[2]);
    assert_eq!(outer.parent(), Some(document.root()));
    assert_eq!(outer.lines().start, 1);
    let body = in_braces.ancestor(BRACES).unwrap();
    assert_eq!(body.parent().map(SyntaxNode::kind), Some(FUNCTION_DEFINITION));
    assert_eq!(in_braces.ancestor(PREPROCESSOR_CONDITIONAL), Some(outer));
    assert_eq!(same_level.parent(), Some(outer));
    assert_eq!((same_level.lines().start, same_level.lines().end), (9, 11));
}

#[test]
fn replace_keeps_arguments() {
    let mut document = parse("run(a, b);\n", Language::C);
    let call = document.root().first_child().unwrap();
    assert_eq!(call.kind(), FUNCTION_CALL);
    let call = call.id();

    let tree = document.tree_mut();
    let replacement = tree.new_node(FUNCTION_CALL).unwrap();
    tree.replace(call, replacement, true).unwrap();
    assert!(!tree.contains(call));

    let kinds = significant_kinds(document.tree().node(replacement));
    assert_eq!(kinds, [TEXT, PARENTHESIS]);
    assert_eq!(document.text(), "run(a, b);\n");
}

#[test]
fn stray_closing_brace_is_tolerated() {
    let text = "int main() { return 0; }}\n";
    let document = parse(text, Language::C);

    let kinds = significant_kinds(document.root());
    assert_eq!(kinds, [FUNCTION_DEFINITION, DELIMITER]);
    let messages = document.diagnostics().iter().map(|d| d.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["unmatched `}`"]);
}

#[test]
fn markup_elements_nest() {
    let text = "<ul>\n  <li>One<br>\n  <li>Two</li>\n</ul>\n";
    let document = parse(text, Language::Html);
    let list = document.root().first_child().unwrap();

    assert_eq!(strata::tag(list).map(|tag| tag.name), Some("ul"));
    let items = list.descendants().filter_map(strata::tag).map(|tag| tag.name).collect::<Vec<_>>();
    assert!(items.contains(&"li"));
    assert_eq!(strata::clean_content(list), "\n  One\n  Two\n");
}
