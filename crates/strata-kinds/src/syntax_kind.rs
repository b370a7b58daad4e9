use crate::SyntaxSet;

macro_rules! syntax_kinds {
    ($($kind:ident => $name:literal,)*) => {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($kind,)*
        }

        impl SyntaxKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind,)*];

            /// Display name, e.g. `FunctionDefinition`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(SyntaxKind::$kind => $name,)*
                }
            }
        }
    };
}

syntax_kinds! {
    ROOT => "Root",
    TEXT => "Text",
    WHITESPACE => "Whitespace",
    INDENTING => "Indenting",
    NEWLINE => "Newline",
    DELIMITER => "Match",
    NUMBER => "Number",
    OPERATOR => "Operator",

    BRACES => "Braces",
    PARENTHESIS => "Parenthesis",
    BRACKETS => "Brackets",

    COLON => "Colon",
    DOUBLE_COLON => "DoubleColon",
    SEMICOLON => "Semicolon",
    QUESTION_MARK => "QuestionMark",
    EXCLAMATION_MARK => "ExclamationMark",
    VERTICAL_BAR => "VerticalBar",
    TILDE => "Tilde",
    CARET => "Caret",
    AMPERSAND => "Ampersand",
    ASTERISK => "Asterisk",
    COMMA => "Comma",
    EQUAL => "Equal",
    POUND => "Pound",
    DOT => "Dot",
    ARROW => "Arrow",

    C_COMMENT => "CComment",
    CPP_COMMENT => "CPPComment",
    STRING_SINGLE_QUOTE => "StringSingleQuote",
    STRING_DOUBLE_QUOTE => "StringDoubleQuote",

    PREPROCESSOR_IF => "PreprocessorIf",
    PREPROCESSOR_IFDEF => "PreprocessorIfdef",
    PREPROCESSOR_IFNDEF => "PreprocessorIfndef",
    PREPROCESSOR_ELIF => "PreprocessorElseIf",
    PREPROCESSOR_ELSE => "PreprocessorElse",
    PREPROCESSOR_ENDIF => "PreprocessorEndif",
    PREPROCESSOR_DEFINE => "PreprocessorDefine",
    PREPROCESSOR_UNDEF => "PreprocessorUndefine",
    PREPROCESSOR_INCLUDE => "PreprocessorInclude",
    PREPROCESSOR_IMPORT => "PreprocessorImport",
    PREPROCESSOR_PRAGMA => "PreprocessorPragma",
    PREPROCESSOR_WARNING => "PreprocessorWarning",
    PREPROCESSOR_ERROR => "PreprocessorError",

    IF_KW => "If",
    ELSE_KW => "Else",
    SWITCH_KW => "Switch",
    CASE_KW => "Case",
    DEFAULT_KW => "Default",
    FOR_KW => "For",
    DO_KW => "Do",
    WHILE_KW => "While",
    BREAK_KW => "Break",
    CONTINUE_KW => "Continue",
    GOTO_KW => "Goto",
    RETURN_KW => "Return",
    TYPEDEF_KW => "Typedef",
    ENUM_KW => "Enum",
    STRUCT_KW => "Struct",
    UNION_KW => "Union",
    SIZEOF_KW => "SizeOf",
    TYPEOF_KW => "TypeOf",
    NULL_KW => "Null",
    VOID_KW => "Void",
    AUTO_KW => "Auto",
    STATIC_KW => "Static",
    REGISTER_KW => "Register",
    VOLATILE_KW => "Volatile",
    CONST_KW => "Const",
    EXTERN_KW => "Extern",
    INLINE_KW => "Inline",
    SIGNED_KW => "Signed",
    UNSIGNED_KW => "Unsigned",
    CHAR_KW => "Char",
    SHORT_KW => "Short",
    INT_KW => "Int",
    LONG_KW => "Long",
    FLOAT_KW => "Float",
    DOUBLE_KW => "Double",

    NAMESPACE_KW => "Namespace",
    CLASS_KW => "Class",
    PUBLIC_KW => "Public",
    PROTECTED_KW => "Protected",
    PRIVATE_KW => "Private",
    USING_KW => "Using",
    VIRTUAL_KW => "Virtual",
    TRY_KW => "Try",
    CATCH_KW => "Catch",
    THROW_KW => "Throw",
    NEW_KW => "New",
    DELETE_KW => "Delete",
    TEMPLATE_KW => "Template",
    TYPENAME_KW => "Typename",
    OPERATOR_KW => "OperatorKeyword",
    THIS_KW => "This",
    TRUE_KW => "True",
    FALSE_KW => "False",
    BOOL_KW => "Bool",
    EXPLICIT_KW => "Explicit",
    FRIEND_KW => "Friend",
    MUTABLE_KW => "Mutable",

    AT_INTERFACE_KW => "AtInterface",
    AT_IMPLEMENTATION_KW => "AtImplementation",
    AT_PROTOCOL_KW => "AtProtocol",
    AT_END_KW => "AtEnd",
    AT_CLASS_KW => "AtClass",
    AT_PUBLIC_KW => "AtPublic",
    AT_PROTECTED_KW => "AtProtected",
    AT_PRIVATE_KW => "AtPrivate",
    AT_REQUIRED_KW => "AtRequired",
    AT_OPTIONAL_KW => "AtOptional",
    AT_PROPERTY_KW => "AtProperty",
    AT_SYNTHESIZE_KW => "AtSynthesize",
    AT_TRY_KW => "AtTry",
    AT_CATCH_KW => "AtCatch",
    AT_FINALLY_KW => "AtFinally",
    AT_THROW_KW => "AtThrow",
    AT_SYNCHRONIZED_KW => "AtSynchronized",
    AT_SELECTOR_KW => "AtSelector",
    AT_ENCODE_KW => "AtEncode",
    NIL_KW => "Nil",
    SELF_KW => "Self",
    SUPER_KW => "Super",
    OBJC_STRING => "ObjCString",

    PREPROCESSOR_CONDITIONAL => "PreprocessorConditional",
    CONDITION_IF => "ConditionIf",
    CONDITION_ELSE_IF => "ConditionElseIf",
    CONDITION_ELSE => "ConditionElse",
    FLOW_SWITCH => "FlowSwitch",
    FLOW_CASE => "FlowCase",
    FLOW_DEFAULT => "FlowDefault",
    FLOW_FOR => "FlowFor",
    FLOW_WHILE => "FlowWhile",
    FLOW_DO_WHILE => "FlowDoWhile",
    FLOW_GOTO => "FlowGoto",
    FLOW_LABEL => "FlowLabel",
    FLOW_RETURN => "FlowReturn",
    TYPEDEF => "TypedefDeclaration",
    TYPE_ENUM => "TypeEnum",
    TYPE_STRUCT => "TypeStruct",
    TYPE_UNION => "TypeUnion",
    SIZEOF => "SizeOfExpression",
    TYPEOF => "TypeOfExpression",
    FUNCTION_PROTOTYPE => "FunctionPrototype",
    FUNCTION_DEFINITION => "FunctionDefinition",
    FUNCTION_CALL => "FunctionCall",

    CPP_NAMESPACE => "CPPNamespace",
    CPP_CLASS => "CPPClass",
    CPP_PUBLIC => "CPPPublic",
    CPP_PROTECTED => "CPPProtected",
    CPP_PRIVATE => "CPPPrivate",
    CPP_TRY => "CPPTry",
    CPP_CATCH => "CPPCatch",
    CPP_THROW => "CPPThrow",
    CPP_NEW => "CPPNew",
    CPP_DELETE => "CPPDelete",

    OBJC_INTERFACE => "ObjCInterface",
    OBJC_IMPLEMENTATION => "ObjCImplementation",
    OBJC_PROTOCOL => "ObjCProtocol",
    OBJC_PROPERTY => "ObjCProperty",
    OBJC_SYNTHESIZE => "ObjCSynthesize",
    OBJC_TRY => "ObjCTry",
    OBJC_CATCH => "ObjCCatch",
    OBJC_FINALLY => "ObjCFinally",
    OBJC_THROW => "ObjCThrow",
    OBJC_SYNCHRONIZED => "ObjCSynchronized",
    OBJC_SELECTOR => "ObjCSelector",
    OBJC_ENCODE => "ObjCEncode",
    OBJC_METHOD_DECLARATION => "ObjCMethodDeclaration",
    OBJC_METHOD_IMPLEMENTATION => "ObjCMethodImplementation",
    OBJC_METHOD_CALL => "ObjCMethodCall",

    TAG => "Tag",
    MARKUP_COMMENT => "MarkupComment",
    CDATA => "CDATA",
    DOCTYPE => "DOCTYPE",
    ENTITY => "Entity",
    PROCESSING_INSTRUCTION => "ProcessingInstruction",
    XML_DECLARATION => "XMLDeclaration",
    ELEMENT => "Element",

    RSS_CHANNEL => "RSSChannel",
    RSS_ITEM => "RSSItem",
    RSS_CATEGORY => "RSSCategory",
    RSS_TITLE => "RSSTitle",
    RSS_LINK => "RSSLink",
    RSS_DESCRIPTION => "RSSDescription",
    RSS_LANGUAGE => "RSSLanguage",
    RSS_AUTHOR => "RSSAuthor",
    RSS_ENCLOSURE => "RSSEnclosure",
    RSS_GUID => "RSSGUID",
    RSS_PUBLICATION_DATE => "RSSPublicationDate",
    ATOM_FEED => "AtomFeed",
    ATOM_ENTRY => "AtomEntry",
    ATOM_SUBTITLE => "AtomSubtitle",
    ATOM_ID => "AtomID",
    ATOM_SUMMARY => "AtomSummary",
    ATOM_NAME => "AtomName",
    ATOM_EMAIL => "AtomEmail",
    ATOM_UPDATED => "AtomUpdated",

    PLIST => "PropertyList",
    PLIST_DICTIONARY => "PropertyListDictionary",
    PLIST_ARRAY => "PropertyListArray",
    PLIST_KEY => "PropertyListKey",
    PLIST_STRING => "PropertyListString",
    PLIST_INTEGER => "PropertyListInteger",
    PLIST_REAL => "PropertyListReal",
    PLIST_TRUE => "PropertyListTrue",
    PLIST_FALSE => "PropertyListFalse",
    PLIST_DATE => "PropertyListDate",
    PLIST_DATA => "PropertyListData",
}

/// Kinds whose nodes are containers. Every other kind is atomic.
const CONTAINERS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::ROOT,
    SyntaxKind::BRACES,
    SyntaxKind::PARENTHESIS,
    SyntaxKind::BRACKETS,
    SyntaxKind::PREPROCESSOR_IF,
    SyntaxKind::PREPROCESSOR_IFDEF,
    SyntaxKind::PREPROCESSOR_IFNDEF,
    SyntaxKind::PREPROCESSOR_ELIF,
    SyntaxKind::PREPROCESSOR_ELSE,
    SyntaxKind::PREPROCESSOR_ENDIF,
    SyntaxKind::PREPROCESSOR_DEFINE,
    SyntaxKind::PREPROCESSOR_UNDEF,
    SyntaxKind::PREPROCESSOR_INCLUDE,
    SyntaxKind::PREPROCESSOR_IMPORT,
    SyntaxKind::PREPROCESSOR_PRAGMA,
    SyntaxKind::PREPROCESSOR_WARNING,
    SyntaxKind::PREPROCESSOR_ERROR,
])
.union(&SyntaxSet::SYNTHESIZED)
.union(&SyntaxSet::ELEMENTS);

const COMMENTS: SyntaxSet =
    SyntaxSet::new([SyntaxKind::C_COMMENT, SyntaxKind::CPP_COMMENT, SyntaxKind::MARKUP_COMMENT]);

impl SyntaxKind {
    /// Looks a kind up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Atomic kinds are leaves: their nodes never acquire children.
    pub const fn is_atomic(self) -> bool {
        !CONTAINERS.contains(self)
    }

    /// Whitespace, indentation and newlines.
    pub const fn is_trivia(self) -> bool {
        SyntaxSet::TRIVIA.contains(self)
    }

    pub const fn is_comment(self) -> bool {
        COMMENTS.contains(self)
    }

    /// Markup element containers, including the feed and property list ones.
    pub const fn is_element(self) -> bool {
        SyntaxSet::ELEMENTS.contains(self)
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
