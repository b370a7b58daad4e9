use crate::SyntaxKind;

const SIZE: usize = SyntaxKind::ALL.len().div_ceil(64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    /// Whitespace, indentation and newlines.
    pub const TRIVIA: Self =
        Self::new([SyntaxKind::WHITESPACE, SyntaxKind::INDENTING, SyntaxKind::NEWLINE]);

    /// Containers introduced by syntax analysis passes.
    pub const SYNTHESIZED: Self = Self::new([
        SyntaxKind::PREPROCESSOR_CONDITIONAL,
        SyntaxKind::CONDITION_IF,
        SyntaxKind::CONDITION_ELSE_IF,
        SyntaxKind::CONDITION_ELSE,
        SyntaxKind::FLOW_SWITCH,
        SyntaxKind::FLOW_CASE,
        SyntaxKind::FLOW_DEFAULT,
        SyntaxKind::FLOW_FOR,
        SyntaxKind::FLOW_WHILE,
        SyntaxKind::FLOW_DO_WHILE,
        SyntaxKind::FLOW_GOTO,
        SyntaxKind::FLOW_LABEL,
        SyntaxKind::FLOW_RETURN,
        SyntaxKind::TYPEDEF,
        SyntaxKind::TYPE_ENUM,
        SyntaxKind::TYPE_STRUCT,
        SyntaxKind::TYPE_UNION,
        SyntaxKind::SIZEOF,
        SyntaxKind::TYPEOF,
        SyntaxKind::FUNCTION_PROTOTYPE,
        SyntaxKind::FUNCTION_DEFINITION,
        SyntaxKind::FUNCTION_CALL,
        SyntaxKind::CPP_NAMESPACE,
        SyntaxKind::CPP_CLASS,
        SyntaxKind::CPP_PUBLIC,
        SyntaxKind::CPP_PROTECTED,
        SyntaxKind::CPP_PRIVATE,
        SyntaxKind::CPP_TRY,
        SyntaxKind::CPP_CATCH,
        SyntaxKind::CPP_THROW,
        SyntaxKind::CPP_NEW,
        SyntaxKind::CPP_DELETE,
        SyntaxKind::OBJC_INTERFACE,
        SyntaxKind::OBJC_IMPLEMENTATION,
        SyntaxKind::OBJC_PROTOCOL,
        SyntaxKind::OBJC_PROPERTY,
        SyntaxKind::OBJC_SYNTHESIZE,
        SyntaxKind::OBJC_TRY,
        SyntaxKind::OBJC_CATCH,
        SyntaxKind::OBJC_FINALLY,
        SyntaxKind::OBJC_THROW,
        SyntaxKind::OBJC_SYNCHRONIZED,
        SyntaxKind::OBJC_SELECTOR,
        SyntaxKind::OBJC_ENCODE,
        SyntaxKind::OBJC_METHOD_DECLARATION,
        SyntaxKind::OBJC_METHOD_IMPLEMENTATION,
        SyntaxKind::OBJC_METHOD_CALL,
    ]);

    /// Element containers produced by tag pairing.
    pub const ELEMENTS: Self = Self::new([
        SyntaxKind::ELEMENT,
        SyntaxKind::RSS_CHANNEL,
        SyntaxKind::RSS_ITEM,
        SyntaxKind::RSS_CATEGORY,
        SyntaxKind::RSS_TITLE,
        SyntaxKind::RSS_LINK,
        SyntaxKind::RSS_DESCRIPTION,
        SyntaxKind::RSS_LANGUAGE,
        SyntaxKind::RSS_AUTHOR,
        SyntaxKind::RSS_ENCLOSURE,
        SyntaxKind::RSS_GUID,
        SyntaxKind::RSS_PUBLICATION_DATE,
        SyntaxKind::ATOM_FEED,
        SyntaxKind::ATOM_ENTRY,
        SyntaxKind::ATOM_SUBTITLE,
        SyntaxKind::ATOM_ID,
        SyntaxKind::ATOM_SUMMARY,
        SyntaxKind::ATOM_NAME,
        SyntaxKind::ATOM_EMAIL,
        SyntaxKind::ATOM_UPDATED,
        SyntaxKind::PLIST,
        SyntaxKind::PLIST_DICTIONARY,
        SyntaxKind::PLIST_ARRAY,
        SyntaxKind::PLIST_KEY,
        SyntaxKind::PLIST_STRING,
        SyntaxKind::PLIST_INTEGER,
        SyntaxKind::PLIST_REAL,
        SyntaxKind::PLIST_TRUE,
        SyntaxKind::PLIST_FALSE,
        SyntaxKind::PLIST_DATE,
        SyntaxKind::PLIST_DATA,
    ]);

    const fn from_kind(kind: SyntaxKind) -> Self {
        let kind = kind as u16;

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < Self::EMPTY.bits.len(),
            "Index out of bounds. Increase the size of the bitset array."
        );

        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = mask;

        Self { bits }
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        self.union(&Self::from_kind(kind))
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        self.bits[slot_index] & mask != 0
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < self.bits.len() {
            if self.bits[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        SyntaxKind::ALL.iter().copied().filter(move |&kind| self.contains(kind))
    }
}

impl From<SyntaxKind> for SyntaxSet {
    fn from(kind: SyntaxKind) -> Self {
        Self::from_kind(kind)
    }
}

impl FromIterator<SyntaxKind> for SyntaxSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
