//! Punctuation vocabulary (delimiters and separators).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Colon,
    Dot,
    Arrow,
    Ellipsis,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
}

/// Registry of punctuation tokens, ordered like [`PunctuationId`].
pub const PUNCTUATION: &[PunctuationInfo] = &[
    PunctuationInfo {
        id: PunctuationId::Comma,
        canonical: ",",
    },
    PunctuationInfo {
        id: PunctuationId::Colon,
        canonical: ":",
    },
    PunctuationInfo {
        id: PunctuationId::Dot,
        canonical: ".",
    },
    PunctuationInfo {
        id: PunctuationId::Arrow,
        canonical: "->",
    },
    PunctuationInfo {
        id: PunctuationId::Ellipsis,
        canonical: "...",
    },
    PunctuationInfo {
        id: PunctuationId::LParen,
        canonical: "(",
    },
    PunctuationInfo {
        id: PunctuationId::RParen,
        canonical: ")",
    },
    PunctuationInfo {
        id: PunctuationId::LBracket,
        canonical: "[",
    },
    PunctuationInfo {
        id: PunctuationId::RBracket,
        canonical: "]",
    },
    PunctuationInfo {
        id: PunctuationId::LBrace,
        canonical: "{",
    },
    PunctuationInfo {
        id: PunctuationId::RBrace,
        canonical: "}",
    },
];

pub fn as_str(id: PunctuationId) -> &'static str {
    PUNCTUATION[id as usize].canonical
}
