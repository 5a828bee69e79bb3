//! Tokens handed to the parser.

use std::fmt;

/// Token category.
///
/// Deliberately coarse: keywords, identifiers, operators and quoted
/// identifiers are all [`TokenKind::Normal`] and are told apart by text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Normal,
    Int,
    Decimal,
    Double,
    HexInt,
    StringLit,
    WhitespaceOrComment,
    Null,
}

impl TokenKind {
    /// Whitespace and comments, which a parser normally skips.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WhitespaceOrComment)
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Decimal | Self::Double | Self::HexInt)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Int => "INT",
            Self::Decimal => "DECIMAL",
            Self::Double => "DOUBLE",
            Self::HexInt => "HEX_INT",
            Self::StringLit => "STRING",
            Self::WhitespaceOrComment => "WHITESPACE_OR_COMMENT",
            Self::Null => "NULL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token.
///
/// `text` is the exact source text the token covers, so concatenating the
/// text of every token reproduces the input. `value` is set when the
/// semantic value differs from `text` (string literals) or is normalized
/// (`null`). `start..end` is the half-open character range in the stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: Option<String>,
    pub start: u64,
    pub end: u64,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "token range must not be inverted");
        Token {
            kind,
            text,
            value: None,
            start,
            end,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }

    /// Semantic value, falling back to the source text.
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }

    /// Length in characters.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}..{}", self.kind, self.text, self.start, self.end)
    }
}
