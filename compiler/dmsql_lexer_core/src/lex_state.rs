//! Lexical states and the multi-match constructs they scan.

use std::fmt;

/// Start condition of the scan loop.
///
/// Each state selects a different entry point into the same transition
/// table. `Initial` is the only state in which end of input is a normal
/// end of stream; every other state is inside an unfinished construct.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexState {
    #[default]
    Initial,
    /// Inside `/* ... */`.
    BlockComment,
    /// Inside `'...'`.
    QuotedString,
    /// Inside `"..."`.
    QuotedIdentifier,
    /// Inside `b'...'`.
    BinaryStringLit,
    /// Inside `x'...'`.
    HexStringLit,
    /// Inside `/*+ ... */`.
    HintComment,
    /// After `q'`, expecting the opening delimiter.
    CustomQuoteOpen,
    /// Inside `q'<delim> ... <closer>'`.
    CustomQuoteBody,
}

impl LexState {
    pub const COUNT: usize = 9;

    pub const ALL: [LexState; Self::COUNT] = [
        Self::Initial,
        Self::BlockComment,
        Self::QuotedString,
        Self::QuotedIdentifier,
        Self::BinaryStringLit,
        Self::HexStringLit,
        Self::HintComment,
        Self::CustomQuoteOpen,
        Self::CustomQuoteBody,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The construct being scanned, or `None` in `Initial`.
    pub const fn construct_kind(self) -> Option<ConstructKind> {
        match self {
            Self::Initial => None,
            Self::BlockComment => Some(ConstructKind::Comment),
            Self::HintComment => Some(ConstructKind::Hint),
            Self::QuotedString => Some(ConstructKind::QuotedString),
            Self::QuotedIdentifier => Some(ConstructKind::QuotedIdentifier),
            Self::BinaryStringLit => Some(ConstructKind::BinaryString),
            Self::HexStringLit => Some(ConstructKind::HexString),
            Self::CustomQuoteOpen | Self::CustomQuoteBody => Some(ConstructKind::CustomQuote),
        }
    }
}

/// A construct that spans several matches and can be left unterminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructKind {
    Comment,
    Hint,
    QuotedString,
    QuotedIdentifier,
    BinaryString,
    HexString,
    CustomQuote,
}

impl ConstructKind {
    pub const fn description(self) -> &'static str {
        match self {
            Self::Comment => "block comment",
            Self::Hint => "optimizer hint",
            Self::QuotedString => "string literal",
            Self::QuotedIdentifier => "quoted identifier",
            Self::BinaryString => "binary string literal",
            Self::HexString => "hex string literal",
            Self::CustomQuote => "alternative-quote literal",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, state) in LexState::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }

    #[test]
    fn only_initial_has_no_construct() {
        for state in LexState::ALL {
            assert_eq!(
                state.construct_kind().is_none(),
                state == LexState::Initial,
                "{state:?}"
            );
        }
    }

    #[test]
    fn both_custom_quote_states_report_the_same_construct() {
        assert_eq!(
            LexState::CustomQuoteOpen.construct_kind(),
            LexState::CustomQuoteBody.construct_kind()
        );
    }

    #[test]
    fn display() {
        assert_eq!(ConstructKind::Comment.to_string(), "block comment");
        assert_eq!(ConstructKind::QuotedString.to_string(), "string literal");
    }
}
