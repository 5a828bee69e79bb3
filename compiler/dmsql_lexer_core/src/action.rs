//! Actions attached to accepting DFA states.

use crate::lex_state::LexState;
use crate::token::TokenKind;

/// What the driver does with a completed match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    // ─── Emit a token from the match alone ───
    /// Identifiers and unquoted keywords.
    Identifier,
    /// Single-character operators and stray characters.
    Operator,
    Integer,
    /// `1.`, `1.5`, `.5`
    Decimal,
    /// Exponent form or `d`/`f` suffix.
    Double,
    /// `0x1F`
    HexInteger,
    /// `1..`, an integer directly followed by a range boundary.
    IntegerWithBoundary,
    /// `:` or `:=`
    Assign,
    /// `.*`
    SelectStar,
    /// `..`
    Boundary,
    /// The `null` keyword.
    Null,
    /// `is` + separators + `null`
    IsNull,
    /// `not` + separators + `null`
    NotNull,
    /// A run of spaces and line feeds.
    Whitespace,
    /// `-- ...` or `// ...`, up to but excluding the line feed.
    LineComment,

    // ─── Enter a sub-state ───
    BeginString,
    BeginQuotedIdentifier,
    BeginBinaryString,
    BeginHexString,
    BeginBlockComment,
    BeginHint,
    /// `q'` followed by a delimiter. The delimiter itself is pushed back
    /// and re-read in [`LexState::CustomQuoteOpen`].
    BeginCustomQuote,
    /// The delimiter after `q'`; fixes the closer.
    OpenCustomQuote,

    // ─── Accumulate into the open construct ───
    /// Append the matched text to the value.
    AppendText,
    /// `''` inside a string: append a single quote.
    AppendQuote,
    /// `'` + line break + `'`: the literal continues, nothing is appended.
    ContinueString,

    // ─── Close the open construct and emit ───
    CloseString,
    CloseQuotedIdentifier,
    /// Closes `b'...'` and `x'...'`.
    CloseBitString,
    CloseComment,
    CloseCustomQuote,
}

/// Coarse grouping of [`Action`] for the scan loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionClass {
    /// Produces a token and returns control to the caller.
    Emit,
    /// Switches the lexical state and keeps scanning.
    Enter,
    /// Extends the open construct and keeps scanning.
    Accumulate,
}

impl Action {
    pub const fn class(self) -> ActionClass {
        match self {
            Self::BeginString
            | Self::BeginQuotedIdentifier
            | Self::BeginBinaryString
            | Self::BeginHexString
            | Self::BeginBlockComment
            | Self::BeginHint
            | Self::BeginCustomQuote
            | Self::OpenCustomQuote => ActionClass::Enter,
            Self::AppendText | Self::AppendQuote | Self::ContinueString => {
                ActionClass::Accumulate
            }
            _ => ActionClass::Emit,
        }
    }

    /// Whether this action finishes a construct opened by an earlier match.
    pub const fn closes_construct(self) -> bool {
        matches!(
            self,
            Self::CloseString
                | Self::CloseQuotedIdentifier
                | Self::CloseBitString
                | Self::CloseComment
                | Self::CloseCustomQuote
        )
    }

    /// Kind of the emitted token, for [`ActionClass::Emit`] actions.
    pub const fn token_kind(self) -> Option<TokenKind> {
        Some(match self {
            Self::Identifier
            | Self::Operator
            | Self::IntegerWithBoundary
            | Self::Assign
            | Self::SelectStar
            | Self::Boundary
            | Self::IsNull
            | Self::NotNull
            | Self::CloseQuotedIdentifier
            | Self::CloseBitString => TokenKind::Normal,
            Self::Integer => TokenKind::Int,
            Self::Decimal => TokenKind::Decimal,
            Self::Double => TokenKind::Double,
            Self::HexInteger => TokenKind::HexInt,
            Self::Null => TokenKind::Null,
            Self::Whitespace | Self::LineComment | Self::CloseComment => {
                TokenKind::WhitespaceOrComment
            }
            Self::CloseString | Self::CloseCustomQuote => TokenKind::StringLit,
            _ => return None,
        })
    }

    /// State entered by an [`ActionClass::Enter`] action.
    pub const fn target_state(self) -> Option<LexState> {
        Some(match self {
            Self::BeginString => LexState::QuotedString,
            Self::BeginQuotedIdentifier => LexState::QuotedIdentifier,
            Self::BeginBinaryString => LexState::BinaryStringLit,
            Self::BeginHexString => LexState::HexStringLit,
            Self::BeginBlockComment => LexState::BlockComment,
            Self::BeginHint => LexState::HintComment,
            Self::BeginCustomQuote => LexState::CustomQuoteOpen,
            Self::OpenCustomQuote => LexState::CustomQuoteBody,
            _ => return None,
        })
    }

    /// Whether the matched opener text is the start of the token's value.
    ///
    /// Quoted identifiers, bit strings and comments keep their delimiters;
    /// string literals do not.
    pub const fn keeps_opener(self) -> bool {
        matches!(
            self,
            Self::BeginQuotedIdentifier
                | Self::BeginBinaryString
                | Self::BeginHexString
                | Self::BeginBlockComment
                | Self::BeginHint
        )
    }
}
