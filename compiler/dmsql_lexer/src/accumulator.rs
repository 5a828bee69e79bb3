//! Text collected across the matches of one multi-match token.

use dmsql_lexer_core::{Token, TokenKind};

/// Open construct being assembled.
///
/// `raw` receives every match verbatim and becomes the token text; `value`
/// receives only what the actions append and becomes the decoded value.
#[derive(Debug)]
pub(crate) struct Accumulator {
    raw: String,
    value: String,
    start: u64,
}

impl Accumulator {
    pub(crate) fn open(start: u64) -> Self {
        Accumulator {
            raw: String::new(),
            value: String::new(),
            start,
        }
    }

    pub(crate) fn push_raw(&mut self, text: &str) {
        self.raw.push_str(text);
    }

    pub(crate) fn push_value(&mut self, text: &str) {
        self.value.push_str(text);
    }

    pub(crate) fn finish(self, kind: TokenKind, end: u64) -> Token {
        Token::new(kind, self.raw, self.start, end).with_value(self.value)
    }
}
