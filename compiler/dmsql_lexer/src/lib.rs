//! Streaming lexical scanner for the DM SQL dialect.
//!
//! [`Scanner`] pulls characters from a [`CharSource`] through a refillable
//! buffer and walks the table-driven DFA from `dmsql_lexer_core`, producing
//! one [`Token`] per call. Whitespace and comments are tokens too, so the
//! token texts always concatenate back to the input.
//!
//! ```
//! use dmsql_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("select 'it''s' from t1")?;
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[2], TokenKind::StringLit);
//! assert_eq!(tokens[2].value(), "it's");
//! # Ok::<(), dmsql_lexer::ScanError>(())
//! ```
//!
//! # Streaming
//!
//! Nothing requires the input to be in memory. [`Utf8Reader`] decodes any
//! [`std::io::Read`]; the scanner keeps only the current match plus one
//! buffer of lookahead.
//!
//! # Parser control
//!
//! The parser may [`pushback`](Scanner::pushback) part of the last match,
//! override the [lexical state](Scanner::set_lexical_state), or
//! [`reset`](Scanner::reset) onto a new source.
//!
//! # Logging
//!
//! Emits `tracing` events: `trace` per dispatched match, `debug` for buffer
//! growth, resets, state overrides and errors.

mod accumulator;
mod buffer;
mod config;
mod error;
mod location;
mod scanner;
mod source;

pub use config::ScannerConfig;
pub use dmsql_lexer_core::{ConstructKind, LexState, Token, TokenKind};
pub use error::ScanError;
pub use location::Location;
pub use scanner::Scanner;
pub use source::{CharSource, IterSource, SourceRead, StrSource, Utf8Reader};

/// Scan all of `source` into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(StrSource::new(source)).collect()
}

/// Scan all of `source`, dropping whitespace and comments.
pub fn tokenize_significant(source: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(StrSource::new(source))
        .filter(|token| !matches!(token, Ok(t) if t.kind.is_trivia()))
        .collect()
}
