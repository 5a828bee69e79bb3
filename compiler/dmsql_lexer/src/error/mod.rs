//! Scan errors.

use std::io;

use dmsql_lexer_core::ConstructKind;

use crate::location::Location;

/// Failure of a single [`Scanner::next_token`](crate::Scanner::next_token)
/// call.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// End of input inside a comment, literal or quoted identifier.
    #[error("unterminated {kind} at end of input, {location}")]
    UnterminatedConstruct {
        kind: ConstructKind,
        location: Location,
    },

    /// No rule matches the input at `location`.
    #[error("unexpected character {found:?} at {location}")]
    NoMatch { found: char, location: Location },

    /// [`Scanner::pushback`](crate::Scanner::pushback) asked for more
    /// characters than the last match holds.
    #[error("cannot push back {requested} characters, last match has {matched}")]
    PushbackTooLarge { requested: usize, matched: usize },

    /// The source returned no characters without reporting end of input.
    #[error("character source returned no data at {location}")]
    SourceStalled { location: Location },

    /// The source failed while refilling.
    #[error("failed to read input at {location}")]
    Source {
        location: Location,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Where the error was detected, if it is tied to a position.
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::UnterminatedConstruct { location, .. }
            | Self::NoMatch { location, .. }
            | Self::SourceStalled { location }
            | Self::Source { location, .. } => Some(*location),
            Self::PushbackTooLarge { .. } => None,
        }
    }

    /// Errors caused by the caller or the source rather than the SQL text.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::PushbackTooLarge { .. } | Self::SourceStalled { .. }
        )
    }
}
