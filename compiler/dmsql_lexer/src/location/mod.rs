//! Line, column and offset tracking.
//!
//! Positions advance over each match once the next match starts, so the
//! reported location is always the start of the most recent match.
//!
//! Line breaks are `\r`, `\n`, NEL (U+0085), LS (U+2028) and PS (U+2029);
//! `\r\n` counts once, including when the two halves land in different
//! matches.

use std::fmt;

/// A position in the character stream.
///
/// `line` and `column` are 1-based; `offset` is the 0-based character index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub offset: u64,
}

impl Location {
    pub const START: Location = Location {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LocationTracker {
    location: Location,
    /// Column just before the last `\r`, restored if that `\r` turns out
    /// to be the first half of a split `\r\n`.
    column_before_cr: u32,
}

impl Default for LocationTracker {
    fn default() -> Self {
        LocationTracker {
            location: Location::START,
            column_before_cr: 1,
        }
    }
}

impl LocationTracker {
    pub(crate) fn location(&self) -> Location {
        self.location
    }

    /// Advance over `text`. Returns `true` if it ends with `\r`, in which
    /// case the caller must check whether the next character is `\n`.
    pub(crate) fn advance(&mut self, text: &[char]) -> bool {
        let mut after_cr = false;
        for &ch in text {
            match ch {
                '\r' => {
                    self.column_before_cr = self.location.column;
                    self.new_line();
                    after_cr = true;
                }
                '\n' => {
                    if !after_cr {
                        self.new_line();
                    }
                    after_cr = false;
                }
                '\u{85}' | '\u{2028}' | '\u{2029}' => {
                    self.new_line();
                    after_cr = false;
                }
                _ => {
                    self.location.column = self.location.column.saturating_add(1);
                    after_cr = false;
                }
            }
        }
        self.location.offset += text.len() as u64;
        after_cr
    }

    /// Undo the line break of a trailing `\r` whose `\n` belongs to the
    /// next match; the `\n` will count instead.
    pub(crate) fn join_crlf(&mut self) {
        self.location.line = self.location.line.saturating_sub(1).max(1);
        self.location.column = self.column_before_cr.saturating_add(1);
    }

    pub(crate) fn reset(&mut self) {
        *self = LocationTracker::default();
    }

    fn new_line(&mut self) {
        self.location.line = self.location.line.saturating_add(1);
        self.location.column = 1;
    }
}
