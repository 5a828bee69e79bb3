//! Refillable input buffer.
//!
//! Holds a window of the character stream with four cursors:
//!
//! ```text
//! [ consumed... | match start .. marked .. current | unread ... filled | free ]
//!                 ^start        ^marked   ^current              ^filled
//! ```
//!
//! - `start`: first character of the match in progress.
//! - `marked`: end of the longest accepted match so far.
//! - `current`: next character the DFA will read.
//! - `filled`: end of valid data.
//!
//! A refill first discards everything before `start`, then doubles the
//! buffer if it is still full, so a single match is never split.

use std::io;

use tracing::debug;

use crate::source::{CharSource, SourceRead};

/// Why a refill produced no characters.
#[derive(Debug)]
pub(crate) enum RefillError {
    Source(io::Error),
    /// The source returned `Read(0)` instead of data or end of input.
    Stalled,
}

/// Refill outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Refill {
    /// New characters are available at `current`.
    More,
    /// The source is exhausted.
    Eof,
}

pub(crate) struct InputBuffer {
    chars: Vec<char>,
    start: usize,
    marked: usize,
    current: usize,
    filled: usize,
    exhausted: bool,
    initial_capacity: usize,
}

impl InputBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        InputBuffer {
            chars: vec!['\0'; capacity],
            start: 0,
            marked: 0,
            current: 0,
            filled: 0,
            exhausted: false,
            initial_capacity: capacity,
        }
    }

    // === Match cursors ===

    /// Start the next match where the previous one ended.
    pub(crate) fn begin_match(&mut self) {
        self.start = self.marked;
        self.current = self.marked;
    }

    /// Character at `current`, if buffered.
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        (self.current < self.filled).then(|| self.chars[self.current])
    }

    /// Consume the character at `current`, if buffered.
    #[inline]
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.current += 1;
        Some(ch)
    }

    /// Record everything read so far as the longest match.
    #[inline]
    pub(crate) fn mark_accept(&mut self) {
        self.marked = self.current;
    }

    /// Drop the match in progress; the next match starts at `start` again.
    pub(crate) fn rewind(&mut self) {
        self.current = self.start;
        self.marked = self.start;
    }

    /// Whether nothing has been read since the match started.
    pub(crate) fn at_match_start(&self) -> bool {
        self.current == self.start
    }

    /// Return the last `n` characters of the match to the input.
    ///
    /// Fails with the matched length if `n` exceeds it.
    pub(crate) fn pushback(&mut self, n: usize) -> Result<(), usize> {
        let matched = self.matched_len();
        if n > matched {
            return Err(matched);
        }
        self.marked -= n;
        self.current = self.marked;
        Ok(())
    }

    pub(crate) fn matched(&self) -> &[char] {
        &self.chars[self.start..self.marked]
    }

    pub(crate) fn matched_len(&self) -> usize {
        self.marked - self.start
    }

    pub(crate) fn matched_text(&self) -> String {
        self.text_since(self.start)
    }

    /// Text from buffer position `from` up to the end of the match.
    pub(crate) fn text_since(&self, from: usize) -> String {
        self.chars[from..self.marked].iter().collect()
    }

    /// First character of the match in progress.
    pub(crate) fn char_at_start(&self) -> Option<char> {
        (self.start < self.filled).then(|| self.chars[self.start])
    }

    /// Character right after the accepted match, if buffered.
    pub(crate) fn char_after_match(&self) -> Option<char> {
        (self.marked < self.filled).then(|| self.chars[self.marked])
    }

    // === Refill ===

    /// Pull more characters from `source`.
    ///
    /// Characters before `start` are discarded; the buffer doubles when the
    /// match in progress already fills it.
    pub(crate) fn refill<S: CharSource>(&mut self, source: &mut S) -> Result<Refill, RefillError> {
        if self.exhausted {
            return Ok(Refill::Eof);
        }

        if self.start > 0 {
            self.chars.copy_within(self.start..self.filled, 0);
            self.filled -= self.start;
            self.current -= self.start;
            self.marked -= self.start;
            debug!(discarded = self.start, kept = self.filled, "compacted input buffer");
            self.start = 0;
        }

        if self.filled == self.chars.len() {
            let capacity = self.chars.len().max(1) * 2;
            self.chars.resize(capacity, '\0');
            debug!(capacity, "grew input buffer");
        }

        match source.fill(&mut self.chars[self.filled..]) {
            Ok(SourceRead::Read(0)) => Err(RefillError::Stalled),
            Ok(SourceRead::Read(n)) => {
                self.filled += n;
                Ok(Refill::More)
            }
            Ok(SourceRead::Eof) => {
                self.exhausted = true;
                Ok(Refill::Eof)
            }
            Err(err) => Err(RefillError::Source(err)),
        }
    }

    /// Forget all buffered input. With `shrink`, a buffer that grew past
    /// its initial capacity is reallocated at that capacity.
    pub(crate) fn reset(&mut self, shrink: bool) {
        self.start = 0;
        self.marked = 0;
        self.current = 0;
        self.filled = 0;
        self.exhausted = false;
        if shrink && self.chars.len() > self.initial_capacity {
            debug!(
                from = self.chars.len(),
                to = self.initial_capacity,
                "shrinking input buffer"
            );
            self.chars = vec!['\0'; self.initial_capacity];
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.chars.len()
    }
}
