//! Streaming scan loop.
//!
//! Each call to [`Scanner::next_token`] runs the DFA repeatedly: every run
//! produces one longest match, and its action either emits a token, enters
//! a sub-state, or extends the open construct. Runs continue until a token
//! is emitted or input ends.
//!
//! # Multi-match tokens
//!
//! Comments, literals and quoted identifiers span several matches. The
//! pieces are collected in an [`Accumulator`] local to the call, so a token
//! is either returned whole or not at all.

use std::iter::FusedIterator;
use std::sync::OnceLock;

use dmsql_lexer_core::{
    classify, closer_for, dialect, Action, ActionClass, Attributes, Dfa, LexState, Token,
    TokenKind,
};
use tracing::{debug, trace};

use crate::accumulator::Accumulator;
use crate::buffer::{InputBuffer, Refill, RefillError};
use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::location::{Location, LocationTracker};
use crate::source::CharSource;

/// Closer used when `CustomQuoteBody` is entered without a delimiter.
const DEFAULT_CLOSER: char = ']';

/// Dialect tables, built once per process.
fn tables() -> &'static Dfa {
    static TABLES: OnceLock<Dfa> = OnceLock::new();
    TABLES.get_or_init(dialect)
}

/// Pull-based DM SQL scanner over a [`CharSource`].
pub struct Scanner<S> {
    source: S,
    buffer: InputBuffer,
    location: LocationTracker,
    lex_state: LexState,
    /// Closing delimiter of the alternative-quote literal being scanned.
    closer: Option<char>,
    dfa: &'static Dfa,
    config: ScannerConfig,
    /// Set once the iterator has yielded an error.
    failed: bool,
}

impl<S: CharSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    pub fn with_config(source: S, config: ScannerConfig) -> Self {
        Scanner {
            source,
            buffer: InputBuffer::new(config.effective_capacity()),
            location: LocationTracker::default(),
            lex_state: LexState::Initial,
            closer: None,
            dfa: tables(),
            config,
            failed: false,
        }
    }

    // === Scanning ===

    /// Next token, or `None` at end of input.
    ///
    /// On error nothing is emitted for the partial token. After an
    /// unterminated construct the lexical state is back to `Initial`.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        let mut open: Option<Accumulator> = None;
        loop {
            let Some(action) = self.next_match()? else {
                return self.end_of_input();
            };
            if let Some(token) = self.dispatch(action, &mut open)? {
                return Ok(Some(token));
            }
        }
    }

    /// Run the DFA from the current lexical state to the longest match.
    ///
    /// `None` means input ended before any character was read.
    fn next_match(&mut self) -> Result<Option<Action>, ScanError> {
        self.begin_match()?;

        let dfa = self.dfa;
        let closer = match self.lex_state {
            LexState::CustomQuoteBody => self.closer,
            _ => None,
        };
        let mut state = dfa.start(self.lex_state);
        let mut action = None;

        while let Some(ch) = self.read_char()? {
            let Some(next) = dfa.next(state, classify(ch, closer)) else {
                break;
            };
            state = next;
            let attributes = dfa.attributes(state);
            if attributes.contains(Attributes::ACCEPTING) {
                action = dfa.action(state);
                self.buffer.mark_accept();
                if attributes.contains(Attributes::NO_LOOKAHEAD) {
                    break;
                }
            }
        }

        match action {
            Some(action) => Ok(Some(action)),
            None if self.buffer.at_match_start() => Ok(None),
            None => Err(self.no_match()),
        }
    }

    /// Advance the location over the previous match and start a new one.
    fn begin_match(&mut self) -> Result<(), ScanError> {
        let trailing_cr = self.location.advance(self.buffer.matched());
        self.buffer.begin_match();
        if trailing_cr && self.peek_after_match()? == Some('\n') {
            self.location.join_crlf();
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        action: Action,
        open: &mut Option<Accumulator>,
    ) -> Result<Option<Token>, ScanError> {
        // Re-read the delimiter in `CustomQuoteOpen`.
        if action == Action::BeginCustomQuote {
            self.pushback(1)?;
        }

        let text = self.buffer.matched_text();
        let len = self.buffer.matched_len();
        let start = self.location.location().offset;
        let end = start + len as u64;
        trace!(lex_state = ?self.lex_state, ?action, len, "dispatch");

        match action.class() {
            ActionClass::Enter => {
                let acc = open.get_or_insert_with(|| Accumulator::open(start));
                acc.push_raw(&text);
                if action.keeps_opener() {
                    acc.push_value(&text);
                }
                if action == Action::OpenCustomQuote {
                    self.closer = text.chars().next().and_then(closer_for);
                }
                if let Some(target) = action.target_state() {
                    self.lex_state = target;
                }
                Ok(None)
            }
            ActionClass::Accumulate => {
                let acc = open.get_or_insert_with(|| Accumulator::open(start));
                acc.push_raw(&text);
                match action {
                    Action::AppendText => acc.push_value(&text),
                    Action::AppendQuote => acc.push_value("'"),
                    _ => {}
                }
                Ok(None)
            }
            ActionClass::Emit => {
                let kind = action.token_kind().unwrap_or(TokenKind::Normal);
                let token = if action.closes_construct() {
                    let mut acc = open.take().unwrap_or_else(|| Accumulator::open(start));
                    acc.push_raw(&text);
                    if !matches!(action, Action::CloseString | Action::CloseCustomQuote) {
                        acc.push_value(&text);
                    }
                    self.lex_state = LexState::Initial;
                    self.closer = None;
                    acc.finish(kind, end)
                } else if action == Action::Null {
                    Token::new(kind, text, start, end).with_value("null".to_owned())
                } else {
                    Token::new(kind, text, start, end)
                };
                Ok(Some(token))
            }
        }
    }

    fn end_of_input(&mut self) -> Result<Option<Token>, ScanError> {
        let Some(kind) = self.lex_state.construct_kind() else {
            return Ok(None);
        };
        let location = self.location.location();
        debug!(%kind, %location, "unterminated construct at end of input");
        self.lex_state = LexState::Initial;
        self.closer = None;
        Err(ScanError::UnterminatedConstruct { kind, location })
    }

    fn no_match(&mut self) -> ScanError {
        let found = self.buffer.char_at_start().unwrap_or('\0');
        self.buffer.rewind();
        let location = self.location.location();
        debug!(?found, %location, lex_state = ?self.lex_state, "no rule matches");
        ScanError::NoMatch { found, location }
    }

    // === Input ===

    fn read_char(&mut self) -> Result<Option<char>, ScanError> {
        loop {
            if let Some(ch) = self.buffer.advance() {
                return Ok(Some(ch));
            }
            if self.refill()? == Refill::Eof {
                return Ok(None);
            }
        }
    }

    /// Character right after the accepted match, refilling if needed.
    fn peek_after_match(&mut self) -> Result<Option<char>, ScanError> {
        loop {
            if let Some(ch) = self.buffer.char_after_match() {
                return Ok(Some(ch));
            }
            if self.refill()? == Refill::Eof {
                return Ok(None);
            }
        }
    }

    fn refill(&mut self) -> Result<Refill, ScanError> {
        self.buffer.refill(&mut self.source).map_err(|err| {
            let location = self.location.location();
            debug!(%location, ?err, "refill failed");
            match err {
                RefillError::Stalled => ScanError::SourceStalled { location },
                RefillError::Source(source) => ScanError::Source { location, source },
            }
        })
    }

    // === Caller control ===

    /// Return the last `n` characters of the most recent match to the
    /// input; they are scanned again by the next call.
    pub fn pushback(&mut self, n: usize) -> Result<(), ScanError> {
        self.buffer
            .pushback(n)
            .map_err(|matched| ScanError::PushbackTooLarge {
                requested: n,
                matched,
            })
    }

    /// Rebind to a new source and start over. Returns the previous source.
    pub fn reset(&mut self, source: S) -> S {
        let previous = std::mem::replace(&mut self.source, source);
        self.buffer.reset(self.config.shrink_on_reset);
        self.location.reset();
        self.lex_state = LexState::Initial;
        self.closer = None;
        self.failed = false;
        debug!(capacity = self.buffer.capacity(), "scanner reset");
        previous
    }

    pub fn lexical_state(&self) -> LexState {
        self.lex_state
    }

    /// Override the lexical state used by the next match.
    ///
    /// Entering `CustomQuoteBody` directly keeps the active closer, or
    /// uses `]` if there is none.
    pub fn set_lexical_state(&mut self, state: LexState) {
        debug!(from = ?self.lex_state, to = ?state, "lexical state override");
        if state == LexState::CustomQuoteBody {
            self.closer.get_or_insert(DEFAULT_CLOSER);
        } else {
            self.closer = None;
        }
        self.lex_state = state;
    }

    /// Closing delimiter of the alternative-quote literal being scanned.
    pub fn quote_closer(&self) -> Option<char> {
        self.closer
    }
}

impl<S> Scanner<S> {
    // === Positions ===

    /// Start of the most recent match.
    pub fn location(&self) -> Location {
        self.location.location()
    }

    pub fn line(&self) -> u32 {
        self.location.location().line
    }

    pub fn column(&self) -> u32 {
        self.location.location().column
    }

    pub fn offset(&self) -> u64 {
        self.location.location().offset
    }

    /// Text of the most recent match.
    pub fn matched_text(&self) -> String {
        self.buffer.matched_text()
    }

    pub fn matched_len(&self) -> usize {
        self.buffer.matched_len()
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Current buffer size in characters.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

impl<S: CharSource> Iterator for Scanner<S> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.failed = true;
        }
        result.transpose()
    }
}

impl<S: CharSource> FusedIterator for Scanner<S> {}
