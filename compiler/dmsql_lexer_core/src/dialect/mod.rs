//! DM SQL rule set.
//!
//! Rules are declared directly as DFA states and class edges. Priority
//! between overlapping rules (for example the keyword `null` versus the
//! identifier `nullable`) is resolved here, while wiring: the keyword path
//! falls back into the identifier state as soon as an identifier character
//! follows.
//!
//! # Lexical states
//!
//! | State              | Entered by             | Left by          |
//! |--------------------|------------------------|------------------|
//! | `BlockComment`     | `/*`                   | `*/`             |
//! | `HintComment`      | `/*+`                  | `*/`             |
//! | `QuotedString`     | `'`                    | `'`              |
//! | `QuotedIdentifier` | `"`                    | `"`              |
//! | `BinaryStringLit`  | `b'`                   | `'`              |
//! | `HexStringLit`     | `x'`                   | `'`              |
//! | `CustomQuoteOpen`  | `q'` + delimiter       | the delimiter    |
//! | `CustomQuoteBody`  | the delimiter          | closer + `'`     |

use crate::action::Action;
use crate::char_class::CharClass as C;
use crate::dfa::{Dfa, DfaBuilder, StateId};
use crate::lex_state::LexState;

const IDENT_START: &[C] = &[
    C::LetterQ,
    C::LetterB,
    C::LetterX,
    C::LetterE,
    C::LetterDF,
    C::HexLetter,
    C::LetterN,
    C::LetterU,
    C::LetterL,
    C::LetterI,
    C::LetterS,
    C::LetterO,
    C::LetterT,
    C::IdentOther,
];

const IDENT_CONTINUE: &[C] = &[
    C::LetterQ,
    C::LetterB,
    C::LetterX,
    C::LetterE,
    C::LetterDF,
    C::HexLetter,
    C::LetterN,
    C::LetterU,
    C::LetterL,
    C::LetterI,
    C::LetterS,
    C::LetterO,
    C::LetterT,
    C::IdentOther,
    C::Zero,
    C::Digit,
];

const DIGITS: &[C] = &[C::Zero, C::Digit];

const HEX_DIGITS: &[C] = &[
    C::Zero,
    C::Digit,
    C::HexLetter,
    C::LetterB,
    C::LetterE,
    C::LetterDF,
];

const WHITESPACE: &[C] = &[C::Blank, C::LineFeed];

const QUOTE_DELIMITERS: &[C] = &[
    C::Slash,
    C::Star,
    C::Plus,
    C::Minus,
    C::Dot,
    C::Colon,
    C::Equals,
    C::Operator,
    C::Punct,
];

/// Build the DM SQL transition tables.
pub fn dialect() -> Dfa {
    let mut b = DfaBuilder::new();
    let initial = b.state();
    b.start(LexState::Initial, initial);

    identifiers(&mut b, initial);
    numbers(&mut b, initial);
    operators(&mut b, initial);
    trivia(&mut b, initial);

    block_comment(&mut b);
    quoted_string(&mut b);
    quoted_identifier(&mut b);
    bit_string(&mut b);
    custom_quote(&mut b);

    b.build()
}

// ─── Initial state ───

/// Identifiers, `null`, `is null`/`not null`, and the `q'`/`b'`/`x'`
/// literal prefixes.
fn identifiers(b: &mut DfaBuilder, initial: StateId) {
    let ident = b.accepting(Action::Identifier);
    b.edge(initial, IDENT_START, ident)
        .edge(ident, IDENT_CONTINUE, ident);

    // null
    let n = ident_prefix(b, initial, C::LetterN, ident);
    let nu = ident_prefix(b, n, C::LetterU, ident);
    let nul = ident_prefix(b, nu, C::LetterL, ident);
    let null = b.accepting(Action::Null);
    b.edge(nul, &[C::LetterL], null)
        .edge(null, IDENT_CONTINUE, ident);

    // is null / not null
    let i = ident_prefix(b, initial, C::LetterI, ident);
    let is = ident_prefix(b, i, C::LetterS, ident);
    null_predicate(b, is, Action::IsNull);
    let no = ident_prefix(b, n, C::LetterO, ident);
    let not = ident_prefix(b, no, C::LetterT, ident);
    null_predicate(b, not, Action::NotNull);

    // q'<delim>
    let q = ident_prefix(b, initial, C::LetterQ, ident);
    let q_quote = b.state();
    let custom = b.accepting(Action::BeginCustomQuote);
    b.edge(q, &[C::Quote], q_quote)
        .edge(q_quote, QUOTE_DELIMITERS, custom);

    // b'...' and x'...'
    let bin = ident_prefix(b, initial, C::LetterB, ident);
    let bin_open = b.accepting(Action::BeginBinaryString);
    b.edge(bin, &[C::Quote], bin_open);
    let hex = ident_prefix(b, initial, C::LetterX, ident);
    let hex_open = b.accepting(Action::BeginHexString);
    b.edge(hex, &[C::Quote], hex_open);
}

/// Accepting identifier state reached from `from` on `class`, continuing
/// into the generic identifier state.
fn ident_prefix(b: &mut DfaBuilder, from: StateId, class: C, ident: StateId) -> StateId {
    let state = b.accepting(Action::Identifier);
    b.edge(from, &[class], state)
        .edge(state, IDENT_CONTINUE, ident);
    state
}

/// `<keyword> (whitespace | line comment)+ null`, hanging off the state
/// that accepted the keyword. A line comment separates only once its line
/// break is read. The accepting state has no edges, so `not nullable`
/// yields `not null` and leaves `able` for the next match.
fn null_predicate(b: &mut DfaBuilder, keyword: StateId, action: Action) {
    let gap = b.state();
    let dash = b.state();
    let slash = b.state();
    let comment = b.state();
    for from in [keyword, gap] {
        b.edge(from, WHITESPACE, gap)
            .edge(from, &[C::Minus], dash)
            .edge(from, &[C::Slash], slash);
    }
    b.edge(dash, &[C::Minus], comment)
        .edge(slash, &[C::Slash], comment)
        .edge_except(comment, &[C::LineFeed], comment)
        .edge(comment, &[C::LineFeed], gap);

    let n = b.state();
    let nu = b.state();
    let nul = b.state();
    let done = b.accepting(action);
    b.edge(gap, &[C::LetterN], n)
        .edge(n, &[C::LetterU], nu)
        .edge(nu, &[C::LetterL], nul)
        .edge(nul, &[C::LetterL], done);
}

/// Integers, decimals, doubles, hex integers, `1..`, and everything that
/// starts with `.`.
fn numbers(b: &mut DfaBuilder, initial: StateId) {
    let int = b.accepting(Action::Integer);
    let zero = b.accepting(Action::Integer);
    let point = b.accepting(Action::Decimal);
    let fraction = b.accepting(Action::Decimal);
    let exponent = b.state();
    let exponent_sign = b.state();
    let exponent_digits = b.accepting(Action::Double);
    let suffix = b.accepting(Action::Double);
    let range = b.accepting(Action::IntegerWithBoundary);
    let hex_prefix = b.state();
    let hex_digits = b.accepting(Action::HexInteger);

    b.edge(initial, &[C::Digit], int)
        .edge(initial, &[C::Zero], zero);
    for mantissa in [int, zero] {
        b.edge(mantissa, DIGITS, int)
            .edge(mantissa, &[C::Dot], point)
            .edge(mantissa, &[C::LetterE], exponent)
            .edge(mantissa, &[C::LetterDF], suffix);
    }
    b.edge(zero, &[C::LetterX], hex_prefix)
        .edge(hex_prefix, HEX_DIGITS, hex_digits)
        .edge(hex_digits, HEX_DIGITS, hex_digits);

    b.edge(point, DIGITS, fraction)
        .edge(point, &[C::Dot], range)
        .edge(point, &[C::LetterE], exponent)
        .edge(point, &[C::LetterDF], suffix);
    b.edge(fraction, DIGITS, fraction)
        .edge(fraction, &[C::LetterE], exponent)
        .edge(fraction, &[C::LetterDF], suffix);

    b.edge(exponent, DIGITS, exponent_digits)
        .edge(exponent, &[C::Plus, C::Minus], exponent_sign)
        .edge(exponent_sign, DIGITS, exponent_digits)
        .edge(exponent_digits, DIGITS, exponent_digits);

    // `.` alone, `.5`, `.*`, `..`
    let dot = b.accepting(Action::Operator);
    let select_star = b.accepting(Action::SelectStar);
    let boundary = b.accepting(Action::Boundary);
    b.edge(initial, &[C::Dot], dot)
        .edge(dot, DIGITS, fraction)
        .edge(dot, &[C::Star], select_star)
        .edge(dot, &[C::Dot], boundary);
}

/// Single-character operators, `:=`, and the comment/literal openers that
/// start with an operator character.
fn operators(b: &mut DfaBuilder, initial: StateId) {
    let single = b.accepting(Action::Operator);
    b.edge(
        initial,
        &[C::Other, C::Star, C::Plus, C::Equals, C::Operator, C::Punct],
        single,
    );

    let colon = b.accepting(Action::Assign);
    let assign = b.accepting(Action::Assign);
    b.edge(initial, &[C::Colon], colon)
        .edge(colon, &[C::Equals], assign);

    let line_comment = b.accepting(Action::LineComment);
    b.edge_except(line_comment, &[C::LineFeed], line_comment);

    let minus = b.accepting(Action::Operator);
    b.edge(initial, &[C::Minus], minus)
        .edge(minus, &[C::Minus], line_comment);

    let slash = b.accepting(Action::Operator);
    let block = b.accepting(Action::BeginBlockComment);
    let hint = b.accepting(Action::BeginHint);
    b.edge(initial, &[C::Slash], slash)
        .edge(slash, &[C::Slash], line_comment)
        .edge(slash, &[C::Star], block)
        .edge(block, &[C::Plus], hint);

    let quote = b.accepting(Action::BeginString);
    let double_quote = b.accepting(Action::BeginQuotedIdentifier);
    b.edge(initial, &[C::Quote], quote)
        .edge(initial, &[C::DoubleQuote], double_quote);
}

/// Runs of spaces and line feeds.
fn trivia(b: &mut DfaBuilder, initial: StateId) {
    let whitespace = b.accepting(Action::Whitespace);
    b.edge(initial, WHITESPACE, whitespace)
        .edge(whitespace, WHITESPACE, whitespace);
}

// ─── Sub-states ───

/// Body of `/* ... */` and `/*+ ... */`. Comments do not nest: an inner
/// `/*` is plain text and the first `*/` closes.
fn block_comment(b: &mut DfaBuilder) {
    let body = b.state();
    b.start(LexState::BlockComment, body)
        .start(LexState::HintComment, body);

    let text = b.accepting(Action::AppendText);
    b.edge_except(body, &[C::Slash, C::Star], text)
        .edge_except(text, &[C::Slash, C::Star], text);

    let slash = b.accepting(Action::AppendText);
    let inner_open = b.accepting(Action::AppendText);
    b.edge(body, &[C::Slash], slash)
        .edge(slash, &[C::Star], inner_open);

    let star = b.accepting(Action::AppendText);
    let stars = b.state();
    let close = b.accepting(Action::CloseComment);
    b.edge(body, &[C::Star], star)
        .edge(star, &[C::Star], stars)
        .edge(stars, &[C::Star], stars)
        .edge(star, &[C::Slash], close)
        .edge(stars, &[C::Slash], close);
}

/// Body of `'...'`: `''` is an escaped quote, and `'` line-break `'`
/// continues the literal.
fn quoted_string(b: &mut DfaBuilder) {
    let body = b.state();
    b.start(LexState::QuotedString, body);

    let text = b.accepting(Action::AppendText);
    b.edge_except(body, &[C::Quote], text)
        .edge_except(text, &[C::Quote], text);

    let close = b.accepting(Action::CloseString);
    let doubled = b.accepting(Action::AppendQuote);
    b.edge(body, &[C::Quote], close)
        .edge(close, &[C::Quote], doubled);
    continuation(b, close);
}

/// Body of `"..."`. A doubled `""` is kept verbatim.
fn quoted_identifier(b: &mut DfaBuilder) {
    let body = b.state();
    b.start(LexState::QuotedIdentifier, body);

    let text = b.accepting(Action::AppendText);
    b.edge_except(body, &[C::DoubleQuote], text)
        .edge_except(text, &[C::DoubleQuote], text);

    let close = b.accepting(Action::CloseQuotedIdentifier);
    let doubled = b.accepting(Action::AppendText);
    b.edge(body, &[C::DoubleQuote], close)
        .edge(close, &[C::DoubleQuote], doubled);
}

/// Body of `b'...'` and `x'...'`.
fn bit_string(b: &mut DfaBuilder) {
    let body = b.state();
    b.start(LexState::BinaryStringLit, body)
        .start(LexState::HexStringLit, body);

    let text = b.accepting(Action::AppendText);
    b.edge_except(body, &[C::Quote], text)
        .edge_except(text, &[C::Quote], text);

    let close = b.accepting(Action::CloseBitString);
    b.edge(body, &[C::Quote], close);
    continuation(b, close);
}

/// `'` blank* line-feed whitespace* `'` after a closing quote: the literal
/// goes on and the separator is dropped from its value.
fn continuation(b: &mut DfaBuilder, close: StateId) {
    let blank = b.state();
    let newline = b.state();
    let resume = b.accepting(Action::ContinueString);
    b.edge(close, &[C::Blank], blank)
        .edge(close, &[C::LineFeed], newline)
        .edge(blank, &[C::Blank], blank)
        .edge(blank, &[C::LineFeed], newline)
        .edge(newline, WHITESPACE, newline)
        .edge(newline, &[C::Quote], resume);
}

/// `q'<delim> ... <closer>'`.
fn custom_quote(b: &mut DfaBuilder) {
    let open = b.state();
    let delimiter = b.accepting(Action::OpenCustomQuote);
    b.start(LexState::CustomQuoteOpen, open)
        .edge(open, QUOTE_DELIMITERS, delimiter);

    let body = b.state();
    b.start(LexState::CustomQuoteBody, body);

    let text = b.accepting(Action::AppendText);
    b.edge_except(body, &[C::QuoteCloser], text)
        .edge_except(text, &[C::QuoteCloser], text);

    let closer = b.accepting(Action::AppendText);
    let close = b.accepting(Action::CloseCustomQuote);
    b.edge(body, &[C::QuoteCloser], closer)
        .edge(closer, &[C::Quote], close);
}

#[cfg(test)]
mod tests;
