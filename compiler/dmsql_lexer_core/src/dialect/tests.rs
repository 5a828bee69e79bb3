use super::*;
use crate::char_class::classify;
use crate::dfa::Attributes;
use pretty_assertions::assert_eq;

/// Helper: longest match of `input` from the entry state of `lex_state`,
/// as `(action, matched char count)`.
fn longest(lex_state: LexState, input: &str, closer: Option<char>) -> Option<(Action, usize)> {
    let dfa = dialect();
    let mut state = dfa.start(lex_state);
    let mut best = None;
    for (i, ch) in input.chars().enumerate() {
        let Some(next) = dfa.next(state, classify(ch, closer)) else {
            break;
        };
        state = next;
        let attrs = dfa.attributes(state);
        if attrs.contains(Attributes::ACCEPTING) {
            best = dfa.action(state).map(|action| (action, i + 1));
            if attrs.contains(Attributes::NO_LOOKAHEAD) {
                break;
            }
        }
    }
    best
}

/// Helper: longest match in `Initial`.
fn initial(input: &str) -> Option<(Action, usize)> {
    longest(LexState::Initial, input, None)
}

// === Identifiers and keywords ===

#[test]
fn identifiers() {
    assert_eq!(initial("select x"), Some((Action::Identifier, 6)));
    assert_eq!(initial("t1.c2"), Some((Action::Identifier, 2)));
    assert_eq!(initial("_a$b#c "), Some((Action::Identifier, 6)));
    assert_eq!(initial("émile"), Some((Action::Identifier, 5)));
}

#[test]
fn null_keyword() {
    assert_eq!(initial("null"), Some((Action::Null, 4)));
    assert_eq!(initial("NULL)"), Some((Action::Null, 4)));
    assert_eq!(initial("nullable"), Some((Action::Identifier, 8)));
    assert_eq!(initial("nul"), Some((Action::Identifier, 3)));
    assert_eq!(initial("null1"), Some((Action::Identifier, 5)));
}

#[test]
fn keyword_prefixes_fall_back_to_identifiers() {
    assert_eq!(initial("isolation"), Some((Action::Identifier, 9)));
    assert_eq!(initial("nothing"), Some((Action::Identifier, 7)));
    assert_eq!(initial("queue"), Some((Action::Identifier, 5)));
    assert_eq!(initial("bx"), Some((Action::Identifier, 2)));
}

#[test]
fn null_predicates() {
    assert_eq!(initial("is null"), Some((Action::IsNull, 7)));
    assert_eq!(initial("IS\t\n NULL"), Some((Action::IsNull, 9)));
    assert_eq!(initial("not null"), Some((Action::NotNull, 8)));
    assert_eq!(initial("is -- why\nnull"), Some((Action::IsNull, 14)));
    assert_eq!(initial("not // c\n null"), Some((Action::NotNull, 14)));
    assert_eq!(initial("not nullable"), Some((Action::NotNull, 8)));
}

#[test]
fn incomplete_null_predicates_stop_at_the_keyword() {
    assert_eq!(initial("is nul"), Some((Action::Identifier, 2)));
    assert_eq!(initial("not -x"), Some((Action::Identifier, 3)));
    assert_eq!(initial("is -- no newline null"), Some((Action::Identifier, 2)));
    assert_eq!(initial("isnull"), Some((Action::Identifier, 6)));
}

// === Numbers ===

#[test]
fn integers() {
    assert_eq!(initial("42"), Some((Action::Integer, 2)));
    assert_eq!(initial("0"), Some((Action::Integer, 1)));
    assert_eq!(initial("007,"), Some((Action::Integer, 3)));
    assert_eq!(initial("12abc"), Some((Action::Integer, 2)));
}

#[test]
fn decimals() {
    assert_eq!(initial("123.45"), Some((Action::Decimal, 6)));
    assert_eq!(initial("1."), Some((Action::Decimal, 2)));
    assert_eq!(initial(".5"), Some((Action::Decimal, 2)));
}

#[test]
fn doubles() {
    assert_eq!(initial("1.2e3"), Some((Action::Double, 5)));
    assert_eq!(initial("1E+10"), Some((Action::Double, 5)));
    assert_eq!(initial(".5e-2"), Some((Action::Double, 5)));
    assert_eq!(initial("3d"), Some((Action::Double, 2)));
    assert_eq!(initial("2.5F"), Some((Action::Double, 4)));
}

#[test]
fn incomplete_exponent_backs_off() {
    assert_eq!(initial("1e"), Some((Action::Integer, 1)));
    assert_eq!(initial("1e+"), Some((Action::Integer, 1)));
    assert_eq!(initial("1.5ex"), Some((Action::Decimal, 3)));
}

#[test]
fn hex_integers() {
    assert_eq!(initial("0x1F"), Some((Action::HexInteger, 4)));
    assert_eq!(initial("0XabCDef09"), Some((Action::HexInteger, 10)));
    assert_eq!(initial("0x"), Some((Action::Integer, 1)));
    assert_eq!(initial("0x1g"), Some((Action::HexInteger, 3)));
}

#[test]
fn ranges_and_dots() {
    assert_eq!(initial("1..10"), Some((Action::IntegerWithBoundary, 3)));
    assert_eq!(initial(".."), Some((Action::Boundary, 2)));
    assert_eq!(initial(".*"), Some((Action::SelectStar, 2)));
    assert_eq!(initial(".x"), Some((Action::Operator, 1)));
}

// === Operators and trivia ===

#[test]
fn single_character_operators() {
    for op in ["(", ")", ",", ";", "*", "+", "=", "<", "|", "\\", "`", "@"] {
        assert_eq!(initial(op), Some((Action::Operator, 1)), "{op}");
    }
    assert_eq!(initial("中"), Some((Action::Operator, 1)));
    assert_eq!(initial("\u{1}"), Some((Action::Operator, 1)));
}

#[test]
fn assignment() {
    assert_eq!(initial(":="), Some((Action::Assign, 2)));
    assert_eq!(initial(":a"), Some((Action::Assign, 1)));
}

#[test]
fn whitespace_runs() {
    assert_eq!(initial("  \t\r\n x"), Some((Action::Whitespace, 6)));
    assert_eq!(initial("\u{0C}"), Some((Action::Whitespace, 1)));
}

#[test]
fn line_breaks_other_than_lf_and_cr_have_no_rule() {
    assert_eq!(initial("\u{0B}"), None);
    assert_eq!(initial("\u{2028}"), None);
}

#[test]
fn line_comments_exclude_the_newline() {
    assert_eq!(initial("-- hi\nx"), Some((Action::LineComment, 5)));
    assert_eq!(initial("// hi\r\n"), Some((Action::LineComment, 5)));
    assert_eq!(initial("--"), Some((Action::LineComment, 2)));
    assert_eq!(initial("-1"), Some((Action::Operator, 1)));
    assert_eq!(initial("/2"), Some((Action::Operator, 1)));
}

// === Openers ===

#[test]
fn construct_openers() {
    assert_eq!(initial("'abc'"), Some((Action::BeginString, 1)));
    assert_eq!(initial("\"Col\""), Some((Action::BeginQuotedIdentifier, 1)));
    assert_eq!(initial("b'01'"), Some((Action::BeginBinaryString, 2)));
    assert_eq!(initial("X'AF'"), Some((Action::BeginHexString, 2)));
    assert_eq!(initial("/* c */"), Some((Action::BeginBlockComment, 2)));
    assert_eq!(initial("/*+ INDEX */"), Some((Action::BeginHint, 3)));
}

#[test]
fn custom_quote_opener_includes_the_delimiter() {
    assert_eq!(initial("q'[x]'"), Some((Action::BeginCustomQuote, 3)));
    assert_eq!(initial("Q'!x!'"), Some((Action::BeginCustomQuote, 3)));
}

#[test]
fn q_quote_without_delimiter_is_an_identifier() {
    assert_eq!(initial("q'abc'"), Some((Action::Identifier, 1)));
}

// === Sub-states ===

#[test]
fn block_comment_body() {
    let comment = |s| longest(LexState::BlockComment, s, None);
    assert_eq!(comment("abc */"), Some((Action::AppendText, 4)));
    assert_eq!(comment("*/ tail"), Some((Action::CloseComment, 2)));
    assert_eq!(comment("***/"), Some((Action::CloseComment, 4)));
    assert_eq!(comment("**x"), Some((Action::AppendText, 1)));
    assert_eq!(comment("/* inner"), Some((Action::AppendText, 2)));
    assert_eq!(comment("/x"), Some((Action::AppendText, 1)));
}

#[test]
fn hint_shares_the_comment_body() {
    let dfa = dialect();
    assert_eq!(
        dfa.start(LexState::HintComment),
        dfa.start(LexState::BlockComment)
    );
}

#[test]
fn quoted_string_body() {
    let string = |s| longest(LexState::QuotedString, s, None);
    assert_eq!(string("it's"), Some((Action::AppendText, 2)));
    assert_eq!(string("''s"), Some((Action::AppendQuote, 2)));
    assert_eq!(string("' x"), Some((Action::CloseString, 1)));
    assert_eq!(string("'\n  'b'"), Some((Action::ContinueString, 5)));
    assert_eq!(string("' \t\r\n'"), Some((Action::ContinueString, 6)));
    assert_eq!(string("'  'b"), Some((Action::CloseString, 1)));
}

#[test]
fn quoted_identifier_body() {
    let ident = |s| longest(LexState::QuotedIdentifier, s, None);
    assert_eq!(ident("My Col\""), Some((Action::AppendText, 6)));
    assert_eq!(ident("\"\"x"), Some((Action::AppendText, 2)));
    assert_eq!(ident("\" x"), Some((Action::CloseQuotedIdentifier, 1)));
}

#[test]
fn bit_string_body() {
    for state in [LexState::BinaryStringLit, LexState::HexStringLit] {
        assert_eq!(longest(state, "0101'", None), Some((Action::AppendText, 4)));
        assert_eq!(longest(state, "'", None), Some((Action::CloseBitString, 1)));
        assert_eq!(longest(state, "'\n'", None), Some((Action::ContinueString, 3)));
        assert_eq!(longest(state, "''", None), Some((Action::CloseBitString, 1)));
    }
}

#[test]
fn custom_quote_open() {
    let open = |s| longest(LexState::CustomQuoteOpen, s, None);
    assert_eq!(open("[abc"), Some((Action::OpenCustomQuote, 1)));
    assert_eq!(open("!abc"), Some((Action::OpenCustomQuote, 1)));
    assert_eq!(open("abc"), None);
    assert_eq!(open("'abc"), None);
}

#[test]
fn custom_quote_body() {
    let body = |s| longest(LexState::CustomQuoteBody, s, Some(']'));
    assert_eq!(body("it's]'"), Some((Action::AppendText, 4)));
    assert_eq!(body("]'"), Some((Action::CloseCustomQuote, 2)));
    assert_eq!(body("]x"), Some((Action::AppendText, 1)));
    assert_eq!(body("[nested"), Some((Action::AppendText, 7)));
}

#[test]
fn every_lexical_state_has_an_entry() {
    let dfa = dialect();
    for state in LexState::ALL {
        let start = dfa.start(state);
        let has_edges = crate::char_class::CharClass::ALL
            .iter()
            .any(|&class| dfa.next(start, class).is_some());
        assert!(has_edges, "{state:?} has no edges");
    }
}

#[test]
fn row_sharing_reduces_the_table() {
    let dfa = dialect();
    assert!(dfa.row_count() < dfa.state_count());
}
