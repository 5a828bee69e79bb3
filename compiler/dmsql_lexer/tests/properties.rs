//! Property tests over generated SQL fragments.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
#![allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]

use dmsql_lexer::{tokenize, Scanner, ScannerConfig, StrSource, TokenKind};
use proptest::prelude::*;

/// Well-formed fragments. Any concatenation of them is terminated input.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "select", "t1", "_x$", "null", "is null", "not null", "not nullable", " ", "  ",
        "\t", "\n", "\r\n", "\r", "'a''b'", "'x'\n'y'", "\"My Col\"", "0x1F", "123.45", "1.2e3",
        "42", "7d", "1..", "..", ".*", ":=", ",", "(", ")", "*", "+", "-- c\n", "/* c */",
        "/*+ h */", "q'[a]b]'", "q'!x!'", "b'01'", "x'AF'", "中", "é",
    ])
}

fn statement() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..24).prop_map(|parts| parts.concat())
}

fn whitespace_run() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r', '\u{0C}']), 1..16)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn tokens_reconstruct_input(source in statement()) {
        let tokens = tokenize(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn tokens_are_contiguous(source in statement()) {
        let tokens = tokenize(&source).unwrap();
        let mut next = 0;
        for token in &tokens {
            prop_assert_eq!(token.start, next);
            prop_assert!(token.end > token.start);
            next = token.end;
        }
        prop_assert_eq!(next, source.chars().count() as u64);
    }

    #[test]
    fn small_buffers_scan_identically(source in statement()) {
        let config = ScannerConfig::default().with_initial_capacity(16);
        let streamed: Vec<_> = Scanner::with_config(StrSource::new(&source), config)
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(streamed, tokenize(&source).unwrap());
    }

    #[test]
    fn pushback_is_idempotent(word in "[a-z_][a-z0-9_]{0,20}", rest in statement(), k in 0usize..=21) {
        let source = format!("{word} {rest}");
        let mut scanner = Scanner::new(StrSource::new(&source));
        let first = scanner.next_token().unwrap().unwrap();
        let len = scanner.matched_len();
        let k = k.min(len);
        scanner.pushback(k).unwrap();

        let kept: String = first.text.chars().take(len - k).collect();
        let mut rebuilt = kept;
        for token in scanner {
            rebuilt.push_str(&token.unwrap().text);
        }
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn crlf_counts_once(lines in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let source = lines.join("\r\n");
        let mut scanner = Scanner::new(StrSource::new(&source));
        while scanner.next_token().unwrap().is_some() {}
        prop_assert_eq!(scanner.line() as usize, lines.len());
    }

    #[test]
    fn whitespace_runs_are_one_token(run in whitespace_run()) {
        let source = format!("a{run}b");
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[1].kind, TokenKind::WhitespaceOrComment);
        prop_assert_eq!(&tokens[1].text, &run);
    }
}
