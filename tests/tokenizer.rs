//! Tokenization tests over the sample files
//!
//! These tests verify that the tokenizer splits input into maximal runs, never drops
//! characters, and that lookahead and backtracking behave the same on real inputs.

use conf::conf::lexing::{tokenize, Tokenizer};
use conf::conf::token::TokenKind;
use proptest::prelude::*;
use std::fs;

fn read_sample(name: &str) -> String {
    let path = format!("{}/samples/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(path).expect("Failed to read sample document")
}

#[test]
fn test_section_header_tokens() {
    let tokens: Vec<(TokenKind, &str)> = tokenize("[ a.b ]\r\n")
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Punct, "["),
            (TokenKind::WhiteSpace, " "),
            (TokenKind::AlphaNum, "a"),
            (TokenKind::Punct, "."),
            (TokenKind::AlphaNum, "b"),
            (TokenKind::WhiteSpace, " "),
            (TokenKind::Punct, "]"),
            (TokenKind::Newline, "\r\n"),
        ]
    );
}

#[test]
fn test_samples_round_trip() {
    for name in ["basic.conf", "repetition.conf", "quoting.conf", "crlf.conf"] {
        let source = read_sample(name);
        let tokens = tokenize(&source);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, source, "{} did not round trip", name);
        for pair in tokens.windows(2) {
            assert_eq!(
                pair[0].offset + pair[0].text.len(),
                pair[1].offset,
                "{}: tokens are not contiguous",
                name
            );
            if pair[0].kind != TokenKind::Punct {
                assert_ne!(pair[0].kind, pair[1].kind, "{}: runs were split", name);
            }
        }
    }
}

#[test]
fn test_mark_reset_replays_tokens() {
    let source = read_sample("repetition.conf");
    let mut tokenizer = Tokenizer::new(&source);
    for _ in 0..5 {
        tokenizer.next();
    }
    tokenizer.mark();
    let first: Vec<_> = (0..10).map(|_| tokenizer.next()).collect();
    tokenizer.reset();
    let second: Vec<_> = (0..10).map(|_| tokenizer.next()).collect();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn test_tokens_cover_input(input in "\\PC{0,64}") {
        let tokens = tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn test_punct_is_one_char(input in "[a-z =.\\[\\]\"'\t\n]{0,64}") {
        for token in tokenize(&input) {
            prop_assert!(!token.text.is_empty());
            if token.kind == TokenKind::Punct {
                prop_assert_eq!(token.text.chars().count(), 1);
            }
        }
    }

    #[test]
    fn test_peek_matches_next(input in "\\PC{0,32}") {
        let mut tokenizer = Tokenizer::new(&input);
        loop {
            let peeked = tokenizer.peek();
            prop_assert_eq!(peeked, tokenizer.peek());
            let next = tokenizer.next();
            prop_assert_eq!(peeked, next);
            if next.kind == TokenKind::None {
                prop_assert!(tokenizer.at_end());
                break;
            }
        }
    }
}
