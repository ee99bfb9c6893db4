// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use super::TokenKind::*;
use super::{Lexer, Token, TokenKind, tokenize};
use crate::common::excerpt;

// span strings mark the expected token with `~`, one column per character
fn test(input: &str, expected: Vec<(&str, TokenKind)>) {
    let tokenizer = Lexer::new(input);
    let len = expected.len();
    for (token, (expected_span, expected_kind)) in tokenizer.zip(expected.into_iter()) {
        let expected_start = expected_span.find('~').unwrap();
        let expected_end = expected_span.rfind('~').unwrap() + 1;
        assert_eq!(
            (expected_start, expected_kind, expected_end),
            (token.start(), token.kind(), token.end()),
            "token {token:?} in {input:?}"
        );
        assert_eq!(
            excerpt(input, expected_start, expected_end - expected_start),
            token.text()
        );
    }

    let mut tokenizer = Lexer::new(input);
    assert_eq!(None, tokenizer.nth(len));
}

#[test]
fn lambda() {
    test(
        "(\\x y -> x + y;",
        vec![
            ("~              ", OpenBracket),
            (" ~             ", LambdaIntroducer),
            ("  ~            ", Identifier),
            ("    ~          ", Identifier),
            ("      ~        ", SignMinus),
            ("       ~       ", SignMore),
            ("         ~     ", Identifier),
            ("           ~   ", SignPlus),
            ("             ~ ", Identifier),
            ("              ~", EndOfExpression),
        ],
    );
}

#[test]
fn operators() {
    test(
        "+-*/",
        vec![
            ("~   ", SignPlus),
            (" ~  ", SignMinus),
            ("  ~ ", SignMultiply),
            ("   ~", SignDivide),
        ],
    );
}

#[test]
fn numbers() {
    test(
        "12 3.5 7.",
        vec![
            ("~~       ", Integer),
            ("   ~~~   ", Float),
            ("       ~~", Float),
        ],
    );
}

#[test]
fn second_dot_splits_number() {
    test(
        "42.3.5",
        vec![
            ("~~~~  ", Float),
            ("    ~ ", InvalidCharacter),
            ("     ~", Integer),
        ],
    );
    test(
        "1..2",
        vec![
            ("~~  ", Float),
            ("  ~ ", InvalidCharacter),
            ("   ~", Integer),
        ],
    );
}

#[test]
fn identifiers() {
    test(
        "x1 y22 abc",
        vec![
            ("~~        ", Identifier),
            ("   ~~~    ", Identifier),
            ("       ~~~", Identifier),
        ],
    );
}

#[test]
fn identifier_runs_to_reserved() {
    // only the reserved set ends an identifier, so `*`, `.` and digits
    // are swallowed
    test("a*b.c9", vec![("~~~~~~", Identifier)]);
    test(
        "ab;cd)",
        vec![
            ("~~    ", Identifier),
            ("  ~   ", EndOfExpression),
            ("   ~~ ", Identifier),
            ("     ~", CloseBracket),
        ],
    );
    test(
        "f>g",
        vec![("~  ", Identifier), (" ~ ", SignMore), ("  ~", Identifier)],
    );
}

#[test]
fn newlines() {
    test(
        "x\r\ny\nz",
        vec![
            ("~      ", Identifier),
            ("  ~    ", NewLine),
            ("   ~   ", Identifier),
            ("    ~  ", NewLine),
            ("     ~ ", Identifier),
        ],
    );
}

#[test]
fn invalid_characters() {
    test(
        "@ é_",
        vec![
            ("~   ", InvalidCharacter),
            ("  ~ ", InvalidCharacter),
            ("   ~", InvalidCharacter),
        ],
    );
}

#[test]
fn offsets_count_characters() {
    let tokens = tokenize("éé x");
    assert_eq!(3, tokens.len());
    assert_eq!(Identifier, tokens[2].kind());
    assert_eq!(3, tokens[2].start());
}

#[test]
fn empty_and_blank() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("  \t\r ").is_empty());
}

#[test]
fn token_derives_length() {
    let tok = Token::new(Float, "3.25", 10);
    assert_eq!(4, tok.length());
    assert_eq!(14, tok.end());
    assert_eq!("10: 14", tok.position());
    assert_eq!(7, tok.code());
    assert_eq!("Float", tok.kind().name());
}

#[test]
fn kind_codes() {
    assert_eq!(0, Identifier.code());
    assert_eq!(1, Whitespace.code());
    assert_eq!(5, LambdaIntroducer.code());
    assert_eq!(14, InvalidCharacter.code());
    assert!(SignDivide.is_operator());
    assert!(!SignMore.is_operator());
}

#[test]
fn covers_every_character() {
    let input = "(\\x y -> (x + 1.5) * y)\r\n 2 -3;\t@?42.3.5 ;;";
    let tokens = tokenize(input);
    let skipped = input
        .chars()
        .filter(|c| matches!(c, ' ' | '\t' | '\r'))
        .count();
    let covered: usize = tokens.iter().map(|t| t.length()).sum();
    assert_eq!(input.chars().count(), covered + skipped);
    for pair in tokens.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
    }
}
