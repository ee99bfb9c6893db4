// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for the lexer and parser using proptest.
//!
//! These tests verify that:
//! 1. Lexing is total and accounts for every input character
//! 2. Lexing and parsing are deterministic
//! 3. Diagnostics always point inside the source
//! 4. Well-formed programs produce no diagnostics, and surplus closing
//!    brackets are always reported, including inside a group

use proptest::prelude::*;

use crate::check;
use crate::common::ErrorCode;
use crate::parser::parse;
use crate::token::tokenize;

// Strategy helpers for generating source text

fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("("),
        Just(")"),
        Just("\\"),
        Just("-"),
        Just(">"),
        Just("+"),
        Just("*"),
        Just("/"),
        Just(";"),
        Just("\n"),
        Just("x"),
        Just("y"),
        Just("1"),
        Just("2.5"),
        Just("3.4.5"),
        Just("@"),
    ]
}

/// Token soup: mostly grammatical pieces in random order.
fn soup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..48).prop_map(|parts| parts.join(" "))
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ -~\\n\\t\\r]{0,64}".prop_map(|s| s.to_string()),
        soup_strategy(),
    ]
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,3}".prop_map(|s| s.to_string())
}

fn number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..1000).prop_map(|n| format!("-{n}")),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
    ]
}

/// A well-formed program of one or more lambdas that use every parameter.
fn program_strategy() -> impl Strategy<Value = String> {
    let lambda = prop::collection::vec((ident_strategy(), number_strategy()), 1..5)
        .prop_flat_map(|params| (Just(params), any::<bool>()))
        .prop_map(|(params, grouped)| {
            let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
            let nums: Vec<&str> = params.iter().map(|(_, num)| num.as_str()).collect();
            let sum = names.join(" + ");
            let body = if grouped {
                format!("({sum}) * 2")
            } else {
                format!("{sum} / 2")
            };
            format!("(\\{} -> {}) {};", names.join(" "), body, nums.join(" "))
        });
    prop::collection::vec(lambda, 1..4).prop_map(|lambdas| lambdas.join("\n"))
}

/// A lambda with a stray `)` where an operand of a group should start.
fn stray_bracket_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((ident_strategy(), number_strategy()), 1..5).prop_map(|params| {
        let names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        let nums: Vec<&str> = params.iter().map(|(_, num)| num.as_str()).collect();
        format!(
            "(\\{} -> ({} + ) {}) * 2) {};",
            names.join(" "),
            names[0],
            names.join(" + "),
            nums.join(" ")
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn lexing_covers_every_character(text in source_strategy()) {
        let tokens = tokenize(&text);
        let skipped = text.chars().filter(|c| matches!(c, ' ' | '\t' | '\r')).count();
        let covered: usize = tokens.iter().map(|t| t.length()).sum();
        prop_assert_eq!(text.chars().count(), covered + skipped);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
        }
    }

    #[test]
    fn lexing_and_parsing_are_deterministic(text in source_strategy()) {
        let first = tokenize(&text);
        let second = tokenize(&text);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(parse(&first), parse(&second));
    }

    #[test]
    fn diagnostics_stay_inside_source(text in source_strategy()) {
        let len = text.chars().count();
        for diag in check(&text) {
            prop_assert!(diag.length() >= 1);
            prop_assert!(diag.end() <= len, "{:?} outside {} chars of {:?}", diag, len, text);
        }
    }

    #[test]
    fn well_formed_programs_are_clean(program in program_strategy()) {
        let diags = check(&program);
        prop_assert!(diags.is_empty(), "{:?}: {:?}", program, diags);
    }

    #[test]
    fn surplus_close_bracket_is_reported(program in program_strategy(), extra in 1usize..4) {
        let text = format!("{program}{}", " )".repeat(extra));
        let unmatched = check(&text)
            .iter()
            .filter(|d| d.code() == ErrorCode::UnmatchedCloseBracket)
            .count();
        prop_assert_eq!(extra, unmatched);
    }

    #[test]
    fn misplaced_bracket_in_group_is_unmatched(text in stray_bracket_strategy()) {
        let codes: Vec<ErrorCode> = check(&text).iter().map(|d| d.code()).collect();
        prop_assert_eq!(
            vec![ErrorCode::UnmatchedCloseBracket, ErrorCode::MisplacedCloseBracket],
            codes,
            "{:?}",
            text
        );
    }
}
