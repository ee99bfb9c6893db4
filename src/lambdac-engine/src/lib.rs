// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod json;
pub mod parser;
pub mod token;

#[cfg(test)]
mod check_proptest;

pub use self::common::{Diagnostic, Error, ErrorCode, ErrorKind, Result};
pub use self::parser::parse;
pub use self::token::{Lexer, Token, TokenKind, tokenize};

/// Tokenize and parse `text` in one go.
pub fn check(text: &str) -> Vec<Diagnostic> {
    parse(&tokenize(text))
}

#[test]
fn test_check_scenarios() {
    assert!(check("(\\x y -> x + y)1 2;").is_empty());
    assert!(check("").is_empty());

    let diags = check("(\\x -> x + y;");
    assert_eq!(
        1,
        diags
            .iter()
            .filter(|d| d.code() == ErrorCode::UnknownName)
            .count()
    );
}
