// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! JSON form of the token table and the diagnostic list.
//!
//! # Example
//! ```
//! use lambdac_engine::json;
//!
//! let report = json::Report::new("(\\x -> x + y;");
//! let out = json::to_string(&report)?;
//! assert!(out.contains("unknown_name"));
//! # Ok::<(), lambdac_engine::Error>(())
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Diagnostic, Error, ErrorCode, ErrorKind, Result, line_col};
use crate::parser::parse;
use crate::token::{Token, tokenize};

fn is_empty_vec<T>(val: &[T]) -> bool {
    val.is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TokenRecord {
    pub code: u8,
    pub kind: String,
    pub text: String,
    pub start: usize,
    pub length: usize,
}

impl From<&Token<'_>> for TokenRecord {
    fn from(tok: &Token<'_>) -> Self {
        TokenRecord {
            code: tok.code(),
            kind: tok.kind().name().to_owned(),
            text: tok.text().to_owned(),
            start: tok.start(),
            length: tok.length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DiagnosticRecord {
    pub code: String,
    pub message: String,
    pub start: usize,
    pub length: usize,
    /// 1-based line of `start`.
    pub line: usize,
    /// 1-based column of `start`, in characters.
    pub column: usize,
}

impl DiagnosticRecord {
    pub fn new(diag: &Diagnostic, text: &str) -> Self {
        let (line, column) = line_col(text, diag.start());
        DiagnosticRecord {
            code: diag.code().to_string(),
            message: diag.message().to_owned(),
            start: diag.start(),
            length: diag.length(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Report {
    #[serde(skip_serializing_if = "is_empty_vec", default)]
    pub tokens: Vec<TokenRecord>,
    pub diagnostics: Vec<DiagnosticRecord>,
}

impl Report {
    /// Lex and parse `text`, keeping both the tokens and the diagnostics.
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let diagnostics = parse(&tokens);
        Report::from_parts(text, &tokens, &diagnostics)
    }

    /// Build a report from tokens and diagnostics already computed for `text`.
    pub fn from_parts(text: &str, tokens: &[Token<'_>], diagnostics: &[Diagnostic]) -> Self {
        Report {
            tokens: tokens.iter().map(TokenRecord::from).collect(),
            diagnostics: diagnostics
                .iter()
                .map(|d| DiagnosticRecord::new(d, text))
                .collect(),
        }
    }

    /// A report with only the diagnostics.
    pub fn diagnostics_only(text: &str) -> Self {
        Report {
            tokens: vec![],
            ..Report::new(text)
        }
    }
}

pub fn to_string(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|err| {
        Error::new(
            ErrorKind::Export,
            ErrorCode::JsonSerialization,
            Some(err.to_string()),
        )
    })
}

#[cfg(feature = "schema")]
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Report)
}

#[test]
fn test_report_records() {
    let report = Report::new("(\\x ->\n x + y;");
    assert_eq!(10, report.tokens.len());
    assert_eq!(
        TokenRecord {
            code: 5,
            kind: "LambdaIntroducer".to_owned(),
            text: "\\".to_owned(),
            start: 1,
            length: 1,
        },
        report.tokens[1]
    );

    let unknown = &report.diagnostics[0];
    assert_eq!("unknown_name", unknown.code);
    assert_eq!((12, 1), (unknown.start, unknown.length));
    assert_eq!((2, 6), (unknown.line, unknown.column));
}

#[test]
fn test_diagnostics_only_omits_tokens() {
    let report = Report::diagnostics_only(")(\\- > 1 + 1);");
    assert!(report.tokens.is_empty());
    assert_eq!(1, report.diagnostics.len());

    let out = to_string(&report).unwrap();
    assert!(!out.contains("\"tokens\""));
    let back: Report = serde_json::from_str(&out).unwrap();
    assert_eq!(report, back);
}

#[test]
fn test_from_parts_matches_new() {
    let text = "(\\a b -> a + c) 1;";
    let tokens = tokenize(text);
    let diagnostics = parse(&tokens);
    let report = Report::from_parts(text, &tokens, &diagnostics);
    assert_eq!(Report::new(text), report);
    assert_eq!(tokens.len(), report.tokens.len());

    let report = Report::from_parts(text, &[], &diagnostics);
    assert_eq!(Report::diagnostics_only(text), report);
}

#[cfg(feature = "schema")]
#[test]
fn test_schema_names_report_fields() {
    let schema = serde_json::to_value(generate_schema()).unwrap();
    let props = &schema["properties"];
    assert!(props.get("tokens").is_some());
    assert!(props.get("diagnostics").is_some());
}
