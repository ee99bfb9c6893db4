// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnexpectedToken,
    UnexpectedEof,
    UnknownName,
    UnusedParameter,
    UnmatchedCloseBracket,
    MisplacedCloseBracket,
    Io,
    JsonSerialization,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            UnexpectedToken => "unexpected_token",
            UnexpectedEof => "unexpected_eof",
            UnknownName => "unknown_name",
            UnusedParameter => "unused_parameter",
            UnmatchedCloseBracket => "unmatched_close_bracket",
            MisplacedCloseBracket => "misplaced_close_bracket",
            Io => "io",
            JsonSerialization => "json_serialization",
        };

        write!(f, "{name}")
    }
}

/// A problem found in the source text, with the character range it refers
/// to. The length is never zero so the range can always be selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    start: usize,
    length: usize,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>, start: usize, length: usize) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            start,
            length: length.max(1),
        }
    }

    /// Build a diagnostic covering the half-open range `start..end`.
    pub fn spanning(code: ErrorCode, message: impl Into<String>, start: usize, end: usize) -> Self {
        Diagnostic::new(code, message, start, end.saturating_sub(start))
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// The `(start, length)` selection for a text of `text_len` characters.
    /// The text may have been edited since the diagnostic was produced, so
    /// the range is cut down to fit rather than trusted.
    pub fn clamped(&self, text_len: usize) -> (usize, usize) {
        let start = self.start.min(text_len);
        let end = self.end().min(text_len);
        (start, end - start)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error: {}, Position: {}-{}",
            self.message,
            self.start,
            self.end()
        )
    }
}

/// 1-based line and column of the character at `offset`.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// The substring covering `length` characters starting at character
/// `start`, truncated at the end of `text`.
pub fn excerpt(text: &str, start: usize, length: usize) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let lo = byte_at(start);
    let hi = byte_at(start + length);
    &text[lo..hi]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Export => "ExportError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Import, ErrorCode::Io, Some(err.to_string()))
    }
}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! eprintln(
    ($($arg:tt)*) => {{
        use std::io::Write;
        let r = writeln!(&mut ::std::io::stderr(), $($arg)*);
        r.expect("failed printing to stderr");
    }}
);

#[test]
fn test_error_code_names() {
    use ErrorCode::*;
    let names: Vec<String> = [
        UnexpectedToken,
        UnexpectedEof,
        UnknownName,
        UnusedParameter,
        UnmatchedCloseBracket,
        MisplacedCloseBracket,
        Io,
        JsonSerialization,
    ]
    .iter()
    .map(|code| code.to_string())
    .collect();
    assert_eq!(
        vec![
            "unexpected_token",
            "unexpected_eof",
            "unknown_name",
            "unused_parameter",
            "unmatched_close_bracket",
            "misplaced_close_bracket",
            "io",
            "json_serialization",
        ],
        names
    );
}

#[test]
fn test_diagnostic_length_at_least_one() {
    let diag = Diagnostic::new(ErrorCode::UnexpectedEof, "expected `;`, found nothing", 7, 0);
    assert_eq!(7, diag.start());
    assert_eq!(1, diag.length());
    assert_eq!(8, diag.end());

    let diag = Diagnostic::spanning(ErrorCode::UnexpectedToken, "x", 5, 3);
    assert_eq!(5, diag.start());
    assert_eq!(1, diag.length());
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::new(ErrorCode::UnknownName, "name `y` does not exist", 11, 1);
    assert_eq!(
        "Error: name `y` does not exist, Position: 11-12",
        format!("{diag}")
    );
    assert_eq!("unknown_name", format!("{}", diag.code()));
}

#[test]
fn test_diagnostic_clamped() {
    let diag = Diagnostic::new(ErrorCode::UnexpectedToken, "m", 4, 6);
    assert_eq!((4, 6), diag.clamped(20));
    assert_eq!((4, 3), diag.clamped(7));
    assert_eq!((2, 0), diag.clamped(2));
    assert_eq!((0, 0), diag.clamped(0));
}

#[test]
fn test_line_col() {
    let text = "(\\x -> x\n  + y;";
    assert_eq!((1, 1), line_col(text, 0));
    assert_eq!((1, 8), line_col(text, 7));
    assert_eq!((2, 1), line_col(text, 9));
    assert_eq!((2, 5), line_col(text, 13));
    // past the end stays on the last position
    assert_eq!((2, 7), line_col(text, 100));
}

#[test]
fn test_excerpt() {
    let text = "é(\\x -> x;";
    assert_eq!("é", excerpt(text, 0, 1));
    assert_eq!("(\\x", excerpt(text, 1, 3));
    assert_eq!("x;", excerpt(text, 8, 10));
    assert_eq!("", excerpt(text, 30, 2));
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Import,
        ErrorCode::Io,
        Some("no such file".to_owned()),
    );
    assert_eq!("ImportError{io: no such file}", format!("{err}"));
    let err = Error::new(ErrorKind::Export, ErrorCode::JsonSerialization, None);
    assert_eq!("ExportError{json_serialization}", format!("{err}"));
}
