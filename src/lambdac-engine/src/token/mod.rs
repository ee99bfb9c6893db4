// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

// derived from the LALRPOP whitespace tokenizer, by way of the
// equation lexer's lookahead/bump structure

use std::fmt;
use std::str::CharIndices;

use self::TokenKind::*;

#[cfg(test)]
mod test;

/// The closed set of token kinds. The discriminant order is the stable
/// numeric code reported by [`TokenKind::code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// Not produced by [`Lexer`]; kept for token streams built elsewhere
    /// and dropped by the parser before use.
    Whitespace,
    NewLine,
    CloseBracket,
    OpenBracket,
    LambdaIntroducer,
    Integer,
    Float,
    SignMinus,
    SignPlus,
    SignMultiply,
    SignDivide,
    SignMore,
    EndOfExpression,
    InvalidCharacter,
}

impl TokenKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Identifier => "Identifier",
            Whitespace => "Whitespace",
            NewLine => "NewLine",
            CloseBracket => "CloseBracket",
            OpenBracket => "OpenBracket",
            LambdaIntroducer => "LambdaIntroducer",
            Integer => "Integer",
            Float => "Float",
            SignMinus => "SignMinus",
            SignPlus => "SignPlus",
            SignMultiply => "SignMultiply",
            SignDivide => "SignDivide",
            SignMore => "SignMore",
            EndOfExpression => "EndOfExpression",
            InvalidCharacter => "InvalidCharacter",
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(self, SignPlus | SignMinus | SignMultiply | SignDivide)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let desc = match self {
            Identifier => "identifier",
            Whitespace => "whitespace",
            NewLine => "newline",
            CloseBracket => "`)`",
            OpenBracket => "`(`",
            LambdaIntroducer => "`\\`",
            Integer => "integer",
            Float => "float",
            SignMinus => "`-`",
            SignPlus => "`+`",
            SignMultiply => "`*`",
            SignDivide => "`/`",
            SignMore => "`>`",
            EndOfExpression => "`;`",
            InvalidCharacter => "invalid character",
        };

        write!(f, "{desc}")
    }
}

/// A classified slice of the source. Offsets and lengths count characters,
/// not bytes; the length always agrees with `text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token<'input> {
    kind: TokenKind,
    text: &'input str,
    start: usize,
    length: usize,
}

impl<'input> Token<'input> {
    pub fn new(kind: TokenKind, text: &'input str, start: usize) -> Self {
        Token {
            kind,
            text,
            start,
            length: text.chars().count(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &'input str {
        self.text
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

    pub fn code(&self) -> u8 {
        self.kind.code()
    }

    pub fn position(&self) -> String {
        format!("{}: {}", self.start, self.end())
    }
}

/// Characters that end an identifier run.
const RESERVED: &[char] = &[
    ' ', '\n', '\\', '-', '+', '/', '(', ')', '\t', '\r', '>', ';',
];

pub struct Lexer<'input> {
    text: &'input str,
    chars: CharIndices<'input>,
    lookahead: Option<(usize, char)>,
    // character offset of `lookahead`
    pos: usize,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut t = Lexer {
            text: input,
            chars: input.char_indices(),
            lookahead: None,
            pos: 0,
        };
        t.bump();
        t
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        if self.lookahead.is_some() {
            self.pos += 1;
        }
        self.lookahead = self.chars.next();
        self.lookahead
    }

    fn take_while<F>(&mut self, mut keep_going: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        self.take_until(|c| !keep_going(c))
    }

    fn take_until<F>(&mut self, mut terminate: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        loop {
            match self.lookahead {
                None => {
                    return None;
                }
                Some((idx1, c)) => {
                    if terminate(c) {
                        return Some(idx1);
                    } else {
                        self.bump();
                    }
                }
            }
        }
    }

    fn single(&mut self, kind: TokenKind, idx0: usize, c: char) -> Token<'input> {
        let start = self.pos;
        self.bump();
        Token::new(kind, &self.text[idx0..idx0 + c.len_utf8()], start)
    }

    fn number(&mut self, idx0: usize) -> Token<'input> {
        let start = self.pos;
        let mut seen_dot = false;
        let end = self
            .take_while(|c| {
                if c.is_ascii_digit() {
                    true
                } else if c == '.' && !seen_dot {
                    seen_dot = true;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(self.text.len());

        // a second '.' is left as the lookahead and comes out as its own
        // InvalidCharacter token on the next call
        let kind = if seen_dot { Float } else { Integer };
        Token::new(kind, &self.text[idx0..end], start)
    }

    fn identifier(&mut self, idx0: usize) -> Token<'input> {
        let start = self.pos;
        let end = self
            .take_until(|c| RESERVED.contains(&c))
            .unwrap_or(self.text.len());
        Token::new(Identifier, &self.text[idx0..end], start)
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        macro_rules! consume {
            ($s:expr, $kind:expr, $i:expr, $c:expr) => {{ Some($s.single($kind, $i, $c)) }};
        }

        loop {
            return match self.lookahead {
                Some((i, c @ ';')) => consume!(self, EndOfExpression, i, c),
                Some((i, c @ '(')) => consume!(self, OpenBracket, i, c),
                Some((i, c @ ')')) => consume!(self, CloseBracket, i, c),
                Some((i, c @ '\\')) => consume!(self, LambdaIntroducer, i, c),
                Some((i, c @ '>')) => consume!(self, SignMore, i, c),
                Some((i, c @ '-')) => consume!(self, SignMinus, i, c),
                Some((i, c @ '+')) => consume!(self, SignPlus, i, c),
                Some((i, c @ '*')) => consume!(self, SignMultiply, i, c),
                Some((i, c @ '/')) => consume!(self, SignDivide, i, c),
                Some((_, ' ' | '\t' | '\r')) => {
                    self.bump();
                    continue;
                }
                Some((i, c @ '\n')) => consume!(self, NewLine, i, c),
                Some((i, c)) if c.is_ascii_digit() => Some(self.number(i)),
                Some((i, c)) if c.is_ascii_alphabetic() => Some(self.identifier(i)),
                Some((i, c)) => consume!(self, InvalidCharacter, i, c),
                None => None,
            };
        }
    }
}

/// Split `text` into tokens. Never fails: characters that fit no rule
/// become [`TokenKind::InvalidCharacter`] tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Lexer::new(text).collect()
}
