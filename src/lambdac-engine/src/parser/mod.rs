// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Hand-written recursive descent parser for lambda expressions.
//!
//! The parser never builds a tree; it walks the token stream against the
//! grammar below and collects diagnostics.
//!
//! ```text
//! Program      := { ';'* Expression }
//! Expression   := '(' '\' ParamList
//! ParamList    := '-' Arrow | Identifier ParamList
//! Arrow        := '>' FirstOperand
//! FirstOperand := ')'* '('* Operand Operation
//! Operation    := ')'* Operator '('* Operand ( Operation | ')' Numbers )
//! Numbers      := { ['+' | '-'] (Integer | Float) }  ';'   -- one per parameter
//! Operand      := Identifier | Integer | Float
//! ```
//!
//! When the expected token is missing the parser skips ahead to the next
//! token that fits and reports the whole skipped run as one diagnostic. If
//! nothing fits before the input runs out, parsing stops.

use std::fmt;

use crate::common::{Diagnostic, ErrorCode};
use crate::token::Token;
use crate::token::TokenKind::{self, *};


/// What a production accepts at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expected {
    OpenBracket,
    Lambda,
    Parameter,
    Arrow,
    Operand,
    Operator,
    OperatorOrClose,
    Number,
    EndOfExpression,
}

impl Expected {
    fn kinds(self) -> &'static [TokenKind] {
        match self {
            Expected::OpenBracket => &[OpenBracket],
            Expected::Lambda => &[LambdaIntroducer],
            Expected::Parameter => &[Identifier, SignMinus],
            Expected::Arrow => &[SignMore],
            Expected::Operand => &[Identifier, Integer, Float],
            Expected::Operator => &[SignPlus, SignMinus, SignMultiply, SignDivide],
            Expected::OperatorOrClose => &[
                SignPlus,
                SignMinus,
                SignMultiply,
                SignDivide,
                CloseBracket,
            ],
            Expected::Number => &[Integer, Float],
            Expected::EndOfExpression => &[EndOfExpression],
        }
    }

    fn accepts(self, kind: TokenKind) -> bool {
        self.kinds().contains(&kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kinds = self.kinds();
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 {
                let sep = if i + 1 == kinds.len() { " or " } else { ", " };
                f.write_str(sep)?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Input ran out while recovering; nothing after this point can be
/// resynchronized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EarlyEnd;

type Step<T> = Result<T, EarlyEnd>;

#[derive(Clone, Copy, Debug)]
struct Param<'input> {
    name: &'input str,
    start: usize,
    length: usize,
    used: bool,
}

fn describe(tok: &Token<'_>) -> String {
    match tok.kind() {
        Identifier | Integer | Float | InvalidCharacter => {
            format!("{} `{}`", tok.kind(), tok.text())
        }
        kind => kind.to_string(),
    }
}

/// Parser state for a single call to [`parse`].
struct Parser<'input> {
    tokens: Vec<Token<'input>>,
    pos: usize,
    params: Vec<Param<'input>>,
    // start offsets of the currently open brackets
    brackets: Vec<usize>,
    // stack depth below the current expression's own bracket
    base: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'input> Parser<'input> {
    fn new(tokens: &[Token<'input>]) -> Self {
        let tokens = tokens
            .iter()
            .filter(|tok| tok.kind() != Whitespace)
            .copied()
            .collect();
        Parser {
            tokens,
            pos: 0,
            params: Vec::new(),
            brackets: Vec::new(),
            base: 0,
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Peek at the current token, stepping over newlines.
    fn peek(&mut self) -> Option<Token<'input>> {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind() == NewLine {
            self.pos += 1;
        }
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|tok| tok.kind())
    }

    /// Consume a token the production accepts, neutralizing anything in
    /// the way.
    fn expect(&mut self, expected: Expected) -> Step<Token<'input>> {
        match self.peek() {
            Some(tok) if expected.accepts(tok.kind()) => {
                self.pos += 1;
                Ok(tok)
            }
            _ => self.neutralize(expected),
        }
    }

    fn neutralize(&mut self, expected: Expected) -> Step<Token<'input>> {
        let Some(found) = self.peek() else {
            let (start, length) = self
                .tokens
                .last()
                .map(|tok| (tok.start(), tok.length()))
                .unwrap_or((0, 1));
            self.report(Diagnostic::new(
                ErrorCode::UnexpectedEof,
                format!("expected {expected}, found nothing"),
                start,
                length,
            ));
            return Err(EarlyEnd);
        };

        let mut message = format!("expected {expected}, found {}", describe(&found));
        let from = self.pos;
        let target = self.tokens[from..]
            .iter()
            .position(|tok| expected.accepts(tok.kind()))
            .map(|i| from + i);

        let Some(target) = target else {
            self.report(Diagnostic::new(
                ErrorCode::UnexpectedToken,
                message,
                found.start(),
                found.length(),
            ));
            self.pos = self.tokens.len();
            for i in from..self.tokens.len() {
                self.skip_bracket(self.tokens[i]);
            }
            return Err(EarlyEnd);
        };

        let mut end = found.end();
        for tok in self.tokens[from..target]
            .iter()
            .filter(|tok| tok.kind() != NewLine)
        {
            message.push_str(&format!("\n  skipped {} at {}", describe(tok), tok.start()));
            end = tok.end();
        }
        self.report(Diagnostic::spanning(
            ErrorCode::UnexpectedToken,
            message,
            found.start(),
            end,
        ));
        for i in from..target {
            self.skip_bracket(self.tokens[i]);
        }

        self.pos = target + 1;
        Ok(self.tokens[target])
    }

    /// Keep the bracket stack honest about brackets inside a skipped run.
    /// A skipped `(` opens no group in the current body, so it is filed
    /// below the expression's own bracket.
    fn skip_bracket(&mut self, tok: Token<'input>) {
        match tok.kind() {
            OpenBracket => {
                let at = self.base.min(self.brackets.len());
                self.brackets.insert(at, tok.start());
                self.base = at + 1;
            }
            CloseBracket => self.close_bracket(tok),
            _ => {}
        }
    }

    fn close_bracket(&mut self, tok: Token<'input>) {
        if self.brackets.pop().is_none() {
            self.unmatched_bracket(tok);
        }
    }

    fn unmatched_bracket(&mut self, tok: Token<'input>) {
        self.report(Diagnostic::new(
            ErrorCode::UnmatchedCloseBracket,
            "closing bracket without matching opening bracket",
            tok.start(),
            tok.length(),
        ));
    }

    fn program(&mut self) {
        while let Some(tok) = self.peek() {
            match tok.kind() {
                EndOfExpression => {
                    self.pos += 1;
                }
                CloseBracket => {
                    self.pos += 1;
                    self.close_bracket(tok);
                }
                _ => {
                    if self.expression().is_err() {
                        break;
                    }
                }
            }
        }
    }

    fn expression(&mut self) -> Step<()> {
        let open = self.expect(Expected::OpenBracket)?;
        self.params.clear();
        self.base = self.brackets.len();
        self.brackets.push(open.start());
        self.expect(Expected::Lambda)?;
        self.param_list()
    }

    fn param_list(&mut self) -> Step<()> {
        loop {
            let tok = self.expect(Expected::Parameter)?;
            if tok.kind() != Identifier {
                return self.arrow();
            }
            self.params.push(Param {
                name: tok.text(),
                start: tok.start(),
                length: tok.length(),
                used: false,
            });
        }
    }

    fn arrow(&mut self) -> Step<()> {
        self.expect(Expected::Arrow)?;
        self.first_operand()
    }

    fn first_operand(&mut self) -> Step<()> {
        self.misplaced_brackets();
        self.open_brackets();
        self.operand()?;
        self.operation()
    }

    fn operation(&mut self) -> Step<()> {
        self.close_brackets();
        self.expect(Expected::Operator)?;
        loop {
            self.misplaced_brackets();
            self.open_brackets();
            self.operand()?;
            self.close_brackets();
            let tok = self.expect(Expected::OperatorOrClose)?;
            if tok.kind() == CloseBracket {
                self.close_bracket(tok);
                return self.numbers();
            }
        }
    }

    fn operand(&mut self) -> Step<()> {
        let tok = self.expect(Expected::Operand)?;
        if tok.kind() == Identifier {
            self.reference(tok);
        }
        Ok(())
    }

    fn reference(&mut self, tok: Token<'input>) {
        let mut found = false;
        for param in self.params.iter_mut().filter(|p| p.name == tok.text()) {
            param.used = true;
            found = true;
        }
        if !found {
            self.report(Diagnostic::new(
                ErrorCode::UnknownName,
                format!("name `{}` does not exist in current context", tok.text()),
                tok.start(),
                tok.length(),
            ));
        }
    }

    fn open_brackets(&mut self) {
        while let Some(tok) = self.peek().filter(|tok| tok.kind() == OpenBracket) {
            self.pos += 1;
            self.brackets.push(tok.start());
        }
    }

    /// Close brackets following an operand. The expression's own bracket
    /// is left for the end of the body.
    fn close_brackets(&mut self) {
        while self.peek_kind() == Some(CloseBracket) && self.brackets.len() > self.base + 1 {
            self.pos += 1;
            self.brackets.pop();
        }
    }

    /// Closing brackets where an operand should start never pop the stack,
    /// so each one is left without a partner.
    fn misplaced_brackets(&mut self) {
        while let Some(tok) = self.peek().filter(|tok| tok.kind() == CloseBracket) {
            self.pos += 1;
            self.unmatched_bracket(tok);
            self.report(Diagnostic::new(
                ErrorCode::MisplacedCloseBracket,
                "closing bracket misplaced",
                tok.start(),
                tok.length(),
            ));
        }
    }

    fn numbers(&mut self) -> Step<()> {
        for _ in 0..self.params.len() {
            if matches!(self.peek_kind(), Some(SignPlus | SignMinus)) {
                self.pos += 1;
            }
            self.expect(Expected::Number)?;
        }
        self.expect(Expected::EndOfExpression)?;

        let unused: Vec<Diagnostic> = self
            .params
            .iter()
            .filter(|p| !p.used)
            .map(|p| {
                Diagnostic::new(
                    ErrorCode::UnusedParameter,
                    format!("unused parameter named `{}`", p.name),
                    p.start,
                    p.length,
                )
            })
            .collect();
        self.diagnostics.extend(unused);
        Ok(())
    }
}

/// Check a token sequence against the grammar. An empty result means the
/// input is well formed and every name resolves.
pub fn parse(tokens: &[Token<'_>]) -> Vec<Diagnostic> {
    let mut parser = Parser::new(tokens);
    parser.program();
    parser.diagnostics
}
