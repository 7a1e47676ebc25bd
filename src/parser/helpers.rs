/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     helpers.rs
 * Purpose:  Shared parser helpers: token matching, lookahead and error mapping.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the SADAL interpreter project.
 * 
 * SADAL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use log::debug;

use crate::error::{PResult, SadalError, ValueError};
use crate::lexer::{Token, TokenKind, TokenSource};
use crate::parser::parser::Parser;
use crate::symbols::ScalarType;
use crate::value::Value;

impl<'a, S: TokenSource> Parser<'a, S> {
    /// Reads the next token, buffered or fresh.
    pub(crate) fn next(&mut self) -> Token {
        self.cursor.next()
    }

    /// Hands a token back to the cursor.
    ///
    /// A rejected pushback is an interpreter bug, reported as an internal
    /// error rather than aborting the process.
    pub(crate) fn push_back(&mut self, tok: Token) -> PResult<()> {
        let line = tok.line;
        self.cursor.push_back(tok).map_err(|err| {
            SadalError::internal_error(format!("Token pushback failed: {}", err), line)
        })
    }

    /// Consumes a token of the given kind or fails with `message`.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        let tok = self.next();
        if tok.is(kind) {
            Ok(tok)
        } else {
            Err(self.unexpected(&tok, message))
        }
    }

    /// Builds the syntax error for a token the current production cannot
    /// use. Lexical errors are reported as such.
    pub(crate) fn unexpected(&self, tok: &Token, message: &str) -> SadalError {
        match tok.kind {
            TokenKind::Error => SadalError::syntax_error(
                format!("Unrecognized Input Pattern: '{}'", tok.lexeme),
                tok.line,
            ),
            TokenKind::Done => SadalError::syntax_error(message, tok.line)
                .with_help("reached the end of the program text"),
            _ => SadalError::syntax_error(message, tok.line)
                .with_help(format!("found '{}'", tok.lexeme)),
        }
    }

    // -------------------------------------------------------------------------
    // Short-circuit discard mode
    // -------------------------------------------------------------------------

    /// `true` while the operand being parsed only has to be well-formed.
    pub(crate) fn discarding(&self) -> bool {
        self.discard > 0
    }

    /// Runs `production` with evaluation failures suppressed.
    ///
    /// The tokens are consumed exactly as usual, so a malformed operand is
    /// still a syntax error; its value is dropped.
    pub(crate) fn discarded<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<()> {
        self.discard += 1;
        let result = production(self);
        self.discard -= 1;
        result.map(|_| ())
    }

    /// Turns a non-syntax failure into the `Error` sentinel while
    /// discarding; passes everything else through.
    pub(crate) fn recover(&self, err: SadalError) -> PResult<Value> {
        if self.discarding() && !err.is_syntax() {
            debug!("discarded: {}", err.message);
            Ok(Value::Error)
        } else {
            Err(err)
        }
    }

    /// Attaches a line to an operator result.
    pub(crate) fn apply(&self, result: Result<Value, ValueError>, line: usize) -> PResult<Value> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => self.recover(SadalError::runtime_error(err.to_string(), line)),
        }
    }

    // -------------------------------------------------------------------------
    // Variables
    // -------------------------------------------------------------------------

    /// The declared type of a variable named by `tok`.
    pub(crate) fn declared_type(&self, tok: &Token) -> PResult<ScalarType> {
        self.state.symbols.lookup(&tok.lexeme).ok_or_else(|| {
            SadalError::reference_error(format!("Undeclared variable: {}", tok.lexeme), tok.line)
        })
    }

    /// The current value of a declared, initialized variable.
    pub(crate) fn variable(&self, tok: &Token) -> PResult<Value> {
        self.declared_type(tok)?;
        self.state.env.get(&tok.lexeme).cloned().ok_or_else(|| {
            SadalError::reference_error(
                format!("Uninitialized variable: {}", tok.lexeme),
                tok.line,
            )
        })
    }

    /// Requires `value` to be exactly of the declared type.
    pub(crate) fn check_type(
        &self,
        declared: ScalarType,
        value: &Value,
        message: &str,
        line: usize,
    ) -> PResult<()> {
        if value.scalar_type() == Some(declared) {
            return Ok(());
        }

        Err(SadalError::type_error(message, line).with_help(format!(
            "expected {}, found {}",
            declared,
            value.type_name()
        )))
    }

    pub(crate) fn output_error(&self, err: std::io::Error, line: usize) -> SadalError {
        SadalError::runtime_error(format!("Error during output operation: {}", err), line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::Console;
    use crate::lexer::Lexer;
    use std::io;

    fn parser<'a>(src: &str, config: &'a Config) -> Parser<'a, Lexer> {
        Parser::new(Lexer::new(src), Console::new(io::empty(), io::sink()), config)
    }

    #[test]
    fn expect_reports_the_found_token() {
        let config = Config::default();
        let mut p = parser("x", &config);
        let err = p.expect(TokenKind::Semicol, "Missing semicolon").unwrap_err();
        assert_eq!(err.message, "Missing semicolon");
        assert_eq!(err.help.as_deref(), Some("found 'x'"));
        assert!(err.is_syntax());
    }

    #[test]
    fn lexical_errors_are_named() {
        let config = Config::default();
        let mut p = parser("$", &config);
        let err = p.expect(TokenKind::Ident, "Missing identifier").unwrap_err();
        assert_eq!(err.message, "Unrecognized Input Pattern: '$'");
    }

    #[test]
    fn double_pushback_is_internal() {
        let config = Config::default();
        let mut p = parser("a b", &config);
        let a = p.next();
        let b = p.next();
        p.push_back(b).unwrap();
        let err = p.push_back(a).unwrap_err();
        assert_eq!(err.code, "E_INTERNAL");
    }

    #[test]
    fn recover_only_while_discarding() {
        let config = Config::default();
        let mut p = parser("", &config);
        let err = SadalError::reference_error("Undeclared variable: y", 1);
        assert!(p.recover(err.clone()).is_err());

        p.discard = 1;
        assert_eq!(p.recover(err).unwrap(), Value::Error);
        assert!(p.recover(SadalError::syntax_error("Missing operand", 1)).is_err());
    }

    #[test]
    fn uninitialized_variables_are_reported() {
        let config = Config::default();
        let mut p = parser("", &config);
        p.state.symbols.declare("n", ScalarType::Integer);
        let tok = Token::new(TokenKind::Ident, "n", 4);
        assert_eq!(p.variable(&tok).unwrap_err().message, "Uninitialized variable: n");

        let other = Token::new(TokenKind::Ident, "m", 4);
        assert_eq!(p.variable(&other).unwrap_err().message, "Undeclared variable: m");
    }
}
