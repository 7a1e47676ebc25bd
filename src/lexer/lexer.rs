/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     lexer.rs
 * Purpose:  Pull-based scanner turning SADAL source text into tokens, one
 *           token per request.
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

use log::trace;

use crate::lexer::keywords::keyword_kind;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::TokenSource;

/// The SADAL lexer.
///
/// Unlike a batch tokenizer, the lexer hands out one token per call to
/// [`Lexer::next_token`]. The parser/evaluator drives it strictly left to
/// right, so tokens are only produced as far as execution has progressed.
pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
}

impl Lexer {
    /// Creates a new SADAL lexer instance from raw source code.
    ///
    /// # Returns
    /// A `Lexer` with its cursor at position `0` and its line counter at `1`.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
        }
    }

    /// The line the scanner is currently positioned on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scans and returns the next token from the source.
    ///
    /// # Behavior
    /// - Skips whitespace and `--` comments, counting newlines
    /// - Recognizes the two-character operators `**`, `/=`, `:=`, `<=`, `>=`
    /// - Returns `TokenKind::Done` at end of input, on every call from then on
    /// - Returns `TokenKind::Error` for anything it cannot classify
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.is_at_end() {
                return Token::new(TokenKind::Done, "", self.line);
            }

            let ch = self.advance();

            let token = match ch {
                // Whitespace
                ' ' | '\r' | '\t' => continue,
                '\n' => {
                    self.line += 1;
                    continue;
                }

                // Comment or minus
                '-' => {
                    if self.match_char('-') {
                        while self.peek() != '\n' && !self.is_at_end() {
                            self.advance();
                        }
                        continue;
                    }
                    self.symbol(TokenKind::Minus, "-")
                }

                '+' => self.symbol(TokenKind::Plus, "+"),
                '&' => self.symbol(TokenKind::Concat, "&"),
                '=' => self.symbol(TokenKind::Eq, "="),
                ',' => self.symbol(TokenKind::Comma, ","),
                ';' => self.symbol(TokenKind::Semicol, ";"),
                '(' => self.symbol(TokenKind::LParen, "("),
                ')' => self.symbol(TokenKind::RParen, ")"),
                '.' => self.symbol(TokenKind::Dot, "."),

                // Multi-char operators
                '*' => {
                    if self.match_char('*') {
                        self.symbol(TokenKind::Exp, "**")
                    } else {
                        self.symbol(TokenKind::Mult, "*")
                    }
                }
                '/' => {
                    if self.match_char('=') {
                        self.symbol(TokenKind::Neq, "/=")
                    } else {
                        self.symbol(TokenKind::Div, "/")
                    }
                }
                ':' => {
                    if self.match_char('=') {
                        self.symbol(TokenKind::Assop, ":=")
                    } else {
                        self.symbol(TokenKind::Colon, ":")
                    }
                }
                '<' => {
                    if self.match_char('=') {
                        self.symbol(TokenKind::Lte, "<=")
                    } else {
                        self.symbol(TokenKind::LThan, "<")
                    }
                }
                '>' => {
                    if self.match_char('=') {
                        self.symbol(TokenKind::Gte, ">=")
                    } else {
                        self.symbol(TokenKind::GThan, ">")
                    }
                }

                // Literals
                '"' => self.string_literal(),
                '\'' => self.char_literal(),
                c if c.is_ascii_digit() => self.number(),

                // Identifiers / keywords
                c if c.is_ascii_alphabetic() => self.identifier(),

                other => Token::new(TokenKind::Error, other.to_string(), self.line),
            };

            trace!("lexed {:?} {:?} at line {}", token.kind, token.lexeme, token.line);
            return token;
        }
    }

    fn symbol(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, self.line)
    }

    /// Parses a double-quoted string literal.
    ///
    /// Strings may not span lines. A newline or end of input before the
    /// closing quote yields an `Error` token carrying the partial text.
    fn string_literal(&mut self) -> Token {
        let start = self.current;

        while self.peek() != '"' && self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }

        if self.peek() != '"' {
            let partial: String = self.chars[start - 1..self.current].iter().collect();
            return Token::new(TokenKind::Error, partial, self.line);
        }

        let value: String = self.chars[start..self.current].iter().collect();
        self.advance(); // closing quote

        Token::new(TokenKind::SConst, value, self.line)
    }

    /// Parses a single-quoted character literal such as `'x'`.
    fn char_literal(&mut self) -> Token {
        let ch = self.peek();

        if self.is_at_end() || ch == '\n' {
            return Token::new(TokenKind::Error, "'", self.line);
        }

        if self.peek_at(1) != '\'' {
            return Token::new(TokenKind::Error, format!("'{}", ch), self.line);
        }

        self.advance();
        self.advance(); // closing quote

        Token::new(TokenKind::CConst, ch.to_string(), self.line)
    }

    /// Parses an identifier or keyword token.
    ///
    /// # Language Rules
    /// - Keywords are defined in `keywords.rs` and ignore case
    /// - Identifier lexemes are kept verbatim; names are case-sensitive
    fn identifier(&mut self) -> Token {
        let start = self.current - 1;

        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();
        let kind = keyword_kind(&text).unwrap_or(TokenKind::Ident);

        Token::new(kind, text, self.line)
    }

    /// Parses an integer or real literal.
    ///
    /// # Examples
    /// - `42`      → `IConst`
    /// - `3.14`    → `FConst`
    /// - `1.5E-3`  → `FConst`
    /// - `1..3`    → `IConst` (the dots are left for the range operator)
    fn number(&mut self) -> Token {
        let start = self.current - 1;
        let mut kind = TokenKind::IConst;

        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_at(1).is_ascii_digit() {
            kind = TokenKind::FConst;
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }

            if matches!(self.peek(), 'e' | 'E') {
                let signed = matches!(self.peek_at(1), '+' | '-');
                let digit_at = if signed { 2 } else { 1 };

                if self.peek_at(digit_at).is_ascii_digit() {
                    for _ in 0..=digit_at {
                        self.advance();
                    }
                    while self.peek().is_ascii_digit() {
                        self.advance();
                    }
                }
            }
        }

        let value: String = self.chars[start..self.current].iter().collect();
        Token::new(kind, value, self.line)
    }

    /// Conditionally consumes the next character.
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    /// Advances the lexer cursor by one character.
    ///
    /// # Safety
    /// Caller must ensure EOF has not been reached.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        ch
    }

    /// Returns the current character without consuming it, or `'\0'` at EOF.
    fn peek(&self) -> char {
        self.peek_at(0)
    }

    /// Returns the character `offset` places ahead, or `'\0'` past the end.
    fn peek_at(&self, offset: usize) -> char {
        self.chars
            .get(self.current + offset)
            .copied()
            .unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }

    fn line(&self) -> usize {
        self.line
    }
}
