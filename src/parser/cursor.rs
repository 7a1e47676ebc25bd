/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     cursor.rs
 * Purpose:  Token cursor with a single-slot pushback buffer.
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

use crate::error::PushbackError;
use crate::lexer::{Token, TokenSource};

/// Wraps a [`TokenSource`] with room for exactly one pushed-back token.
///
/// Every production that needs to look ahead reads a token and, when it
/// does not belong to it, hands it back. Nested productions never need
/// two tokens of lookahead at once, so a second pushback while one token
/// is still buffered means the grammar code itself is broken.
pub struct TokenCursor<S: TokenSource> {
    source: S,
    pending: Option<Token>,
}

impl<S: TokenSource> TokenCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    /// Returns the buffered token if there is one, otherwise pulls the
    /// next token from the source.
    pub fn next(&mut self) -> Token {
        let tok = match self.pending.take() {
            Some(tok) => tok,
            None => self.source.next_token(),
        };
        trace!("token {:?} '{}' (line {})", tok.kind, tok.lexeme, tok.line);
        tok
    }

    /// Buffers `tok` so the next call to [`TokenCursor::next`] returns it.
    ///
    /// # Errors
    /// Fails, leaving the buffer untouched, if a token is already buffered.
    pub fn push_back(&mut self, tok: Token) -> Result<(), PushbackError> {
        if let Some(buffered) = &self.pending {
            return Err(PushbackError {
                buffered: buffered.lexeme.clone(),
                rejected: tok.lexeme,
            });
        }
        trace!("push back {:?} '{}'", tok.kind, tok.lexeme);
        self.pending = Some(tok);
        Ok(())
    }

    /// The line of the buffered token, or the source's current line.
    pub fn line(&self) -> usize {
        match &self.pending {
            Some(tok) => tok.line,
            None => self.source.line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenKind};

    #[test]
    fn pushed_back_token_is_returned_first() {
        let mut cursor = TokenCursor::new(Lexer::new("x := 1;"));
        let first = cursor.next();
        assert_eq!(first.kind, TokenKind::Ident);

        cursor.push_back(first.clone()).unwrap();
        assert_eq!(cursor.next(), first);
        assert_eq!(cursor.next().kind, TokenKind::Assop);
    }

    #[test]
    fn second_pushback_is_rejected() {
        let mut cursor = TokenCursor::new(Lexer::new("a b"));
        let a = cursor.next();
        let b = cursor.next();
        cursor.push_back(b).unwrap();

        let err = cursor.push_back(a).unwrap_err();
        assert_eq!(err.buffered, "b");
        assert_eq!(err.rejected, "a");
        assert_eq!(cursor.next().lexeme, "b");
    }

    #[test]
    fn done_repeats_at_end() {
        let mut cursor = TokenCursor::new(Lexer::new(""));
        assert_eq!(cursor.next().kind, TokenKind::Done);
        assert_eq!(cursor.next().kind, TokenKind::Done);
    }

    #[test]
    fn line_follows_the_buffered_token() {
        let mut cursor = TokenCursor::new(Lexer::new("a\n\nb"));
        cursor.next();
        let b = cursor.next();
        assert_eq!(b.line, 3);
        cursor.push_back(b).unwrap();
        assert_eq!(cursor.line(), 3);
    }
}
