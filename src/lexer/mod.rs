/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     lexer/mod.rs
 * Purpose:  Root module for SADAL lexical analysis.
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

/// Token kinds and the `Token` record.
pub mod token;

/// Reserved word classification.
pub mod keywords;

/// The pull-based scanner.
pub mod lexer;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// A source of tokens for the parser/evaluator.
///
/// Implementors hand out the next token on every call and keep yielding
/// `TokenKind::Done` once the input is exhausted.
pub trait TokenSource {
    /// Produces the next token.
    fn next_token(&mut self) -> Token;

    /// The line the source is currently positioned on.
    fn line(&self) -> usize;
}
