/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
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

use crate::lexer::token::TokenKind;

/// Classifies a word as a **reserved SADAL keyword**.
///
/// Keywords are matched case-insensitively, so `procedure`, `PROCEDURE`
/// and `Procedure` all produce `TokenKind::Procedure`. The boolean literals
/// `true` and `false` are reserved words as well and come back as
/// `TokenKind::BConst`.
///
/// # Parameters
/// - `word`: The identifier-shaped text extracted from source code.
///
/// # Returns
/// - `Some(kind)` if the word is reserved.
/// - `None` if the word should be treated as an identifier.
///
/// # SADAL Examples
/// ```text
/// begin    -> Some(Begin)
/// Float    -> Some(Float)
/// REAL     -> Some(Float)
/// total    -> None
/// ```
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_lowercase().as_str() {
        "procedure" => TokenKind::Procedure,
        "is" => TokenKind::Is,
        "begin" => TokenKind::Begin,
        "end" => TokenKind::End,
        "if" => TokenKind::If,
        "elsif" => TokenKind::Elsif,
        "else" => TokenKind::Else,
        "then" => TokenKind::Then,
        "put" => TokenKind::Put,
        "putline" => TokenKind::PutLine,
        "get" => TokenKind::Get,

        "integer" => TokenKind::Integer,
        "float" | "real" => TokenKind::Float,
        "boolean" => TokenKind::Boolean,
        "string" => TokenKind::String,
        "character" => TokenKind::Character,

        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "mod" => TokenKind::Mod,

        "true" | "false" => TokenKind::BConst,

        _ => return None,
    };

    Some(kind)
}
