/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     token.rs
 * Purpose:  Defines the fundamental lexical token types produced by the SADAL
 *           lexer and consumed by the parser/evaluator.
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


/// Represents the **category of a lexical token** in the SADAL language.
///
/// The set is closed: every token the lexer can produce falls into exactly
/// one of these kinds, and the parser dispatches on nothing else.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser/Evaluator → Output
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Procedure / declaration / statement keywords
    Procedure,
    Is,
    Begin,
    End,
    If,
    Elsif,
    Else,
    Then,
    Put,
    PutLine,
    Get,

    // Type keywords
    Integer,
    Float,
    Boolean,
    String,
    Character,

    // Word operators
    And,
    Or,
    Not,
    Mod,

    /// A user-defined name. The lexeme is kept verbatim.
    Ident,

    // Literal classes
    IConst,
    FConst,
    SConst,
    CConst,
    BConst,

    // Arithmetic / string operators
    Plus,
    Minus,
    Mult,
    Div,
    Exp,
    Concat,

    /// `:=`
    Assop,

    // Relational operators
    Eq,
    Neq,
    LThan,
    Lte,
    GThan,
    Gte,

    // Punctuation
    Comma,
    Semicol,
    Colon,
    LParen,
    RParen,
    Dot,

    /// End of input. Once reached, the lexer keeps yielding it.
    Done,

    /// Unrecognized input. The lexeme carries the offending text.
    Error,
}

impl TokenKind {
    /// Returns `true` for the five type keywords accepted in a declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Boolean
                | TokenKind::String
                | TokenKind::Character
        )
    }

    /// Returns `true` for the relational operators of a `Relation`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::LThan
                | TokenKind::Lte
                | TokenKind::GThan
                | TokenKind::Gte
        )
    }
}

/// Represents a **single lexical token** produced by the SADAL lexer.
///
/// Tokens are immutable once produced; the parser only reads them, and at
/// most one of them is ever held back for re-reading.
///
/// # Example Tokens
/// ```text
/// PROCEDURE →  { kind: Procedure, lexeme: "PROCEDURE", line: 1 }
/// count     →  { kind: Ident,     lexeme: "count",     line: 2 }
/// 42        →  { kind: IConst,    lexeme: "42",        line: 2 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    ///
    /// String and character literals are stored without their quotes.
    pub lexeme: String,

    /// The 1-based line number where this token appeared.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Checks the token's kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
