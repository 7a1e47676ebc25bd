/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     declarations.rs
 * Purpose:  Declaration part: variable declarations with optional initializers.
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

use crate::error::{PResult, SadalError};
use crate::lexer::{Token, TokenKind, TokenSource};
use crate::parser::parser::Parser;
use crate::symbols::ScalarType;

impl<'a, S: TokenSource> Parser<'a, S> {
    /// DeclPart ::= DeclStmt { DeclStmt }
    ///
    /// Repeats until the next token is `BEGIN` or `END`, which is left in
    /// the cursor for the procedure body.
    pub(crate) fn decl_part(&mut self) -> PResult<()> {
        self.decl_stmt()?;

        loop {
            let tok = self.next();
            let done = matches!(tok.kind, TokenKind::Begin | TokenKind::End);
            self.push_back(tok)?;

            if done {
                return Ok(());
            }
            self.decl_stmt()?;
        }
    }

    /// DeclStmt ::= IDENT {, IDENT} : Type [:= Expr] ;
    ///
    /// Names are committed one at a time once the whole statement has
    /// parsed. A redefinition stops the commit at that name; the names
    /// before it stay declared.
    pub(crate) fn decl_stmt(&mut self) -> PResult<()> {
        let first = self.declared_name("Missing identifier in declaration")?;
        let line = first.line;
        let mut names = vec![first.lexeme];

        loop {
            let tok = self.next();
            if !tok.is(TokenKind::Comma) {
                self.push_back(tok)?;
                break;
            }

            let ident = self.declared_name("Missing identifier after comma")?;
            if names.contains(&ident.lexeme) {
                return Err(SadalError::reference_error(
                    format!("Duplicate identifier in declaration: {}", ident.lexeme),
                    ident.line,
                ));
            }
            names.push(ident.lexeme);
        }

        self.expect(TokenKind::Colon, "Missing colon in declaration")?;

        let ty_tok = self.next();
        let ty = match ScalarType::from_token(ty_tok.kind) {
            Some(ty) => ty,
            None => return Err(self.unexpected(&ty_tok, "Invalid type specification")),
        };

        let tok = self.next();
        let init = if tok.is(TokenKind::Assop) {
            let value = self.expr()?;
            self.check_type(ty, &value, "Type mismatch in initialization", tok.line)?;
            Some(value)
        } else {
            self.push_back(tok)?;
            None
        };

        self.expect(TokenKind::Semicol, "Missing semicolon at end of declaration")?;

        for name in &names {
            if !self.state.symbols.declare(name, ty) {
                return Err(SadalError::reference_error(
                    format!("Variable redefinition: {}", name),
                    line,
                ));
            }
            debug!("declared {} : {}", name, ty);

            if let Some(value) = &init {
                self.state.env.bind(name, value.clone());
            }
        }

        Ok(())
    }

    /// One name of a declaration's identifier list. Type keywords are
    /// called out, since they are the usual mistake in that position.
    fn declared_name(&mut self, message: &str) -> PResult<Token> {
        let tok = self.next();
        if tok.kind.is_type_keyword() {
            return Err(SadalError::syntax_error(
                format!("Invalid name for an Identifier: {}", tok.lexeme),
                tok.line,
            ));
        }
        if !tok.is(TokenKind::Ident) {
            return Err(self.unexpected(&tok, message));
        }
        Ok(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::Console;
    use crate::lexer::Lexer;
    use crate::state::InterpreterState;
    use crate::value::Value;
    use std::io;

    fn declare(src: &str) -> (PResult<()>, InterpreterState) {
        let config = Config::default();
        let mut parser = Parser::new(Lexer::new(src), Console::new(io::empty(), io::sink()), &config);
        let result = parser.decl_part();
        (result, parser.into_state())
    }

    #[test]
    fn shared_initializer() {
        let (result, state) = declare("a, b : INTEGER := 2 * 3; c : STRING; BEGIN");
        assert!(result.is_ok());
        assert_eq!(state.symbols.len(), 3);
        assert_eq!(state.env.get("a"), Some(&Value::Integer(6)));
        assert_eq!(state.env.get("b"), Some(&Value::Integer(6)));
        assert!(!state.env.is_bound("c"));
        assert_eq!(state.symbols.lookup("c"), Some(ScalarType::String));
    }

    #[test]
    fn every_scalar_type() {
        let (result, state) = declare(
            "i : INTEGER := 1; r : REAL := 1.5; f : FLOAT; b : BOOLEAN := TRUE; \
             c : CHARACTER := 'x'; s : STRING := \"hi\"; BEGIN",
        );
        assert!(result.is_ok());
        assert_eq!(state.symbols.lookup("r"), Some(ScalarType::Float));
        assert_eq!(state.symbols.lookup("f"), Some(ScalarType::Float));
        assert_eq!(state.env.get("c"), Some(&Value::Char('x')));
    }

    #[test]
    fn duplicate_within_one_declaration_commits_nothing() {
        let (result, state) = declare("x, y, x : INTEGER; BEGIN");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Duplicate identifier in declaration: x");
        assert!(state.symbols.is_empty());
    }

    #[test]
    fn redefinition_commits_earlier_names() {
        let (result, state) = declare("a : INTEGER; b, a, c : INTEGER := 1; BEGIN");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Variable redefinition: a");
        assert_eq!(state.symbols.len(), 2);
        assert!(state.symbols.contains("b"));
        assert!(!state.symbols.contains("c"));
        assert_eq!(state.env.get("b"), Some(&Value::Integer(1)));
        assert!(!state.env.is_bound("a"));
    }

    #[test]
    fn redefinition_keeps_the_first_type() {
        let (result, state) = declare("x : INTEGER; x : REAL; BEGIN");
        assert!(result.is_err());
        assert_eq!(state.symbols.len(), 1);
        assert_eq!(state.symbols.lookup("x"), Some(ScalarType::Integer));
    }

    #[test]
    fn initializer_kind_must_match_exactly() {
        let (result, state) = declare("r : REAL := 1; BEGIN");
        let err = result.unwrap_err();
        assert_eq!(err.message, "Type mismatch in initialization");
        assert_eq!(err.code, "E_TYPE");
        assert!(state.symbols.is_empty());
    }

    #[test]
    fn syntax_errors() {
        let message = |src: &str| declare(src).0.unwrap_err().message;
        assert_eq!(message("x INTEGER; BEGIN"), "Missing colon in declaration");
        assert_eq!(message("x : NUMBER; BEGIN"), "Invalid type specification");
        assert_eq!(message("x : INTEGER BEGIN"), "Missing semicolon at end of declaration");
        assert_eq!(message("x, : INTEGER; BEGIN"), "Missing identifier after comma");
        assert_eq!(message("BEGIN"), "Missing identifier in declaration");
        assert_eq!(message("a, string : STRING; BEGIN"), "Invalid name for an Identifier: string");
    }

    #[test]
    fn stops_at_end_as_well_as_begin() {
        let (result, state) = declare("x : INTEGER; END");
        assert!(result.is_ok());
        assert_eq!(state.symbols.len(), 1);
    }
}
