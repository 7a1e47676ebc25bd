/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     parser.rs
 * Purpose:  The fused parser/evaluator: state it carries and the program-level
 *                     productions.
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

use crate::config::Config;
use crate::console::Console;
use crate::error::{PResult, SadalError};
use crate::lexer::{TokenKind, TokenSource};
use crate::parser::cursor::TokenCursor;
use crate::state::InterpreterState;

/// The SADAL recursive-descent parser/evaluator.
///
/// There is no syntax tree. Each production recognizes its piece of the
/// grammar and executes it on the spot: expressions produce a
/// [`Value`](crate::value::Value), declarations and assignments commit
/// into [`InterpreterState`], and PUT/GET talk to the [`Console`].
///
/// The grammar itself is spread over extension modules (`declarations`,
/// `statements`, `expressions`, `helpers`) via additional `impl Parser`
/// blocks.
pub struct Parser<'a, S: TokenSource> {
    /// Token stream with one token of pushback.
    pub(crate) cursor: TokenCursor<S>,

    /// Symbol table, environment and diagnostics of this run.
    pub(crate) state: InterpreterState,

    /// Input for GET, output for PUT/PUTLINE.
    pub(crate) console: Console<'a>,

    pub(crate) config: &'a Config,

    /// How many short-circuited operands are currently being parsed for
    /// their syntax only.
    pub(crate) discard: usize,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    pub fn new(source: S, console: Console<'a>, config: &'a Config) -> Self {
        Self {
            cursor: TokenCursor::new(source),
            state: InterpreterState::new(),
            console,
            config,
            discard: 0,
        }
    }

    /// Consumes the parser, handing back everything the run committed.
    pub fn into_state(self) -> InterpreterState {
        self.state
    }

    /// Flushes program output written so far.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.console.flush()
    }

    /// Program ::= PROCEDURE ProcName IS ProcBody
    ///
    /// Runs a whole program. On success the closing report (optional
    /// declaration listing and the banner) is written after the program's
    /// own output.
    ///
    /// # Errors
    /// The first error raised anywhere in the program, unchanged.
    pub fn program(&mut self) -> PResult<()> {
        self.expect(TokenKind::Procedure, "Incorrect compilation file.")?;
        let name = self.expect(TokenKind::Ident, "Missing Procedure Name.")?;
        debug!("procedure '{}'", name.lexeme);
        self.state.procedure = Some(name.lexeme.clone());

        self.expect(TokenKind::Is, "Missing IS Keyword")?;
        self.procedure_body(&name.lexeme)?;

        self.report_success(name.line)
    }

    /// ProcBody ::= DeclPart BEGIN StmtList END ProcName ;
    fn procedure_body(&mut self, name: &str) -> PResult<()> {
        self.decl_part()?;
        self.expect(TokenKind::Begin, "Missing BEGIN keyword for procedure body")?;
        self.stmt_list()?;
        self.expect(TokenKind::End, "Missing END keyword")?;

        let closing = self.next();
        if !closing.is(TokenKind::Ident) || closing.lexeme != name {
            return Err(SadalError::reference_error(
                "Procedure name mismatch in closing end identifier.",
                closing.line,
            )
            .with_help(format!("the procedure was opened as '{}'", name)));
        }

        self.expect(TokenKind::Semicol, "Missing semicolon at end of procedure")?;
        Ok(())
    }

    fn report_success(&mut self, line: usize) -> PResult<()> {
        let mut report = String::new();

        if self.config.list_declarations {
            report.push_str("Declared Variables:\n");
            report.push_str(&self.state.symbols.names().join(", "));
            report.push('\n');
        }

        report.push('\n');
        report.push_str(&self.config.success_banner);
        report.push('\n');

        self.console
            .write_str(&report)
            .and_then(|_| self.console.flush())
            .map_err(|err| self.output_error(err, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::value::Value;
    use std::io;

    fn run(src: &str, config: &Config) -> (PResult<()>, String, InterpreterState) {
        let mut out = Vec::new();
        let (result, state) = {
            let console = Console::new(io::empty(), &mut out);
            let mut parser = Parser::new(Lexer::new(src), console, config);
            let result = parser.program();
            (result, parser.into_state())
        };
        (result, String::from_utf8(out).unwrap(), state)
    }

    #[test]
    fn program_prints_and_reports() {
        let (result, out, state) = run(
            "PROCEDURE P IS X : INTEGER := 3; BEGIN PUT(X + 2); END P;",
            &Config::default(),
        );
        assert!(result.is_ok());
        assert_eq!(out, "5\n(DONE)\n");
        assert_eq!(state.procedure.as_deref(), Some("P"));
    }

    #[test]
    fn closing_name_must_match() {
        let (result, out, state) = run(
            "PROCEDURE P IS X : INTEGER; BEGIN X := 1; END Q;",
            &Config::default(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.message, "Procedure name mismatch in closing end identifier.");
        assert_eq!(out, "");
        assert_eq!(state.env.get("X"), Some(&Value::Integer(1)));
    }

    #[test]
    fn closing_name_is_case_sensitive() {
        let (result, _, _) = run(
            "procedure Prog is x : integer; begin x := 1; end prog;",
            &Config::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn declaration_listing_is_sorted() {
        let config = Config {
            list_declarations: true,
            ..Config::default()
        };
        let (result, out, _) = run(
            "PROCEDURE P IS z, a : INTEGER; m : STRING; BEGIN a := 1; END P;",
            &config,
        );
        assert!(result.is_ok());
        assert_eq!(out, "Declared Variables:\na, m, z\n\n(DONE)\n");
    }

    #[test]
    fn custom_banner() {
        let config = Config {
            success_banner: "ok".to_string(),
            ..Config::default()
        };
        let (_, out, _) = run(
            "PROCEDURE P IS x : INTEGER; BEGIN PUTLINE(\"hi\"); END P;",
            &config,
        );
        assert_eq!(out, "hi\n\nok\n");
    }

    #[test]
    fn missing_procedure_keyword() {
        let (result, _, _) = run("P IS BEGIN END P;", &Config::default());
        assert_eq!(result.unwrap_err().message, "Incorrect compilation file.");
    }
}
