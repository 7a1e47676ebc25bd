/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     statements.rs
 * Purpose:  Statement productions: assignment, PUT/PUTLINE, GET and IF.
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

use std::io;

use log::debug;

use crate::console::{parse_boolean, parse_integer, parse_real};
use crate::error::{PResult, SadalError};
use crate::lexer::{Token, TokenKind, TokenSource};
use crate::parser::parser::Parser;
use crate::symbols::ScalarType;
use crate::value::Value;

impl<'a, S: TokenSource> Parser<'a, S> {
    /// StmtList ::= Stmt { Stmt }
    ///
    /// Stops in front of `END`, `ELSIF` or `ELSE`.
    pub(crate) fn stmt_list(&mut self) -> PResult<()> {
        self.stmt()?;

        loop {
            let tok = self.next();
            let done = matches!(tok.kind, TokenKind::End | TokenKind::Elsif | TokenKind::Else);
            self.push_back(tok)?;

            if done {
                return Ok(());
            }
            self.stmt()?;
        }
    }

    /// Stmt ::= AssignStmt | PrintStmt | GetStmt | IfStmt
    pub(crate) fn stmt(&mut self) -> PResult<()> {
        let tok = self.next();

        match tok.kind {
            TokenKind::Put | TokenKind::PutLine => self.print_stmt(tok),
            TokenKind::Ident => self.assign_stmt(tok),
            TokenKind::Get => self.get_stmt(tok),
            TokenKind::If => self.if_stmt(tok),
            _ => Err(self.unexpected(
                &tok,
                "Invalid statement: Expected assignment, print, get, or if",
            )),
        }
    }

    /// AssignStmt ::= Var := Expr ;
    ///
    /// The value is stored before the terminating `;` is checked.
    fn assign_stmt(&mut self, target: Token) -> PResult<()> {
        let declared = self.declared_type(&target)?;
        let op = self.expect(TokenKind::Assop, "Missing assignment operator :=")?;

        let value = self.expr()?;
        self.check_type(declared, &value, "Type mismatch in assignment", op.line)?;
        self.state.env.bind(&target.lexeme, value);

        self.expect(TokenKind::Semicol, "Missing semicolon at end of assignment")?;
        Ok(())
    }

    /// PrintStmt ::= (PUT | PUTLINE) ( Expr ) ;
    fn print_stmt(&mut self, keyword: Token) -> PResult<()> {
        self.expect(TokenKind::LParen, "Missing left parenthesis")?;
        let value = self.expr()?;
        self.expect(TokenKind::RParen, "Missing right parenthesis")?;
        self.expect(TokenKind::Semicol, "Missing semicolon at end of statement")?;

        let text = value.to_string();
        let written = if keyword.is(TokenKind::PutLine) {
            self.console.write_line(&text)
        } else {
            self.console.write_str(&text)
        };
        written.map_err(|err| self.output_error(err, keyword.line))
    }

    /// GetStmt ::= GET ( Var ) ;
    ///
    /// Reads one value shaped by the variable's declared type.
    fn get_stmt(&mut self, keyword: Token) -> PResult<()> {
        self.expect(TokenKind::LParen, "Missing left parenthesis")?;
        let target = self.expect(TokenKind::Ident, "Invalid variable in GET statement")?;
        let declared = self.declared_type(&target)?;
        self.expect(TokenKind::RParen, "Missing right parenthesis")?;
        self.expect(TokenKind::Semicol, "Missing semicolon")?;

        let value = self.read_input(declared, keyword.line)?;
        self.state.env.bind(&target.lexeme, value);
        Ok(())
    }

    fn read_input(&mut self, declared: ScalarType, line: usize) -> PResult<Value> {
        let io_error =
            |err: io::Error| SadalError::runtime_error(format!("Error during input operation: {}", err), line);
        let end_of_input = || SadalError::runtime_error("Unexpected end of input", line);
        let invalid = |message: &str| SadalError::runtime_error(message, line);

        // Prompts written with PUT must be visible before blocking on input.
        self.console.flush().map_err(|err| self.output_error(err, line))?;

        match declared {
            ScalarType::Character => {
                let ch = self.console.read_char().map_err(io_error)?;
                ch.map(Value::Char).ok_or_else(end_of_input)
            }
            ScalarType::String => {
                let text = self.console.read_line_rest().map_err(io_error)?;
                text.map(Value::String).ok_or_else(end_of_input)
            }
            _ => {
                let word = self
                    .console
                    .read_word()
                    .map_err(io_error)?
                    .ok_or_else(end_of_input)?;

                match declared {
                    ScalarType::Integer => parse_integer(&word)
                        .map(Value::Integer)
                        .ok_or_else(|| invalid("Invalid integer input")),
                    ScalarType::Float => parse_real(&word)
                        .map(Value::Real)
                        .ok_or_else(|| invalid("Invalid float input")),
                    _ => parse_boolean(&word)
                        .map(Value::Bool)
                        .ok_or_else(|| invalid("Invalid boolean input - must be 'true' or 'false'")),
                }
            }
        }
    }

    /// IfStmt ::= IF Expr THEN StmtList { ELSIF Expr THEN StmtList }
    ///            [ ELSE StmtList ] END IF ;
    ///
    /// Exactly one branch runs. Every other branch is skipped token by
    /// token, including the conditions of the ELSIF parts that follow the
    /// branch that ran.
    fn if_stmt(&mut self, keyword: Token) -> PResult<()> {
        let mut fired = self.branch("IF")?;

        loop {
            let tok = self.next();
            match tok.kind {
                TokenKind::Elsif if fired => self.skip_branch()?,
                TokenKind::Elsif => fired = self.branch("ELSIF")?,
                TokenKind::Else => {
                    if fired {
                        self.skip_branch()?;
                    } else {
                        debug!("ELSE branch taken (line {})", tok.line);
                        self.stmt_list()?;
                    }
                    self.expect(TokenKind::End, "Missing END after IF statement")?;
                    break;
                }
                TokenKind::End => break,
                _ => return Err(self.unexpected(&tok, "Missing END after IF statement")),
            }
        }

        self.expect(TokenKind::If, "Missing IF after END")?;
        self.expect(TokenKind::Semicol, "Missing semicolon at end of IF statement")?;
        debug!("IF statement from line {} complete", keyword.line);
        Ok(())
    }

    /// `Expr THEN StmtList` of an IF or ELSIF part whose condition gets
    /// evaluated. Returns whether the branch ran.
    fn branch(&mut self, keyword: &str) -> PResult<bool> {
        let condition = self.expr()?;
        let line = self.cursor.line();

        let taken = condition.as_bool().ok_or_else(|| {
            SadalError::runtime_error(format!("{} condition must be boolean", keyword), line)
        })?;

        self.expect(TokenKind::Then, &format!("Missing THEN after {} condition", keyword))?;

        if taken {
            debug!("{} branch taken (line {})", keyword, line);
            self.stmt_list()?;
        } else {
            self.skip_branch()?;
        }
        Ok(taken)
    }

    /// Skips tokens up to the `ELSIF`, `ELSE` or `END` that closes the
    /// current branch, leaving that token in the cursor. Nested
    /// `IF ... END IF` pairs are skipped whole.
    fn skip_branch(&mut self) -> PResult<()> {
        let mut depth = 0usize;

        loop {
            let tok = self.next();
            match tok.kind {
                TokenKind::If => depth += 1,
                TokenKind::End | TokenKind::Elsif | TokenKind::Else if depth == 0 => {
                    debug!("skipped branch up to '{}' (line {})", tok.lexeme, tok.line);
                    return self.push_back(tok);
                }
                TokenKind::End => {
                    self.expect(TokenKind::If, "Missing IF after END")?;
                    depth -= 1;
                }
                TokenKind::Done | TokenKind::Error => {
                    return Err(SadalError::syntax_error(
                        "Unexpected end of IF statement",
                        tok.line,
                    ))
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::Console;
    use crate::lexer::Lexer;
    use crate::state::InterpreterState;

    struct Run {
        result: PResult<()>,
        output: String,
        state: InterpreterState,
    }

    /// Runs a statement list terminated by `END` against `input`, with the
    /// given variables declared.
    fn exec(src: &str, input: &str, decls: &[(&str, ScalarType)]) -> Run {
        let config = Config::default();
        let mut out = Vec::new();
        let (result, state) = {
            let console = Console::new(input.as_bytes(), &mut out);
            let mut parser = Parser::new(Lexer::new(src), console, &config);
            for (name, ty) in decls {
                parser.state.symbols.declare(name, *ty);
            }
            let result = parser.stmt_list();
            (result, parser.into_state())
        };
        Run {
            result,
            output: String::from_utf8(out).unwrap(),
            state,
        }
    }

    fn run(src: &str) -> Run {
        exec(src, "", &[("n", ScalarType::Integer), ("b", ScalarType::Boolean)])
    }

    #[test]
    fn put_and_putline() {
        let r = run("PUT(1 + 1); PUT(\" \"); PUTLINE(2.5); PUTLINE('c'); PUT(true); END");
        assert!(r.result.is_ok());
        assert_eq!(r.output, "2 2.5\nc\ntrue");
    }

    #[test]
    fn assignment_checks_the_declared_type() {
        let r = run("n := 4; n := n * 2; END");
        assert!(r.result.is_ok());
        assert_eq!(r.state.env.get("n"), Some(&Value::Integer(8)));

        let r = run("n := 1.0; END");
        assert_eq!(r.result.unwrap_err().message, "Type mismatch in assignment");
        assert!(!r.state.env.is_bound("n"));
    }

    #[test]
    fn assignment_commits_before_semicolon() {
        let r = run("n := 3 END");
        assert_eq!(
            r.result.unwrap_err().message,
            "Missing semicolon at end of assignment"
        );
        assert_eq!(r.state.env.get("n"), Some(&Value::Integer(3)));
    }

    #[test]
    fn assignment_to_undeclared_name() {
        let r = run("m := 1; END");
        assert_eq!(r.result.unwrap_err().message, "Undeclared variable: m");
    }

    #[test]
    fn earlier_statements_keep_their_effects() {
        let r = run("n := 1; PUT(n); n := 1 / 0; n := 5; END");
        assert_eq!(
            r.result.unwrap_err().message,
            "Run-Time Error-Illegal division by zero"
        );
        assert_eq!(r.output, "1");
        assert_eq!(r.state.env.get("n"), Some(&Value::Integer(1)));
    }

    #[test]
    fn invalid_statement() {
        let r = run("THEN; END");
        assert_eq!(
            r.result.unwrap_err().message,
            "Invalid statement: Expected assignment, print, get, or if"
        );
    }

    #[test]
    fn if_takes_exactly_one_branch() {
        let src = "IF n > 5 THEN PUT(\"big\"); ELSIF n > 2 THEN PUT(\"mid\"); \
                   ELSE PUT(\"small\"); END IF; END";
        for (value, expected) in [("9", "big"), ("3", "mid"), ("1", "small")] {
            let program = format!("GET(n); {}", src);
            let r = exec(&program, value, &[("n", ScalarType::Integer)]);
            assert!(r.result.is_ok(), "{:?}", r.result);
            assert_eq!(r.output, expected);
        }
    }

    #[test]
    fn skipped_branches_are_not_evaluated() {
        let r = run("b := true; IF b THEN PUT(1); ELSIF 1 / 0 THEN PUT(2); ELSE n := 1 / 0; END IF; END");
        assert!(r.result.is_ok(), "{:?}", r.result);
        assert_eq!(r.output, "1");
        assert!(!r.state.env.is_bound("n"));
    }

    #[test]
    fn nested_ifs_are_skipped_whole() {
        let r = run(
            "b := false; \
             IF b THEN IF true THEN PUT(1); END IF; PUT(2); ELSE PUT(3); END IF; END",
        );
        assert!(r.result.is_ok(), "{:?}", r.result);
        assert_eq!(r.output, "3");
    }

    #[test]
    fn if_without_else() {
        let r = run("b := false; IF b THEN PUT(1); END IF; PUT(2); END");
        assert!(r.result.is_ok());
        assert_eq!(r.output, "2");
    }

    #[test]
    fn condition_must_be_boolean() {
        let r = run("IF 1 THEN PUT(1); END IF; END");
        assert_eq!(
            r.result.unwrap_err().message,
            "Run-Time Error-IF condition must be boolean"
        );
    }

    #[test]
    fn unterminated_if() {
        let r = run("b := false; IF b THEN PUT(1);");
        assert_eq!(r.result.unwrap_err().message, "Unexpected end of IF statement");
    }

    #[test]
    fn only_end_if_may_follow_else() {
        let r = run("b := true; IF b THEN PUT(1); ELSE PUT(2); ELSIF b THEN PUT(3); END IF; END");
        assert_eq!(r.result.unwrap_err().message, "Missing END after IF statement");
    }

    #[test]
    fn end_must_close_with_if() {
        let r = run("b := true; IF b THEN PUT(1); END; END");
        assert_eq!(r.result.unwrap_err().message, "Missing IF after END");
    }

    #[test]
    fn get_reads_by_declared_type() {
        let decls = [
            ("i", ScalarType::Integer),
            ("r", ScalarType::Float),
            ("b", ScalarType::Boolean),
            ("c", ScalarType::Character),
            ("s", ScalarType::String),
        ];
        let r = exec(
            "GET(i); GET(r); GET(b); GET(c); GET(s); END",
            "42 7\nTRUE  z\nhello world\n",
            &decls,
        );
        assert!(r.result.is_ok(), "{:?}", r.result);
        assert_eq!(r.state.env.get("i"), Some(&Value::Integer(42)));
        assert_eq!(r.state.env.get("r"), Some(&Value::Real(7.0)));
        assert_eq!(r.state.env.get("b"), Some(&Value::Bool(true)));
        assert_eq!(r.state.env.get("c"), Some(&Value::Char('z')));
        assert_eq!(r.state.env.get("s"), Some(&Value::String("hello world".into())));
    }

    #[test]
    fn bad_input_is_a_runtime_error() {
        let r = exec("GET(i); END", "abc\n", &[("i", ScalarType::Integer)]);
        let err = r.result.unwrap_err();
        assert_eq!(err.message, "Run-Time Error-Invalid integer input");
        assert_eq!(err.code, "E_RUNTIME");

        let r = exec("GET(b); END", "yes\n", &[("b", ScalarType::Boolean)]);
        assert!(r.result.is_err());
    }

    #[test]
    fn end_of_input_during_get() {
        let r = exec("GET(i); END", "", &[("i", ScalarType::Integer)]);
        assert_eq!(r.result.unwrap_err().message, "Run-Time Error-Unexpected end of input");
    }

    #[test]
    fn get_requires_a_declared_variable() {
        let r = exec("GET(x); END", "1\n", &[]);
        assert_eq!(r.result.unwrap_err().message, "Undeclared variable: x");
    }
}
